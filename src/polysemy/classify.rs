//! Ambiguity classes and the four cross-lingual polysemy categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{LinkError, Result};

/// Ambiguity class of one lemma-pos in one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AmbiguityClass {
    /// Exactly one sense.
    Monosemous,
    /// Two or more senses.
    Polysemous,
}

impl AmbiguityClass {
    /// Class of a sense count; `None` for zero, which is outside the domain.
    pub fn of(polysemy: usize) -> Option<Self> {
        match polysemy {
            0 => None,
            1 => Some(AmbiguityClass::Monosemous),
            _ => Some(AmbiguityClass::Polysemous),
        }
    }
}

/// Polysemy profile of a (Dutch, English) lemma-pos pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PolysemyCategory {
    /// Monosemous to monosemous.
    #[serde(rename = "m2m")]
    M2m,
    /// Monosemous to polysemous.
    #[serde(rename = "m2p")]
    M2p,
    /// Polysemous to monosemous.
    #[serde(rename = "p2m")]
    P2m,
    /// Polysemous to polysemous.
    #[serde(rename = "p2p")]
    P2p,
}

impl PolysemyCategory {
    /// All categories in export order.
    pub const ALL: [PolysemyCategory; 4] = [
        PolysemyCategory::M2m,
        PolysemyCategory::M2p,
        PolysemyCategory::P2m,
        PolysemyCategory::P2p,
    ];

    /// Short name (`m2m`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            PolysemyCategory::M2m => "m2m",
            PolysemyCategory::M2p => "m2p",
            PolysemyCategory::P2m => "p2m",
            PolysemyCategory::P2p => "p2p",
        }
    }
}

impl fmt::Display for PolysemyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolysemyCategory {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<Self> {
        PolysemyCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| LinkError::Config(format!("unknown polysemy category '{s}'")))
    }
}

/// Categorize a pair of sense counts (Dutch side first).
///
/// Fails on a zero count: a lemma-pos without senses must be filtered out
/// before it reaches this point.
pub fn classify(polysemy_nl: usize, polysemy_en: usize) -> Result<PolysemyCategory> {
    let nl = AmbiguityClass::of(polysemy_nl)
        .ok_or_else(|| LinkError::ZeroPolysemy("Dutch side of the pair".into()))?;
    let en = AmbiguityClass::of(polysemy_en)
        .ok_or_else(|| LinkError::ZeroPolysemy("English side of the pair".into()))?;

    use AmbiguityClass::*;
    Ok(match (nl, en) {
        (Monosemous, Monosemous) => PolysemyCategory::M2m,
        (Monosemous, Polysemous) => PolysemyCategory::M2p,
        (Polysemous, Monosemous) => PolysemyCategory::P2m,
        (Polysemous, Polysemous) => PolysemyCategory::P2p,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truth_table() {
        assert_eq!(classify(1, 1).unwrap(), PolysemyCategory::M2m);
        assert_eq!(classify(1, 2).unwrap(), PolysemyCategory::M2p);
        assert_eq!(classify(2, 1).unwrap(), PolysemyCategory::P2m);
        assert_eq!(classify(2, 2).unwrap(), PolysemyCategory::P2p);
    }

    #[test]
    fn counts_above_two_stay_polysemous() {
        assert_eq!(classify(7, 1).unwrap(), PolysemyCategory::P2m);
        assert_eq!(classify(1, 30).unwrap(), PolysemyCategory::M2p);
        assert_eq!(classify(3, 4).unwrap(), PolysemyCategory::P2p);
    }

    #[test]
    fn zero_is_rejected_on_either_side() {
        assert!(matches!(classify(0, 1), Err(LinkError::ZeroPolysemy(_))));
        assert!(matches!(classify(2, 0), Err(LinkError::ZeroPolysemy(_))));
    }

    #[test]
    fn category_names_parse_back() {
        for c in PolysemyCategory::ALL {
            assert_eq!(c.as_str().parse::<PolysemyCategory>().unwrap(), c);
        }
        assert!("x2y".parse::<PolysemyCategory>().is_err());
    }
}
