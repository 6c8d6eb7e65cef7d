//! Part-of-speech tagsets and the mappings between them.
//!
//! The frame lexicon's tagset is the shared coarse tagset: every lemma-pos key
//! carries a [`Pos`]. Sense-lexicon tags and reference-inventory tags are
//! mapped onto it before any cross-resource comparison.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{LinkError, Result};

/// Coarse part of speech shared by all resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Pos {
    /// Noun.
    #[serde(rename = "N")]
    Noun,
    /// Verb.
    #[serde(rename = "V")]
    Verb,
    /// Adjective.
    #[serde(rename = "A")]
    Adjective,
    /// Adverb.
    #[serde(rename = "ADV")]
    Adverb,
    /// Article.
    #[serde(rename = "ART")]
    Article,
    /// Conjunction.
    #[serde(rename = "C")]
    Conjunction,
    /// Idiom.
    #[serde(rename = "IDIO")]
    Idiom,
    /// Interjection.
    #[serde(rename = "INTJ")]
    Interjection,
    /// Numeral.
    #[serde(rename = "NUM")]
    Numeral,
    /// Preposition.
    #[serde(rename = "PREP")]
    Preposition,
    /// Pronoun.
    #[serde(rename = "PRON")]
    Pronoun,
    /// Subordinating conjunction.
    #[serde(rename = "SCON")]
    Subordinator,
}

/// Tag in the reference (WordNet-style) inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferencePos {
    /// `n`
    #[serde(rename = "n")]
    Noun,
    /// `v`
    #[serde(rename = "v")]
    Verb,
    /// `a`
    #[serde(rename = "a")]
    Adjective,
    /// `r`
    #[serde(rename = "r")]
    Adverb,
}

impl Pos {
    /// The tag as it appears in node identifiers.
    pub fn tag(self) -> &'static str {
        match self {
            Pos::Noun => "N",
            Pos::Verb => "V",
            Pos::Adjective => "A",
            Pos::Adverb => "ADV",
            Pos::Article => "ART",
            Pos::Conjunction => "C",
            Pos::Idiom => "IDIO",
            Pos::Interjection => "INTJ",
            Pos::Numeral => "NUM",
            Pos::Preposition => "PREP",
            Pos::Pronoun => "PRON",
            Pos::Subordinator => "SCON",
        }
    }

    /// Map a sense-lexicon tag (`noun`, `verb`, `adjective`, `adverb`).
    pub fn from_sense_lexicon(tag: &str) -> Result<Self> {
        match tag {
            "noun" => Ok(Pos::Noun),
            "verb" => Ok(Pos::Verb),
            "adjective" => Ok(Pos::Adjective),
            "adverb" => Ok(Pos::Adverb),
            other => Err(LinkError::UnmappedPos {
                tag: other.to_string(),
                tagset: "sense lexicon",
            }),
        }
    }

    /// Reference tag for this part of speech, `None` for closed classes.
    pub fn reference_pos(self) -> Option<ReferencePos> {
        match self {
            Pos::Noun => Some(ReferencePos::Noun),
            Pos::Verb => Some(ReferencePos::Verb),
            Pos::Adjective => Some(ReferencePos::Adjective),
            Pos::Adverb => Some(ReferencePos::Adverb),
            _ => None,
        }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Pos {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<Self> {
        let pos = match s {
            "N" => Pos::Noun,
            "V" => Pos::Verb,
            "A" => Pos::Adjective,
            "ADV" => Pos::Adverb,
            "ART" => Pos::Article,
            "C" => Pos::Conjunction,
            "IDIO" => Pos::Idiom,
            "INTJ" => Pos::Interjection,
            "NUM" => Pos::Numeral,
            "PREP" => Pos::Preposition,
            "PRON" => Pos::Pronoun,
            "SCON" => Pos::Subordinator,
            other => {
                return Err(LinkError::UnmappedPos {
                    tag: other.to_string(),
                    tagset: "frame lexicon",
                })
            }
        };
        Ok(pos)
    }
}
