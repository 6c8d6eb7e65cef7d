//! Node selectors: literal prefix plus optional suffix.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Selects nodes whose identifier starts with `prefix` and, when set, ends
/// with `suffix`. Matching is literal and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSelector {
    /// Required identifier prefix.
    pub prefix: String,
    /// Optional identifier suffix.
    pub suffix: Option<String>,
}

impl NodeSelector {
    /// Select by prefix only.
    pub fn prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: None,
        }
    }

    /// Additionally require a suffix.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// Whether `id` is selected.
    pub fn matches(&self, id: &str) -> bool {
        id.starts_with(&self.prefix)
            && self.suffix.as_deref().map_or(true, |s| id.ends_with(s))
    }
}

impl fmt::Display for NodeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.suffix {
            Some(suffix) => write!(f, "{}*{}", self.prefix, suffix),
            None => write!(f, "{}*", self.prefix),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_and_suffix_are_anchored_literally() {
        let sel = NodeSelector::prefix("(Dutch)").with_suffix(".N");
        assert!(sel.matches("(Dutch)kat.N"));
        assert!(!sel.matches("(Dutch)kat.V"));
        assert!(!sel.matches("x(Dutch)kat.N"));
        assert!(!sel.matches("(dutch)kat.N"));
    }

    #[test]
    fn no_wildcards() {
        let sel = NodeSelector::prefix("LU-*");
        assert!(!sel.matches("LU-1"));
        assert!(sel.matches("LU-*1"));
    }
}
