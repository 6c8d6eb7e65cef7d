//! Synonym admission policies for the synonym-expansion variant.

use crate::resources::SynonymRecord;

/// Decides whether a synonym of a candidate sense is linked as well.
pub trait SynonymPolicy {
    /// Whether `synonym` of `anchor_sense_id` is admitted. The anchor itself
    /// never reaches the policy.
    fn admits(&self, anchor_sense_id: &str, synonym: &SynonymRecord) -> bool;
}

/// Admits synonyms whose provenance carries a manual-curation marker.
#[derive(Debug, Clone)]
pub struct ManualCurationPolicy {
    marker: String,
}

impl ManualCurationPolicy {
    /// Policy keyed on `marker`, e.g. `cdb2.2_Manual`.
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }
}

impl SynonymPolicy for ManualCurationPolicy {
    fn admits(&self, _anchor_sense_id: &str, synonym: &SynonymRecord) -> bool {
        synonym.provenance_set.contains(&self.marker)
    }
}

/// Admits nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSynonyms;

impl SynonymPolicy for NoSynonyms {
    fn admits(&self, _anchor_sense_id: &str, _synonym: &SynonymRecord) -> bool {
        false
    }
}

impl<F> SynonymPolicy for F
where
    F: Fn(&str, &SynonymRecord) -> bool,
{
    fn admits(&self, anchor_sense_id: &str, synonym: &SynonymRecord) -> bool {
        self(anchor_sense_id, synonym)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synonym(markers: &[&str]) -> SynonymRecord {
        SynonymRecord {
            sense_id: "poes-n-1".into(),
            provenance_set: markers.iter().map(|m| m.to_string()).collect(),
            provenance_label: String::new(),
        }
    }

    #[test]
    fn manual_marker_is_required() {
        let policy = ManualCurationPolicy::new("cdb2.2_Manual");
        assert!(policy.admits("kat-n-1", &synonym(&["cdb2.2_Manual", "other"])));
        assert!(!policy.admits("kat-n-1", &synonym(&["cdb2.2_Auto"])));
        assert!(!NoSynonyms.admits("kat-n-1", &synonym(&["cdb2.2_Manual"])));
    }

    #[test]
    fn closures_are_policies() {
        let policy = |_: &str, s: &SynonymRecord| s.sense_id.starts_with("poes");
        assert!(policy.admits("kat-n-1", &synonym(&[])));
    }
}
