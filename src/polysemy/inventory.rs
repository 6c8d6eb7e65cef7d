//! Sense inventories: lemma-pos → set of sense identifiers, per resource.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::lexicon::FrameLexicon;
use crate::pos::{Pos, ReferencePos};
use crate::resources::{ReferenceEntry, SenseRecord};
use crate::types::LemmaPos;

/// Index of one resource's senses by lemma-pos.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SenseInventory {
    index: BTreeMap<LemmaPos, BTreeSet<String>>,
}

impl SenseInventory {
    /// Create an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one sense of a lemma-pos.
    pub fn insert(&mut self, key: LemmaPos, sense_id: impl Into<String>) {
        self.index.entry(key).or_default().insert(sense_id.into());
    }

    /// Dutch senses restricted to a part-of-speech subset.
    ///
    /// Senses whose tag has no coarse counterpart cannot belong to the subset
    /// and are skipped.
    pub fn dutch(senses: &[SenseRecord], pos: &[Pos]) -> Self {
        let mut inventory = Self::new();
        for sense in senses {
            let Ok(mapped) = Pos::from_sense_lexicon(&sense.pos) else {
                debug!(sense = %sense.sense_id, tag = %sense.pos, "tag outside the coarse tagset");
                continue;
            };
            if pos.contains(&mapped) {
                inventory.insert(LemmaPos::new(sense.lemma.clone(), mapped), sense.sense_id.clone());
            }
        }
        inventory
    }

    /// English lexical units grouped by (lexeme, pos); each lexical unit is
    /// one frame-specific sense.
    pub fn english(lexicon: &FrameLexicon) -> Self {
        let mut inventory = Self::new();
        for lu in lexicon.lexical_units() {
            inventory.insert(lu.lemma_pos(), lu.id.clone());
        }
        inventory
    }

    /// Sense identifiers of a lemma-pos.
    pub fn senses(&self, key: &LemmaPos) -> Option<&BTreeSet<String>> {
        self.index.get(key)
    }

    /// Number of senses; zero for an unknown lemma-pos.
    pub fn polysemy(&self, key: &LemmaPos) -> usize {
        self.index.get(key).map_or(0, BTreeSet::len)
    }

    /// Number of lemma-pos keys.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the inventory is empty.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// Third-party sense counts used by the strict monosemy mode.
pub trait ReferenceInventory {
    /// Number of senses of `lemma` with tag `pos`.
    fn sense_count(&self, lemma: &str, pos: ReferencePos) -> usize;
}

/// Reference inventory backed by a precomputed table.
#[derive(Debug, Clone, Default)]
pub struct StaticReferenceInventory {
    counts: HashMap<(String, ReferencePos), usize>,
}

impl StaticReferenceInventory {
    /// Build from reference entries; later duplicates overwrite earlier ones.
    pub fn new(entries: &[ReferenceEntry]) -> Self {
        let counts = entries
            .iter()
            .map(|e| ((e.lemma.clone(), e.pos), e.senses))
            .collect();
        Self { counts }
    }
}

impl ReferenceInventory for StaticReferenceInventory {
    fn sense_count(&self, lemma: &str, pos: ReferencePos) -> usize {
        self.counts
            .get(&(lemma.to_string(), pos))
            .copied()
            .unwrap_or(0)
    }
}
