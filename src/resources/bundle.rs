//! The resource bundle: every record collection one build consumes.

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::pos::ReferencePos;
use crate::resources::records::{
    CorpusLemmaRecord, FrameRecord, SenseRecord, SynsetRecord, TranslationRecord,
};

/// Sense count of a lemma in the reference inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceEntry {
    /// Lemma.
    pub lemma: String,
    /// Reference tag.
    pub pos: ReferencePos,
    /// Number of senses.
    pub senses: usize,
}

/// Records from all resources, as handed over by the resource readers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceBundle {
    /// English frames with their lexical units.
    pub frames: Vec<FrameRecord>,
    /// English to Dutch translations.
    pub translations: Vec<TranslationRecord>,
    /// Frame-annotated Dutch lemmas.
    pub corpus_annotations: Vec<CorpusLemmaRecord>,
    /// Dutch senses.
    pub senses: Vec<SenseRecord>,
    /// Synsets over Dutch senses.
    pub synsets: Vec<SynsetRecord>,
    /// Feature set to top frame labels.
    pub feature_set_mapping: BTreeMap<String, Vec<String>>,
    /// Frame inheritance as (parent, child) labels.
    pub frame_inheritance: Vec<(String, String)>,
    /// Reference inventory sense counts.
    pub reference_polysemy: Vec<ReferenceEntry>,
}

impl ResourceBundle {
    /// Read a bundle from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Index senses by identifier.
    pub fn senses_by_id(&self) -> HashMap<&str, &SenseRecord> {
        self.senses
            .iter()
            .map(|s| (s.sense_id.as_str(), s))
            .collect()
    }

    /// Index synsets by identifier.
    pub fn synsets_by_id(&self) -> HashMap<&str, &SynsetRecord> {
        self.synsets
            .iter()
            .map(|s| (s.synset_id.as_str(), s))
            .collect()
    }
}
