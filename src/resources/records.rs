//! Typed records produced by the resource readers.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::pos::Pos;
use crate::resources::HoverInfo;
use crate::types::{AttrValue, Attributes};

/// A frame of the English frame lexicon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameRecord {
    /// Frame label, e.g. `Animals`.
    pub label: String,
    /// Frame definition.
    #[serde(default)]
    pub definition: Option<String>,
    /// Lexical units evoking this frame.
    #[serde(default)]
    pub lexical_units: Vec<LexicalUnitRecord>,
}

/// A lexical unit: a frame-specific (lexeme, pos) pairing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexicalUnitRecord {
    /// Numeric lexical unit id.
    pub id: u64,
    /// Lexeme, multi-word lexemes joined by a space.
    pub lexeme: String,
    /// Coarse part of speech.
    pub pos: Pos,
}

/// English to Dutch translations of one English lemma-pos.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRecord {
    /// English lemma.
    pub english: String,
    /// Part of speech of the English lemma.
    pub pos: Pos,
    /// Dutch translations.
    pub dutch: Vec<String>,
}

/// A Dutch lemma annotated with a frame in a corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusLemmaRecord {
    /// Frame label.
    pub frame: String,
    /// Dutch lemma.
    pub lemma: String,
    /// Part of speech, when the annotation has one.
    #[serde(default)]
    pub pos: Option<Pos>,
}

/// A sense of the Dutch sense lexicon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SenseRecord {
    /// Sense identifier, unique within the sense lexicon.
    pub sense_id: String,
    /// Lemma.
    pub lemma: String,
    /// Tag in the sense lexicon's tagset (`noun`, `verb`, ...).
    pub pos: String,
    /// Feature set tag, if any.
    #[serde(default)]
    pub feature_set: Option<String>,
    /// Synset this sense belongs to, if any.
    #[serde(default)]
    pub synset_id: Option<String>,
    /// Gloss.
    #[serde(default)]
    pub definition: Option<String>,
}

/// A member of a synset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynonymRecord {
    /// Sense identifier of the synonym.
    pub sense_id: String,
    /// Provenance markers of the synset membership.
    #[serde(default)]
    pub provenance_set: BTreeSet<String>,
    /// Human-readable provenance.
    #[serde(default)]
    pub provenance_label: String,
}

/// A synset: senses considered synonymous.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynsetRecord {
    /// Synset identifier.
    pub synset_id: String,
    /// Member senses.
    pub synonyms: Vec<SynonymRecord>,
}

impl HoverInfo for SenseRecord {
    fn hover_info(&self) -> Attributes {
        let mut attrs = Attributes::new();
        attrs.insert("sense_id".into(), self.sense_id.as_str().into());
        attrs.insert("lemma".into(), self.lemma.as_str().into());
        attrs.insert("pos".into(), self.pos.as_str().into());
        attrs.insert("feature_set".into(), self.feature_set.clone().into());
        attrs.insert("synset_id".into(), self.synset_id.clone().into());
        attrs.insert("definition".into(), self.definition.clone().into());
        attrs
    }
}

impl HoverInfo for SynsetRecord {
    fn hover_info(&self) -> Attributes {
        let mut attrs = Attributes::new();
        attrs.insert("synset_id".into(), self.synset_id.as_str().into());
        attrs.insert(
            "synonyms".into(),
            AttrValue::List(self.synonyms.iter().map(|s| s.sense_id.clone()).collect()),
        );
        attrs
    }
}
