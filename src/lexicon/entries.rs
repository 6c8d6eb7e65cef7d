//! Entries of the frame lexicon registry.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::pos::Pos;
use crate::resources::{HoverInfo, SenseRecord};
use crate::types::{naming, AttrValue, Attributes, Language, LemmaPos, LemmaPosId};

/// Where a lemma entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LemmaProvenance {
    /// Translation of a lexical unit's lexeme.
    Translation,
    /// Frame annotation in a corpus.
    CorpusAnnotation,
}

/// Review status of a materialized sense link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkStatus {
    /// Created automatically, not reviewed.
    Created,
}

/// A Dutch sense linked to a lexical unit, with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SenseLink {
    /// Provenance label of the link.
    pub provenance: String,
    /// The linked sense.
    pub sense: SenseRecord,
    /// RFC 3339 creation time.
    pub created_at: String,
    /// Review status.
    pub status: LinkStatus,
    /// Identifier of the sense's Dutch lemma-pos.
    pub lemma_id: LemmaPosId,
}

/// A lexical unit of a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexicalUnitEntry {
    /// Node identifier (`LU-{id}`).
    pub id: String,
    /// Lexeme.
    pub lexeme: String,
    /// Part of speech.
    pub pos: Pos,
    /// Node identifier of the frame.
    pub frame_id: String,
    /// Senses linked by the materializer.
    pub linked_senses: Vec<SenseLink>,
}

impl LexicalUnitEntry {
    /// English lemma-pos key of this lexical unit.
    pub fn lemma_pos(&self) -> LemmaPos {
        LemmaPos::new(self.lexeme.clone(), self.pos)
    }
}

/// A lemma attached to a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LemmaEntry {
    /// Surface form.
    pub lemma: String,
    /// Part of speech, when known.
    pub pos: Option<Pos>,
    /// Language of the lemma.
    pub language: Language,
    /// Origin of the entry.
    pub provenance: LemmaProvenance,
    /// Lexical unit the lemma translates, for translation entries.
    pub lu_id: Option<String>,
    /// Lemma-pos identifier, once registered.
    pub lemma_pos_id: Option<LemmaPosId>,
}

impl LemmaEntry {
    /// Node identifier, e.g. `(Dutch)kat.N`.
    pub fn node_id(&self) -> String {
        naming::lemma(self.language, &self.lemma, self.pos)
    }

    /// Lemma-pos key, when the entry has a part of speech.
    pub fn lemma_pos(&self) -> Option<LemmaPos> {
        self.pos.map(|pos| LemmaPos::new(self.lemma.clone(), pos))
    }
}

/// A frame with its lexical units and lemmas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameEntry {
    /// Frame label.
    pub label: String,
    /// Node identifier.
    pub id: String,
    /// Definition.
    pub definition: Option<String>,
    /// Lexical units keyed by node identifier.
    pub lexical_units: BTreeMap<String, LexicalUnitEntry>,
    /// Lemmas from translations and corpus annotations.
    pub lemmas: Vec<LemmaEntry>,
    /// Feature sets that reach this frame.
    pub feature_set_values: BTreeSet<String>,
}

impl HoverInfo for FrameEntry {
    fn hover_info(&self) -> Attributes {
        let mut attrs = Attributes::new();
        attrs.insert("frame_label".into(), self.label.as_str().into());
        attrs.insert("definition".into(), self.definition.clone().into());
        attrs.insert(
            "feature_set_values".into(),
            AttrValue::List(self.feature_set_values.iter().cloned().collect()),
        );
        attrs
    }
}

impl HoverInfo for LexicalUnitEntry {
    fn hover_info(&self) -> Attributes {
        let mut attrs = Attributes::new();
        attrs.insert("pos".into(), self.pos.tag().into());
        attrs.insert("lemma".into(), self.lexeme.as_str().into());
        attrs.insert("frame".into(), self.frame_id.as_str().into());
        attrs
    }
}

impl HoverInfo for LemmaEntry {
    fn hover_info(&self) -> Attributes {
        lemma_hover_info(&self.lemma, self.language, self.pos)
    }
}

/// Hover attributes of a lemma node, shared by every rule that inserts one.
pub fn lemma_hover_info(lemma: &str, language: Language, pos: Option<Pos>) -> Attributes {
    let mut attrs = Attributes::new();
    attrs.insert("lemma".into(), lemma.into());
    attrs.insert("language".into(), language.name().into());
    attrs.insert("pos".into(), pos.map(|p| p.tag()).into());
    attrs
}
