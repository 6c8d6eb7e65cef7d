//! Common core types: node classes, naming conventions, lemma-pos keys and
//! opaque attribute bags.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::Hasher;

use serde::{Deserialize, Serialize};
use twox_hash::XxHash64;

use crate::pos::Pos;

/// Identifier prefix of lexical-unit nodes.
pub const LU_PREFIX: &str = "LU-";
/// Identifier prefix of sense nodes.
pub const SENSE_PREFIX: &str = "(pm)RBN-";
/// Every frame prefix starts with this.
pub const FRAME_PREFIX_ROOT: &str = "(pm)fn";
/// Identifier prefix of feature-set nodes.
pub const FEATURE_SET_PREFIX: &str = "(fs)";
/// Identifier prefix of synset nodes.
pub const SYNSET_PREFIX: &str = "(syn)";

/// Language of a lemma node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Language {
    /// Dutch.
    Dutch,
    /// English.
    English,
}

impl Language {
    /// Name used inside node identifiers.
    pub fn name(self) -> &'static str {
        match self {
            Language::Dutch => "Dutch",
            Language::English => "English",
        }
    }

    /// Identifier prefix of lemma nodes in this language, e.g. `(Dutch)`.
    pub fn prefix(self) -> String {
        format!("({})", self.name())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Node class, recoverable from the identifier alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeClass {
    /// Frame of the English frame lexicon.
    Frame,
    /// Lexical unit of the English frame lexicon.
    LexicalUnit,
    /// Lemma or lemma-pos of a given language.
    Lemma(Language),
    /// Sense of the Dutch sense lexicon.
    Sense,
    /// Feature set bridging senses to frames.
    FeatureSet,
    /// Synset of the synonym layer.
    Synset,
}

impl NodeClass {
    /// Classify a node identifier. `None` when no convention matches.
    pub fn of(id: &str) -> Option<Self> {
        if id.starts_with(LU_PREFIX) {
            Some(NodeClass::LexicalUnit)
        } else if id.starts_with(SENSE_PREFIX) {
            Some(NodeClass::Sense)
        } else if id.starts_with(FRAME_PREFIX_ROOT) {
            Some(NodeClass::Frame)
        } else if id.starts_with(FEATURE_SET_PREFIX) {
            Some(NodeClass::FeatureSet)
        } else if id.starts_with(SYNSET_PREFIX) {
            Some(NodeClass::Synset)
        } else if id.starts_with("(Dutch)") {
            Some(NodeClass::Lemma(Language::Dutch))
        } else if id.starts_with("(English)") {
            Some(NodeClass::Lemma(Language::English))
        } else {
            None
        }
    }
}

/// Builders for node identifiers.
pub mod naming {
    use super::*;

    /// `{rdf_prefix}:{label}`
    pub fn frame(rdf_prefix: &str, label: &str) -> String {
        format!("{rdf_prefix}:{label}")
    }

    /// `LU-{id}`
    pub fn lexical_unit(id: u64) -> String {
        format!("{LU_PREFIX}{id}")
    }

    /// `({Language}){lemma}.{POS}`, or `({Language}){lemma}` without a pos.
    pub fn lemma(language: Language, lemma: &str, pos: Option<Pos>) -> String {
        match pos {
            Some(pos) => format!("({}){}.{}", language.name(), lemma, pos.tag()),
            None => format!("({}){}", language.name(), lemma),
        }
    }

    /// `(pm)RBN-{sense id}`
    pub fn sense(sense_id: &str) -> String {
        format!("{SENSE_PREFIX}{sense_id}")
    }

    /// `(fs){feature set}`
    pub fn feature_set(value: &str) -> String {
        format!("{FEATURE_SET_PREFIX}{value}")
    }

    /// `(syn){synset id}`
    pub fn synset(synset_id: &str) -> String {
        format!("{SYNSET_PREFIX}{synset_id}")
    }
}

/// A normalized (surface form, coarse part of speech) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LemmaPos {
    /// Surface form.
    pub lemma: String,
    /// Coarse part of speech.
    pub pos: Pos,
}

impl LemmaPos {
    /// Create a new key.
    pub fn new(lemma: impl Into<String>, pos: Pos) -> Self {
        Self {
            lemma: lemma.into(),
            pos,
        }
    }
}

impl fmt::Display for LemmaPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.lemma, self.pos)
    }
}

/// Content-addressed identifier of a lemma-pos in one language.
///
/// Stable across runs and independent of insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LemmaPosId(pub String);

impl LemmaPosId {
    /// Hash `(language, lemma, pos)` into an identifier like `Dutch-3f2a...`.
    pub fn compute(language: Language, key: &LemmaPos) -> Self {
        let mut hasher = XxHash64::with_seed(0);
        hasher.write(language.name().as_bytes());
        hasher.write(&[0x1f]);
        hasher.write(key.lemma.as_bytes());
        hasher.write(&[0x1f]);
        hasher.write(key.pos.tag().as_bytes());
        Self(format!("{}-{:016x}", language.name(), hasher.finish()))
    }
}

impl fmt::Display for LemmaPosId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A display attribute value. Opaque to every algorithm in this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttrValue {
    /// Free text.
    Text(String),
    /// Boolean flag.
    Flag(bool),
    /// Integer.
    Number(i64),
    /// List of strings.
    List(Vec<String>),
    /// Explicitly absent value.
    Null,
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Text(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Text(s)
    }
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(AttrValue::Null)
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Text(s) => f.write_str(s),
            AttrValue::Flag(b) => write!(f, "{b}"),
            AttrValue::Number(n) => write!(f, "{n}"),
            AttrValue::List(items) => write!(f, "[{}]", items.join(", ")),
            AttrValue::Null => f.write_str("None"),
        }
    }
}

/// Opaque key/value bag attached to nodes and edges.
pub type Attributes = BTreeMap<String, AttrValue>;
