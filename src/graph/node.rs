//! Lexical node definition.

use serde::{Deserialize, Serialize};

use crate::errors::{LinkError, Result};
use crate::types::{Attributes, LemmaPos, NodeClass};

/// A node in the lexical graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexicalNode {
    /// Globally unique identifier.
    pub id: String,
    /// Class derived from the identifier.
    pub class: NodeClass,
    /// Lemma-pos key for lemma, lexical-unit and sense nodes.
    pub lemma_pos: Option<LemmaPos>,
    /// Display attributes supplied by the owning resource.
    pub attributes: Attributes,
}

impl LexicalNode {
    /// Create a node; fails when the identifier follows no naming convention.
    pub fn new(id: impl Into<String>, attributes: Attributes) -> Result<Self> {
        let id = id.into();
        let class = NodeClass::of(&id)
            .ok_or_else(|| LinkError::Schema(format!("unrecognized node identifier '{id}'")))?;
        Ok(Self {
            id,
            class,
            lemma_pos: None,
            attributes,
        })
    }

    /// Attach the lemma-pos key.
    pub fn with_lemma_pos(mut self, key: LemmaPos) -> Self {
        self.lemma_pos = Some(key);
        self
    }
}
