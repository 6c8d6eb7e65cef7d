//! Link edge definition.

use serde::{Deserialize, Serialize};

use crate::types::{AttrValue, Attributes};

/// Undirected edge between two lexical nodes.
///
/// Edges carry no relation type; the relation follows from the classes of the
/// endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkEdge {
    /// Display attributes (provenance label, colour, tooltip).
    pub attributes: Attributes,
}

impl LinkEdge {
    /// An edge without attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// An edge with the given attributes.
    pub fn with_attributes(attributes: Attributes) -> Self {
        Self { attributes }
    }

    /// An edge tagged with a provenance label.
    pub fn with_provenance(label: &str) -> Self {
        let mut attributes = Attributes::new();
        attributes.insert("provenance".into(), AttrValue::from(label));
        Self { attributes }
    }
}
