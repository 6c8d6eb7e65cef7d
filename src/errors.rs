//! Error types for lexlink-core.

use thiserror::Error;

/// Top-level error type for graph building, querying and linking.
///
/// Every variant is fatal for the running stage: the pipeline stops instead
/// of writing a snapshot. Lookup misses are not errors and never show up here.
#[derive(Debug, Error)]
pub enum LinkError {
    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A resource record lacks a field required by an enabled rule.
    #[error("schema error: {0}")]
    Schema(String),

    /// A part-of-speech tag with no mapping to the shared tagset.
    #[error("unmapped part of speech '{tag}' ({tagset})")]
    UnmappedPos {
        /// The offending tag.
        tag: String,
        /// Name of the tagset the tag was read from.
        tagset: &'static str,
    },

    /// A lemma-pos with zero senses reached the polysemy classifier.
    #[error("zero polysemy for {0}")]
    ZeroPolysemy(String),

    /// The same identifier was inserted with conflicting class or part of speech.
    #[error("identifier collision on '{id}': {reason}")]
    IdCollision {
        /// Node identifier.
        id: String,
        /// What conflicted.
        reason: String,
    },

    /// An edge referenced a node that was never added.
    #[error("edge references unknown node '{0}'")]
    UnknownNode(String),

    /// A post-condition of a stage did not hold.
    #[error("consistency violation: {0}")]
    Consistency(String),

    /// I/O error wrapper.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serde JSON serialization/deserialization error.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Binary snapshot encoding error.
    #[error("snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),
}

/// Result type for lexlink operations.
pub type Result<T> = std::result::Result<T, LinkError>;
