#![forbid(unsafe_code)]
#![deny(missing_debug_implementations, missing_docs, rust_2018_idioms)]

//! # lexlink-core
//!
//! Core library for linking a Dutch sense lexicon to an English frame lexicon:
//! - typed lexical graph built from independently toggleable linkage rules
//! - bounded simple-path queries between prefix/suffix-selected node sets
//! - cross-lingual polysemy profiles (m2m, m2p, p2m, p2p)
//! - 1:1 sense → lexical unit links for monosemous translation pairs
//!
//! Runs are deterministic batch stages over versioned snapshots.

pub mod config;
pub mod errors;
pub mod graph;
/// Frame lexicon registry.
pub mod lexicon;
/// Sense linking.
pub mod link;
/// High-level pipelines.
pub mod pipeline;
pub mod polysemy;
pub mod pos;
/// Path queries and display extraction.
pub mod query;
pub mod resources;
/// Persistence layer.
pub mod snapshot;
pub mod types;

pub use config::LinkConfig;
pub use errors::LinkError;
pub use graph::LexicalGraph;
pub use lexicon::FrameLexicon;
pub use pipeline::{GraphBuildPipeline, PolysemyProfilePipeline, SenseLinkPipeline};
pub use pos::Pos;
pub use resources::ResourceBundle;
pub use snapshot::SnapshotStore;
pub use types::{LemmaPos, LemmaPosId, NodeClass};
