//! Sense linking: candidate collection for m2m translation pairs followed by
//! 1:1 materialization of sense → lexical unit edges.

pub mod candidates;
pub mod materialize;
pub mod policy;

pub use candidates::{CandidateCollector, CandidateLinks};
pub use materialize::{LinkMaterializer, MaterializationReport};
pub use policy::{ManualCurationPolicy, NoSynonyms, SynonymPolicy};
