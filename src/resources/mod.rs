//! Resource records and the bundle they arrive in.
//!
//! Parsing the underlying resources is left to external readers; this module
//! only defines the records they hand over.

pub mod bundle;
pub mod records;

pub use bundle::{ReferenceEntry, ResourceBundle};
pub use records::{
    CorpusLemmaRecord, FrameRecord, LexicalUnitRecord, SenseRecord, SynonymRecord, SynsetRecord,
    TranslationRecord,
};

use crate::types::Attributes;

/// Exports the display attributes of a record.
///
/// The returned bag is attached to the record's node as-is.
pub trait HoverInfo {
    /// Attribute bag for display.
    fn hover_info(&self) -> Attributes;
}
