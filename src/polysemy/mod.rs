//! Polysemy classification of Dutch/English translation pairs.

pub mod classify;
pub mod inventory;
pub mod profiles;

pub use classify::{classify, AmbiguityClass, PolysemyCategory};
pub use inventory::{ReferenceInventory, SenseInventory, StaticReferenceInventory};
pub use profiles::{m2m_index, PolysemyProfiles, TranslationPair};
