//! Orchestrates: graph + sense inventories -> polysemy profiles per part of
//! speech.

use tracing::info;

use crate::{
    config::LinkConfig,
    errors::Result,
    graph::LexicalGraph,
    lexicon::FrameLexicon,
    polysemy::{PolysemyProfiles, SenseInventory},
    resources::ResourceBundle,
};

/// High-level pipeline: one profile set per configured part of speech.
#[derive(Debug)]
pub struct PolysemyProfilePipeline {
    config: LinkConfig,
}

impl PolysemyProfilePipeline {
    /// Create a new pipeline with the given config.
    pub fn new(config: LinkConfig) -> Self {
        Self { config }
    }

    /// Compute profiles for every part of speech in `link.pos`.
    pub fn run(
        &self,
        graph: &LexicalGraph,
        lexicon: &FrameLexicon,
        bundle: &ResourceBundle,
    ) -> Result<Vec<PolysemyProfiles>> {
        self.config.validate()?;
        info!(started = %chrono::Utc::now().to_rfc3339(), "polysemy profiling");

        let dutch = SenseInventory::dutch(&bundle.senses, &self.config.link.pos);
        let english = SenseInventory::english(lexicon);

        let profiles = self
            .config
            .link
            .pos
            .iter()
            .map(|&pos| PolysemyProfiles::compute(graph, &dutch, &english, pos))
            .collect::<Result<Vec<_>>>()?;

        info!(
            finished = %chrono::Utc::now().to_rfc3339(),
            parts_of_speech = profiles.len(),
            "polysemy profiling"
        );
        Ok(profiles)
    }
}
