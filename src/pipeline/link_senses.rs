//! Orchestrates: profiles -> candidate links -> materialized sense links.

use tracing::info;

use crate::{
    config::LinkConfig,
    errors::Result,
    graph::LexicalGraph,
    lexicon::FrameLexicon,
    link::{
        CandidateCollector, LinkMaterializer, ManualCurationPolicy, MaterializationReport,
        NoSynonyms, SynonymPolicy,
    },
    polysemy::{m2m_index, PolysemyProfiles, SenseInventory, StaticReferenceInventory},
    resources::ResourceBundle,
};

/// High-level pipeline: link Dutch senses to lexical units.
pub struct SenseLinkPipeline<'a> {
    config: LinkConfig,
    policy: Option<&'a dyn SynonymPolicy>,
}

impl<'a> std::fmt::Debug for SenseLinkPipeline<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SenseLinkPipeline")
            .field("config", &self.config)
            .field("policy", &self.policy.map(|_| "<SynonymPolicy>"))
            .finish()
    }
}

impl<'a> SenseLinkPipeline<'a> {
    /// Create a new pipeline with the given config.
    ///
    /// Synonyms, when enabled, are admitted by the manual-curation policy.
    pub fn new(config: LinkConfig) -> Self {
        Self {
            config,
            policy: None,
        }
    }

    /// Replace the synonym policy.
    pub fn with_synonym_policy(mut self, policy: &'a dyn SynonymPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Consume the graph and lexicon and return their linked versions.
    pub fn run(
        &self,
        graph: LexicalGraph,
        lexicon: FrameLexicon,
        bundle: &ResourceBundle,
        profiles: &[PolysemyProfiles],
    ) -> Result<(LexicalGraph, FrameLexicon, MaterializationReport)> {
        self.config.validate()?;
        info!(started = %chrono::Utc::now().to_rfc3339(), "sense linking");
        let options = &self.config.link;

        let dutch = SenseInventory::dutch(&bundle.senses, &options.pos);
        let m2m = m2m_index(profiles);
        let reference = StaticReferenceInventory::new(&bundle.reference_polysemy);
        let manual = ManualCurationPolicy::new(options.manual_curation_marker.clone());
        let policy: &dyn SynonymPolicy = match (options.include_synonyms, self.policy) {
            (false, _) => &NoSynonyms,
            (true, Some(custom)) => custom,
            (true, None) => &manual,
        };

        let mut collector = CandidateCollector::new(options, bundle, &dutch, &m2m, policy);
        if options.use_reference_polysemy {
            collector = collector.with_reference(&reference);
        }
        let candidates = collector.collect(&lexicon)?;

        let result = LinkMaterializer::new(bundle).run(graph, lexicon, &candidates)?;
        info!(finished = %chrono::Utc::now().to_rfc3339(), "sense linking");
        Ok(result)
    }
}
