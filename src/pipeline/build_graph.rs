//! Orchestrates: resource bundle -> frame lexicon -> LexicalGraph.

use tracing::info;

use crate::{
    config::LinkConfig,
    errors::Result,
    graph::{GraphBuilder, GraphMetrics, LexicalGraph},
    lexicon::FrameLexicon,
    resources::ResourceBundle,
};

/// High-level pipeline: bundle -> lexicon -> graph.
#[derive(Debug)]
pub struct GraphBuildPipeline {
    config: LinkConfig,
}

impl GraphBuildPipeline {
    /// Create a new pipeline with the given config.
    pub fn new(config: LinkConfig) -> Self {
        Self { config }
    }

    /// Assemble the frame lexicon and build the graph from it.
    pub fn run(&self, bundle: &ResourceBundle) -> Result<(LexicalGraph, FrameLexicon)> {
        self.config.validate()?;
        info!(started = %chrono::Utc::now().to_rfc3339(), "graph build");

        let lexicon = FrameLexicon::assemble(bundle, &self.config)?;
        let graph = GraphBuilder::new(&self.config).build(bundle, &lexicon)?;

        let metrics = GraphMetrics::compute(&graph);
        info!(
            finished = %chrono::Utc::now().to_rfc3339(),
            nodes = metrics.num_nodes,
            edges = metrics.num_edges,
            avg_degree = metrics.avg_degree,
            "graph build"
        );
        Ok((graph, lexicon))
    }
}
