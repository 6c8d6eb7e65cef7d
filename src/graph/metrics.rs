//! Graph-level summary metrics (size, degree, node classes).

use std::collections::BTreeMap;

use petgraph::algo::connected_components;
use serde::Serialize;

use crate::graph::LexicalGraph;
use crate::types::NodeClass;

/// Summary metrics for health-checking the graph.
#[derive(Debug, Default, Clone, Serialize)]
pub struct GraphMetrics {
    /// Total number of nodes.
    pub num_nodes: usize,
    /// Total number of edges.
    pub num_edges: usize,
    /// Average degree of the graph.
    pub avg_degree: f32,
    /// Nodes without any edge.
    pub isolated_nodes: usize,
    /// Number of connected components.
    pub components: usize,
    /// Node count per class name.
    pub nodes_per_class: BTreeMap<String, usize>,
}

impl GraphMetrics {
    /// Compute metrics for the given graph.
    pub fn compute(graph: &LexicalGraph) -> Self {
        let inner = graph.inner();
        let num_nodes = inner.node_count();
        let num_edges = inner.edge_count();

        let avg_degree = if num_nodes > 0 {
            (2 * num_edges) as f32 / num_nodes as f32
        } else {
            0.0
        };

        let isolated_nodes = inner
            .node_indices()
            .filter(|&idx| inner.neighbors(idx).next().is_none())
            .count();

        let mut nodes_per_class = BTreeMap::new();
        for node in graph.nodes() {
            *nodes_per_class.entry(class_name(node.class)).or_insert(0) += 1;
        }

        Self {
            num_nodes,
            num_edges,
            avg_degree,
            isolated_nodes,
            components: connected_components(inner),
            nodes_per_class,
        }
    }
}

fn class_name(class: NodeClass) -> String {
    match class {
        NodeClass::Frame => "frame".into(),
        NodeClass::LexicalUnit => "lexical_unit".into(),
        NodeClass::Lemma(lang) => format!("lemma_{}", lang.name().to_lowercase()),
        NodeClass::Sense => "sense".into(),
        NodeClass::FeatureSet => "feature_set".into(),
        NodeClass::Synset => "synset".into(),
    }
}
