//! Lexical graph: typed nodes, undirected attributed edges, builder and metrics.

use std::collections::{BTreeSet, HashMap};

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use tracing::debug;

use crate::errors::{LinkError, Result};
use crate::types::AttrValue;

pub mod builder;
pub mod edge;
pub mod metrics;
pub mod node;
pub mod subsumption;

pub use builder::GraphBuilder;
pub use edge::LinkEdge;
pub use metrics::GraphMetrics;
pub use node::LexicalNode;

/// A simple undirected graph over lexical nodes, addressed by identifier.
///
/// Nodes must be added before any edge that references them. Parallel edges
/// collapse into one.
#[derive(Debug, Clone, Default)]
pub struct LexicalGraph {
    inner: UnGraph<LexicalNode, LinkEdge>,
    index: HashMap<String, NodeIndex>,
}

impl LexicalGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Access the underlying petgraph graph.
    pub fn inner(&self) -> &UnGraph<LexicalNode, LinkEdge> {
        &self.inner
    }

    /// Insert a node, or replace the attributes of an existing one.
    ///
    /// Re-inserting an id with a different class or lemma-pos is an
    /// identifier collision.
    pub fn add_node(&mut self, node: LexicalNode) -> Result<NodeIndex> {
        if let Some(&idx) = self.index.get(&node.id) {
            let existing = &mut self.inner[idx];
            if existing.class != node.class {
                return Err(LinkError::IdCollision {
                    id: node.id,
                    reason: format!("class {:?} vs {:?}", existing.class, node.class),
                });
            }
            if existing.lemma_pos != node.lemma_pos {
                return Err(LinkError::IdCollision {
                    id: node.id,
                    reason: format!(
                        "lemma-pos {:?} vs {:?}",
                        existing.lemma_pos, node.lemma_pos
                    ),
                });
            }
            existing.attributes = node.attributes;
            return Ok(idx);
        }

        let id = node.id.clone();
        let idx = self.inner.add_node(node);
        self.index.insert(id, idx);
        Ok(idx)
    }

    /// Insert an undirected edge between two existing nodes.
    ///
    /// Returns `true` when the edge is new. An existing edge keeps its place;
    /// non-empty attributes replace the old ones.
    pub fn add_edge(&mut self, a: &str, b: &str, edge: LinkEdge) -> Result<bool> {
        let idx_a = self.require(a)?;
        let idx_b = self.require(b)?;

        if let Some(eid) = self.inner.find_edge(idx_a, idx_b) {
            if !edge.attributes.is_empty() {
                self.inner[eid] = edge;
            }
            return Ok(false);
        }

        self.inner.add_edge(idx_a, idx_b, edge);
        Ok(true)
    }

    fn require(&self, id: &str) -> Result<NodeIndex> {
        self.index.get(id).copied().ok_or_else(|| {
            debug!(node = id, "edge endpoint was never added");
            LinkError::UnknownNode(id.to_string())
        })
    }

    /// Append or overwrite one attribute of an existing node.
    pub fn set_attribute(&mut self, id: &str, key: &str, value: AttrValue) -> Result<()> {
        let idx = self.require(id)?;
        self.inner[idx].attributes.insert(key.to_string(), value);
        Ok(())
    }

    /// Look up a node by identifier.
    pub fn node(&self, id: &str) -> Option<&LexicalNode> {
        self.index.get(id).map(|&idx| &self.inner[idx])
    }

    /// Whether a node with this identifier exists.
    pub fn contains_node(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// The edge between `a` and `b`, in either orientation.
    pub fn edge(&self, a: &str, b: &str) -> Option<&LinkEdge> {
        let idx_a = *self.index.get(a)?;
        let idx_b = *self.index.get(b)?;
        self.inner
            .find_edge(idx_a, idx_b)
            .map(|eid| &self.inner[eid])
    }

    /// Whether `a` and `b` are adjacent.
    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        self.edge(a, b).is_some()
    }

    /// Neighbours of a node; empty when the node is unknown.
    pub fn neighbors<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a LexicalNode> + 'a {
        let idx = self.index.get(id).copied();
        idx.into_iter()
            .flat_map(move |idx| self.inner.neighbors(idx))
            .map(move |n| &self.inner[n])
    }

    /// All nodes, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &LexicalNode> {
        self.inner.node_weights()
    }

    /// Node identifiers, in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes().map(|n| n.id.as_str())
    }

    /// All edges as (endpoint, endpoint, edge).
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, &LinkEdge)> {
        self.inner.edge_references().map(move |e| {
            (
                self.inner[e.source()].id.as_str(),
                self.inner[e.target()].id.as_str(),
                e.weight(),
            )
        })
    }

    /// Node index of an identifier.
    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Sorted node identifiers.
    pub fn node_set(&self) -> BTreeSet<String> {
        self.node_ids().map(str::to_string).collect()
    }

    /// Sorted edges, each with its endpoints in lexical order.
    pub fn edge_set(&self) -> BTreeSet<(String, String)> {
        self.edges()
            .map(|(a, b, _)| {
                if a <= b {
                    (a.to_string(), b.to_string())
                } else {
                    (b.to_string(), a.to_string())
                }
            })
            .collect()
    }
}
