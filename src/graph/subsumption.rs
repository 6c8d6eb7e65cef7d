//! Feature-set to frame resolution through frame inheritance.
//!
//! A feature set is mapped to a handful of top frames; it reaches every frame
//! that inherits from one of them, at any depth.

use std::collections::{BTreeMap, BTreeSet};

use petgraph::graphmap::DiGraphMap;
use petgraph::visit::Bfs;

/// Frame inheritance hierarchy, parent to child.
#[derive(Debug, Default)]
pub struct InheritanceHierarchy<'a> {
    graph: DiGraphMap<&'a str, ()>,
}

impl<'a> InheritanceHierarchy<'a> {
    /// Build the hierarchy from (parent, child) pairs.
    pub fn new(relations: &'a [(String, String)]) -> Self {
        let mut graph = DiGraphMap::new();
        for (parent, child) in relations {
            graph.add_edge(parent.as_str(), child.as_str(), ());
        }
        Self { graph }
    }

    /// The frame itself plus all its descendants.
    pub fn descendants_or_self(&self, frame: &'a str) -> BTreeSet<&'a str> {
        let mut out = BTreeSet::new();
        out.insert(frame);
        if !self.graph.contains_node(frame) {
            return out;
        }
        let mut bfs = Bfs::new(&self.graph, frame);
        while let Some(node) = bfs.next(&self.graph) {
            out.insert(node);
        }
        out
    }

    /// Expand a feature set → top frames mapping into frame → feature sets.
    pub fn frame_feature_sets(
        &self,
        mapping: &'a BTreeMap<String, Vec<String>>,
    ) -> BTreeMap<&'a str, BTreeSet<&'a str>> {
        let mut out: BTreeMap<&'a str, BTreeSet<&'a str>> = BTreeMap::new();
        for (feature_set, top_frames) in mapping {
            for top in top_frames {
                for frame in self.descendants_or_self(top.as_str()) {
                    out.entry(frame).or_default().insert(feature_set.as_str());
                }
            }
        }
        out
    }
}
