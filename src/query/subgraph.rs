//! Display subgraph: the nodes and edges along a set of paths, with hover
//! text, optionally widened with feature-set and synonym context.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use tracing::debug;

use crate::graph::LexicalGraph;
use crate::query::Path;
use crate::types::{Attributes, NodeClass};

/// What to add around the path edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubgraphOptions {
    /// Add sense → synset edges and the synset's other synonyms.
    pub add_synset_edges: bool,
    /// Add sense → feature set and frame → feature set edges.
    pub add_feature_set_edges: bool,
}

/// Nodes with hover text and edges with attributes, ready for rendering.
#[derive(Debug, Clone, Default)]
pub struct DisplaySubgraph {
    /// Node identifier → hover text.
    pub nodes: BTreeMap<String, String>,
    /// (endpoint, endpoint) → edge attributes.
    pub edges: BTreeMap<(String, String), Attributes>,
}

impl DisplaySubgraph {
    /// Collect the unique nodes and edges along `paths`.
    ///
    /// Identifiers absent from the graph are skipped.
    pub fn from_paths(graph: &LexicalGraph, paths: &[Path], options: SubgraphOptions) -> Self {
        let mut wanted_nodes: Vec<String> = Vec::new();
        let mut wanted_edges: Vec<(String, String)> = Vec::new();

        for path in paths {
            for pair in path.windows(2) {
                wanted_nodes.push(pair[0].clone());
                wanted_nodes.push(pair[1].clone());
                wanted_edges.push((pair[0].clone(), pair[1].clone()));
            }
        }

        let on_paths = wanted_nodes.clone();
        for id in &on_paths {
            let Some(node) = graph.node(id) else {
                continue;
            };
            match node.class {
                NodeClass::Frame if options.add_feature_set_edges => {
                    for fs in graph.neighbors(id).filter(|n| n.class == NodeClass::FeatureSet) {
                        wanted_nodes.push(fs.id.clone());
                        wanted_edges.push((id.clone(), fs.id.clone()));
                    }
                }
                NodeClass::Sense => {
                    if options.add_feature_set_edges {
                        for fs in graph.neighbors(id).filter(|n| n.class == NodeClass::FeatureSet) {
                            wanted_nodes.push(fs.id.clone());
                            wanted_edges.push((id.clone(), fs.id.clone()));
                        }
                    }
                    if options.add_synset_edges {
                        for synset in graph.neighbors(id).filter(|n| n.class == NodeClass::Synset) {
                            wanted_nodes.push(synset.id.clone());
                            wanted_edges.push((id.clone(), synset.id.clone()));
                            for synonym in graph
                                .neighbors(&synset.id)
                                .filter(|n| n.class == NodeClass::Sense && n.id != *id)
                            {
                                wanted_nodes.push(synonym.id.clone());
                                wanted_edges.push((synonym.id.clone(), synset.id.clone()));
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        let mut subgraph = DisplaySubgraph::default();
        for id in wanted_nodes {
            if subgraph.nodes.contains_key(&id) {
                continue;
            }
            match graph.node(&id) {
                Some(node) => {
                    subgraph.nodes.insert(id, hover_text(&node.attributes, &[]));
                }
                None => debug!(node = %id, "node not in graph"),
            }
        }
        for (a, b) in wanted_edges {
            if !subgraph.nodes.contains_key(&a) || !subgraph.nodes.contains_key(&b) {
                continue;
            }
            let key = if a <= b { (a, b) } else { (b, a) };
            if subgraph.edges.contains_key(&key) {
                continue;
            }
            match graph.edge(&key.0, &key.1) {
                Some(edge) => {
                    subgraph.edges.insert(key, edge.attributes.clone());
                }
                None => debug!(source = %key.0, target = %key.1, "edge not in graph"),
            }
        }

        debug!(
            nodes = subgraph.nodes.len(),
            edges = subgraph.edges.len(),
            "display subgraph"
        );
        subgraph
    }

    /// Render as a Graphviz `graph` with tooltips.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("graph {\n");
        for (id, hover) in &self.nodes {
            let _ = writeln!(out, "    {} [tooltip={}];", quote(id), quote(hover));
        }
        for ((a, b), attrs) in &self.edges {
            let rendered: Vec<String> = attrs
                .iter()
                .map(|(k, v)| format!("{}={}", k, quote(&v.to_string())))
                .collect();
            if rendered.is_empty() {
                let _ = writeln!(out, "    {} -- {};", quote(a), quote(b));
            } else {
                let _ = writeln!(out, "    {} -- {} [{}];", quote(a), quote(b), rendered.join(", "));
            }
        }
        out.push_str("}\n");
        out
    }
}

/// One `key: value` line per attribute; when `only_use` is non-empty only
/// those keys are rendered.
pub fn hover_text(attributes: &Attributes, only_use: &[&str]) -> String {
    attributes
        .iter()
        .filter(|(key, _)| only_use.is_empty() || only_use.contains(&key.as_str()))
        .map(|(key, value)| format!("{key}: {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{LexicalNode, LinkEdge};
    use crate::types::AttrValue;

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), AttrValue::from(*v)))
            .collect()
    }

    fn graph() -> LexicalGraph {
        let mut g = LexicalGraph::new();
        for id in [
            "(Dutch)kat.N",
            "LU-1",
            "(pm)RBN-kat-n-1",
            "(pm)RBN-poes-n-1",
            "(syn)d_n-1",
            "(fs)dier",
        ] {
            g.add_node(LexicalNode::new(id, attrs(&[("id", id)])).unwrap())
                .unwrap();
        }
        g.add_edge("(Dutch)kat.N", "LU-1", LinkEdge::new()).unwrap();
        g.add_edge("(pm)RBN-kat-n-1", "(Dutch)kat.N", LinkEdge::new())
            .unwrap();
        g.add_edge(
            "(syn)d_n-1",
            "(pm)RBN-kat-n-1",
            LinkEdge::with_attributes(attrs(&[("color", "green")])),
        )
        .unwrap();
        g.add_edge("(syn)d_n-1", "(pm)RBN-poes-n-1", LinkEdge::new())
            .unwrap();
        g.add_edge("(pm)RBN-kat-n-1", "(fs)dier", LinkEdge::new())
            .unwrap();
        g
    }

    fn path(ids: &[&str]) -> Path {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn only_path_elements_by_default() {
        let g = graph();
        let sub = DisplaySubgraph::from_paths(
            &g,
            &[path(&["(pm)RBN-kat-n-1", "(Dutch)kat.N", "LU-1"])],
            SubgraphOptions::default(),
        );
        assert_eq!(sub.nodes.len(), 3);
        assert_eq!(sub.edges.len(), 2);
        assert_eq!(sub.nodes["LU-1"], "id: LU-1");
    }

    #[test]
    fn synset_context_is_added_on_request() {
        let g = graph();
        let sub = DisplaySubgraph::from_paths(
            &g,
            &[path(&["(pm)RBN-kat-n-1", "(Dutch)kat.N"])],
            SubgraphOptions {
                add_synset_edges: true,
                add_feature_set_edges: true,
            },
        );
        assert!(sub.nodes.contains_key("(syn)d_n-1"));
        assert!(sub.nodes.contains_key("(pm)RBN-poes-n-1"));
        assert!(sub.nodes.contains_key("(fs)dier"));
        let key = ("(pm)RBN-kat-n-1".to_string(), "(syn)d_n-1".to_string());
        assert_eq!(sub.edges[&key]["color"], AttrValue::from("green"));
    }

    #[test]
    fn missing_nodes_are_skipped() {
        let g = graph();
        let sub = DisplaySubgraph::from_paths(
            &g,
            &[path(&["(Dutch)kat.N", "LU-404"])],
            SubgraphOptions::default(),
        );
        assert_eq!(sub.nodes.len(), 1);
        assert!(sub.edges.is_empty());
    }

    #[test]
    fn hover_text_respects_only_use() {
        let a = attrs(&[("lemma", "kat"), ("pos", "N")]);
        assert_eq!(hover_text(&a, &[]), "lemma: kat\npos: N");
        assert_eq!(hover_text(&a, &["pos"]), "pos: N");
    }

    #[test]
    fn dot_output_quotes_identifiers() {
        let g = graph();
        let sub = DisplaySubgraph::from_paths(
            &g,
            &[path(&["(Dutch)kat.N", "LU-1"])],
            SubgraphOptions::default(),
        );
        let dot = sub.to_dot();
        assert!(dot.starts_with("graph {"));
        assert!(dot.contains("\"(Dutch)kat.N\" -- \"LU-1\";"));
    }
}
