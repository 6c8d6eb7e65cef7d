//! Bounded simple-path enumeration between two selected node subsets.
//!
//! The search is exhaustive and exponential in `max_length` on dense
//! neighbourhoods. Lexical resource graphs have a low average degree, and the
//! callers keep `max_length` within 1..=3.

use std::collections::BTreeMap;

use petgraph::algo::all_simple_paths;
use petgraph::graph::NodeIndex;
use tracing::{debug, info};

use crate::graph::LexicalGraph;
use crate::query::NodeSelector;

/// A path listed start to end as node identifiers.
pub type Path = Vec<String>;

/// Identifiers selected by `selector`, sorted, with their node indices.
pub fn select_nodes(graph: &LexicalGraph, selector: &NodeSelector) -> BTreeMap<String, NodeIndex> {
    graph
        .node_ids()
        .filter(|id| selector.matches(id))
        .filter_map(|id| graph.index_of(id).map(|idx| (id.to_string(), idx)))
        .collect()
}

/// All simple paths of at most `max_length` edges from any node selected by
/// `from` to any node selected by `to`.
///
/// A path needs at least one edge: `max_length == 0` yields nothing, and a
/// node is never paired with itself. Pairs without a path contribute nothing.
pub fn find_paths(
    graph: &LexicalGraph,
    from: &NodeSelector,
    to: &NodeSelector,
    max_length: usize,
) -> Vec<Path> {
    let from_nodes = select_nodes(graph, from);
    let to_nodes = select_nodes(graph, to);
    info!(
        from = %from,
        to = %to,
        from_nodes = from_nodes.len(),
        to_nodes = to_nodes.len(),
        max_length,
        "querying paths"
    );

    let mut all_paths = Vec::new();
    if max_length == 0 {
        return all_paths;
    }

    let inner = graph.inner();
    for (source_id, &source) in &from_nodes {
        debug!(source = %source_id, "expanding");
        for &target in to_nodes.values() {
            if source == target {
                continue;
            }
            let paths = all_simple_paths::<Vec<NodeIndex>, _>(
                inner,
                source,
                target,
                0,
                Some(max_length - 1),
            );
            for path in paths {
                all_paths.push(path.into_iter().map(|idx| inner[idx].id.clone()).collect());
            }
        }
    }

    info!(paths = all_paths.len(), "path query finished");
    all_paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{LexicalNode, LinkEdge};
    use crate::types::Attributes;

    fn graph(nodes: &[&str], edges: &[(&str, &str)]) -> LexicalGraph {
        let mut g = LexicalGraph::new();
        for id in nodes {
            g.add_node(LexicalNode::new(*id, Attributes::new()).unwrap())
                .unwrap();
        }
        for (a, b) in edges {
            g.add_edge(a, b, LinkEdge::new()).unwrap();
        }
        g
    }

    #[test]
    fn direct_neighbours_at_length_one() {
        let g = graph(
            &["(Dutch)kat.N", "(Dutch)hond.N", "LU-1", "LU-2"],
            &[("(Dutch)kat.N", "LU-1"), ("(Dutch)hond.N", "LU-2")],
        );
        let mut paths = find_paths(
            &g,
            &NodeSelector::prefix("(Dutch)"),
            &NodeSelector::prefix("LU-"),
            1,
        );
        paths.sort();
        assert_eq!(
            paths,
            vec![
                vec!["(Dutch)hond.N".to_string(), "LU-2".to_string()],
                vec!["(Dutch)kat.N".to_string(), "LU-1".to_string()],
            ]
        );
    }

    #[test]
    fn zero_length_is_empty() {
        let g = graph(&["(Dutch)kat.N", "LU-1"], &[("(Dutch)kat.N", "LU-1")]);
        let paths = find_paths(
            &g,
            &NodeSelector::prefix("(Dutch)"),
            &NodeSelector::prefix("LU-"),
            0,
        );
        assert!(paths.is_empty());
    }

    #[test]
    fn disconnected_subsets_give_no_paths() {
        let g = graph(&["(Dutch)kat.N", "LU-1"], &[]);
        let paths = find_paths(
            &g,
            &NodeSelector::prefix("(Dutch)"),
            &NodeSelector::prefix("LU-"),
            3,
        );
        assert!(paths.is_empty());
    }

    #[test]
    fn longer_paths_respect_the_bound() {
        // sense - lemma - LU - frame
        let g = graph(
            &["(pm)RBN-kat-n-1", "(Dutch)kat.N", "LU-1", "(pm)fn1.7:Animals"],
            &[
                ("(pm)RBN-kat-n-1", "(Dutch)kat.N"),
                ("(Dutch)kat.N", "LU-1"),
                ("LU-1", "(pm)fn1.7:Animals"),
            ],
        );
        let from = NodeSelector::prefix("(pm)RBN-");
        let to = NodeSelector::prefix("(pm)fn");

        assert!(find_paths(&g, &from, &to, 2).is_empty());
        let paths = find_paths(&g, &from, &to, 3);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].first().map(String::as_str), Some("(pm)RBN-kat-n-1"));
        assert_eq!(paths[0].last().map(String::as_str), Some("(pm)fn1.7:Animals"));
        assert_eq!(paths[0].len(), 4);
    }

    #[test]
    fn every_simple_path_is_listed() {
        // two routes from the lemma to the frame
        let g = graph(
            &["(Dutch)kat.N", "LU-1", "LU-2", "(pm)fn1.7:Animals"],
            &[
                ("(Dutch)kat.N", "LU-1"),
                ("(Dutch)kat.N", "LU-2"),
                ("LU-1", "(pm)fn1.7:Animals"),
                ("LU-2", "(pm)fn1.7:Animals"),
                ("(Dutch)kat.N", "(pm)fn1.7:Animals"),
            ],
        );
        let paths = find_paths(
            &g,
            &NodeSelector::prefix("(Dutch)"),
            &NodeSelector::prefix("(pm)fn"),
            2,
        );
        assert_eq!(paths.len(), 3);
    }

    #[test]
    fn node_is_never_paired_with_itself() {
        let g = graph(&["LU-1", "LU-2"], &[("LU-1", "LU-2")]);
        let paths = find_paths(&g, &NodeSelector::prefix("LU-"), &NodeSelector::prefix("LU-"), 2);
        assert_eq!(paths.len(), 2);
        assert!(paths.iter().all(|p| p.first() != p.last()));
    }
}
