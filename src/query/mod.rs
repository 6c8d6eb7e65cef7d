//! Path queries over the lexical graph and display extraction.

pub mod paths;
pub mod selector;
pub mod subgraph;

pub use paths::{find_paths, select_nodes, Path};
pub use selector::NodeSelector;
pub use subgraph::{hover_text, DisplaySubgraph, SubgraphOptions};
