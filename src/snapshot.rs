//! Persistence layer for versioned graph snapshots.
//! Saves/loads: Metadata (JSON), Graph and Frame lexicon (bincode).
//!
//! Version `n` lives in `graph-v{n}.bin`, `lexicon-v{n}.bin` and
//! `snapshot-v{n}.json`. Every file is written to a temporary path first and
//! renamed into place, so a failed stage leaves earlier versions untouched.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{LinkError, Result};
use crate::graph::{LexicalGraph, LexicalNode, LinkEdge};
use crate::lexicon::FrameLexicon;

/// Metadata stored with each snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    /// Version of the lexlink core library.
    pub crate_version: String,
    /// Snapshot version number.
    pub version: u32,
    /// ISO 8601 timestamp of creation.
    pub created_at: String,
    /// Stage that produced the snapshot.
    pub stage: String,
    /// Number of nodes.
    pub nodes: usize,
    /// Number of edges.
    pub edges: usize,
    /// Number of materialized sense links.
    pub linked_senses: usize,
}

/// Serializable node and edge lists of a graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GraphRecord {
    nodes: Vec<LexicalNode>,
    edges: Vec<(String, String, LinkEdge)>,
}

impl GraphRecord {
    fn from_graph(graph: &LexicalGraph) -> Self {
        Self {
            nodes: graph.nodes().cloned().collect(),
            edges: graph
                .edges()
                .map(|(a, b, e)| (a.to_string(), b.to_string(), e.clone()))
                .collect(),
        }
    }

    fn into_graph(self) -> Result<LexicalGraph> {
        let mut graph = LexicalGraph::new();
        for node in self.nodes {
            graph.add_node(node)?;
        }
        for (a, b, edge) in self.edges {
            graph.add_edge(&a, &b, edge)?;
        }
        Ok(graph)
    }
}

/// A loaded snapshot.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Metadata.
    pub metadata: SnapshotMetadata,
    /// The graph.
    pub graph: LexicalGraph,
    /// The frame lexicon.
    pub lexicon: FrameLexicon,
}

/// Directory of versioned snapshots.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    /// Open (and create if needed) a snapshot directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// The snapshot directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn graph_path(&self, version: u32) -> PathBuf {
        self.dir.join(format!("graph-v{version}.bin"))
    }

    fn lexicon_path(&self, version: u32) -> PathBuf {
        self.dir.join(format!("lexicon-v{version}.bin"))
    }

    fn metadata_path(&self, version: u32) -> PathBuf {
        self.dir.join(format!("snapshot-v{version}.json"))
    }

    /// Versions with a metadata file, ascending.
    pub fn versions(&self) -> Result<Vec<u32>> {
        let mut versions = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let name = entry?.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if let Some(v) = name
                .strip_prefix("snapshot-v")
                .and_then(|rest| rest.strip_suffix(".json"))
                .and_then(|v| v.parse::<u32>().ok())
            {
                versions.push(v);
            }
        }
        versions.sort_unstable();
        Ok(versions)
    }

    /// Highest stored version.
    pub fn latest_version(&self) -> Result<Option<u32>> {
        Ok(self.versions()?.last().copied())
    }

    /// Save as the next version (0 for an empty store).
    pub fn save_next(
        &self,
        stage: &str,
        graph: &LexicalGraph,
        lexicon: &FrameLexicon,
    ) -> Result<SnapshotMetadata> {
        let version = self.latest_version()?.map_or(0, |v| v + 1);
        self.save(version, stage, graph, lexicon)
    }

    /// Save a snapshot under an explicit version, replacing an existing one.
    pub fn save(
        &self,
        version: u32,
        stage: &str,
        graph: &LexicalGraph,
        lexicon: &FrameLexicon,
    ) -> Result<SnapshotMetadata> {
        let metadata = SnapshotMetadata {
            crate_version: env!("CARGO_PKG_VERSION").to_string(),
            version,
            created_at: chrono::Utc::now().to_rfc3339(),
            stage: stage.to_string(),
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            linked_senses: lexicon.linked_sense_count(),
        };

        // 1. Graph (bincode)
        let record = GraphRecord::from_graph(graph);
        write_atomic(&self.graph_path(version), |w| {
            bincode::serialize_into(w, &record).map_err(LinkError::from)
        })?;

        // 2. Lexicon (bincode)
        write_atomic(&self.lexicon_path(version), |w| {
            bincode::serialize_into(w, lexicon).map_err(LinkError::from)
        })?;

        // 3. Metadata (JSON), last: its presence marks a complete version
        write_atomic(&self.metadata_path(version), |w| {
            serde_json::to_writer_pretty(w, &metadata).map_err(LinkError::from)
        })?;

        info!(
            version,
            stage,
            nodes = metadata.nodes,
            edges = metadata.edges,
            dir = %self.dir.display(),
            "saved snapshot"
        );
        Ok(metadata)
    }

    /// Metadata of one version.
    pub fn metadata(&self, version: u32) -> Result<SnapshotMetadata> {
        let reader = BufReader::new(File::open(self.metadata_path(version))?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Load one version.
    pub fn load(&self, version: u32) -> Result<Snapshot> {
        let metadata = self.metadata(version)?;

        let reader = BufReader::new(File::open(self.graph_path(version))?);
        let record: GraphRecord = bincode::deserialize_from(reader)?;
        let graph = record.into_graph()?;

        let reader = BufReader::new(File::open(self.lexicon_path(version))?);
        let lexicon: FrameLexicon = bincode::deserialize_from(reader)?;

        if graph.node_count() != metadata.nodes || graph.edge_count() != metadata.edges {
            return Err(LinkError::Consistency(format!(
                "snapshot v{version} holds {} nodes / {} edges, metadata says {} / {}",
                graph.node_count(),
                graph.edge_count(),
                metadata.nodes,
                metadata.edges
            )));
        }

        info!(version, stage = %metadata.stage, "loaded snapshot");
        Ok(Snapshot {
            metadata,
            graph,
            lexicon,
        })
    }

    /// Load the highest version.
    pub fn load_latest(&self) -> Result<Snapshot> {
        let version = self.latest_version()?.ok_or_else(|| {
            LinkError::Config(format!("no snapshot in {}", self.dir.display()))
        })?;
        self.load(version)
    }
}

fn write_atomic<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let tmp = path.with_extension("tmp");
    let mut writer = BufWriter::new(File::create(&tmp)?);
    write(&mut writer)?;
    writer.flush()?;
    drop(writer);
    std::fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AttrValue, Attributes};

    fn graph() -> LexicalGraph {
        let mut g = LexicalGraph::new();
        let mut attrs = Attributes::new();
        attrs.insert("lemma".into(), AttrValue::from("cat"));
        attrs.insert("definition".into(), AttrValue::Null);
        g.add_node(LexicalNode::new("LU-1", attrs).unwrap()).unwrap();
        g.add_node(LexicalNode::new("(Dutch)kat.N", Attributes::new()).unwrap())
            .unwrap();
        g.add_edge("LU-1", "(Dutch)kat.N", LinkEdge::with_provenance("Iteration-1"))
            .unwrap();
        g
    }

    #[test]
    fn round_trip_preserves_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::open(dir.path()).unwrap();
        let g = graph();

        let meta = store.save_next("build", &g, &FrameLexicon::default()).unwrap();
        assert_eq!(meta.version, 0);
        assert!(dir.path().join("graph-v0.bin").exists());
        assert!(!dir.path().join("graph-v0.tmp").exists());

        let loaded = store.load(0).unwrap();
        assert_eq!(loaded.metadata, meta);
        assert_eq!(loaded.graph.node_set(), g.node_set());
        assert_eq!(loaded.graph.edge_set(), g.edge_set());
        assert_eq!(loaded.graph.node("LU-1"), g.node("LU-1"));
        assert_eq!(
            loaded.graph.edge("LU-1", "(Dutch)kat.N"),
            g.edge("LU-1", "(Dutch)kat.N")
        );
    }

    #[test]
    fn versions_increase() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::open(dir.path()).unwrap();
        assert_eq!(store.latest_version().unwrap(), None);

        store.save_next("build", &graph(), &FrameLexicon::default()).unwrap();
        let meta = store.save_next("link", &graph(), &FrameLexicon::default()).unwrap();
        assert_eq!(meta.version, 1);
        assert_eq!(store.versions().unwrap(), vec![0, 1]);
        assert_eq!(store.load_latest().unwrap().metadata.stage, "link");
    }

    #[test]
    fn empty_store_has_no_latest() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::open(dir.path()).unwrap();
        assert!(store.load_latest().is_err());
    }
}
