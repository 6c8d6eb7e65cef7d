use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use lexlink_core::{
    config::Verbosity,
    graph::GraphMetrics,
    polysemy::{PolysemyCategory, PolysemyProfiles},
    query::{find_paths, DisplaySubgraph, NodeSelector, SubgraphOptions},
    snapshot::Snapshot,
    GraphBuildPipeline, LinkConfig, PolysemyProfilePipeline, ResourceBundle, SenseLinkPipeline,
    SnapshotStore,
};

#[derive(Parser, Debug)]
#[command(name = "lexlink", about = "Dutch/English lexical resource linking CLI")]
struct Cli {
    /// Path to config file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbosity 0-2, overrides the config file
    #[arg(long, global = true)]
    verbose: Option<u8>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the lexical graph from a resource bundle and store it as a new snapshot.
    Build {
        /// Resource bundle (JSON)
        #[arg(long)]
        bundle: PathBuf,
        /// Snapshot directory
        #[arg(long)]
        snapshots: PathBuf,
    },

    /// Compute polysemy profiles from a snapshot.
    Profile {
        /// Resource bundle (JSON)
        #[arg(long)]
        bundle: PathBuf,
        /// Snapshot directory
        #[arg(long)]
        snapshots: PathBuf,
        /// Snapshot version, latest if omitted
        #[arg(long)]
        version: Option<u32>,
        /// Output directory for `{pos}.json` profiles
        #[arg(long)]
        out: PathBuf,
    },

    /// Link monosemous Dutch senses to lexical units and store a new snapshot.
    Link {
        /// Resource bundle (JSON)
        #[arg(long)]
        bundle: PathBuf,
        /// Snapshot directory
        #[arg(long)]
        snapshots: PathBuf,
        /// Snapshot version, latest if omitted
        #[arg(long)]
        version: Option<u32>,
        /// Directory with `{pos}.json` profiles
        #[arg(long)]
        profiles: PathBuf,
    },

    /// List simple paths between two selected node sets.
    Paths {
        /// Snapshot directory
        #[arg(long)]
        snapshots: PathBuf,
        /// Snapshot version, latest if omitted
        #[arg(long)]
        version: Option<u32>,
        /// Prefix of source nodes
        #[arg(long)]
        from: String,
        /// Suffix of source nodes
        #[arg(long)]
        from_suffix: Option<String>,
        /// Prefix of target nodes
        #[arg(long)]
        to: String,
        /// Suffix of target nodes
        #[arg(long)]
        to_suffix: Option<String>,
        /// Maximum number of edges (1-3), config value if omitted
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..=3))]
        max_length: Option<u64>,
        /// Write the paths as a Graphviz file
        #[arg(long)]
        dot: Option<PathBuf>,
        /// Add synset context to the Graphviz output
        #[arg(long)]
        synsets: bool,
        /// Add feature-set context to the Graphviz output
        #[arg(long)]
        feature_sets: bool,
    },

    /// Print graph statistics of a snapshot.
    Stats {
        /// Snapshot directory
        #[arg(long)]
        snapshots: PathBuf,
        /// Snapshot version, latest if omitted
        #[arg(long)]
        version: Option<u32>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => LinkConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => LinkConfig::default(),
    };
    if let Some(level) = cli.verbose {
        config.verbosity = Verbosity::try_from(level).map_err(anyhow::Error::msg)?;
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(config.verbosity.level_filter())
        .init();

    match cli.command {
        Commands::Build { bundle, snapshots } => cmd_build(config, &bundle, &snapshots),
        Commands::Profile {
            bundle,
            snapshots,
            version,
            out,
        } => cmd_profile(config, &bundle, &snapshots, version, &out),
        Commands::Link {
            bundle,
            snapshots,
            version,
            profiles,
        } => cmd_link(config, &bundle, &snapshots, version, &profiles),
        Commands::Paths {
            snapshots,
            version,
            from,
            from_suffix,
            to,
            to_suffix,
            max_length,
            dot,
            synsets,
            feature_sets,
        } => {
            let mut from = NodeSelector::prefix(from);
            if let Some(suffix) = from_suffix {
                from = from.with_suffix(suffix);
            }
            let mut to = NodeSelector::prefix(to);
            if let Some(suffix) = to_suffix {
                to = to.with_suffix(suffix);
            }
            let options = SubgraphOptions {
                add_synset_edges: synsets,
                add_feature_set_edges: feature_sets,
            };
            let max_length = max_length.map_or(config.max_path_length, |n| n as usize);
            cmd_paths(&snapshots, version, &from, &to, max_length, dot.as_deref(), options)
        }
        Commands::Stats { snapshots, version } => cmd_stats(&snapshots, version),
    }
}

fn load_bundle(path: &Path) -> anyhow::Result<ResourceBundle> {
    ResourceBundle::from_json_file(path)
        .with_context(|| format!("Failed to read resource bundle {}", path.display()))
}

fn load_snapshot(store: &SnapshotStore, version: Option<u32>) -> anyhow::Result<Snapshot> {
    let snapshot = match version {
        Some(v) => store.load(v),
        None => store.load_latest(),
    };
    snapshot.with_context(|| format!("Failed to load snapshot from {}", store.dir().display()))
}

fn cmd_build(config: LinkConfig, bundle_path: &Path, snapshots: &Path) -> anyhow::Result<()> {
    let bundle = load_bundle(bundle_path)?;
    let (graph, lexicon) = GraphBuildPipeline::new(config).run(&bundle)?;

    let store = SnapshotStore::open(snapshots)?;
    let meta = store.save_next("build", &graph, &lexicon)?;
    println!(
        "Graph v{} built: {} nodes, {} edges",
        meta.version, meta.nodes, meta.edges
    );
    Ok(())
}

fn cmd_profile(
    config: LinkConfig,
    bundle_path: &Path,
    snapshots: &Path,
    version: Option<u32>,
    out: &Path,
) -> anyhow::Result<()> {
    let bundle = load_bundle(bundle_path)?;
    let store = SnapshotStore::open(snapshots)?;
    let snapshot = load_snapshot(&store, version)?;

    let profiles =
        PolysemyProfilePipeline::new(config).run(&snapshot.graph, &snapshot.lexicon, &bundle)?;
    for p in &profiles {
        let path = p.save_json(out)?;
        let counts: Vec<String> = PolysemyCategory::ALL
            .iter()
            .map(|&c| format!("{c}={}", p.count(c)))
            .collect();
        println!("{}: {} -> {}", p.pos, counts.join(" "), path.display());
    }
    Ok(())
}

fn cmd_link(
    config: LinkConfig,
    bundle_path: &Path,
    snapshots: &Path,
    version: Option<u32>,
    profiles_dir: &Path,
) -> anyhow::Result<()> {
    let bundle = load_bundle(bundle_path)?;
    let store = SnapshotStore::open(snapshots)?;
    let snapshot = load_snapshot(&store, version)?;

    let profiles = config
        .link
        .pos
        .iter()
        .map(|&pos| {
            PolysemyProfiles::load_json(profiles_dir, pos).with_context(|| {
                format!("Failed to read {} profiles from {}", pos, profiles_dir.display())
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let (graph, lexicon, report) = SenseLinkPipeline::new(config).run(
        snapshot.graph,
        snapshot.lexicon,
        &bundle,
        &profiles,
    )?;
    let meta = store.save_next("link", &graph, &lexicon)?;
    println!(
        "Graph v{}: {} new edges ({} candidates, {} ambiguous senses dropped)",
        meta.version, report.materialized, report.candidates, report.ambiguous_senses
    );
    Ok(())
}

fn cmd_paths(
    snapshots: &Path,
    version: Option<u32>,
    from: &NodeSelector,
    to: &NodeSelector,
    max_length: usize,
    dot: Option<&Path>,
    options: SubgraphOptions,
) -> anyhow::Result<()> {
    let store = SnapshotStore::open(snapshots)?;
    let snapshot = load_snapshot(&store, version)?;

    let paths = find_paths(&snapshot.graph, from, to, max_length);
    for path in &paths {
        println!("{}", path.join(" -- "));
    }
    println!("{} paths", paths.len());

    if let Some(dot_path) = dot {
        let subgraph = DisplaySubgraph::from_paths(&snapshot.graph, &paths, options);
        std::fs::write(dot_path, subgraph.to_dot())
            .with_context(|| format!("Failed to write {}", dot_path.display()))?;
        println!("Written to {}", dot_path.display());
    }
    Ok(())
}

fn cmd_stats(snapshots: &Path, version: Option<u32>) -> anyhow::Result<()> {
    let store = SnapshotStore::open(snapshots)?;
    let snapshot = load_snapshot(&store, version)?;
    let metrics = GraphMetrics::compute(&snapshot.graph);

    println!(
        "Snapshot v{} ({}, {})",
        snapshot.metadata.version, snapshot.metadata.stage, snapshot.metadata.created_at
    );
    println!("{}", serde_json::to_string_pretty(&metrics)?);
    println!("Linked senses: {}", snapshot.lexicon.linked_sense_count());
    Ok(())
}
