//! Polysemy profiles: translation pairs grouped by polysemy category.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::{LinkError, Result};
use crate::graph::LexicalGraph;
use crate::polysemy::{classify, PolysemyCategory, SenseInventory};
use crate::pos::Pos;
use crate::query::{find_paths, NodeSelector};
use crate::types::{Language, LemmaPos, LU_PREFIX};

/// A (Dutch lemma-pos, English lemma-pos) translation pair.
pub type TranslationPair = (LemmaPos, LemmaPos);

/// Translation pairs of one part of speech, grouped by category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolysemyProfiles {
    /// Part of speech shared by both sides of every pair.
    pub pos: Pos,
    /// Category → pairs.
    pub categories: BTreeMap<PolysemyCategory, BTreeSet<TranslationPair>>,
}

impl PolysemyProfiles {
    /// Empty profiles for a part of speech.
    pub fn new(pos: Pos) -> Self {
        Self {
            pos,
            categories: BTreeMap::new(),
        }
    }

    /// Classify every Dutch lemma-pos to lexical unit edge of part of speech
    /// `pos`.
    ///
    /// `dutch` holds the sense-lexicon senses, `english` the lexical units per
    /// (lexeme, pos). Pairs with a zero count on either side are skipped.
    pub fn compute(
        graph: &LexicalGraph,
        dutch: &SenseInventory,
        english: &SenseInventory,
        pos: Pos,
    ) -> Result<Self> {
        let from = NodeSelector::prefix(Language::Dutch.prefix()).with_suffix(format!(".{pos}"));
        let to = NodeSelector::prefix(LU_PREFIX);
        let paths = find_paths(graph, &from, &to, 1);

        let mut profiles = Self::new(pos);
        let mut skipped = 0usize;
        for path in &paths {
            let [nl_id, en_id] = path.as_slice() else {
                return Err(LinkError::Consistency(format!(
                    "expected a single edge, got path of {} nodes",
                    path.len()
                )));
            };
            let nl = node_lemma_pos(graph, nl_id)?;
            let en = node_lemma_pos(graph, en_id)?;
            if nl.pos != en.pos {
                return Err(LinkError::Consistency(format!(
                    "part of speech differs between {nl_id} and {en_id}"
                )));
            }

            let polysemy_nl = dutch.polysemy(&nl);
            let polysemy_en = english.polysemy(&en);
            if polysemy_nl == 0 || polysemy_en == 0 {
                debug!(dutch = %nl, english = %en, polysemy_nl, polysemy_en, "zero polysemy, skipped");
                skipped += 1;
                continue;
            }

            let category = classify(polysemy_nl, polysemy_en)?;
            profiles.categories.entry(category).or_default().insert((nl, en));
        }

        info!(
            pos = %pos,
            paths = paths.len(),
            skipped,
            m2m = profiles.count(PolysemyCategory::M2m),
            m2p = profiles.count(PolysemyCategory::M2p),
            p2m = profiles.count(PolysemyCategory::P2m),
            p2p = profiles.count(PolysemyCategory::P2p),
            "computed polysemy profiles"
        );
        Ok(profiles)
    }

    /// Pairs of one category.
    pub fn pairs(&self, category: PolysemyCategory) -> impl Iterator<Item = &TranslationPair> {
        self.categories.get(&category).into_iter().flatten()
    }

    /// Number of pairs in one category.
    pub fn count(&self, category: PolysemyCategory) -> usize {
        self.categories.get(&category).map_or(0, BTreeSet::len)
    }

    /// File name of the export for this part of speech, e.g. `N.json`.
    pub fn file_name(pos: Pos) -> String {
        format!("{pos}.json")
    }

    /// Write the profiles to `{dir}/{pos}.json`.
    pub fn save_json(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(Self::file_name(self.pos));
        let writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(path)
    }

    /// Read the profiles of one part of speech from `dir`.
    pub fn load_json(dir: &Path, pos: Pos) -> Result<Self> {
        let path = dir.join(Self::file_name(pos));
        let reader = BufReader::new(File::open(&path)?);
        let profiles: Self = serde_json::from_reader(reader)?;
        if profiles.pos != pos {
            return Err(LinkError::Consistency(format!(
                "{} holds profiles for {}",
                path.display(),
                profiles.pos
            )));
        }
        Ok(profiles)
    }
}

/// English lemma-pos → Dutch lemma-pos over the m2m pairs of all profiles.
pub fn m2m_index(profiles: &[PolysemyProfiles]) -> HashMap<LemmaPos, BTreeSet<LemmaPos>> {
    let mut index: HashMap<LemmaPos, BTreeSet<LemmaPos>> = HashMap::new();
    for p in profiles {
        for (nl, en) in p.pairs(PolysemyCategory::M2m) {
            index.entry(en.clone()).or_default().insert(nl.clone());
        }
    }
    index
}

fn node_lemma_pos(graph: &LexicalGraph, id: &str) -> Result<LemmaPos> {
    graph
        .node(id)
        .and_then(|n| n.lemma_pos.clone())
        .ok_or_else(|| LinkError::Schema(format!("node '{id}' has no lemma-pos")))
}
