//! Uniqueness enforcement: turns provisional links into sense → lexical unit
//! edges when the sense maps to exactly one lexical unit.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::errors::{LinkError, Result};
use crate::graph::{LexicalGraph, LinkEdge};
use crate::lexicon::{FrameLexicon, LinkStatus, SenseLink};
use crate::link::CandidateLinks;
use crate::pos::Pos;
use crate::resources::ResourceBundle;
use crate::types::{naming, AttrValue, LemmaPos};

/// Counters of one materialization run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterializationReport {
    /// Provisional (sense, lexical unit) pairs.
    pub candidates: usize,
    /// Senses dropped because they map to several lexical units.
    pub ambiguous_senses: usize,
    /// Edges added.
    pub materialized: usize,
    /// Edge count before the run.
    pub edges_before: usize,
    /// Edge count after the run.
    pub edges_after: usize,
}

/// Applies candidate links to a graph and its frame lexicon.
#[derive(Debug)]
pub struct LinkMaterializer<'a> {
    bundle: &'a ResourceBundle,
    created_at: String,
}

impl<'a> LinkMaterializer<'a> {
    /// Materializer stamping every link with the current UTC time.
    pub fn new(bundle: &'a ResourceBundle) -> Self {
        Self {
            bundle,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Use a fixed creation timestamp.
    pub fn with_created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = created_at.into();
        self
    }

    /// Consume the graph and lexicon and return their linked versions.
    ///
    /// Fails when a linked sense has no record or no registered lemma-pos id,
    /// and when the edge count does not grow by exactly the number of links.
    pub fn run(
        &self,
        mut graph: LexicalGraph,
        mut lexicon: FrameLexicon,
        candidates: &CandidateLinks,
    ) -> Result<(LexicalGraph, FrameLexicon, MaterializationReport)> {
        let senses = self.bundle.senses_by_id();
        let mut report = MaterializationReport {
            candidates: candidates.len(),
            ambiguous_senses: candidates.ambiguous_senses().count(),
            edges_before: graph.edge_count(),
            ..MaterializationReport::default()
        };

        let lu_ids: Vec<String> = lexicon.lexical_units().map(|lu| lu.id.clone()).collect();
        for lu_id in &lu_ids {
            let mut links = Vec::new();
            for sense_id in candidates.senses_of(lu_id) {
                if candidates.lexical_units_of(sense_id) != 1 {
                    debug!(sense = sense_id, lu = %lu_id, "ambiguous sense dropped");
                    continue;
                }
                let sense = senses.get(sense_id).copied().ok_or_else(|| {
                    LinkError::Schema(format!("no record for linked sense '{sense_id}'"))
                })?;
                let key = LemmaPos::new(sense.lemma.clone(), Pos::from_sense_lexicon(&sense.pos)?);
                let lemma_id = lexicon.dutch_lemma_pos_id(&key).cloned().ok_or_else(|| {
                    LinkError::Consistency(format!("{key} has no Dutch lemma-pos id"))
                })?;
                let provenance = candidates
                    .provenance(sense_id, lu_id)
                    .unwrap_or_default()
                    .to_string();

                graph.add_edge(
                    lu_id,
                    &naming::sense(sense_id),
                    LinkEdge::with_provenance(&provenance),
                )?;
                report.materialized += 1;
                debug!(sense = sense_id, lu = %lu_id, "linked");

                links.push(SenseLink {
                    provenance,
                    sense: sense.clone(),
                    created_at: self.created_at.clone(),
                    status: LinkStatus::Created,
                    lemma_id,
                });
            }

            if links.is_empty() {
                continue;
            }
            let entry = lexicon.lexical_unit_mut(lu_id).ok_or_else(|| {
                LinkError::Consistency(format!("lexical unit '{lu_id}' vanished from the lexicon"))
            })?;
            entry.linked_senses.extend(links);
            let linked = entry
                .linked_senses
                .iter()
                .map(|l| naming::sense(&l.sense.sense_id))
                .collect();
            graph.set_attribute(lu_id, "linked_senses", AttrValue::List(linked))?;
        }

        report.edges_after = graph.edge_count();
        if report.edges_before + report.materialized != report.edges_after {
            error!(?report, "edge count does not match the number of links");
            return Err(LinkError::Consistency(format!(
                "{} edges before + {} links != {} edges after",
                report.edges_before, report.materialized, report.edges_after
            )));
        }

        info!(
            candidates = report.candidates,
            ambiguous = report.ambiguous_senses,
            materialized = report.materialized,
            edges = report.edges_after,
            "materialized sense links"
        );
        Ok((graph, lexicon, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LinkConfig;
    use crate::graph::GraphBuilder;
    use crate::link::{CandidateCollector, NoSynonyms};
    use crate::polysemy::{m2m_index, PolysemyProfiles, SenseInventory};
    use crate::resources::{FrameRecord, LexicalUnitRecord, SenseRecord, TranslationRecord};

    fn sense(id: &str, lemma: &str) -> SenseRecord {
        SenseRecord {
            sense_id: id.into(),
            lemma: lemma.into(),
            pos: "noun".into(),
            feature_set: None,
            synset_id: None,
            definition: None,
        }
    }

    fn frame(label: &str, lu_id: u64, lexeme: &str) -> FrameRecord {
        FrameRecord {
            label: label.into(),
            definition: None,
            lexical_units: vec![LexicalUnitRecord {
                id: lu_id,
                lexeme: lexeme.into(),
                pos: Pos::Noun,
            }],
        }
    }

    fn config() -> LinkConfig {
        let mut config = LinkConfig::default();
        config.link.use_reference_polysemy = false;
        config
    }

    fn prepare(bundle: &ResourceBundle) -> (LexicalGraph, FrameLexicon) {
        let config = config();
        let lexicon = FrameLexicon::assemble(bundle, &config).unwrap();
        let graph = GraphBuilder::new(&config).build(bundle, &lexicon).unwrap();
        (graph, lexicon)
    }

    #[test]
    fn monosemous_pair_gets_linked() {
        let bundle = ResourceBundle {
            frames: vec![frame("Animals", 1, "cat")],
            translations: vec![TranslationRecord {
                english: "cat".into(),
                pos: Pos::Noun,
                dutch: vec!["kat".into()],
            }],
            senses: vec![sense("kat-n-1", "kat")],
            ..ResourceBundle::default()
        };
        let (graph, lexicon) = prepare(&bundle);
        let config = config();

        let dutch = SenseInventory::dutch(&bundle.senses, &config.link.pos);
        let english = SenseInventory::english(&lexicon);
        let profiles = PolysemyProfiles::compute(&graph, &dutch, &english, Pos::Noun).unwrap();
        let m2m = m2m_index(&[profiles]);
        let candidates = CandidateCollector::new(&config.link, &bundle, &dutch, &m2m, &NoSynonyms)
            .collect(&lexicon)
            .unwrap();

        let before = graph.edge_count();
        let (graph, lexicon, report) = LinkMaterializer::new(&bundle)
            .with_created_at("2020-01-01T00:00:00+00:00")
            .run(graph, lexicon, &candidates)
            .unwrap();

        assert_eq!(report.materialized, 1);
        assert_eq!(graph.edge_count(), before + 1);
        let edge = graph.edge("LU-1", "(pm)RBN-kat-n-1").unwrap();
        assert_eq!(edge.attributes["provenance"], AttrValue::from("Iteration-1"));

        let lu = lexicon.lexical_unit("LU-1").unwrap();
        assert_eq!(lu.linked_senses.len(), 1);
        let link = &lu.linked_senses[0];
        assert_eq!(link.status, LinkStatus::Created);
        assert_eq!(link.created_at, "2020-01-01T00:00:00+00:00");
        assert_eq!(
            Some(&link.lemma_id),
            lexicon.dutch_lemma_pos_id(&LemmaPos::new("kat", Pos::Noun))
        );
    }

    #[test]
    fn sense_with_two_lexical_units_is_dropped() {
        let bundle = ResourceBundle {
            frames: vec![frame("Animals", 1, "cat"), frame("Pets", 2, "pussy")],
            senses: vec![sense("s1", "poes")],
            ..ResourceBundle::default()
        };
        let (graph, lexicon) = prepare(&bundle);
        let mut candidates = CandidateLinks::new();
        candidates.record("s1", "LU-1", "Iteration-1");
        candidates.record("s1", "LU-2", "Iteration-1");

        let before = graph.edge_count();
        let (graph, lexicon, report) = LinkMaterializer::new(&bundle)
            .run(graph, lexicon, &candidates)
            .unwrap();

        assert_eq!(report.materialized, 0);
        assert_eq!(report.ambiguous_senses, 1);
        assert_eq!(graph.edge_count(), before);
        assert_eq!(lexicon.linked_sense_count(), 0);
    }

    #[test]
    fn existing_edge_breaks_the_edge_count() {
        let bundle = ResourceBundle {
            frames: vec![frame("Animals", 1, "cat")],
            translations: vec![TranslationRecord {
                english: "cat".into(),
                pos: Pos::Noun,
                dutch: vec!["kat".into()],
            }],
            senses: vec![sense("kat-n-1", "kat")],
            ..ResourceBundle::default()
        };
        let (mut graph, lexicon) = prepare(&bundle);
        graph
            .add_edge("LU-1", "(pm)RBN-kat-n-1", LinkEdge::new())
            .unwrap();
        let mut candidates = CandidateLinks::new();
        candidates.record("kat-n-1", "LU-1", "Iteration-1");

        let err = LinkMaterializer::new(&bundle)
            .run(graph, lexicon, &candidates)
            .unwrap_err();
        assert!(matches!(err, LinkError::Consistency(_)));
    }

    #[test]
    fn unregistered_lemma_pos_is_fatal() {
        let bundle = ResourceBundle {
            frames: vec![frame("Animals", 1, "cat")],
            senses: vec![sense("poes-n-1", "poes")],
            ..ResourceBundle::default()
        };
        let (graph, lexicon) = prepare(&bundle);
        let mut candidates = CandidateLinks::new();
        candidates.record("poes-n-1", "LU-1", "Iteration-1");

        let err = LinkMaterializer::new(&bundle)
            .run(graph, lexicon, &candidates)
            .unwrap_err();
        assert!(matches!(err, LinkError::Consistency(_)));
    }
}
