//! Graph construction logic: from the frame lexicon and the sense lexicon
//! into a LexicalGraph.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};

use crate::{
    config::{GraphOptions, LinkConfig},
    errors::{LinkError, Result},
    graph::{LexicalGraph, LexicalNode, LinkEdge},
    lexicon::{lemma_hover_info, FrameEntry, FrameLexicon, LemmaProvenance},
    pos::Pos,
    resources::{HoverInfo, ResourceBundle, SenseRecord, SynonymRecord},
    types::{naming, AttrValue, Attributes, Language, LemmaPos},
};

/// Builder for LexicalGraph from a resource bundle and its frame lexicon.
#[derive(Debug)]
pub struct GraphBuilder {
    options: GraphOptions,
    manual_curation_marker: String,
    graph: LexicalGraph,
}

impl GraphBuilder {
    /// Create a new builder with the given configuration.
    pub fn new(config: &LinkConfig) -> Self {
        Self {
            options: config.graph.clone(),
            manual_curation_marker: config.link.manual_curation_marker.clone(),
            graph: LexicalGraph::new(),
        }
    }

    /// Apply every enabled linkage rule and return the graph.
    pub fn build(mut self, bundle: &ResourceBundle, lexicon: &FrameLexicon) -> Result<LexicalGraph> {
        // Frame nodes exist regardless of the enabled rules.
        for frame in lexicon.frames.values() {
            self.add_frame(frame)?;
        }

        if self.options.frame_to_lexical_unit {
            self.link_frames_to_lexical_units(lexicon)?;
        }
        if self.options.lexical_unit_to_dutch_lemma {
            self.link_dutch_lemmas(lexicon)?;
        }
        if self.options.sense_to_dutch_lemma {
            self.link_senses_to_lemmas(bundle)?;
        }
        if self.options.sense_to_feature_set_to_frame {
            self.link_senses_to_feature_sets(bundle, lexicon)?;
        }
        if self.options.synset_to_synonym_sense {
            self.link_synsets(bundle)?;
        }

        info!(
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            "built lexical graph"
        );
        Ok(self.graph)
    }

    fn add_frame(&mut self, frame: &FrameEntry) -> Result<()> {
        self.graph
            .add_node(LexicalNode::new(frame.id.clone(), frame.hover_info())?)?;
        Ok(())
    }

    fn link_frames_to_lexical_units(&mut self, lexicon: &FrameLexicon) -> Result<()> {
        let mut added = 0usize;
        for frame in lexicon.frames.values() {
            for lu in frame.lexical_units.values() {
                self.graph.add_node(
                    LexicalNode::new(lu.id.clone(), lu.hover_info())?.with_lemma_pos(lu.lemma_pos()),
                )?;
                if self.graph.add_edge(&frame.id, &lu.id, LinkEdge::new())? {
                    added += 1;
                }
            }
        }
        debug!(edges = added, "frame -> lexical unit");
        Ok(())
    }

    fn link_dutch_lemmas(&mut self, lexicon: &FrameLexicon) -> Result<()> {
        let mut added = 0usize;
        for frame in lexicon.frames.values() {
            for lemma in &frame.lemmas {
                let lemma_id = lemma.node_id();
                let mut node = LexicalNode::new(lemma_id.clone(), lemma.hover_info())?;
                if let Some(key) = lemma.lemma_pos() {
                    node = node.with_lemma_pos(key);
                }
                self.graph.add_node(node)?;

                let other = match lemma.provenance {
                    LemmaProvenance::Translation => {
                        let lu_id = lemma.lu_id.as_deref().ok_or_else(|| {
                            LinkError::Schema(format!(
                                "translation lemma '{}' of frame '{}' has no lexical unit",
                                lemma.lemma, frame.label
                            ))
                        })?;
                        let lu = frame.lexical_units.get(lu_id).ok_or_else(|| {
                            LinkError::Schema(format!(
                                "lexical unit '{lu_id}' is not part of frame '{}'",
                                frame.label
                            ))
                        })?;
                        self.graph.add_node(
                            LexicalNode::new(lu.id.clone(), lu.hover_info())?
                                .with_lemma_pos(lu.lemma_pos()),
                        )?;
                        lu_id
                    }
                    LemmaProvenance::CorpusAnnotation => frame.id.as_str(),
                };
                if self.graph.add_edge(&lemma_id, other, LinkEdge::new())? {
                    added += 1;
                }
            }
        }
        debug!(edges = added, "lexical unit / frame -> Dutch lemma");
        Ok(())
    }

    fn link_senses_to_lemmas(&mut self, bundle: &ResourceBundle) -> Result<()> {
        let mut lemma_pos_to_senses: BTreeMap<LemmaPos, BTreeSet<String>> = BTreeMap::new();
        for sense in &bundle.senses {
            let pos = Pos::from_sense_lexicon(&sense.pos)?;
            let sense_id = self.add_sense(sense)?;
            lemma_pos_to_senses
                .entry(LemmaPos::new(sense.lemma.clone(), pos))
                .or_default()
                .insert(sense_id);
        }

        let mut added = 0usize;
        for (key, sense_ids) in lemma_pos_to_senses {
            let lemma_id = naming::lemma(Language::Dutch, &key.lemma, Some(key.pos));
            let attrs = lemma_hover_info(&key.lemma, Language::Dutch, Some(key.pos));
            self.graph
                .add_node(LexicalNode::new(lemma_id.clone(), attrs)?.with_lemma_pos(key))?;
            for sense_id in sense_ids {
                if self.graph.add_edge(&lemma_id, &sense_id, LinkEdge::new())? {
                    added += 1;
                }
            }
        }
        debug!(edges = added, "sense -> Dutch lemma");
        Ok(())
    }

    fn link_senses_to_feature_sets(
        &mut self,
        bundle: &ResourceBundle,
        lexicon: &FrameLexicon,
    ) -> Result<()> {
        let mut feature_set_to_frames: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for frame in lexicon.frames.values() {
            for value in &frame.feature_set_values {
                feature_set_to_frames
                    .entry(value.as_str())
                    .or_default()
                    .push(frame.id.as_str());
            }
        }

        let mut added = 0usize;
        for sense in &bundle.senses {
            let Some(feature_set) = sense.feature_set.as_deref() else {
                continue;
            };
            let Some(frames) = feature_set_to_frames.get(feature_set) else {
                debug!(sense = %sense.sense_id, feature_set, "feature set reaches no frame");
                continue;
            };

            let sense_id = self.add_sense(sense)?;
            let fs_id = naming::feature_set(feature_set);
            let mut attrs = Attributes::new();
            attrs.insert("feature_set".into(), feature_set.into());
            self.graph.add_node(LexicalNode::new(fs_id.clone(), attrs)?)?;

            if self.graph.add_edge(&sense_id, &fs_id, LinkEdge::new())? {
                added += 1;
            }
            for frame_id in frames {
                if self.graph.add_edge(&fs_id, frame_id, LinkEdge::new())? {
                    added += 1;
                }
            }
        }
        debug!(edges = added, "sense -> feature set -> frame");
        Ok(())
    }

    fn link_synsets(&mut self, bundle: &ResourceBundle) -> Result<()> {
        let senses = bundle.senses_by_id();
        let mut added = 0usize;
        for synset in &bundle.synsets {
            let synset_id = naming::synset(&synset.synset_id);
            self.graph
                .add_node(LexicalNode::new(synset_id.clone(), synset.hover_info())?)?;

            for synonym in &synset.synonyms {
                let sense_id = match senses.get(synonym.sense_id.as_str()) {
                    Some(record) => self.add_sense(record)?,
                    None => {
                        debug!(sense = %synonym.sense_id, "synonym without a sense record");
                        let sense_id = naming::sense(&synonym.sense_id);
                        let mut attrs = Attributes::new();
                        attrs.insert("sense_id".into(), synonym.sense_id.as_str().into());
                        self.graph.add_node(LexicalNode::new(sense_id.clone(), attrs)?)?;
                        sense_id
                    }
                };
                let edge = LinkEdge::with_attributes(self.synonym_edge_attributes(synonym));
                if self.graph.add_edge(&synset_id, &sense_id, edge)? {
                    added += 1;
                }
            }
        }
        debug!(edges = added, "synset -> synonym sense");
        Ok(())
    }

    fn synonym_edge_attributes(&self, synonym: &SynonymRecord) -> Attributes {
        let color = if synonym.provenance_set.contains(&self.manual_curation_marker) {
            "green"
        } else {
            "orange"
        };
        let mut attrs = Attributes::new();
        attrs.insert("color".into(), color.into());
        attrs.insert(
            "tooltip".into(),
            AttrValue::from(synonym.provenance_label.as_str()),
        );
        attrs
    }

    /// Insert a sense node; every rule derives the same node from the record.
    fn add_sense(&mut self, sense: &SenseRecord) -> Result<String> {
        let sense_id = naming::sense(&sense.sense_id);
        let mut node = LexicalNode::new(sense_id.clone(), sense.hover_info())?;
        if let Ok(pos) = Pos::from_sense_lexicon(&sense.pos) {
            node = node.with_lemma_pos(LemmaPos::new(sense.lemma.clone(), pos));
        }
        self.graph.add_node(node)?;
        Ok(sense_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{
        CorpusLemmaRecord, FrameRecord, LexicalUnitRecord, SynsetRecord, TranslationRecord,
    };

    fn sense(id: &str, lemma: &str, pos: &str) -> SenseRecord {
        SenseRecord {
            sense_id: id.into(),
            lemma: lemma.into(),
            pos: pos.into(),
            feature_set: None,
            synset_id: None,
            definition: None,
        }
    }

    fn bundle() -> ResourceBundle {
        let mut kat = sense("kat-n-1", "kat", "noun");
        kat.feature_set = Some("dier".into());
        kat.synset_id = Some("d_n-1".into());
        ResourceBundle {
            frames: vec![FrameRecord {
                label: "Animals".into(),
                definition: None,
                lexical_units: vec![LexicalUnitRecord {
                    id: 1,
                    lexeme: "cat".into(),
                    pos: Pos::Noun,
                }],
            }],
            translations: vec![TranslationRecord {
                english: "cat".into(),
                pos: Pos::Noun,
                dutch: vec!["kat".into()],
            }],
            corpus_annotations: vec![CorpusLemmaRecord {
                frame: "Animals".into(),
                lemma: "poes".into(),
                pos: Some(Pos::Noun),
            }],
            senses: vec![kat, sense("poes-n-1", "poes", "noun")],
            synsets: vec![SynsetRecord {
                synset_id: "d_n-1".into(),
                synonyms: vec![
                    SynonymRecord {
                        sense_id: "kat-n-1".into(),
                        provenance_set: ["cdb2.2_Manual".to_string()].into_iter().collect(),
                        provenance_label: "manual".into(),
                    },
                    SynonymRecord {
                        sense_id: "poes-n-1".into(),
                        provenance_set: BTreeSet::new(),
                        provenance_label: "automatic".into(),
                    },
                ],
            }],
            feature_set_mapping: [("dier".to_string(), vec!["Animals".to_string()])]
                .into_iter()
                .collect(),
            ..ResourceBundle::default()
        }
    }

    fn all_rules() -> LinkConfig {
        let mut config = LinkConfig::default();
        config.graph.sense_to_feature_set_to_frame = true;
        config
    }

    fn build(config: &LinkConfig) -> LexicalGraph {
        let b = bundle();
        let lexicon = FrameLexicon::assemble(&b, config).unwrap();
        GraphBuilder::new(config).build(&b, &lexicon).unwrap()
    }

    #[test]
    fn every_rule_contributes_its_edges() {
        let g = build(&all_rules());

        assert!(g.has_edge("(pm)fn1.7:Animals", "LU-1"));
        assert!(g.has_edge("(Dutch)kat.N", "LU-1"));
        assert!(g.has_edge("(Dutch)poes.N", "(pm)fn1.7:Animals"));
        assert!(g.has_edge("(pm)RBN-kat-n-1", "(Dutch)kat.N"));
        assert!(g.has_edge("(pm)RBN-kat-n-1", "(fs)dier"));
        assert!(g.has_edge("(fs)dier", "(pm)fn1.7:Animals"));
        assert!(g.has_edge("(syn)d_n-1", "(pm)RBN-poes-n-1"));
    }

    #[test]
    fn synonym_edges_are_coloured_by_curation() {
        let g = build(&LinkConfig::default());
        let manual = g.edge("(syn)d_n-1", "(pm)RBN-kat-n-1").unwrap();
        let automatic = g.edge("(syn)d_n-1", "(pm)RBN-poes-n-1").unwrap();

        assert_eq!(manual.attributes["color"], AttrValue::from("green"));
        assert_eq!(manual.attributes["tooltip"], AttrValue::from("manual"));
        assert_eq!(automatic.attributes["color"], AttrValue::from("orange"));
    }

    #[test]
    fn disabled_rules_add_nothing() {
        let mut config = LinkConfig::default();
        config.graph = GraphOptions {
            frame_to_lexical_unit: false,
            lexical_unit_to_dutch_lemma: false,
            sense_to_dutch_lemma: false,
            sense_to_feature_set_to_frame: false,
            synset_to_synonym_sense: false,
        };
        let g = build(&config);
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.node_set().into_iter().collect::<Vec<_>>(), vec!["(pm)fn1.7:Animals"]);
    }

    #[test]
    fn rebuilding_gives_identical_sets() {
        let config = all_rules();
        let first = build(&config);
        let second = build(&config);
        assert_eq!(first.node_set(), second.node_set());
        assert_eq!(first.edge_set(), second.edge_set());
    }

    #[test]
    fn unmapped_sense_tag_is_fatal_for_the_lemma_rule() {
        let mut b = bundle();
        b.senses.push(sense("en-c-1", "en", "conjunction"));
        let config = LinkConfig::default();
        let lexicon = FrameLexicon::assemble(&b, &config).unwrap();
        let err = GraphBuilder::new(&config).build(&b, &lexicon).unwrap_err();
        assert!(matches!(err, LinkError::UnmappedPos { .. }));
    }

    #[test]
    fn lemma_nodes_carry_their_lemma_pos() {
        let g = build(&LinkConfig::default());
        let node = g.node("(Dutch)kat.N").unwrap();
        assert_eq!(node.lemma_pos, Some(LemmaPos::new("kat", Pos::Noun)));
        let lu = g.node("LU-1").unwrap();
        assert_eq!(lu.lemma_pos, Some(LemmaPos::new("cat", Pos::Noun)));
    }
}
