//! Frame lexicon registry: frames, lexical units, attached lemmas and the
//! Dutch lemma-pos identifier registry.
//!
//! The registry is assembled once from a [`ResourceBundle`] and travels next
//! to the graph through every snapshot.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::LinkConfig;
use crate::errors::{LinkError, Result};
use crate::graph::subsumption::InheritanceHierarchy;
use crate::pos::Pos;
use crate::resources::{ResourceBundle, SenseRecord};
use crate::types::{naming, Language, LemmaPos, LemmaPosId};

pub mod entries;

pub use entries::{
    lemma_hover_info, FrameEntry, LemmaEntry, LemmaProvenance, LexicalUnitEntry, LinkStatus,
    SenseLink,
};

/// Frames keyed by label, plus the Dutch lemma-pos registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameLexicon {
    /// Frames keyed by label.
    pub frames: BTreeMap<String, FrameEntry>,
    /// Dutch lemma-pos → identifier.
    pub dutch_lemma_pos_ids: BTreeMap<LemmaPos, LemmaPosId>,
}

impl FrameLexicon {
    /// Assemble the registry from resource records.
    pub fn assemble(bundle: &ResourceBundle, config: &LinkConfig) -> Result<Self> {
        let hierarchy = InheritanceHierarchy::new(&bundle.frame_inheritance);
        let frame_feature_sets = hierarchy.frame_feature_sets(&bundle.feature_set_mapping);

        let mut translations: HashMap<(&str, Pos), Vec<&str>> = HashMap::new();
        for t in &bundle.translations {
            translations
                .entry((t.english.as_str(), t.pos))
                .or_default()
                .extend(t.dutch.iter().map(String::as_str));
        }

        let mut annotations: HashMap<&str, Vec<LemmaEntry>> = HashMap::new();
        for a in &bundle.corpus_annotations {
            annotations.entry(a.frame.as_str()).or_default().push(LemmaEntry {
                lemma: a.lemma.clone(),
                pos: a.pos,
                language: Language::Dutch,
                provenance: LemmaProvenance::CorpusAnnotation,
                lu_id: None,
                lemma_pos_id: None,
            });
        }

        let known = KnownSenseLemmas::new(&bundle.senses);
        let mut lexicon = FrameLexicon::default();
        let mut seen_lus: HashSet<String> = HashSet::new();

        for record in &bundle.frames {
            if record.label.is_empty() {
                return Err(LinkError::Schema("frame record without a label".into()));
            }
            let frame_id = naming::frame(&config.rdf_prefix, &record.label);

            let mut lexical_units = BTreeMap::new();
            for lu in &record.lexical_units {
                let lu_id = naming::lexical_unit(lu.id);
                if !seen_lus.insert(lu_id.clone()) {
                    return Err(LinkError::IdCollision {
                        id: lu_id,
                        reason: "lexical unit listed under more than one frame".into(),
                    });
                }
                lexical_units.insert(
                    lu_id.clone(),
                    LexicalUnitEntry {
                        id: lu_id,
                        lexeme: lu.lexeme.clone(),
                        pos: lu.pos,
                        frame_id: frame_id.clone(),
                        linked_senses: Vec::new(),
                    },
                );
            }

            let mut lemmas = annotations.remove(record.label.as_str()).unwrap_or_default();
            for lu in lexical_units.values() {
                let Some(dutch) = translations.get(&(lu.lexeme.as_str(), lu.pos)) else {
                    continue;
                };
                for lemma in dutch {
                    lemmas.push(LemmaEntry {
                        lemma: lemma.to_string(),
                        pos: Some(lu.pos),
                        language: Language::Dutch,
                        provenance: LemmaProvenance::Translation,
                        lu_id: Some(lu.id.clone()),
                        lemma_pos_id: None,
                    });
                }
            }

            if config.lexicon.sense_lexicon_filter {
                lemmas = known.filter(lemmas);
            }
            if config.lexicon.exclude_lemmas_with_space {
                lemmas = filter_lemmas_with_space(lemmas);
            }

            let feature_set_values = frame_feature_sets
                .get(record.label.as_str())
                .map(|sets| sets.iter().map(|s| s.to_string()).collect())
                .unwrap_or_default();

            let entry = FrameEntry {
                label: record.label.clone(),
                id: frame_id,
                definition: record.definition.clone(),
                lexical_units,
                lemmas,
                feature_set_values,
            };
            if lexicon.frames.insert(record.label.clone(), entry).is_some() {
                return Err(LinkError::IdCollision {
                    id: record.label.clone(),
                    reason: "duplicate frame label".into(),
                });
            }
        }

        for label in annotations.keys() {
            debug!(frame = label, "corpus annotations for a frame not in the lexicon");
        }

        lexicon.register_dutch_lemma_pos_ids();
        lexicon.validate_lemma_pos_ids()?;

        info!(
            frames = lexicon.frames.len(),
            lexical_units = lexicon.lexical_units().count(),
            dutch_lemma_pos = lexicon.dutch_lemma_pos_ids.len(),
            "assembled frame lexicon"
        );
        Ok(lexicon)
    }

    /// Give every Dutch lemma with a part of speech its content-addressed id.
    pub fn register_dutch_lemma_pos_ids(&mut self) {
        let registry = &mut self.dutch_lemma_pos_ids;
        for frame in self.frames.values_mut() {
            for lemma in frame.lemmas.iter_mut() {
                if lemma.language != Language::Dutch {
                    continue;
                }
                let Some(key) = lemma.lemma_pos() else {
                    continue;
                };
                let id = registry
                    .entry(key)
                    .or_insert_with_key(|k| LemmaPosId::compute(Language::Dutch, k))
                    .clone();
                lemma.lemma_pos_id = Some(id);
            }
        }
    }

    /// Distinct identifiers in use must match the registry one to one.
    pub fn validate_lemma_pos_ids(&self) -> Result<()> {
        let used: BTreeSet<&LemmaPosId> = self
            .frames
            .values()
            .flat_map(|f| f.lemmas.iter())
            .filter_map(|l| l.lemma_pos_id.as_ref())
            .collect();
        let registered: BTreeSet<&LemmaPosId> = self.dutch_lemma_pos_ids.values().collect();

        if used.len() != self.dutch_lemma_pos_ids.len() || registered.len() != used.len() {
            return Err(LinkError::Consistency(format!(
                "{} lemma-pos ids in use, {} distinct registered, {} keys",
                used.len(),
                registered.len(),
                self.dutch_lemma_pos_ids.len()
            )));
        }
        Ok(())
    }

    /// All lexical units of all frames.
    pub fn lexical_units(&self) -> impl Iterator<Item = &LexicalUnitEntry> {
        self.frames.values().flat_map(|f| f.lexical_units.values())
    }

    /// Look up a lexical unit by node identifier.
    pub fn lexical_unit(&self, id: &str) -> Option<&LexicalUnitEntry> {
        self.frames.values().find_map(|f| f.lexical_units.get(id))
    }

    /// Mutable lookup of a lexical unit by node identifier.
    pub fn lexical_unit_mut(&mut self, id: &str) -> Option<&mut LexicalUnitEntry> {
        self.frames
            .values_mut()
            .find_map(|f| f.lexical_units.get_mut(id))
    }

    /// Lemma-pos id of a Dutch lemma-pos.
    pub fn dutch_lemma_pos_id(&self, key: &LemmaPos) -> Option<&LemmaPosId> {
        self.dutch_lemma_pos_ids.get(key)
    }

    /// Total number of sense links on all lexical units.
    pub fn linked_sense_count(&self) -> usize {
        self.lexical_units().map(|lu| lu.linked_senses.len()).sum()
    }
}

/// Lemmas and lemma-pos pairs known to the sense lexicon.
#[derive(Debug)]
struct KnownSenseLemmas<'a> {
    lemmas: HashSet<&'a str>,
    lemma_pos: HashSet<(&'a str, Pos)>,
}

impl<'a> KnownSenseLemmas<'a> {
    fn new(senses: &'a [SenseRecord]) -> Self {
        let mut lemmas = HashSet::new();
        let mut lemma_pos = HashSet::new();
        for sense in senses {
            lemmas.insert(sense.lemma.as_str());
            if let Ok(pos) = Pos::from_sense_lexicon(&sense.pos) {
                lemma_pos.insert((sense.lemma.as_str(), pos));
            }
        }
        Self { lemmas, lemma_pos }
    }

    /// Keep lemmas the sense lexicon knows: by lemma-pos when the lemma has a
    /// part of speech, by lemma otherwise.
    fn filter(&self, lemmas: Vec<LemmaEntry>) -> Vec<LemmaEntry> {
        lemmas
            .into_iter()
            .filter(|l| {
                let keep = match l.pos {
                    Some(pos) => self.lemma_pos.contains(&(l.lemma.as_str(), pos)),
                    None => self.lemmas.contains(l.lemma.as_str()),
                };
                if !keep {
                    debug!(lemma = %l.lemma, pos = ?l.pos, "not in sense lexicon, ignored");
                }
                keep
            })
            .collect()
    }
}

fn filter_lemmas_with_space(lemmas: Vec<LemmaEntry>) -> Vec<LemmaEntry> {
    lemmas
        .into_iter()
        .filter(|l| {
            let keep = !l.lemma.contains(' ');
            if !keep {
                debug!(lemma = %l.lemma, "contains a space, ignored");
            }
            keep
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{
        CorpusLemmaRecord, FrameRecord, LexicalUnitRecord, TranslationRecord,
    };

    fn bundle() -> ResourceBundle {
        ResourceBundle {
            frames: vec![FrameRecord {
                label: "Animals".into(),
                definition: Some("Living beings".into()),
                lexical_units: vec![LexicalUnitRecord {
                    id: 1,
                    lexeme: "cat".into(),
                    pos: Pos::Noun,
                }],
            }],
            translations: vec![TranslationRecord {
                english: "cat".into(),
                pos: Pos::Noun,
                dutch: vec!["kat".into(), "poes".into(), "huis kat".into()],
            }],
            corpus_annotations: vec![CorpusLemmaRecord {
                frame: "Animals".into(),
                lemma: "kat".into(),
                pos: Some(Pos::Noun),
            }],
            senses: vec![SenseRecord {
                sense_id: "kat-n-1".into(),
                lemma: "kat".into(),
                pos: "noun".into(),
                feature_set: None,
                synset_id: None,
                definition: None,
            }],
            ..ResourceBundle::default()
        }
    }

    #[test]
    fn translations_become_lemmas_of_the_lexical_unit() {
        let mut config = LinkConfig::default();
        config.lexicon.sense_lexicon_filter = false;
        config.lexicon.exclude_lemmas_with_space = false;
        let lexicon = FrameLexicon::assemble(&bundle(), &config).unwrap();

        let frame = &lexicon.frames["Animals"];
        assert_eq!(frame.id, "(pm)fn1.7:Animals");
        let translated: Vec<_> = frame
            .lemmas
            .iter()
            .filter(|l| l.provenance == LemmaProvenance::Translation)
            .map(|l| (l.lemma.as_str(), l.lu_id.as_deref()))
            .collect();
        assert_eq!(
            translated,
            vec![
                ("kat", Some("LU-1")),
                ("poes", Some("LU-1")),
                ("huis kat", Some("LU-1"))
            ]
        );
    }

    #[test]
    fn filters_drop_unknown_and_multiword_lemmas() {
        let lexicon = FrameLexicon::assemble(&bundle(), &LinkConfig::default()).unwrap();
        let lemmas: BTreeSet<_> = lexicon.frames["Animals"]
            .lemmas
            .iter()
            .map(|l| l.lemma.as_str())
            .collect();
        assert_eq!(lemmas.into_iter().collect::<Vec<_>>(), vec!["kat"]);
    }

    #[test]
    fn shared_lemma_pos_gets_one_identifier() {
        let lexicon = FrameLexicon::assemble(&bundle(), &LinkConfig::default()).unwrap();
        let key = LemmaPos::new("kat", Pos::Noun);
        let id = lexicon.dutch_lemma_pos_id(&key).unwrap();

        assert_eq!(lexicon.dutch_lemma_pos_ids.len(), 1);
        for lemma in &lexicon.frames["Animals"].lemmas {
            assert_eq!(lemma.lemma_pos_id.as_ref(), Some(id));
        }
        lexicon.validate_lemma_pos_ids().unwrap();
    }

    #[test]
    fn lexical_unit_under_two_frames_is_a_collision() {
        let mut b = bundle();
        let mut second = b.frames[0].clone();
        second.label = "Pets".into();
        b.frames.push(second);
        let err = FrameLexicon::assemble(&b, &LinkConfig::default()).unwrap_err();
        assert!(matches!(err, LinkError::IdCollision { .. }));
    }
}
