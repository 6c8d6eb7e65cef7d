//! Candidate collection: provisional sense → lexical unit associations for
//! monosemous translation pairs.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::{debug, info};

use crate::config::LinkOptions;
use crate::errors::{LinkError, Result};
use crate::lexicon::{FrameLexicon, LemmaProvenance};
use crate::link::SynonymPolicy;
use crate::polysemy::{ReferenceInventory, SenseInventory};
use crate::resources::{ResourceBundle, SenseRecord, SynsetRecord};
use crate::types::{Language, LemmaPos};

/// Provisional associations with their provenance labels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateLinks {
    lu_to_senses: BTreeMap<String, BTreeSet<String>>,
    sense_to_lus: BTreeMap<String, BTreeSet<String>>,
    provenance: BTreeMap<(String, String), String>,
    reference_skipped: BTreeSet<String>,
}

impl CandidateLinks {
    /// No candidates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a provisional link. The first label recorded for a
    /// (sense, lexical unit) pair is kept.
    pub fn record(&mut self, sense_id: &str, lu_id: &str, provenance: &str) {
        self.lu_to_senses
            .entry(lu_id.to_string())
            .or_default()
            .insert(sense_id.to_string());
        self.sense_to_lus
            .entry(sense_id.to_string())
            .or_default()
            .insert(lu_id.to_string());
        self.provenance
            .entry((sense_id.to_string(), lu_id.to_string()))
            .or_insert_with(|| provenance.to_string());
    }

    /// Candidate senses of a lexical unit.
    pub fn senses_of(&self, lu_id: &str) -> impl Iterator<Item = &str> {
        self.lu_to_senses
            .get(lu_id)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Lexical units a sense is provisionally linked to.
    pub fn lexical_units_of(&self, sense_id: &str) -> usize {
        self.sense_to_lus.get(sense_id).map_or(0, BTreeSet::len)
    }

    /// Provenance label of a provisional link.
    pub fn provenance(&self, sense_id: &str, lu_id: &str) -> Option<&str> {
        self.provenance
            .get(&(sense_id.to_string(), lu_id.to_string()))
            .map(String::as_str)
    }

    /// Lexical units with at least one candidate.
    pub fn lexical_units(&self) -> impl Iterator<Item = &str> {
        self.lu_to_senses.keys().map(String::as_str)
    }

    /// Senses linked to more than one lexical unit.
    pub fn ambiguous_senses(&self) -> impl Iterator<Item = &str> {
        self.sense_to_lus
            .iter()
            .filter(|(_, lus)| lus.len() > 1)
            .map(|(sense, _)| sense.as_str())
    }

    /// Lexical units skipped as polysemous in the reference inventory.
    pub fn reference_skipped(&self) -> impl Iterator<Item = &str> {
        self.reference_skipped.iter().map(String::as_str)
    }

    /// Number of provisional (sense, lexical unit) pairs.
    pub fn len(&self) -> usize {
        self.provenance.len()
    }

    /// Whether nothing was collected.
    pub fn is_empty(&self) -> bool {
        self.provenance.is_empty()
    }
}

/// Collects candidate links from the m2m translation pairs.
pub struct CandidateCollector<'a> {
    options: &'a LinkOptions,
    bundle: &'a ResourceBundle,
    dutch: &'a SenseInventory,
    m2m: &'a HashMap<LemmaPos, BTreeSet<LemmaPos>>,
    reference: Option<&'a dyn ReferenceInventory>,
    policy: &'a dyn SynonymPolicy,
}

impl<'a> std::fmt::Debug for CandidateCollector<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandidateCollector")
            .field("options", &self.options)
            .field("m2m", &self.m2m.len())
            .field("reference", &self.reference.is_some())
            .field("policy", &"<SynonymPolicy>")
            .finish()
    }
}

impl<'a> CandidateCollector<'a> {
    /// Create a collector.
    ///
    /// `dutch` holds the senses of the chosen parts of speech and `m2m` maps
    /// English lemma-pos keys to their m2m Dutch counterparts.
    pub fn new(
        options: &'a LinkOptions,
        bundle: &'a ResourceBundle,
        dutch: &'a SenseInventory,
        m2m: &'a HashMap<LemmaPos, BTreeSet<LemmaPos>>,
        policy: &'a dyn SynonymPolicy,
    ) -> Self {
        Self {
            options,
            bundle,
            dutch,
            m2m,
            reference: None,
            policy,
        }
    }

    /// Reference inventory for the strict monosemy mode.
    pub fn with_reference(mut self, reference: &'a dyn ReferenceInventory) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Walk every Dutch translation lemma of the lexicon.
    pub fn collect(&self, lexicon: &FrameLexicon) -> Result<CandidateLinks> {
        let reference = match (self.options.use_reference_polysemy, self.reference) {
            (true, None) => {
                return Err(LinkError::Config(
                    "reference polysemy requested without a reference inventory".into(),
                ))
            }
            (true, Some(r)) => Some(r),
            (false, _) => None,
        };

        let senses = self.bundle.senses_by_id();
        let synsets = self.bundle.synsets_by_id();
        let mut links = CandidateLinks::new();

        for frame in lexicon.frames.values() {
            for lemma in &frame.lemmas {
                if lemma.provenance != LemmaProvenance::Translation
                    || lemma.language != Language::Dutch
                {
                    continue;
                }
                let (Some(lu_id), Some(dutch_key)) = (lemma.lu_id.as_deref(), lemma.lemma_pos())
                else {
                    continue;
                };
                let lu = frame.lexical_units.get(lu_id).ok_or_else(|| {
                    LinkError::Schema(format!(
                        "lexical unit '{lu_id}' is not part of frame '{}'",
                        frame.label
                    ))
                })?;

                let Some(dutch_keys) = self.m2m.get(&lu.lemma_pos()) else {
                    continue;
                };

                if let Some(reference) = reference {
                    let tag = lu.pos.reference_pos().ok_or_else(|| LinkError::UnmappedPos {
                        tag: lu.pos.tag().to_string(),
                        tagset: "reference inventory",
                    })?;
                    let count = reference.sense_count(&lu.lexeme, tag);
                    if count >= 2 {
                        if links.reference_skipped.insert(lu_id.to_string()) {
                            debug!(lu = lu_id, lexeme = %lu.lexeme, count, "polysemous in reference, skipped");
                        }
                        continue;
                    }
                }

                if !dutch_keys.contains(&dutch_key) {
                    continue;
                }

                let Some(sense_ids) = self.dutch.senses(&dutch_key) else {
                    continue;
                };
                for sense_id in sense_ids {
                    links.record(sense_id, lu_id, &self.options.provenance_label);
                    if self.options.include_synonyms {
                        self.add_synonyms(&mut links, sense_id, lu_id, &senses, &synsets);
                    }
                }
            }
        }

        info!(
            candidates = links.len(),
            lexical_units = links.lexical_units().count(),
            reference_skipped = links.reference_skipped.len(),
            "collected candidate links"
        );
        Ok(links)
    }

    fn add_synonyms(
        &self,
        links: &mut CandidateLinks,
        sense_id: &str,
        lu_id: &str,
        senses: &HashMap<&str, &SenseRecord>,
        synsets: &HashMap<&str, &SynsetRecord>,
    ) {
        let Some(synset_id) = senses.get(sense_id).and_then(|s| s.synset_id.as_deref()) else {
            return;
        };
        let Some(synset) = synsets.get(synset_id) else {
            debug!(sense = sense_id, synset = synset_id, "synset not found");
            return;
        };
        for synonym in &synset.synonyms {
            if synonym.sense_id == sense_id || !self.policy.admits(sense_id, synonym) {
                continue;
            }
            links.record(&synonym.sense_id, lu_id, &self.options.synonym_provenance_label);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LinkConfig, LinkOptions};
    use crate::link::NoSynonyms;
    use crate::polysemy::StaticReferenceInventory;
    use crate::pos::{Pos, ReferencePos};
    use crate::resources::{FrameRecord, LexicalUnitRecord, ReferenceEntry, TranslationRecord};

    fn bundle(lexeme: &str, pos: Pos, dutch: &[&str]) -> ResourceBundle {
        ResourceBundle {
            frames: vec![FrameRecord {
                label: "Animals".into(),
                definition: None,
                lexical_units: vec![LexicalUnitRecord {
                    id: 1,
                    lexeme: lexeme.into(),
                    pos,
                }],
            }],
            translations: vec![TranslationRecord {
                english: lexeme.into(),
                pos,
                dutch: dutch.iter().map(|d| d.to_string()).collect(),
            }],
            ..ResourceBundle::default()
        }
    }

    fn lexicon(bundle: &ResourceBundle) -> FrameLexicon {
        let mut config = LinkConfig::default();
        config.lexicon.sense_lexicon_filter = false;
        FrameLexicon::assemble(bundle, &config).unwrap()
    }

    /// Every translation pair of the lexicon treated as m2m, one sense per
    /// Dutch lemma-pos.
    fn all_m2m(lexicon: &FrameLexicon) -> (SenseInventory, HashMap<LemmaPos, BTreeSet<LemmaPos>>) {
        let mut dutch = SenseInventory::new();
        let mut m2m: HashMap<LemmaPos, BTreeSet<LemmaPos>> = HashMap::new();
        for frame in lexicon.frames.values() {
            for lemma in &frame.lemmas {
                let (Some(lu_id), Some(key)) = (lemma.lu_id.as_deref(), lemma.lemma_pos()) else {
                    continue;
                };
                let lu = &frame.lexical_units[lu_id];
                dutch.insert(key.clone(), format!("{}-1", key.lemma));
                m2m.entry(lu.lemma_pos()).or_default().insert(key);
            }
        }
        (dutch, m2m)
    }

    fn reference(lemma: &str, senses: usize) -> StaticReferenceInventory {
        StaticReferenceInventory::new(&[ReferenceEntry {
            lemma: lemma.into(),
            pos: ReferencePos::Noun,
            senses,
        }])
    }

    #[test]
    fn reference_mode_needs_an_inventory() {
        let bundle = bundle("cat", Pos::Noun, &["kat"]);
        let lexicon = lexicon(&bundle);
        let (dutch, m2m) = all_m2m(&lexicon);
        let options = LinkOptions::default();
        assert!(options.use_reference_polysemy);

        let err = CandidateCollector::new(&options, &bundle, &dutch, &m2m, &NoSynonyms)
            .collect(&lexicon)
            .unwrap_err();
        assert!(matches!(err, LinkError::Config(_)));
    }

    #[test]
    fn closed_class_lexical_unit_has_no_reference_tag() {
        let bundle = bundle("in", Pos::Preposition, &["in"]);
        let lexicon = lexicon(&bundle);
        let (dutch, m2m) = all_m2m(&lexicon);
        let options = LinkOptions::default();
        let inventory = StaticReferenceInventory::default();

        let err = CandidateCollector::new(&options, &bundle, &dutch, &m2m, &NoSynonyms)
            .with_reference(&inventory)
            .collect(&lexicon)
            .unwrap_err();
        assert!(matches!(err, LinkError::UnmappedPos { .. }));
    }

    #[test]
    fn reference_polysemous_lexical_unit_is_skipped_once() {
        let bundle = bundle("cat", Pos::Noun, &["kat", "poes"]);
        let lexicon = lexicon(&bundle);
        let (dutch, m2m) = all_m2m(&lexicon);
        let options = LinkOptions::default();

        let polysemous = reference("cat", 2);
        let links = CandidateCollector::new(&options, &bundle, &dutch, &m2m, &NoSynonyms)
            .with_reference(&polysemous)
            .collect(&lexicon)
            .unwrap();
        assert!(links.is_empty());
        assert_eq!(links.reference_skipped().collect::<Vec<_>>(), vec!["LU-1"]);

        let monosemous = reference("cat", 1);
        let links = CandidateCollector::new(&options, &bundle, &dutch, &m2m, &NoSynonyms)
            .with_reference(&monosemous)
            .collect(&lexicon)
            .unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(links.reference_skipped().count(), 0);
    }

    #[test]
    fn first_label_wins() {
        let mut links = CandidateLinks::new();
        links.record("kat-n-1", "LU-1", "Iteration-1");
        links.record("kat-n-1", "LU-1", "synonym");
        assert_eq!(links.provenance("kat-n-1", "LU-1"), Some("Iteration-1"));
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn ambiguity_is_tracked_per_sense() {
        let mut links = CandidateLinks::new();
        links.record("s1", "LU-1", "x");
        links.record("s1", "LU-2", "x");
        links.record("s2", "LU-2", "x");

        assert_eq!(links.lexical_units_of("s1"), 2);
        assert_eq!(links.lexical_units_of("s2"), 1);
        assert_eq!(links.ambiguous_senses().collect::<Vec<_>>(), vec!["s1"]);
        assert_eq!(links.senses_of("LU-2").collect::<Vec<_>>(), vec!["s1", "s2"]);
    }
}
