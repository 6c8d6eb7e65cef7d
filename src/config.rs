//! Global configuration for graph building, profiling and sense linking.

use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

use crate::errors::{LinkError, Result};
use crate::pos::Pos;
use crate::types::FRAME_PREFIX_ROOT;

/// How much a run reports. Errors are reported at every level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(try_from = "u8", into = "u8")]
pub enum Verbosity {
    /// 0: errors only.
    Silent,
    /// 1: summary counts and timestamps.
    #[default]
    Summary,
    /// 2: per-item tracing.
    Trace,
}

impl Verbosity {
    /// Maximum tracing level for this verbosity.
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Verbosity::Silent => LevelFilter::ERROR,
            Verbosity::Summary => LevelFilter::INFO,
            Verbosity::Trace => LevelFilter::DEBUG,
        }
    }
}

impl TryFrom<u8> for Verbosity {
    type Error = String;

    fn try_from(level: u8) -> std::result::Result<Self, Self::Error> {
        match level {
            0 => Ok(Verbosity::Silent),
            1 => Ok(Verbosity::Summary),
            2 => Ok(Verbosity::Trace),
            other => Err(format!("verbosity must be 0, 1 or 2, got {other}")),
        }
    }
}

impl From<Verbosity> for u8 {
    fn from(v: Verbosity) -> Self {
        match v {
            Verbosity::Silent => 0,
            Verbosity::Summary => 1,
            Verbosity::Trace => 2,
        }
    }
}

/// Linkage rules of the graph builder, each independently toggleable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphOptions {
    /// Frame to lexical unit edges.
    pub frame_to_lexical_unit: bool,
    /// Dutch lemma edges keyed by provenance: translations link to the lexical
    /// unit, corpus annotations link to the frame.
    pub lexical_unit_to_dutch_lemma: bool,
    /// Dutch sense to Dutch lemma-pos edges.
    pub sense_to_dutch_lemma: bool,
    /// Dutch sense to feature set to frame edges.
    pub sense_to_feature_set_to_frame: bool,
    /// Synset to synonym sense edges.
    pub synset_to_synonym_sense: bool,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            frame_to_lexical_unit: true,
            lexical_unit_to_dutch_lemma: true,
            sense_to_dutch_lemma: true,
            sense_to_feature_set_to_frame: false,
            synset_to_synonym_sense: true,
        }
    }
}

/// Filters applied while assembling the frame lexicon.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconOptions {
    /// Keep only Dutch lemmas that the sense lexicon knows.
    pub sense_lexicon_filter: bool,
    /// Drop Dutch lemmas containing a space.
    pub exclude_lemmas_with_space: bool,
}

impl Default for LexiconOptions {
    fn default() -> Self {
        Self {
            sense_lexicon_filter: true,
            exclude_lemmas_with_space: true,
        }
    }
}

/// Settings of the link materializer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkOptions {
    /// Parts of speech whose profiles are used.
    pub pos: Vec<Pos>,
    /// Additionally require the English lemma-pos to be monosemous in the
    /// reference inventory.
    pub use_reference_polysemy: bool,
    /// Also link synonyms of the candidate senses via their synset.
    pub include_synonyms: bool,
    /// Provenance marker a synonym needs to be admitted by the default policy.
    pub manual_curation_marker: String,
    /// Provenance label of direct candidates.
    pub provenance_label: String,
    /// Provenance label of synonym-expansion candidates.
    pub synonym_provenance_label: String,
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self {
            pos: vec![Pos::Noun, Pos::Verb, Pos::Adjective],
            use_reference_polysemy: true,
            include_synonyms: false,
            manual_curation_marker: "cdb2.2_Manual".into(),
            provenance_label: "Iteration-1".into(),
            synonym_provenance_label: "TRANSLATION:Wiktionary;METHOD:synonym-of-monosemous-sense"
                .into(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Prefix of frame identifiers.
    pub rdf_prefix: String,
    /// Reporting level.
    pub verbosity: Verbosity,
    /// Graph builder rules.
    pub graph: GraphOptions,
    /// Lexicon assembly filters.
    pub lexicon: LexiconOptions,
    /// Link materializer settings.
    pub link: LinkOptions,
    /// Path length bound for candidate discovery and display queries.
    pub max_path_length: usize,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            rdf_prefix: "(pm)fn1.7".into(),
            verbosity: Verbosity::Summary,
            graph: GraphOptions::default(),
            lexicon: LexiconOptions::default(),
            link: LinkOptions::default(),
            max_path_length: 3,
        }
    }
}

impl LinkConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn from_json_file(path: &std::path::Path) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        let config: LinkConfig = serde_json::from_str(&s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject structurally invalid settings.
    pub fn validate(&self) -> Result<()> {
        if !self.rdf_prefix.starts_with(FRAME_PREFIX_ROOT) {
            return Err(LinkError::Config(format!(
                "rdf_prefix '{}' must start with '{}'",
                self.rdf_prefix, FRAME_PREFIX_ROOT
            )));
        }
        if self.link.pos.is_empty() {
            return Err(LinkError::Config("link.pos must not be empty".into()));
        }
        if !(1..=3).contains(&self.max_path_length) {
            return Err(LinkError::Config(format!(
                "max_path_length must be within 1..=3, got {}",
                self.max_path_length
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        LinkConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: LinkConfig =
            serde_json::from_str(r#"{"verbosity": 2, "max_path_length": 1}"#).unwrap();
        assert_eq!(config.verbosity, Verbosity::Trace);
        assert_eq!(config.max_path_length, 1);
        assert_eq!(config.rdf_prefix, "(pm)fn1.7");
        assert!(config.graph.frame_to_lexical_unit);
    }

    #[test]
    fn partial_nested_sections_fall_back_to_defaults() {
        let config: LinkConfig = serde_json::from_str(
            r#"{"link": {"pos": ["N"]}, "graph": {"sense_to_feature_set_to_frame": true}, "lexicon": {}}"#,
        )
        .unwrap();
        assert_eq!(config.link.pos, vec![Pos::Noun]);
        assert!(config.link.use_reference_polysemy);
        assert!(!config.link.include_synonyms);
        assert_eq!(config.link.provenance_label, "Iteration-1");
        assert!(config.graph.sense_to_feature_set_to_frame);
        assert!(config.graph.frame_to_lexical_unit);
        assert!(config.lexicon.sense_lexicon_filter);
        config.validate().unwrap();
    }

    #[test]
    fn verbosity_out_of_range_is_rejected() {
        assert!(serde_json::from_str::<LinkConfig>(r#"{"verbosity": 3}"#).is_err());
    }

    #[test]
    fn validation_catches_bad_settings() {
        let mut config = LinkConfig {
            rdf_prefix: "fn".into(),
            ..LinkConfig::default()
        };
        assert!(matches!(config.validate(), Err(LinkError::Config(_))));

        config.rdf_prefix = "(pm)fn1.5".into();
        config.max_path_length = 0;
        assert!(config.validate().is_err());

        config.max_path_length = 2;
        config.link.pos.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn errors_survive_silent_verbosity() {
        assert_eq!(Verbosity::Silent.level_filter(), LevelFilter::ERROR);
        assert_eq!(Verbosity::Trace.level_filter(), LevelFilter::DEBUG);
    }
}
