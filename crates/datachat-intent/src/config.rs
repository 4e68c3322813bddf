//! Configuration loading
//!
//! Values come from an optional TOML file, then from `DATACHAT__*`
//! environment variables (`DATACHAT__TOKENIZER__MAX_INPUT_CHARS=512`).

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use config::{Config, Environment, File};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ConfigError;
use crate::filters::{
    IntentClassifier, IntentFilter, IntentKind, PREDICTION_NOUNS, PREDICTION_VERBS,
    VISUALIZATION_NOUNS, VISUALIZATION_VERBS,
};
use crate::matcher::IntentDictionary;
use crate::storage::CsvTableStore;
use crate::tokenizer::{Lexicon, LexiconTokenizer, DEFAULT_MAX_INPUT_CHARS};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "DATACHAT";

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IntentConfig {
    pub tokenizer: TokenizerConfig,
    pub storage: StorageConfig,
    /// `nouns` / `verbs` left out of the section keep their built-in lemmas
    #[serde(deserialize_with = "visualization_section")]
    pub visualization: IntentDictionary,
    #[serde(deserialize_with = "prediction_section")]
    pub prediction: IntentDictionary,
}

/// Analyzer settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Inputs longer than this are rejected by the analyzer
    pub max_input_chars: usize,
    /// TSV lexicon replacing the built-in one
    pub lexicon_path: Option<PathBuf>,
}

/// Uploaded data location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct StorageConfig {
    pub table_path: Option<PathBuf>,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
            lexicon_path: None,
        }
    }
}

impl Default for IntentConfig {
    fn default() -> Self {
        Self {
            tokenizer: TokenizerConfig::default(),
            storage: StorageConfig::default(),
            visualization: default_visualization(),
            prediction: default_prediction(),
        }
    }
}

fn default_visualization() -> IntentDictionary {
    IntentDictionary::new(
        VISUALIZATION_NOUNS.iter().copied(),
        VISUALIZATION_VERBS.iter().copied(),
    )
}

fn default_prediction() -> IntentDictionary {
    IntentDictionary::new(
        PREDICTION_NOUNS.iter().copied(),
        PREDICTION_VERBS.iter().copied(),
    )
}

/// Filter section as written in a config source
#[derive(Deserialize)]
struct DictionarySection {
    nouns: Option<HashSet<String>>,
    verbs: Option<HashSet<String>>,
}

impl DictionarySection {
    fn or_defaults(self, defaults: IntentDictionary) -> IntentDictionary {
        IntentDictionary {
            nouns: self.nouns.unwrap_or(defaults.nouns),
            verbs: self.verbs.unwrap_or(defaults.verbs),
        }
    }
}

fn visualization_section<'de, D>(deserializer: D) -> Result<IntentDictionary, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(DictionarySection::deserialize(deserializer)?.or_defaults(default_visualization()))
}

fn prediction_section<'de, D>(deserializer: D) -> Result<IntentDictionary, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(DictionarySection::deserialize(deserializer)?.or_defaults(default_prediction()))
}

impl IntentConfig {
    /// `~/.config/datachat/config.toml` or platform equivalent
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("datachat")
            .join("config.toml")
    }

    /// Load from `path` (or [`IntentConfig::default_path`]) and the environment.
    /// A missing file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_path);
        Self::load_with_env(&path, Environment::with_prefix(ENV_PREFIX).separator("__"))
    }

    fn load_with_env(path: &Path, env: Environment) -> Result<Self, ConfigError> {
        let loaded: IntentConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(env)
            .build()?
            .try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tokenizer.max_input_chars == 0 {
            return Err(ConfigError::Validation(
                "tokenizer.max_input_chars must be greater than 0".to_string(),
            ));
        }
        for (name, dictionary) in [
            ("visualization", &self.visualization),
            ("prediction", &self.prediction),
        ] {
            if dictionary.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "{} filter needs at least one noun or verb",
                    name
                )));
            }
            let overlap = dictionary.overlapping_lemmas();
            if !overlap.is_empty() {
                tracing::debug!(filter = name, ?overlap, "lemmas listed as both noun and verb");
            }
        }
        Ok(())
    }

    /// Analyzer described by the `tokenizer` section
    pub fn build_tokenizer(&self) -> Result<LexiconTokenizer, ConfigError> {
        let lexicon = match &self.tokenizer.lexicon_path {
            Some(path) => Lexicon::from_tsv_path(path)?,
            None => Lexicon::korean_default(),
        };
        Ok(LexiconTokenizer::new(lexicon).with_max_input_chars(self.tokenizer.max_input_chars))
    }

    /// Classifier with the configured analyzer and vocabularies
    pub fn build_classifier(&self) -> Result<IntentClassifier, ConfigError> {
        Ok(IntentClassifier::new(
            Arc::new(self.build_tokenizer()?),
            IntentFilter::new(IntentKind::Visualization, self.visualization.clone()),
            IntentFilter::new(IntentKind::Prediction, self.prediction.clone()),
        ))
    }

    /// CSV store for the configured table path, if any
    pub fn table_store(&self) -> Option<CsvTableStore> {
        self.storage.table_path.as_ref().map(CsvTableStore::new)
    }
}
