//! Analyzer configuration file.
//!
//! Every table and field is optional; an empty file is the default
//! configuration. Relative paths are resolved against the directory of the
//! configuration file.
//!
//! ```toml
//! [catalogue]
//! controls = "controls.json"
//! lexicon = "lexicon.toml"
//!
//! [extractor]
//! min_clause_len = 20
//! split = "sentences"
//!
//! [classifier]
//! adequate_strength_threshold = 2
//! parallel = false
//!
//! [drafting]
//! enabled = true
//! model = "gemma3:12b"
//! timeout_secs = 120
//! concurrency = 2
//!
//! [server]
//! listen = "127.0.0.1:8000"
//! allowed_origins = ["http://localhost:5173"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use policy_gap::ClassifierSettings;
use policy_gap_document::{ClauseExtractor, SplitMode, DEFAULT_MIN_CLAUSE_LEN};
use policy_gap_drafting::{DEFAULT_CONCURRENCY, DEFAULT_MODEL, DEFAULT_TIMEOUT};
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    pub catalogue: CatalogueConfig,
    pub extractor: ExtractorConfig,
    pub classifier: ClassifierConfig,
    pub drafting: DraftingConfig,
    pub server: ServerConfig,
}

/// Where controls and the lexicon come from. `None` means built-in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogueConfig {
    pub controls: Option<PathBuf>,
    pub lexicon: Option<PathBuf>,
}

/// Clause splitting, as accepted by `--split` and the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    #[default]
    Lines,
    Sentences,
}

impl From<Split> for SplitMode {
    fn from(split: Split) -> Self {
        match split {
            Split::Lines => SplitMode::Lines,
            Split::Sentences => SplitMode::Sentences,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractorConfig {
    pub min_clause_len: usize,
    pub split: Split,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            min_clause_len: DEFAULT_MIN_CLAUSE_LEN,
            split: Split::Lines,
        }
    }
}

impl ExtractorConfig {
    pub fn extractor(&self) -> ClauseExtractor {
        ClauseExtractor::with_settings(self.min_clause_len, self.split.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifierConfig {
    pub adequate_strength_threshold: u32,
    /// Evaluate controls on the rayon thread pool.
    pub parallel: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            adequate_strength_threshold: ClassifierSettings::default().adequate_strength_threshold,
            parallel: false,
        }
    }
}

impl ClassifierConfig {
    pub fn settings(&self) -> ClassifierSettings {
        ClassifierSettings {
            adequate_strength_threshold: self.adequate_strength_threshold,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DraftingConfig {
    pub enabled: bool,
    /// Model runner executable.
    pub program: String,
    pub model: String,
    pub timeout_secs: u64,
    pub concurrency: usize,
}

impl Default for DraftingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            program: "ollama".to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

/// `serve` settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub listen: String,
    /// Browser origins allowed to call the API.
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "127.0.0.1:8000".to_string(),
            allowed_origins: vec![
                "http://localhost:5173".to_string(),
                "http://127.0.0.1:5173".to_string(),
            ],
        }
    }
}

impl AnalyzerConfig {
    /// Load from a TOML file, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let mut config = Self::parse(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;

        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn resolve_paths(&mut self, base: &Path) {
        for path in [&mut self.catalogue.controls, &mut self.catalogue.lexicon]
            .into_iter()
            .flatten()
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn empty_config_is_default() {
        let config = AnalyzerConfig::parse("").unwrap();
        assert_eq!(config, AnalyzerConfig::default());
        assert_eq!(config.extractor.min_clause_len, 20);
        assert_eq!(config.classifier.adequate_strength_threshold, 2);
        assert_eq!(config.drafting.timeout_secs, 120);
        assert!(!config.drafting.enabled);
        assert_eq!(config.server.listen, "127.0.0.1:8000");
        assert_eq!(config.server.allowed_origins.len(), 2);
    }

    #[test]
    fn server_table() {
        let config = AnalyzerConfig::parse(
            "[server]\nlisten = \"0.0.0.0:9000\"\nallowed_origins = []\n",
        )
        .unwrap();
        assert_eq!(config.server.listen, "0.0.0.0:9000");
        assert!(config.server.allowed_origins.is_empty());
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let config = AnalyzerConfig::parse(
            r#"
[extractor]
split = "sentences"

[drafting]
enabled = true
concurrency = 4
"#,
        )
        .unwrap();

        assert_eq!(config.extractor.split, Split::Sentences);
        assert_eq!(config.extractor.min_clause_len, 20);
        assert!(config.drafting.enabled);
        assert_eq!(config.drafting.concurrency, 4);
        assert_eq!(config.drafting.model, DEFAULT_MODEL);
        assert_eq!(config.extractor.extractor().split(), SplitMode::Sentences);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(AnalyzerConfig::parse("[extractor]\nmin_len = 10\n").is_err());
        assert!(AnalyzerConfig::parse("[extractor]\nsplit = \"paragraphs\"\n").is_err());
    }

    #[test]
    fn no_path_means_defaults() {
        assert_eq!(AnalyzerConfig::load(None).unwrap(), AnalyzerConfig::default());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = AnalyzerConfig::load(Some(Path::new("/nonexistent/policy-gap.toml"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/policy-gap.toml"));
    }

    #[test]
    fn relative_paths_resolve_against_the_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[catalogue]").unwrap();
        writeln!(file, "controls = \"controls.json\"").unwrap();
        writeln!(file, "lexicon = \"/etc/policy-gap/lexicon.toml\"").unwrap();

        let config = AnalyzerConfig::load(Some(file.path())).unwrap();
        let base = file.path().parent().unwrap();

        assert_eq!(config.catalogue.controls, Some(base.join("controls.json")));
        assert_eq!(
            config.catalogue.lexicon,
            Some(PathBuf::from("/etc/policy-gap/lexicon.toml"))
        );
    }
}
