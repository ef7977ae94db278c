//! Scoreboard configuration.
//!
//! Read from a TOML file where every key is optional:
//!
//! ```toml
//! conducts_path = "data/conducts.json"
//! achievements_path = "data/achievements.json"
//! strict_tables = false
//! batch_policy = "skip-invalid"
//! output_path = "games.jsonl"
//!
//! [[sources]]
//! server = "hdf"
//! variant = "tnnt"
//! path = "xlogs/hdf-tnnt.xlog"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::batch::BatchPolicy;
use crate::error::{Error, Result};
use crate::record::IngestContext;
use crate::tables::Tables;

/// One xlog file and the server/variant its games belong to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub server: String,
    pub variant: String,
    pub path: PathBuf,
}

impl SourceConfig {
    pub fn context(&self) -> IngestContext {
        IngestContext::new(self.server.clone(), self.variant.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreboardConfig {
    /// Conduct label table (JSON)
    pub conducts_path: PathBuf,
    /// Achievement label table (JSON)
    pub achievements_path: PathBuf,
    /// Fail at startup when a label table cannot be loaded
    pub strict_tables: bool,
    pub batch_policy: BatchPolicy,
    /// Where accepted records are appended
    pub output_path: PathBuf,
    pub sources: Vec<SourceConfig>,
}

impl Default for ScoreboardConfig {
    fn default() -> Self {
        Self {
            conducts_path: PathBuf::from("data/conducts.json"),
            achievements_path: PathBuf::from("data/achievements.json"),
            strict_tables: false,
            batch_policy: BatchPolicy::default(),
            output_path: PathBuf::from("games.jsonl"),
            sources: Vec::new(),
        }
    }
}

impl ScoreboardConfig {
    /// Create a new configuration builder
    pub fn builder() -> ScoreboardConfigBuilder {
        ScoreboardConfigBuilder::default()
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load the label tables named by this configuration
    pub fn load_tables(&self) -> Result<Tables> {
        Tables::load(
            &self.conducts_path,
            &self.achievements_path,
            self.strict_tables,
        )
    }
}

/// Builder for ScoreboardConfig
#[derive(Debug, Clone, Default)]
pub struct ScoreboardConfigBuilder {
    conducts_path: Option<PathBuf>,
    achievements_path: Option<PathBuf>,
    strict_tables: Option<bool>,
    batch_policy: Option<BatchPolicy>,
    output_path: Option<PathBuf>,
    sources: Vec<SourceConfig>,
}

impl ScoreboardConfigBuilder {
    pub fn conducts_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.conducts_path = Some(path.into());
        self
    }

    pub fn achievements_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.achievements_path = Some(path.into());
        self
    }

    pub fn strict_tables(mut self, strict: bool) -> Self {
        self.strict_tables = Some(strict);
        self
    }

    pub fn batch_policy(mut self, policy: BatchPolicy) -> Self {
        self.batch_policy = Some(policy);
        self
    }

    pub fn output_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Add an xlog source
    pub fn source(mut self, source: SourceConfig) -> Self {
        self.sources.push(source);
        self
    }

    /// Build the configuration
    pub fn build(self) -> ScoreboardConfig {
        let default = ScoreboardConfig::default();
        ScoreboardConfig {
            conducts_path: self.conducts_path.unwrap_or(default.conducts_path),
            achievements_path: self.achievements_path.unwrap_or(default.achievements_path),
            strict_tables: self.strict_tables.unwrap_or(default.strict_tables),
            batch_policy: self.batch_policy.unwrap_or(default.batch_policy),
            output_path: self.output_path.unwrap_or(default.output_path),
            sources: self.sources,
        }
    }
}
