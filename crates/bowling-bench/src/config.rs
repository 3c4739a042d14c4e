use bowling_core::model::layout::ThrowLayout;
use bowling_core::model::ledger::ThrowLedger;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const DEFAULT_CLEAR_RATE: f64 = 0.3;
const MAX_GENERATED_GAMES: usize = 1_000_000;
const RUN_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root audit configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AuditConfig {
    pub run_id: String,
    #[serde(default)]
    pub layout: ThrowLayout,
    #[serde(default)]
    pub games: Vec<GameConfig>,
    #[serde(default)]
    pub generated: Option<GeneratedConfig>,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AuditConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: AuditConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_run_id(&self.run_id)?;
        validate_games(&self.games)?;
        if let Some(generated) = self.generated.as_ref() {
            generated.validate()?;
        }
        if self.total_games() == 0 {
            return Err(ValidationError::InvalidField {
                field: "games".to_string(),
                message: "at least one configured or generated game is required".to_string(),
            });
        }
        self.outputs.validate(&self.run_id)?;
        self.logging.normalize();
        Ok(())
    }

    pub fn total_games(&self) -> usize {
        self.games.len() + self.generated.as_ref().map_or(0, |g| g.count)
    }

    /// Resolve output templates (e.g., `{run_id}` placeholders) into concrete paths.
    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            jsonl: resolve_template(&self.run_id, &self.outputs.jsonl),
            summary_md: resolve_template(&self.run_id, &self.outputs.summary_md),
        }
    }
}

/// A recorded game to audit, with an optional expected outcome.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GameConfig {
    pub name: String,
    pub throws: Vec<u8>,
    #[serde(default)]
    pub expect_score: Option<u32>,
    #[serde(default)]
    pub expect_rejected: bool,
}

/// Seeded batch of random legal games.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GeneratedConfig {
    pub seed: Option<u64>,
    pub count: usize,
    #[serde(default = "default_clear_rate")]
    pub clear_rate: f64,
    /// Cut each game off after a random number of balls.
    #[serde(default)]
    pub partial: bool,
}

impl GeneratedConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.count == 0 || self.count > MAX_GENERATED_GAMES {
            return Err(ValidationError::InvalidField {
                field: "generated.count".to_string(),
                message: format!("count must be between 1 and {MAX_GENERATED_GAMES}"),
            });
        }

        if !(0.0..=1.0).contains(&self.clear_rate) {
            return Err(ValidationError::InvalidField {
                field: "generated.clear_rate".to_string(),
                message: "clear rate must be within [0, 1]".to_string(),
            });
        }

        Ok(())
    }
}

fn default_clear_rate() -> f64 {
    DEFAULT_CLEAR_RATE
}

/// Output artifact configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub jsonl: String,
    pub summary_md: String,
}

impl OutputsConfig {
    fn validate(&self, run_id: &str) -> Result<(), ValidationError> {
        for (label, value) in [
            ("outputs.jsonl", &self.jsonl),
            ("outputs.summary_md", &self.summary_md),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "path must not be empty".to_string(),
                });
            }
            let resolved = resolve_template(run_id, value);
            if resolved.components().count() == 0 {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "resolved path is invalid".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Logging configuration defaults to disabled structured logs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.trim().is_empty() {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id must not be empty".to_string(),
        });
    }

    if !run_id.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id may only contain alphanumeric characters, '.', '_' or '-'".to_string(),
        });
    }

    Ok(())
}

fn validate_games(games: &[GameConfig]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for game in games {
        if game.name.trim().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "games.name".to_string(),
                message: "game name must not be empty".to_string(),
            });
        }

        if !game.name.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
            return Err(ValidationError::InvalidField {
                field: format!("games[{}].name", game.name),
                message: "game name contains invalid characters".to_string(),
            });
        }

        if !seen.insert(game.name.as_str()) {
            return Err(ValidationError::InvalidField {
                field: "games".to_string(),
                message: format!("game name '{}' defined more than once", game.name),
            });
        }

        if game.throws.len() > ThrowLedger::MAX_THROWS {
            return Err(ValidationError::InvalidField {
                field: format!("games[{}].throws", game.name),
                message: format!(
                    "{} throws exceed the ledger capacity of {}",
                    game.throws.len(),
                    ThrowLedger::MAX_THROWS
                ),
            });
        }

        if game.expect_rejected && game.expect_score.is_some() {
            return Err(ValidationError::InvalidField {
                field: format!("games[{}]", game.name),
                message: "expect_score and expect_rejected are mutually exclusive".to_string(),
            });
        }
    }

    Ok(())
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    let replaced = template.replace("{run_id}", run_id);
    PathBuf::from(replaced)
}

/// Fully resolved output paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub jsonl: PathBuf,
    pub summary_md: PathBuf,
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
