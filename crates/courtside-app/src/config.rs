// Configuration loading and parsing (courtside.toml).

use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the single config file under `config/` and `defaults/`.
pub const CONFIG_FILE: &str = "courtside.toml";

/// Filter used when neither `RUST_LOG` nor `[logging] filter` is set.
pub const DEFAULT_LOG_FILTER: &str = "courtside=info,courtside_core=info,warn";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// courtside.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub sources: SourcesConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub leagues: Vec<LeagueEntry>,
    /// Extra player-name aliases (`"provider spelling" = "sheet spelling"`),
    /// merged over the built-in table.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Paths of the scraped source files.
#[derive(Debug, Clone, Deserialize)]
pub struct SourcesConfig {
    pub projections: PathBuf,
    pub schedule: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub dir: PathBuf,
}

/// Where the log file goes and what it records. `RUST_LOG` overrides
/// `filter`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub dir: PathBuf,
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("logs"),
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueEntry {
    pub id: String,
    pub provider_file: PathBuf,
}

impl Config {
    /// Snapshot path for one league.
    pub fn snapshot_path(&self, league_id: &str) -> PathBuf {
        self.output.dir.join(format!("{league_id}.json"))
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/courtside.toml` relative to `base_dir`.
///
/// Relative paths inside the file are resolved against `base_dir`. Run
/// `ensure_config_file` first to seed a missing file.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let mut config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    validate(&config)?;

    config.sources.projections = base_dir.join(&config.sources.projections);
    config.sources.schedule = base_dir.join(&config.sources.schedule);
    config.output.dir = base_dir.join(&config.output.dir);
    config.logging.dir = base_dir.join(&config.logging.dir);
    for league in &mut config.leagues {
        league.provider_file = base_dir.join(&league.provider_file);
    }

    Ok(config)
}

/// Seed `config/courtside.toml` from `defaults/courtside.toml` when it is
/// missing. Returns the path written, or `None` when a config already exists.
/// An existing config is never touched.
pub fn ensure_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let target = base_dir.join("config").join(CONFIG_FILE);
    if target.is_file() {
        return Ok(None);
    }

    let template = base_dir.join("defaults").join(CONFIG_FILE);
    if !template.is_file() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "no {} and no {} to seed it from",
                target.display(),
                template.display()
            ),
        });
    }

    let copy_err = |e: std::io::Error| ConfigError::DefaultsCopyError {
        message: format!("{} -> {}: {e}", template.display(), target.display()),
    };
    if let Some(dir) = target.parent() {
        std::fs::create_dir_all(dir).map_err(copy_err)?;
    }
    std::fs::copy(&template, &target).map_err(copy_err)?;
    Ok(Some(target))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn invalid(field: impl Into<String>, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.into(),
        message: message.into(),
    }
}

fn require_path(field: &str, path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(invalid(field, "path must not be empty"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    require_path("sources.projections", &config.sources.projections)?;
    require_path("sources.schedule", &config.sources.schedule)?;
    require_path("output.dir", &config.output.dir)?;
    require_path("logging.dir", &config.logging.dir)?;
    if config.logging.filter.trim().is_empty() {
        return Err(invalid("logging.filter", "must not be empty"));
    }

    if config.leagues.is_empty() {
        return Err(invalid("leagues", "at least one [[leagues]] entry is required"));
    }

    let mut seen = HashSet::new();
    for (i, league) in config.leagues.iter().enumerate() {
        let field = format!("leagues[{i}].id");
        if league.id.trim().is_empty() {
            return Err(invalid(field, "must not be empty"));
        }
        // Ids become snapshot file names.
        if !league
            .id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(invalid(
                field,
                format!("`{}` may only contain letters, digits, '-' and '_'", league.id),
            ));
        }
        if !seen.insert(league.id.as_str()) {
            return Err(invalid(field, format!("duplicate league id `{}`", league.id)));
        }
        require_path(&format!("leagues[{i}].provider_file"), &league.provider_file)?;
    }

    for (from, to) in &config.aliases {
        if from.trim().is_empty() || to.trim().is_empty() {
            return Err(invalid(format!("aliases.{from}"), "alias names must not be empty"));
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
