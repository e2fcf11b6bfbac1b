// Configuration loading and parsing (season.toml, sources.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Built-in copies of `defaults/`, written out when a working directory has
/// neither `defaults/` nor `config/`.
const EMBEDDED_DEFAULTS: &[(&str, &str)] = &[
    ("season.toml", include_str!("../../../defaults/season.toml")),
    ("sources.toml", include_str!("../../../defaults/sources.toml")),
];

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
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub season: SeasonConfig,
    pub api: ApiConfig,
    pub cache: CacheConfig,
}

// ---------------------------------------------------------------------------
// season.toml structs
// ---------------------------------------------------------------------------

/// Wrapper for the top-level `[season]` table in season.toml.
#[derive(Debug, Clone, Deserialize)]
struct SeasonFile {
    season: SeasonConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeasonConfig {
    pub total_games: u32,
    pub playoff_threshold: u32,
    /// Season string ("2024-25"). Parsed by the caller; `None` means today's.
    #[serde(default)]
    pub current: Option<String>,
}

// ---------------------------------------------------------------------------
// sources.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
struct SourcesFile {
    api: ApiConfig,
    cache: CacheConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub stats_base_url: String,
    pub live_base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Reuse windows for upstream responses. A TTL of zero disables caching for
/// that endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    pub standings_ttl_secs: u64,
    pub leaders_ttl_secs: u64,
    pub scoreboard_ttl_secs: u64,
}

impl CacheConfig {
    pub fn standings_ttl(&self) -> Duration {
        Duration::from_secs(self.standings_ttl_secs)
    }

    pub fn leaders_ttl(&self) -> Duration {
        Duration::from_secs(self.leaders_ttl_secs)
    }

    pub fn scoreboard_ttl(&self) -> Duration {
        Duration::from_secs(self.scoreboard_ttl_secs)
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/season.toml` and
/// `config/sources.toml`, relative to `base_dir`.
///
/// Does not create missing files; `load_config_in()` does.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- season.toml (required) ---
    let season_path = config_dir.join("season.toml");
    let season_file: SeasonFile = parse_file(&season_path)?;

    // --- sources.toml (required) ---
    let sources_path = config_dir.join("sources.toml");
    let sources_file: SourcesFile = parse_file(&sources_path)?;

    let config = Config {
        season: season_file.season,
        api: sources_file.api,
        cache: sources_file.cache,
    };

    validate(&config)?;

    Ok(config)
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were written. Skips `.example` files.
///
/// When neither `defaults/` nor `config/` exists, the built-in defaults are
/// written to `config/` instead.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if config_dir.exists() {
            return Ok(vec![]);
        }
        return write_embedded_defaults(&config_dir);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let mut copied = Vec::new();

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }

        let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read {}: {e}", path.display()),
        })?;
        if let Some(target) = write_if_missing(&config_dir.join(file_name), &content)? {
            copied.push(target);
        }
    }

    Ok(copied)
}

fn write_embedded_defaults(config_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    std::fs::create_dir_all(config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;
    let mut written = Vec::new();
    for (name, content) in EMBEDDED_DEFAULTS {
        if let Some(target) = write_if_missing(&config_dir.join(name), content.as_bytes())? {
            written.push(target);
        }
    }
    Ok(written)
}

/// Create `target` with `content` unless it already exists.
fn write_if_missing(target: &Path, content: &[u8]) -> Result<Option<PathBuf>, ConfigError> {
    match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(target)
    {
        Ok(mut dest) => {
            std::io::Write::write_all(&mut dest, content).map_err(|e| {
                ConfigError::DefaultsCopyError {
                    message: format!("failed to write {}: {e}", target.display()),
                }
            })?;
            Ok(Some(target.to_path_buf()))
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(None),
        Err(e) => Err(ConfigError::DefaultsCopyError {
            message: format!("failed to create {}: {e}", target.display()),
        }),
    }
}

/// Ensure defaults are in place under `base_dir`, then load.
pub fn load_config_in(base_dir: &Path) -> Result<Config, ConfigError> {
    ensure_config_files(base_dir)?;
    load_config_from(base_dir)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let season = &config.season;
    if season.total_games == 0 {
        return Err(ConfigError::ValidationError {
            field: "season.total_games".into(),
            message: "must be greater than 0".into(),
        });
    }
    if season.playoff_threshold == 0 || season.playoff_threshold > season.total_games {
        return Err(ConfigError::ValidationError {
            field: "season.playoff_threshold".into(),
            message: format!(
                "must be between 1 and total_games ({}), got {}",
                season.total_games, season.playoff_threshold
            ),
        });
    }

    let api = &config.api;
    let url_fields: &[(&str, &str)] = &[
        ("api.stats_base_url", api.stats_base_url.as_str()),
        ("api.live_base_url", api.live_base_url.as_str()),
    ];
    for (name, val) in url_fields {
        if !(val.starts_with("http://") || val.starts_with("https://")) {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: format!("must be an http(s) URL, got `{val}`"),
            });
        }
    }
    if api.timeout_secs == 0 {
        return Err(ConfigError::ValidationError {
            field: "api.timeout_secs".into(),
            message: "must be > 0".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
