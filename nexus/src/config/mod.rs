//! Configuration system for the `nexus` CLI.
//!
//! Supports layered configuration with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/nexus/config.toml`)
//! 4. Compiled defaults
//!
//! Missing config file is not an error (defaults are used). An explicit
//! `--config` path that doesn't exist is an error.

use std::path::PathBuf;

use nexus_core::{Priority, StatusFilter};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

/// Top-level TOML config file structure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    storage: StorageFileConfig,
    display: DisplayFileConfig,
    tasks: TasksFileConfig,
}

/// `[storage]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct StorageFileConfig {
    data_dir: Option<PathBuf>,
}

/// `[display]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct DisplayFileConfig {
    timestamp_format: Option<String>,
}

/// `[tasks]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct TasksFileConfig {
    default_priority: Option<Priority>,
}

// ---------------------------------------------------------------------------
// Resolved configuration (concrete types, all fields populated)
// ---------------------------------------------------------------------------

/// Fully resolved application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding the key-value store files.
    pub data_dir: PathBuf,
    /// Timestamp display format string (chrono).
    pub timestamp_format: String,
    /// Priority for new missions when `--priority` is not given.
    pub default_priority: Priority,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: dirs::data_dir()
                .map_or_else(|| PathBuf::from(".nexus"), |dir| dir.join("nexus")),
            timestamp_format: "%b %d, %H:%M".to_string(),
            default_priority: Priority::Medium,
        }
    }
}

impl AppConfig {
    /// Load configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// If `--config` is given and the file does not exist, returns an
    /// error. Otherwise the default path (`~/.config/nexus/config.toml`) is
    /// tried and silently ignored if missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a config file exists but cannot be read
    /// or parsed, or if an explicit `--config` path is missing.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Ok(Self::resolve(cli, &file))
    }

    /// Resolve from CLI args and env vars alone, skipping the config file.
    ///
    /// Used when the default config file exists but is unreadable.
    #[must_use]
    pub fn from_cli(cli: &CliArgs) -> Self {
        Self::resolve(cli, &ConfigFile::default())
    }

    /// Resolve an `AppConfig` from CLI args and a parsed config file.
    ///
    /// Priority: CLI > file > default.
    #[must_use]
    fn resolve(cli: &CliArgs, file: &ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            data_dir: cli
                .data_dir
                .clone()
                .or_else(|| file.storage.data_dir.clone())
                .unwrap_or(defaults.data_dir),
            timestamp_format: cli
                .timestamp_format
                .clone()
                .or_else(|| file.display.timestamp_format.clone())
                .unwrap_or(defaults.timestamp_format),
            default_priority: file
                .tasks
                .default_priority
                .unwrap_or(defaults.default_priority),
        }
    }
}

/// CLI arguments parsed by clap.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Mission tracker with rank progression")]
pub struct CliArgs {
    /// Path to config file (default: `~/.config/nexus/config.toml`).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory where missions are stored.
    #[arg(long, env = "NEXUS_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Timestamp display format (chrono format string).
    #[arg(long, global = true)]
    pub timestamp_format: Option<String>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "NEXUS_LOG", global = true)]
    pub log_level: String,

    /// Path to log file (default: `$TMPDIR/nexus.log`).
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// What to do; lists missions when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// One user action.
#[derive(clap::Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a new mission.
    Add {
        /// Mission title.
        title: String,
        /// Longer description.
        #[arg(short, long)]
        description: Option<String>,
        /// low, medium or high.
        #[arg(short, long)]
        priority: Option<Priority>,
    },
    /// List missions, optionally searching and filtering.
    List {
        /// Case-insensitive title search.
        #[arg(short, long, default_value = "")]
        query: String,
        /// all, active or completed.
        #[arg(short, long, default_value_t = StatusFilter::All)]
        filter: StatusFilter,
    },
    /// Mark a mission completed, or reopen it.
    Toggle {
        /// Mission id or unique id prefix.
        id: String,
    },
    /// Change a mission's title, description or priority.
    Edit {
        /// Mission id or unique id prefix.
        id: String,
        /// New title.
        #[arg(long)]
        title: Option<String>,
        /// New description.
        #[arg(long, conflicts_with = "clear_description")]
        description: Option<String>,
        /// Remove the description.
        #[arg(long)]
        clear_description: bool,
        /// New priority.
        #[arg(long)]
        priority: Option<Priority>,
    },
    /// Delete a mission.
    Delete {
        /// Mission id or unique id prefix.
        id: String,
    },
    /// Show rank, level, experience and rewards.
    Rank,
    /// Show mission totals.
    Stats,
}

impl Default for Command {
    fn default() -> Self {
        Self::List {
            query: String::new(),
            filter: StatusFilter::All,
        }
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Load and parse a TOML config file.
///
/// If `explicit_path` is `Some`, the file must exist (error if not).
/// If `explicit_path` is `None`, the default path is tried and missing file
/// is treated as empty config.
fn load_config_file(explicit_path: Option<&std::path::Path>) -> Result<ConfigFile, ConfigError> {
    let path = if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    } else {
        let Some(config_dir) = dirs::config_dir() else {
            // No config dir available, use defaults.
            return Ok(ConfigFile::default());
        };
        config_dir.join("nexus").join("config.toml")
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
