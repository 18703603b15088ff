use std::path::{Path, PathBuf};

/// Environment variable that overrides where games are saved.
pub const SAVE_DIR_ENV: &str = "CHESS_SAVE_DIR";

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Runtime configuration (pure Rust, no config file).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding one save file per named game.
    pub save_dir: PathBuf,

    /// `tracing_subscriber` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Config {
    pub fn new(save_dir: impl Into<PathBuf>) -> Self {
        Self {
            save_dir: save_dir.into(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }

    /// `CHESS_SAVE_DIR`, else the platform data directory, else `./saves`.
    pub fn from_env() -> Self {
        Self::new(resolve_save_dir(std::env::var_os(SAVE_DIR_ENV).map(PathBuf::from)))
    }

    pub fn with_save_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.save_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(default_save_dir())
    }
}

fn resolve_save_dir(from_env: Option<PathBuf>) -> PathBuf {
    match from_env {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => default_save_dir(),
    }
}

fn default_save_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "chess_engine")
        .map(|dirs| dirs.data_dir().join("saves"))
        .unwrap_or_else(|| PathBuf::from("saves"))
}
