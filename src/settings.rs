//! Settings infrastructure for autodocstring.
//!
//! This module loads `autodocstring.toml` files configuring the TCP server
//! address and the log filter.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// File name searched for by [`discover_settings`].
pub const SETTINGS_FILE: &str = "autodocstring.toml";

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 5000;

/// Root settings structure loaded from autodocstring.toml.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// TCP server configuration.
    pub server: Option<ServerSettings>,

    /// Logging configuration.
    pub log: Option<LogSettings>,
}

/// Address the TCP server binds to.
#[derive(Debug, Default, Deserialize)]
pub struct ServerSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LogSettings {
    /// `tracing_subscriber::EnvFilter` directive, e.g. `"autodocstring=debug"`.
    pub filter: Option<String>,
}

impl Settings {
    /// Configured host, or [`DEFAULT_HOST`].
    pub fn host(&self) -> &str {
        self.server
            .as_ref()
            .and_then(|s| s.host.as_deref())
            .unwrap_or(DEFAULT_HOST)
    }

    /// Configured port, or [`DEFAULT_PORT`].
    pub fn port(&self) -> u16 {
        self.server
            .as_ref()
            .and_then(|s| s.port)
            .unwrap_or(DEFAULT_PORT)
    }

    pub fn log_filter(&self) -> Option<&str> {
        self.log.as_ref().and_then(|l| l.filter.as_deref())
    }
}

/// Load settings from a settings file.
///
/// Returns default settings if the file doesn't exist or can't be parsed.
pub fn load_settings(path: &Path) -> Settings {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(path = %path.display(), "failed to parse settings: {}", e);
                Settings::default()
            }
        },
        Err(_) => Settings::default(),
    }
}

/// Discover autodocstring.toml by walking up from `start_dir` to the
/// filesystem root.
///
/// Returns `(settings, settings_dir)` where `settings_dir` is the directory
/// containing the found file. If none is found, returns
/// `(Settings::default(), start_dir)`.
pub fn discover_settings(start_dir: &Path) -> (Settings, PathBuf) {
    let mut current = Some(start_dir);
    while let Some(dir) = current {
        let candidate = dir.join(SETTINGS_FILE);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "using settings file");
            return (load_settings(&candidate), dir.to_path_buf());
        }
        current = dir.parent();
    }

    (Settings::default(), start_dir.to_path_buf())
}
