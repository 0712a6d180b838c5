//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const APP_NAME: &str = "votebooth";
const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "votebooth";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, merged from the config file and CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Directory holding the candidate roster and voter log records.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Ring the terminal bell when a vote is cast.
    #[serde(default = "default_true")]
    pub enable_bell: bool,

    /// Announce the next voter through a desktop notification.
    #[serde(default = "default_true")]
    pub enable_desktop_notifications: bool,

    /// Delay before the post-vote flow reset, in milliseconds.
    #[serde(default = "default_reset_delay_ms")]
    pub reset_delay_ms: u64,

    /// Admin panel password.
    #[serde(default = "default_admin_password")]
    pub admin_password: String,
}

use super::args::CliArgs;

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(data_dir) = args.data_dir {
            self.data_dir = Some(data_dir);
        }
        if let Some(bell) = args.bell {
            self.enable_bell = bell;
        }
        if let Some(notifications) = args.desktop_notifications {
            self.enable_desktop_notifications = notifications;
        }
        if let Some(delay) = args.reset_delay_ms {
            self.reset_delay_ms = delay;
        }
        if let Some(password) = args.admin_password {
            self.admin_password = password;
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default data directory for the ballot records.
    #[must_use]
    pub fn default_data_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        Self::default_data_dir().map(|dir| dir.join("votebooth.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }

    /// Returns effective ballot data directory.
    #[must_use]
    pub fn effective_data_dir(&self) -> Option<PathBuf> {
        self.data_dir.clone().or_else(Self::default_data_dir)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            data_dir: None,
            enable_bell: true,
            enable_desktop_notifications: true,
            reset_delay_ms: default_reset_delay_ms(),
            admin_password: default_admin_password(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_reset_delay_ms() -> u64 {
    1000
}

fn default_admin_password() -> String {
    "admin123".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_config_keeps_defaults() {
        let toml_content = r#"
            enable_bell = false
            admin_password = "hunter2"
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert!(!config.enable_bell);
        assert!(config.enable_desktop_notifications);
        assert_eq!(config.reset_delay_ms, 1000);
        assert_eq!(config.admin_password, "hunter2");
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert!(config.enable_bell);
        assert!(config.enable_desktop_notifications);
        assert_eq!(config.reset_delay_ms, 1000);
        assert_eq!(config.admin_password, "admin123");
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_cli_args_override_file_values() {
        let mut config = AppConfig::default();
        let args = CliArgs {
            config: None,
            log_path: None,
            log_level: Some(LogLevel::Debug),
            data_dir: Some(PathBuf::from("/tmp/booth")),
            bell: Some(false),
            desktop_notifications: None,
            reset_delay_ms: Some(250),
            admin_password: None,
        };

        config.merge_with_args(args);

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/booth")));
        assert!(!config.enable_bell);
        assert!(config.enable_desktop_notifications);
        assert_eq!(config.reset_delay_ms, 250);
    }
}
