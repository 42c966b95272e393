//! Configuration schema types.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level server configuration. Read once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Display name reported in `serverInfo`.
    #[serde(default = "default_server_name")]
    pub server_name: String,
    /// Log level filter (e.g. "info", "debug", "pingpong_tools=trace").
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Deployment environment; selects log destinations only.
    #[serde(default)]
    pub environment: Environment,
    /// Directory for log files in production.
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
}

impl ServerConfig {
    /// Keys accepted from the environment.
    pub const KEYS: [&'static str; 4] = ["server_name", "log_level", "environment", "log_dir"];
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_name: default_server_name(),
            log_level: default_log_level(),
            environment: Environment::default(),
            log_dir: default_log_dir(),
        }
    }
}

fn default_server_name() -> String {
    "ping-pong-server".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

/// Deployment environment tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Console logs only.
    #[default]
    Development,
    /// Console logs plus JSON log files.
    Production,
    /// No log output.
    Test,
}

impl Environment {
    /// Whether logs go to the console (stderr).
    pub fn logs_to_console(&self) -> bool {
        !matches!(self, Self::Test)
    }

    /// Whether logs are also written to files.
    pub fn logs_to_files(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Test => "test",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_fallbacks() {
        let c = ServerConfig::default();
        assert_eq!(c.server_name, "ping-pong-server");
        assert_eq!(c.log_level, "info");
        assert_eq!(c.environment, Environment::Development);
        assert_eq!(c.log_dir, PathBuf::from("logs"));
    }

    #[test]
    fn environment_selects_destinations() {
        assert!(Environment::Development.logs_to_console());
        assert!(!Environment::Development.logs_to_files());
        assert!(Environment::Production.logs_to_files());
        assert!(!Environment::Test.logs_to_console());
    }

    #[test]
    fn environment_display() {
        assert_eq!(Environment::Production.to_string(), "production");
        assert_eq!(Environment::Test.to_string(), "test");
    }
}
