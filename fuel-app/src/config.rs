//! `fuel-recon.toml` settings.

use std::path::{Path, PathBuf};

use fuel_report::ReportFormat;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "fuel-recon.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Bare level or EnvFilter directive.
    pub log_level: String,
    pub log_file: Option<PathBuf>,
    /// Directory that exported reports are written to.
    pub output_dir: PathBuf,
    pub report_format: ReportFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: crate::logging::DEFAULT_LEVEL.to_string(),
            log_file: None,
            output_dir: PathBuf::from("reports"),
            report_format: ReportFormat::Pdf,
        }
    }
}

impl AppConfig {
    pub fn from_toml(
        input: &str,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        toml::from_str(input).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Reads `path`. With `required` false a missing file yields the defaults.
    pub fn load(
        path: &Path,
        required: bool,
    ) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(input) => {
                debug!(path = %path.display(), "loading config");
                Self::from_toml(&input, path)
            }
            Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.display().to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = AppConfig::from_toml("", Path::new("x.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn reads_every_key() {
        let input = r#"
log_level = "debug"
log_file = "recon.log"
output_dir = "/tmp/out"
report_format = "html"
"#;
        let config = AppConfig::from_toml(input, Path::new("x.toml")).unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_file, Some(PathBuf::from("recon.log")));
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.report_format, ReportFormat::Html);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = AppConfig::from_toml("colour = true", Path::new("x.toml")).unwrap_err();
        assert!(err.to_string().starts_with("invalid config 'x.toml'"));
    }

    #[test]
    fn missing_optional_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("absent.toml"), false).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(&dir.path().join("absent.toml"), true).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
