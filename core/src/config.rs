use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{OperatorError, Result};
use crate::platform::PlatformInstance;
use crate::versioning::VersionDocument;

/// Environment variable overriding the version document path.
pub const VERSIONS_ENV: &str = "A3S_OPERATOR_VERSIONS";

/// Environment variable carrying the operator pod's container image.
pub const POD_IMAGE_ENV: &str = "A3S_OPERATOR_IMAGE";

/// Operator configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OperatorConfig {
    /// Version document to load instead of the embedded one
    #[serde(default)]
    pub versions_file: Option<PathBuf>,

    /// Container image of the running operator pod
    #[serde(default)]
    pub pod_image: Option<String>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Platform instance to resolve components for
    #[serde(default)]
    pub platform: PlatformInstance,
}

impl OperatorConfig {
    /// Default config location (~/.a3s/operator.yaml).
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".a3s"))
            .unwrap_or_else(|| PathBuf::from(".a3s"))
            .join("operator.yaml")
    }

    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            OperatorError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load from `path`, or from the default location if it exists.
    /// Falls back to defaults when neither is present.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let default = Self::default_path();
                if default.exists() {
                    Self::load(&default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Apply environment variable overrides.
    pub fn apply_env(mut self) -> Self {
        self.apply_vars(|key| std::env::var(key).ok());
        self
    }

    fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(path) = var(VERSIONS_ENV).filter(|v| !v.is_empty()) {
            self.versions_file = Some(PathBuf::from(path));
        }
        if let Some(image) = var(POD_IMAGE_ENV).filter(|v| !v.is_empty()) {
            self.pod_image = Some(image);
        }
    }

    /// Load the configured version document, or the embedded one.
    pub fn version_document(&self) -> Result<VersionDocument> {
        match &self.versions_file {
            Some(path) => VersionDocument::from_path(path),
            None => VersionDocument::embedded(),
        }
    }
}

/// Log level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = OperatorConfig::default();
        assert!(config.versions_file.is_none());
        assert!(config.pod_image.is_none());
        assert_eq!(config.log_level, LogLevel::Warn);
        assert!(config.platform.release_override().is_none());
    }

    #[test]
    fn test_load_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "pod-image: quay.io/a3s/operator:0.4.0\nlog-level: debug\nplatform:\n  spec:\n    version: \"0.3.0\""
        )
        .unwrap();

        let config = OperatorConfig::load(file.path()).unwrap();
        assert_eq!(config.pod_image.as_deref(), Some("quay.io/a3s/operator:0.4.0"));
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.platform.release_override(), Some("0.3.0"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = OperatorConfig::load(Path::new("/nonexistent/operator.yaml")).unwrap_err();
        assert!(matches!(err, OperatorError::ConfigError(_)));
    }

    #[test]
    fn test_apply_vars() {
        let vars: HashMap<&str, &str> = [
            (VERSIONS_ENV, "/etc/a3s/versions.yaml"),
            (POD_IMAGE_ENV, "quay.io/a3s/operator:1.0"),
        ]
        .into_iter()
        .collect();

        let mut config = OperatorConfig::default();
        config.apply_vars(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(
            config.versions_file,
            Some(PathBuf::from("/etc/a3s/versions.yaml"))
        );
        assert_eq!(config.pod_image.as_deref(), Some("quay.io/a3s/operator:1.0"));
    }

    #[test]
    fn test_apply_vars_ignores_empty() {
        let mut config = OperatorConfig {
            pod_image: Some("kept:1".to_string()),
            ..Default::default()
        };
        config.apply_vars(|_| Some(String::new()));
        assert_eq!(config.pod_image.as_deref(), Some("kept:1"));
        assert!(config.versions_file.is_none());
    }

    #[test]
    fn test_version_document_embedded() {
        let doc = OperatorConfig::default().version_document().unwrap();
        assert!(!doc.default_release.is_empty());
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(tracing::Level::from(LogLevel::Debug), tracing::Level::DEBUG);
        assert_eq!(tracing::Level::from(LogLevel::Error), tracing::Level::ERROR);
        assert_eq!(LogLevel::Info.to_string(), "info");
    }
}
