use std::path::{Path, PathBuf};

use hooklab_core::RuntimeOptions;
use hooklab_devtools::ScanOptions;
use serde::{Deserialize, Serialize};

/// Environment variable that switches on development tooling.
pub const ENV_VAR: &str = "HOOKLAB_ENV";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    pub scan: ScanOptions,
    pub max_update_depth: usize,
    /// Page the walkthrough opens first.
    pub start_path: String,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            scan: ScanOptions::default(),
            max_update_depth: RuntimeOptions::default().max_update_depth,
            start_path: "/hooks/use-state".into(),
        }
    }
}

impl LabConfig {
    /// Defaults, with the render scan on only in development.
    pub fn from_env() -> Self {
        Self::for_env(std::env::var(ENV_VAR).ok().as_deref())
    }

    pub fn for_env(env: Option<&str>) -> Self {
        let mut config = Self::default();
        if env == Some("development") {
            config.scan = ScanOptions {
                enabled: true,
                log: true,
            };
        }
        config
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        log::debug!("loaded config: {config:?}");
        Ok(config)
    }

    pub fn runtime_options(&self) -> RuntimeOptions {
        RuntimeOptions {
            max_update_depth: self.max_update_depth.max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_only_in_development() {
        assert!(!LabConfig::for_env(None).scan.enabled);
        assert!(!LabConfig::for_env(Some("production")).scan.enabled);
        let dev = LabConfig::for_env(Some("development"));
        assert!(dev.scan.enabled && dev.scan.log);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let c = LabConfig::from_json(r#"{"scan":{"enabled":true}}"#).unwrap();
        assert!(c.scan.enabled);
        assert!(!c.scan.log);
        assert_eq!(c.max_update_depth, 50);
        assert_eq!(c.start_path, "/hooks/use-state");
        assert_eq!(c.runtime_options().max_update_depth, 50);
    }

    #[test]
    fn test_load_errors() {
        let missing = std::env::temp_dir().join("hooklab-missing-config.json");
        assert!(matches!(LabConfig::load(&missing), Err(ConfigError::Io { .. })));
        assert!(matches!(
            LabConfig::from_json("{\"max_update_depth\": \"lots\"}"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_file() {
        let path = std::env::temp_dir().join(format!("hooklab-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"max_update_depth": 8, "start_path": "/hooks/use-ref"}"#).unwrap();
        let c = LabConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(c.max_update_depth, 8);
        assert_eq!(c.start_path, "/hooks/use-ref");
        assert_eq!(c.scan, ScanOptions::default());
    }
}
