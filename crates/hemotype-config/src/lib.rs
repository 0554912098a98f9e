use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Error
// ─────────────────────────────────────────────────────────────────────────────

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

// ─────────────────────────────────────────────────────────────────────────────
// Environment Keys
// ─────────────────────────────────────────────────────────────────────────────

pub const ENV_CONFIG_PATH: &str = "HEMOTYPE_CONFIG";
pub const ENV_BIND_ADDR: &str = "HEMOTYPE_BIND_ADDR";
pub const ENV_MODEL_PATH: &str = "HEMOTYPE_MODEL_PATH";
pub const ENV_REPORTS_DB: &str = "HEMOTYPE_REPORTS_DB";
pub const ENV_RECORD_REPORTS: &str = "HEMOTYPE_RECORD_REPORTS";
pub const ENV_MAX_UPLOAD_BYTES: &str = "HEMOTYPE_MAX_UPLOAD_BYTES";

// ─────────────────────────────────────────────────────────────────────────────
// Server Config
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address the HTTP server listens on.
    pub bind_addr: String,
    /// Location of the agglutination model. Missing file means degraded mode.
    pub model_path: PathBuf,
    /// SQLite file holding the `reports` table.
    pub reports_db: PathBuf,
    /// Write every analysis to the reports table.
    pub record_reports: bool,
    /// Request body limit for uploads.
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".into(),
            model_path: PathBuf::from("models/final_blood_grouping_model.rten"),
            reports_db: PathBuf::from("./reports.db"),
            record_reports: false,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    /// Reads a JSON config file. Absent fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Defaults, then the file named by `HEMOTYPE_CONFIG`, then individual
    /// environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] with an injectable lookup.
    pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = match lookup(ENV_CONFIG_PATH) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        config.apply_overrides(lookup)?;
        Ok(config)
    }

    /// Applies the `HEMOTYPE_*` overrides found through `lookup`.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(v) = lookup(ENV_BIND_ADDR) {
            self.bind_addr = v;
        }
        if let Some(v) = lookup(ENV_MODEL_PATH) {
            self.model_path = PathBuf::from(v);
        }
        if let Some(v) = lookup(ENV_REPORTS_DB) {
            self.reports_db = PathBuf::from(v);
        }
        if let Some(v) = lookup(ENV_RECORD_REPORTS) {
            self.record_reports = parse_bool(ENV_RECORD_REPORTS, &v)?;
        }
        if let Some(v) = lookup(ENV_MAX_UPLOAD_BYTES) {
            self.max_upload_bytes = v.trim().parse().map_err(|_| invalid(ENV_MAX_UPLOAD_BYTES, &v))?;
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::load_with(lookup_from(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_addr, "0.0.0.0:8000");
        assert!(!config.record_reports);
    }

    #[test]
    fn test_env_overrides() {
        let config = ServerConfig::load_with(lookup_from(&[
            (ENV_BIND_ADDR, "127.0.0.1:9000"),
            (ENV_MODEL_PATH, "/opt/model.rten"),
            (ENV_REPORTS_DB, "/tmp/r.db"),
            (ENV_RECORD_REPORTS, "yes"),
            (ENV_MAX_UPLOAD_BYTES, "2048"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.model_path, PathBuf::from("/opt/model.rten"));
        assert_eq!(config.reports_db, PathBuf::from("/tmp/r.db"));
        assert!(config.record_reports);
        assert_eq!(config.max_upload_bytes, 2048);
    }

    #[test]
    fn test_invalid_values() {
        let err = ServerConfig::load_with(lookup_from(&[(ENV_RECORD_REPORTS, "maybe")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == ENV_RECORD_REPORTS));

        let err = ServerConfig::load_with(lookup_from(&[(ENV_MAX_UPLOAD_BYTES, "-1")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_file_then_env() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "bind_addr": "0.0.0.0:7000", "record_reports": true }}"#).unwrap();
        let path = file.path().to_string_lossy().to_string();

        let config = ServerConfig::load_with(lookup_from(&[
            (ENV_CONFIG_PATH, path.as_str()),
            (ENV_RECORD_REPORTS, "false"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:7000");
        assert!(!config.record_reports);
        assert_eq!(config.reports_db, ServerConfig::default().reports_db);
    }

    #[test]
    fn test_bad_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(ServerConfig::from_file(file.path()), Err(ConfigError::Parse(_))));

        let missing = ServerConfig::from_file(Path::new("/nonexistent/hemotype.json"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }
}
