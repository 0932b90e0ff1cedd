//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::persist::DEFAULT_BACKUP_DIR;

/// Name of the per-directory config file
pub const LOCAL_CONFIG_FILE: &str = ".fec.yaml";

/// FEC configuration with layered hierarchy
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory that receives timestamped backups
    pub backup_dir: Option<String>,

    /// Show the Serial Number column in list output
    pub show_serial: Option<bool>,

    /// Default output format
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let global = Self::global_config_path();
        let mut config = Self::load_from(global.as_deref(), Path::new(LOCAL_CONFIG_FILE));
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Merge defaults, then the global file, then the local file
    pub fn load_from(global: Option<&Path>, local: &Path) -> Self {
        let mut config = Config::default();

        if let Some(global) = global.and_then(Self::read_file) {
            config.merge(global);
        }
        if let Some(local) = Self::read_file(local) {
            config.merge(local);
        }

        config
    }

    /// Read one config file; unreadable or malformed files are skipped
    fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = std::fs::read_to_string(path).ok()?;
        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config file");
                None
            }
        }
    }

    /// Environment overrides (`FEC_BACKUP_DIR`, `FEC_SHOW_SERIAL`)
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup("FEC_BACKUP_DIR").filter(|d| !d.is_empty()) {
            self.backup_dir = Some(dir);
        }
        if let Some(flag) = lookup("FEC_SHOW_SERIAL") {
            if let Some(value) = parse_bool(&flag) {
                self.show_serial = Some(value);
            }
        }
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "fec")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.backup_dir.is_some() {
            self.backup_dir = other.backup_dir;
        }
        if other.show_serial.is_some() {
            self.show_serial = other.show_serial;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    /// Backup directory, falling back to `backup` under the working directory
    pub fn backup_dir(&self) -> PathBuf {
        PathBuf::from(self.backup_dir.as_deref().unwrap_or(DEFAULT_BACKUP_DIR))
    }

    pub fn show_serial(&self) -> bool {
        self.show_serial.unwrap_or(false)
    }
}

/// Parse the boolean spellings accepted in config values and env vars
pub fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(None, &dir.path().join(LOCAL_CONFIG_FILE));
        assert_eq!(config, Config::default());
        assert_eq!(config.backup_dir(), PathBuf::from("backup"));
        assert!(!config.show_serial());
    }

    #[test]
    fn test_local_overrides_global() {
        let dir = tempdir().unwrap();
        let global = dir.path().join("global.yaml");
        let local = dir.path().join(LOCAL_CONFIG_FILE);
        fs::write(&global, "backup_dir: /var/fec\nshow_serial: true\n").unwrap();
        fs::write(&local, "backup_dir: here\n").unwrap();

        let config = Config::load_from(Some(&global), &local);
        assert_eq!(config.backup_dir(), PathBuf::from("here"));
        assert!(config.show_serial());
    }

    #[test]
    fn test_malformed_file_is_skipped() {
        let dir = tempdir().unwrap();
        let local = dir.path().join(LOCAL_CONFIG_FILE);
        fs::write(&local, "show_serial: [not, a, bool").unwrap();
        assert_eq!(Config::load_from(None, &local), Config::default());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> =
            [("FEC_BACKUP_DIR", "/tmp/bk"), ("FEC_SHOW_SERIAL", "yes")].into();
        let mut config = Config::default();
        config.apply_env(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.backup_dir(), PathBuf::from("/tmp/bk"));
        assert!(config.show_serial());
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
