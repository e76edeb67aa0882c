use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use diario_core::document::DiaryOptions;
use diario_core::repository::default_data_dir;
use serde::{Deserialize, Serialize};

const CONFIG_ENV: &str = "DIARIO_CONFIG";

/// Settings from `config.json`; every field may be left out.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub institution_name: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub log_filter: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// A missing file yields the defaults; a broken one is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("could not read config {}", path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn institution_name(&self) -> String {
        self.institution_name
            .clone()
            .unwrap_or_else(|| DiaryOptions::default().institution_name)
    }

    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_data_dir(),
        }
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

fn config_path() -> Result<PathBuf> {
    if let Ok(path) = env::var(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }
    let config_dir = dirs::config_dir().ok_or_else(|| anyhow!("Could not determine config directory"))?;
    Ok(config_dir.join("diario").join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(prefix: &str) -> PathBuf {
        let p = std::env::temp_dir().join(format!(
            "{}-{}",
            prefix,
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("clock")
                .as_nanos()
        ));
        std::fs::create_dir_all(&p).expect("create temp dir");
        p
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = temp_dir("diario-config-missing");
        let config = Config::load_from(&dir.join("config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.institution_name(), "Escola");
        assert_eq!(config.institution_name(), DiaryOptions::default().institution_name);
        assert_eq!(config.output_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_partial_file() {
        let dir = temp_dir("diario-config-partial");
        let path = dir.join("config.json");
        std::fs::write(&path, r#"{"institution_name": "EMEI Sol", "output_dir": "/tmp/diarios"}"#).unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.institution_name(), "EMEI Sol");
        assert_eq!(config.output_dir(), PathBuf::from("/tmp/diarios"));
        assert_eq!(config.log_filter, None);
    }

    #[test]
    fn test_broken_file_is_error() {
        let dir = temp_dir("diario-config-broken");
        let path = dir.join("config.json");
        std::fs::write(&path, "{ nope").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
