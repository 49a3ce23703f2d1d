use crate::theme::ThemeName;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tenant shown in the header and used in routes
    pub tenant_slug: String,
    /// JSON or YAML dataset served by the fixture API, demo data when unset
    pub data_file: Option<PathBuf>,
    pub page_size: usize,
    pub theme: ThemeName,
    /// Simulated API latency
    pub latency_ms: u64,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tenant_slug: "acme".to_string(),
            data_file: None,
            page_size: crate::table::DEFAULT_PAGE_SIZE,
            theme: ThemeName::Dark,
            latency_ms: 150,
            log_file: None,
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".billing-tui"))
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    pub fn load() -> Option<Config> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }

        let contents = fs::read_to_string(path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    pub fn load_or_default() -> Config {
        Self::load().unwrap_or_default()
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file
            .clone()
            .or_else(|| Self::config_dir().map(|dir| dir.join("billing-tui.log")))
    }

    /// Save the config to disk
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config(name: &str) -> PathBuf {
        env::temp_dir()
            .join(format!("billing-tui-config-{}-{}", name, std::process::id()))
            .join("config.json")
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_config("roundtrip");
        let config = Config {
            tenant_slug: "globex".to_string(),
            theme: ThemeName::Light,
            latency_ms: 0,
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path), Some(config));
        fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let path = temp_config("partial");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{ "tenant_slug": "initech", "theme": "light" }"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.tenant_slug, "initech");
        assert_eq!(config.theme, ThemeName::Light);
        assert_eq!(config.page_size, 20);
        assert_eq!(config.latency_ms, 150);
        fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_missing_or_broken_file() {
        let path = temp_config("broken");
        assert_eq!(Config::load_from(&path), None);

        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();
        assert_eq!(Config::load_from(&path), None);
        fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_log_path_prefers_configured_file() {
        let config = Config {
            log_file: Some(PathBuf::from("/tmp/billing.log")),
            ..Config::default()
        };
        assert_eq!(config.log_path(), Some(PathBuf::from("/tmp/billing.log")));
    }
}
