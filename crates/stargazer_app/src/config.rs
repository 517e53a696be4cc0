//! Optional RON configuration. Every field has a default.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use stargazer_core::DEFAULT_PAGE_SIZE;
use stargazer_engine::SearchSettings;
use stargazer_logging::{sg_info, sg_warn};

pub const DEFAULT_CONFIG_FILENAME: &str = "stargazer.ron";

/// The search service never returns more than this many items per page.
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub page_size: u32,
    pub api_base: String,
    pub min_stars: u64,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_response_bytes: u64,
    /// Holds the starred set and the session file.
    pub data_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let search = SearchSettings::default();
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            api_base: search.api_base,
            min_stars: search.min_stars,
            connect_timeout_secs: search.connect_timeout.as_secs(),
            request_timeout_secs: search.request_timeout.as_secs(),
            max_response_bytes: search.max_bytes,
            data_dir: PathBuf::from("."),
        }
    }
}

impl AppConfig {
    pub fn page_size(&self) -> u32 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }

    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            api_base: self.api_base.clone(),
            min_stars: self.min_stars,
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_response_bytes,
            ..SearchSettings::default()
        }
    }
}

/// Loads `path`, falling back to defaults when it is missing or malformed.
pub fn load_config(path: &Path) -> AppConfig {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return AppConfig::default(),
        Err(err) => {
            sg_warn!("Failed to read config {:?}: {}", path, err);
            return AppConfig::default();
        }
    };

    match ron::from_str::<AppConfig>(&content) {
        Ok(config) => {
            sg_info!("Loaded config from {:?}", path);
            config
        }
        Err(err) => {
            sg_warn!("Failed to parse config {:?}: {}", path, err);
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(&temp.path().join("absent.ron"));
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.page_size(), 30);
        assert_eq!(config.api_base, "https://api.github.com");
    }

    #[test]
    fn partial_file_overrides_named_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("stargazer.ron");
        fs::write(&path, "(page_size: 10, min_stars: 500, data_dir: \"state\")").unwrap();

        let config = load_config(&path);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.min_stars, 500);
        assert_eq!(config.data_dir, PathBuf::from("state"));
        assert_eq!(config.request_timeout_secs, 30);

        let settings = config.search_settings();
        assert_eq!(settings.min_stars, 500);
        assert_eq!(settings.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn malformed_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("stargazer.ron");
        fs::write(&path, "(page_size: \"many\"").unwrap();
        assert_eq!(load_config(&path), AppConfig::default());
    }

    #[test]
    fn zero_page_size_is_clamped() {
        let config = AppConfig {
            page_size: 0,
            ..AppConfig::default()
        };
        assert_eq!(config.page_size(), 1);
    }

    #[test]
    fn oversized_page_size_is_capped_at_service_limit() {
        let config = AppConfig {
            page_size: 200,
            ..AppConfig::default()
        };
        assert_eq!(config.page_size(), MAX_PAGE_SIZE);

        let config = AppConfig {
            page_size: 100,
            ..AppConfig::default()
        };
        assert_eq!(config.page_size(), 100);
    }
}
