use crate::fs::{FileSystem, default_fs};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

pub const CONFIG_FILE: &str = ".repoviz.toml";

const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8088";
const DEFAULT_TIMEOUT_SECS: u64 = 120;
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub backend: BackendConfig,
    pub viewer: ViewerConfig,
}

/// Where the analysis backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    pub url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub port: u16,
    pub open_browser: bool,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    backend: Option<RawBackend>,
    viewer: Option<RawViewer>,
}

#[derive(Debug, Deserialize)]
struct RawBackend {
    url: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct RawViewer {
    port: Option<u16>,
    open_browser: Option<bool>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_BACKEND_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl BackendConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            open_browser: false,
        }
    }
}

impl Config {
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        Self::load_with_fs(dir, default_fs())
    }

    /// Read `.repoviz.toml` from `dir`; a missing file yields the defaults.
    pub fn load_with_fs(dir: &Path, fs: &dyn FileSystem) -> Result<Self, ConfigError> {
        let config_path = dir.join(CONFIG_FILE);

        if !fs.exists(&config_path) {
            return Ok(Self::default());
        }

        let content = fs.read_to_string(&config_path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;

        let backend = match raw.backend {
            Some(b) => BackendConfig {
                url: b.url.unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()),
                timeout_secs: b.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            },
            None => BackendConfig::default(),
        };

        let viewer = match raw.viewer {
            Some(v) => ViewerConfig {
                port: v.port.unwrap_or(DEFAULT_PORT),
                open_browser: v.open_browser.unwrap_or(false),
            },
            None => ViewerConfig::default(),
        };

        Ok(Self { backend, viewer })
    }

    /// Apply a `--backend` flag on top of the file settings.
    pub fn with_backend_url(mut self, url: Option<&str>) -> Self {
        if let Some(url) = url {
            self.backend.url = url.trim_end_matches('/').to_string();
        }
        self
    }
}

pub fn generate_config_template() -> String {
    format!(
        r#"# repoviz configuration

[backend]
# Analysis service that answers POST /analyze and POST /api/explain-code
url = "{}"
# Seconds to wait for a response; cloning and analysing large repositories is slow
timeout_secs = {}

[viewer]
port = {}
open_browser = false
"#,
        DEFAULT_BACKEND_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_PORT
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFs;

    #[test]
    fn test_missing_file_uses_defaults() {
        let fs = MockFs::new();
        let config = Config::load_with_fs(Path::new("/project"), &fs).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.backend.url, "http://127.0.0.1:8088");
        assert_eq!(config.viewer.port, 3000);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let fs = MockFs::with_files([(
            Path::new("/project/.repoviz.toml"),
            "[backend]\ntimeout_secs = 30\n",
        )]);
        let config = Config::load_with_fs(Path::new("/project"), &fs).unwrap();
        assert_eq!(config.backend.timeout_secs, 30);
        assert_eq!(config.backend.url, DEFAULT_BACKEND_URL);
        assert_eq!(config.viewer, ViewerConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let fs = MockFs::with_files([(Path::new("/p/.repoviz.toml"), "[backend\nurl =")]);
        let err = Config::load_with_fs(Path::new("/p"), &fs).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_flag_overrides_file() {
        let config = Config::parse("[backend]\nurl = \"http://a:1\"\n")
            .unwrap()
            .with_backend_url(Some("http://b:2/"));
        assert_eq!(config.backend.url, "http://b:2");

        let untouched = Config::default().with_backend_url(None);
        assert_eq!(untouched.backend.url, DEFAULT_BACKEND_URL);
    }

    #[test]
    fn test_template_parses_to_defaults() {
        let config = Config::parse(&generate_config_template()).unwrap();
        assert_eq!(config, Config::default());
    }
}
