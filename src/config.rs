//! config.rs
//!
//! Client configuration. Resolution order, lowest to highest:
//! built-in default, compile-time `BLAST_API_URL`, config file,
//! runtime `BLAST_API_URL`, command-line flags.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const BASE_URL_ENV: &str = "BLAST_API_URL";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub export_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: Url,
    pub timeout: Duration,
    pub export_dir: PathBuf,
}

/// Overrides collected from the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub export_dir: Option<PathBuf>,
}

pub fn config_path() -> PathBuf {
    let mut dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    dir.push("blast-testgen");
    dir.push("config.toml");
    dir
}

pub fn load_file(path: &Path) -> Result<FileConfig, ConfigError> {
    if !path.exists() {
        return Ok(FileConfig::default());
    }

    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Base URL baked in at build time, if any.
fn build_time_base_url() -> Option<&'static str> {
    option_env!("BLAST_API_URL")
}

pub fn resolve(
    file: FileConfig,
    env_base_url: Option<String>,
    overrides: Overrides,
) -> Result<ClientConfig, ConfigError> {
    let base = overrides
        .base_url
        .or(env_base_url)
        .or(file.base_url)
        .or_else(|| build_time_base_url().map(str::to_string))
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let timeout_secs = overrides
        .timeout_secs
        .or(file.timeout_secs)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    if timeout_secs == 0 {
        return Err(ConfigError::InvalidTimeout);
    }

    let export_dir = overrides
        .export_dir
        .or(file.export_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    Ok(ClientConfig {
        base_url: parse_base_url(&base)?,
        timeout: Duration::from_secs(timeout_secs),
        export_dir,
    })
}

/// Load the config file from its default location and apply the runtime
/// environment and command-line overrides on top.
pub fn load(overrides: Overrides) -> Result<ClientConfig, ConfigError> {
    let path = config_path();
    let file = load_file(&path)?;
    let env_base_url = std::env::var(BASE_URL_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty());

    let cfg = resolve(file, env_base_url, overrides)?;
    tracing::debug!(
        base_url = %cfg.base_url,
        timeout_secs = cfg.timeout.as_secs(),
        config = %path.display(),
        "configuration resolved"
    );
    Ok(cfg)
}

/// Parse a base URL and make sure its path ends in `/` so endpoint paths
/// join underneath it instead of replacing the last segment.
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let mut url =
        Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidBaseUrl(format!("{raw}: {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBaseUrl(format!(
            "{raw}: scheme must be http or https"
        )));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_beat_env_beat_file() {
        let file = FileConfig {
            base_url: Some("http://file:1".into()),
            timeout_secs: Some(30),
            export_dir: None,
        };

        let cfg = resolve(file.clone(), Some("http://env:2".into()), Overrides::default()).unwrap();
        assert_eq!(cfg.base_url.as_str(), "http://env:2/");
        assert_eq!(cfg.timeout, Duration::from_secs(30));

        let cfg = resolve(
            file,
            Some("http://env:2".into()),
            Overrides {
                base_url: Some("http://flag:3".into()),
                timeout_secs: Some(5),
                export_dir: Some(PathBuf::from("out")),
            },
        )
        .unwrap();
        assert_eq!(cfg.base_url.as_str(), "http://flag:3/");
        assert_eq!(cfg.timeout, Duration::from_secs(5));
        assert_eq!(cfg.export_dir, PathBuf::from("out"));
    }

    #[test]
    fn default_timeout_is_two_minutes() {
        let cfg = resolve(
            FileConfig::default(),
            Some(DEFAULT_BASE_URL.into()),
            Overrides::default(),
        )
        .unwrap();
        assert_eq!(cfg.timeout, Duration::from_secs(120));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let file = FileConfig {
            timeout_secs: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            resolve(file, Some(DEFAULT_BASE_URL.into()), Overrides::default()),
            Err(ConfigError::InvalidTimeout)
        ));

        let flags = Overrides {
            timeout_secs: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            resolve(FileConfig::default(), Some(DEFAULT_BASE_URL.into()), flags),
            Err(ConfigError::InvalidTimeout)
        ));
    }

    #[test]
    fn base_url_gets_trailing_slash() {
        let url = parse_base_url("http://localhost:5000/tools").unwrap();
        assert_eq!(url.join("api/generate").unwrap().as_str(), "http://localhost:5000/tools/api/generate");
    }

    #[test]
    fn rejects_non_http_scheme() {
        assert!(matches!(
            parse_base_url("ftp://example.com"),
            Err(ConfigError::InvalidBaseUrl(_))
        ));
        assert!(parse_base_url("not a url").is_err());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_file(&dir.path().join("absent.toml")).unwrap();
        assert!(cfg.base_url.is_none());
    }

    #[test]
    fn reads_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "base_url = \"http://10.0.0.2:5000\"\ntimeout_secs = 60\n").unwrap();
        let cfg = load_file(&path).unwrap();
        assert_eq!(cfg.base_url.as_deref(), Some("http://10.0.0.2:5000"));
        assert_eq!(cfg.timeout_secs, Some(60));
    }
}
