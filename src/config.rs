//! Layered configuration for relay.
//!
//! Each value resolves CLI flag → environment → `relay.toml` → built-in
//! default. The config file is discovered at an explicit `--config` path,
//! then `./relay.toml`, then `~/.config/relay/relay.toml`.
//!
//! # Configuration File Format
//!
//! ```toml
//! [service]
//! endpoint = "https://rest.relay.dev"
//! api_key = "app.key:secret"
//! ```

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_ENDPOINT: &str = "https://rest.relay.dev";

pub const ENDPOINT_ENV: &str = "RELAY_ENDPOINT";
pub const API_KEY_ENV: &str = "RELAY_API_KEY";

/// Contents of `relay.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub service: ServiceSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceSection {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))
    }

    /// Write a commented starter file. Refuses to clobber an existing one.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("{} already exists", path.display());
        }
        let template = format!(
            "# relay configuration\n\
             [service]\n\
             # endpoint = \"{DEFAULT_ENDPOINT}\"\n\
             # api_key = \"app.key:secret\"\n"
        );
        std::fs::write(path, template)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    /// Where the file layer came from, if any. Shown by `config show`.
    pub config_path: Option<PathBuf>,
}

impl RelayConfig {
    /// Resolve from CLI flags, the process environment, and the discovered
    /// config file.
    pub fn resolve(
        endpoint_flag: Option<&str>,
        api_key_flag: Option<&str>,
        config_path: Option<&Path>,
    ) -> Result<Self> {
        let (file, path) = match discover_config_file(config_path)? {
            Some(path) => (ConfigFile::load(&path)?, Some(path)),
            None => (ConfigFile::default(), None),
        };

        Ok(Self {
            endpoint: layer(
                endpoint_flag,
                std::env::var(ENDPOINT_ENV).ok().as_deref(),
                file.service.endpoint.as_deref(),
            )
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            api_key: layer(
                api_key_flag,
                std::env::var(API_KEY_ENV).ok().as_deref(),
                file.service.api_key.as_deref(),
            ),
            config_path: path,
        })
    }

    /// The API key, or an actionable error for commands that publish.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            anyhow!(
                "No API key configured. Set {API_KEY_ENV}, add api_key to relay.toml, \
                 or pass --api-key"
            )
        })
    }
}

/// First non-empty layer wins: flag, then environment, then file.
fn layer(flag: Option<&str>, env: Option<&str>, file: Option<&str>) -> Option<String> {
    [flag, env, file]
        .into_iter()
        .flatten()
        .find(|v| !v.is_empty())
        .map(str::to_string)
}

/// Find the config file: explicit path (must exist), `./relay.toml`, then
/// the user config directory.
fn discover_config_file(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        return Ok(Some(path.to_path_buf()));
    }

    let local = PathBuf::from("relay.toml");
    if local.exists() {
        return Ok(Some(local));
    }

    if let Some(dir) = dirs::config_dir() {
        let user = dir.join("relay").join("relay.toml");
        if user.exists() {
            return Ok(Some(user));
        }
    }
    Ok(None)
}

/// Mask an API key for display: all but the last four characters.
pub fn mask_key(key: &str) -> String {
    if key.len() > 4 {
        format!("****{}", &key[key.len() - 4..])
    } else {
        "****".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn flag_wins_over_env_and_file() {
        assert_eq!(
            layer(Some("from-flag"), Some("from-env"), Some("from-file")),
            Some("from-flag".to_string())
        );
    }

    #[test]
    fn env_wins_over_file() {
        assert_eq!(
            layer(None, Some("from-env"), Some("from-file")),
            Some("from-env".to_string())
        );
    }

    #[test]
    fn empty_layers_are_skipped() {
        assert_eq!(
            layer(Some(""), None, Some("from-file")),
            Some("from-file".to_string())
        );
        assert_eq!(layer(None, None, None), None);
    }

    #[test]
    fn config_file_round_trips_through_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("relay.toml");
        fs::write(
            &path,
            "[service]\nendpoint = \"https://example.test\"\napi_key = \"k:s\"\n",
        )
        .unwrap();

        let file = ConfigFile::load(&path).unwrap();
        assert_eq!(file.service.endpoint.as_deref(), Some("https://example.test"));
        assert_eq!(file.service.api_key.as_deref(), Some("k:s"));
    }

    #[test]
    fn missing_sections_default_to_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("relay.toml");
        fs::write(&path, "").unwrap();

        let file = ConfigFile::load(&path).unwrap();
        assert!(file.service.endpoint.is_none());
        assert!(file.service.api_key.is_none());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("relay.toml");
        fs::write(&path, "[service\nendpoint = 3").unwrap();

        let err = ConfigFile::load(&path).unwrap_err();
        assert!(err.to_string().contains("parse"));
    }

    #[test]
    fn init_refuses_to_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("relay.toml");
        ConfigFile::init(&path).unwrap();
        assert!(path.exists());

        let err = ConfigFile::init(&path).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn init_template_is_loadable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("relay.toml");
        ConfigFile::init(&path).unwrap();

        // Everything in the template is commented out.
        let file = ConfigFile::load(&path).unwrap();
        assert!(file.service.endpoint.is_none());
    }

    #[test]
    fn explicit_config_path_must_exist() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = discover_config_file(Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn mask_key_keeps_only_a_tail() {
        assert_eq!(mask_key("secret123"), "****t123");
        assert_eq!(mask_key("abc"), "****");
    }
}
