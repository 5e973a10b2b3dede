//! Site configuration management.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    content::CollectionKind,
    error::{CoreError, Result},
};

/// Main configuration structure for Folio.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    #[serde(default)]
    pub site: SiteConfig,

    /// Content location settings.
    #[serde(default)]
    pub content: ContentConfig,

    /// Collections by name. Empty means the built-in defaults.
    #[serde(default)]
    pub collections: BTreeMap<String, CollectionConfig>,

    /// JSON API server settings.
    #[serde(default)]
    pub server: ServerConfig,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title.
    #[serde(default = "default_title")]
    pub title: String,

    /// Site description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Where content lives on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Content root; one subdirectory (or `<name>.json`) per collection.
    #[serde(default = "default_content_root")]
    pub root: PathBuf,
}

/// A single collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Kind of record held by the collection.
    pub kind: CollectionKind,
}

/// JSON API server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

// Default value functions
fn default_title() -> String {
    "Studio".to_string()
}

fn default_content_root() -> PathBuf {
    PathBuf::from("content")
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            description: None,
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: default_content_root(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration layered with `FOLIO__*` environment variables.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix("FOLIO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.content.root.as_os_str().is_empty() {
            return Err(CoreError::config("content.root cannot be empty"));
        }

        for name in self.collections.keys() {
            if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..")
            {
                return Err(CoreError::config(format!(
                    "invalid collection name: {name:?}"
                )));
            }
        }

        if self.server.port == 0 {
            return Err(CoreError::config("server.port cannot be 0"));
        }

        Ok(())
    }

    /// Configured collections, or the built-in set when none are configured.
    pub fn collections(&self) -> BTreeMap<String, CollectionKind> {
        if self.collections.is_empty() {
            CollectionKind::ALL
                .into_iter()
                .map(|kind| (kind.default_collection().to_string(), kind))
                .collect()
        } else {
            self.collections
                .iter()
                .map(|(name, c)| (name.clone(), c.kind))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn create_test_config() -> String {
        r#"
[site]
title = "Studio Poetics"

[content]
root = "site/content"

[collections.journal]
kind = "journal"

[collections.objects]
kind = "designed-object"

[server]
port = 8080
"#
        .to_string()
    }

    #[test]
    fn test_load_config() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("folio.toml");
        let mut file = std::fs::File::create(&config_path).expect("create file");
        file.write_all(create_test_config().as_bytes())
            .expect("write");

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(config.site.title, "Studio Poetics");
        assert_eq!(config.content.root, PathBuf::from("site/content"));
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);

        let collections = config.collections();
        assert_eq!(collections.len(), 2);
        assert_eq!(collections["journal"], CollectionKind::Journal);
        assert_eq!(collections["objects"], CollectionKind::DesignedObject);
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::default();

        assert_eq!(config.content.root, PathBuf::from("content"));
        assert_eq!(config.server.port, 3000);

        let collections = config.collections();
        assert_eq!(collections.len(), 6);
        assert_eq!(collections["designed-objects"], CollectionKind::DesignedObject);
        assert_eq!(collections["case-studies"], CollectionKind::CaseStudy);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("folio.toml");
        std::fs::write(&config_path, "").expect("write");

        let config = Config::load(&config_path).expect("load config");
        assert_eq!(config.site.title, "Studio");
        assert_eq!(config.collections().len(), 6);
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("folio.toml");
        std::fs::write(&config_path, "[collections.blog]\nkind = \"blog\"\n").expect("write");

        let result = Config::load(&config_path);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_config_validation_bad_collection_name() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("folio.toml");
        std::fs::write(
            &config_path,
            "[collections.\"../etc\"]\nkind = \"journal\"\n",
        )
        .expect("write");

        let result = Config::load(&config_path);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("invalid collection name")
        );
    }

    #[test]
    fn test_config_not_found() {
        let result = Config::load(Path::new("/nonexistent/folio.toml"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config =
            Config::load_or_default(Path::new("/nonexistent/folio.toml")).expect("defaults");
        assert_eq!(config.content.root, PathBuf::from("content"));
    }

    #[test]
    fn test_load_with_env_reads_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("folio.toml");
        std::fs::write(&config_path, create_test_config()).expect("write");

        let config = Config::load_with_env(&config_path).expect("load config");
        assert_eq!(config.site.title, "Studio Poetics");
        assert_eq!(config.collections().len(), 2);
    }

    #[test]
    fn test_load_with_env_overrides_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("folio.toml");
        std::fs::write(&config_path, create_test_config()).expect("write");

        // No other test in this crate reads FOLIO__SERVER__PORT.
        unsafe { std::env::set_var("FOLIO__SERVER__PORT", "9191") };
        let result = Config::load_with_env(&config_path);
        unsafe { std::env::remove_var("FOLIO__SERVER__PORT") };

        let config = result.expect("load config");
        assert_eq!(config.server.port, 9191);
        assert_eq!(config.site.title, "Studio Poetics");
    }
}
