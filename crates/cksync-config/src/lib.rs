use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the cksync server
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default, rename = "static")]
    pub static_files: StaticConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Value of `Access-Control-Allow-Origin` on API responses.
    #[serde(default = "default_allow_origin")]
    pub allow_origin: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite database file. Defaults to the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticConfig {
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Entry document served for sync id paths.
    #[serde(default = "default_index")]
    pub index: String,

    /// Request paths that are never served, whatever the method.
    #[serde(default = "default_forbidden")]
    pub forbidden: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allow_origin: default_allow_origin(),
        }
    }
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            index: default_index(),
            forbidden: default_forbidden(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_allow_origin() -> String {
    "*".to_string()
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_index() -> String {
    "index.html".to_string()
}

fn default_forbidden() -> Vec<String> {
    vec!["/config.php".to_string(), "/cksync.toml".to_string()]
}

impl Config {
    /// Load config from `path`, or from the default location.
    ///
    /// An explicit path must exist. At the default location a missing file is
    /// created with default values.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::read(path),
            None => {
                let path = Self::config_path();
                if path.exists() {
                    Self::read(&path)
                } else {
                    let config = Config::default();
                    config.save(&path)?;
                    Ok(config)
                }
            }
        }
    }

    fn read(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Write config as TOML, creating parent directories
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "cksync", "cksync") {
            dirs.config_dir().join("cksync.toml")
        } else {
            PathBuf::from("cksync.toml")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.allow_origin, "*");
        assert!(config.storage.db_path.is_none());
        assert_eq!(config.static_files.index, "index.html");
        assert!(
            config
                .static_files
                .forbidden
                .contains(&"/config.php".to_string())
        );
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = config.to_toml().unwrap();
        assert!(toml_str.contains("[static]"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.server.host, config.server.host);
        assert_eq!(parsed.static_files.root, config.static_files.root);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let parsed: Config = toml::from_str(
            r#"
            [server]
            port = 9000

            [storage]
            db_path = "/tmp/x.db"
            "#,
        )
        .unwrap();

        assert_eq!(parsed.server.port, 9000);
        assert_eq!(parsed.server.host, "127.0.0.1");
        assert_eq!(parsed.storage.db_path, Some(PathBuf::from("/tmp/x.db")));
        assert_eq!(parsed.static_files.index, "index.html");
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("cksync.toml");

        assert!(Config::load(Some(&path)).is_err());

        let mut config = Config::default();
        config.server.port = 1234;
        config.save(&path).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.server.port, 1234);
    }
}
