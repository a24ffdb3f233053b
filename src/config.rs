use crate::error::{BookshelfError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the optional config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".bookshelf.yml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookshelfConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub store: StoreSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4000
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Mongodb,
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = BookshelfError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(StoreBackend::Mongodb),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(BookshelfError::Config(format!(
                "Unknown store backend '{}' (expected 'mongodb' or 'memory')",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default)]
    pub backend: StoreBackend,

    /// MongoDB connection string. Usually supplied through `MONGODB_URI`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    #[serde(default = "default_database")]
    pub database: String,
}

fn default_database() -> String {
    "bookshelf".to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            uri: None,
            database: default_database(),
        }
    }
}

impl BookshelfConfig {
    /// Loads the config file (explicit path, or `.bookshelf.yml` in `cwd` if present)
    /// and applies environment overrides on top.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        let mut config = match Self::find_config_file(explicit, cwd)? {
            Some(path) => Self::load_file(&path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn find_config_file(explicit: Option<&Path>, cwd: &Path) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(BookshelfError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Ok(Some(path.to_path_buf()));
        }
        let candidate = cwd.join(CONFIG_FILE_NAME);
        Ok(candidate.exists().then_some(candidate))
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: BookshelfConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Overrides settings from environment variables resolved through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(uri) = lookup("MONGODB_URI").filter(|v| !v.trim().is_empty()) {
            self.store.uri = Some(uri);
        }
        if let Some(database) = lookup("BOOKSHELF_DATABASE").filter(|v| !v.trim().is_empty()) {
            self.store.database = database;
        }
        if let Some(backend) = lookup("BOOKSHELF_STORE") {
            self.store.backend = backend.parse()?;
        }
        if let Some(host) = lookup("BOOKSHELF_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| BookshelfError::Config(format!("Invalid PORT value '{}'", port)))?;
        }
        Ok(())
    }
}
