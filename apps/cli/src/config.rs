//! # CLI Configuration
//!
//! Where the stores live and who is at the keyboard.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command line flags (highest priority)                              │
//! │     --data-dir ./shop  --role admin  --operator ada                    │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     TALLY_DATA_DIR, TALLY_OPERATOR, TALLY_ROLE,                        │
//! │     TALLY_LOW_STOCK_THRESHOLD                                          │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config PATH, or tally.toml in the platform config dir            │
//! │     ~/.config/tally/tally.toml (Linux)                                 │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     platform data dir, products.json, transactions.json, threshold 5   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [storage]
//! data_dir = "./database"
//! catalog_file = "products.json"
//! transactions_file = "transactions.json"
//!
//! [session]
//! operator = "front-desk"
//! role = "employee"   # employee | admin; leave out for no session
//!
//! [stock]
//! low_stock_threshold = 5
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tally_core::{Role, Session, DEFAULT_LOW_STOCK_THRESHOLD};
use tally_db::storage::{DEFAULT_CATALOG_FILE, DEFAULT_TRANSACTIONS_FILE};
use tally_db::StoreConfig;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const CONFIG_FILE_NAME: &str = "tally.toml";

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// `[storage]`: data directory and file names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_catalog_file")]
    pub catalog_file: String,

    #[serde(default = "default_transactions_file")]
    pub transactions_file: String,
}

fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("org", "tally", "tally")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./database"))
}

fn default_catalog_file() -> String {
    DEFAULT_CATALOG_FILE.to_string()
}

fn default_transactions_file() -> String {
    DEFAULT_TRANSACTIONS_FILE.to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            data_dir: default_data_dir(),
            catalog_file: default_catalog_file(),
            transactions_file: default_transactions_file(),
        }
    }
}

/// `[session]`: the operator's name and role. No role means no session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    #[serde(default)]
    pub operator: Option<String>,

    #[serde(default)]
    pub role: Option<Role>,
}

/// `[stock]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockSettings {
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: i64,
}

fn default_low_stock_threshold() -> i64 {
    DEFAULT_LOW_STOCK_THRESHOLD
}

impl Default for StockSettings {
    fn default() -> Self {
        StockSettings {
            low_stock_threshold: default_low_stock_threshold(),
        }
    }
}

// =============================================================================
// App Configuration
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub session: SessionSettings,

    #[serde(default)]
    pub stock: StockSettings,
}

impl AppConfig {
    /// Platform config location, e.g. `~/.config/tally/tally.toml`.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("org", "tally", "tally")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Loads defaults, then the config file, then environment overrides.
    ///
    /// An explicit `config_path` must exist; the platform default may not.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = match config_path {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path)),
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                path => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> ConfigResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Applies `TALLY_*` overrides read through `lookup`.
    ///
    /// Unparseable values are logged and ignored.
    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup("TALLY_DATA_DIR") {
            debug!(data_dir = %dir, "Overriding data dir from environment");
            self.storage.data_dir = PathBuf::from(dir);
        }

        if let Some(operator) = lookup("TALLY_OPERATOR") {
            self.session.operator = Some(operator);
        }

        if let Some(role) = lookup("TALLY_ROLE") {
            match role.parse::<Role>() {
                Ok(parsed) => {
                    debug!(role = %parsed, "Overriding role from environment");
                    self.session.role = Some(parsed);
                }
                Err(e) => warn!(value = %role, "Ignoring TALLY_ROLE: {}", e),
            }
        }

        if let Some(threshold) = lookup("TALLY_LOW_STOCK_THRESHOLD") {
            match threshold.parse::<i64>() {
                Ok(t) => self.stock.low_stock_threshold = t,
                Err(_) => warn!(value = %threshold, "Ignoring TALLY_LOW_STOCK_THRESHOLD"),
            }
        }
    }

    /// Applies command line flags, the last and strongest layer.
    pub fn apply_cli(
        &mut self,
        data_dir: Option<PathBuf>,
        operator: Option<String>,
        role: Option<Role>,
    ) {
        if let Some(dir) = data_dir {
            self.storage.data_dir = dir;
        }
        if operator.is_some() {
            self.session.operator = operator;
        }
        if role.is_some() {
            self.session.role = role;
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.storage.catalog_file.trim().is_empty() {
            return Err(ConfigError::Invalid("catalog_file must not be empty".into()));
        }
        if self.storage.transactions_file.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "transactions_file must not be empty".into(),
            ));
        }
        if self.storage.catalog_file == self.storage.transactions_file {
            return Err(ConfigError::Invalid(
                "catalog_file and transactions_file must differ".into(),
            ));
        }
        if self.stock.low_stock_threshold < 0 {
            return Err(ConfigError::Invalid(format!(
                "low_stock_threshold must not be negative, got {}",
                self.stock.low_stock_threshold
            )));
        }
        Ok(())
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(&self.storage.data_dir)
            .catalog_file(&self.storage.catalog_file)
            .transactions_file(&self.storage.transactions_file)
    }

    pub fn session(&self) -> Session {
        Session {
            operator: self.session.operator.clone(),
            role: self.session.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.storage.catalog_file, "products.json");
        assert_eq!(config.storage.transactions_file, "transactions.json");
        assert_eq!(config.stock.low_stock_threshold, 5);
        assert!(!config.session().is_authenticated());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();
        config.stock.low_stock_threshold = -1;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = AppConfig::default();
        config.storage.catalog_file = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.storage.transactions_file = "products.json".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [session]
            operator = "front-desk"
            role = "admin"
            "#,
        )
        .unwrap();

        assert_eq!(config.session().role, Some(Role::Admin));
        assert_eq!(config.storage.catalog_file, "products.json");
        assert_eq!(config.stock.low_stock_threshold, 5);
    }

    #[test]
    fn test_toml_serialization() {
        let mut config = AppConfig::default();
        config.session.role = Some(Role::Employee);
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("TALLY_DATA_DIR", "/srv/shop"),
            ("TALLY_ROLE", "Admin"),
            ("TALLY_OPERATOR", "ada"),
            ("TALLY_LOW_STOCK_THRESHOLD", "nope"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_overrides_from(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.storage.data_dir, PathBuf::from("/srv/shop"));
        assert_eq!(config.session(), Session::admin("ada"));
        assert_eq!(config.stock.low_stock_threshold, 5);
    }

    #[test]
    fn test_cli_flags_win() {
        let mut config = AppConfig::default();
        config.session.role = Some(Role::Admin);
        config.apply_cli(Some(PathBuf::from("./shop")), Some("sam".into()), Some(Role::Employee));

        assert_eq!(config.session(), Session::employee("sam"));
        assert_eq!(
            config.store_config().catalog_path(),
            PathBuf::from("./shop").join("products.json")
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            "[storage]\ndata_dir = \"./db\"\ncatalog_file = \"catalog.json\"\n",
        )
        .unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.storage.data_dir, PathBuf::from("./db"));
        assert_eq!(config.storage.catalog_file, "catalog.json");

        std::fs::write(&path, "[stock]\nlow_stock_threshold = \"five\"\n").unwrap();
        assert!(matches!(
            AppConfig::from_file(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            AppConfig::load(Some(missing)),
            Err(ConfigError::NotFound(_))
        ));
    }
}
