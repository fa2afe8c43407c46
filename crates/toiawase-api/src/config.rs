use config::{Config as ConfigLoader, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreKind,
    pub mongodb: MongoDbConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub export: ExportConfig,

    // Secrets (from ENV only)
    #[serde(default)]
    pub mongodb_uri: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Directory served for paths no route matches
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

fn default_request_timeout() -> u64 {
    30
}

/// Which message store backs the application
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    #[default]
    Mongodb,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoDbConfig {
    pub database: String,
    #[serde(default = "default_collection")]
    pub collection: String,
}

fn default_collection() -> String {
    "messages".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportConfig {
    /// Where CSV artifacts are written before streaming; system temp dir if unset
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
    /// CJK-capable TrueType font embedded into PDF exports
    #[serde(default)]
    pub pdf_font: Option<PathBuf>,
}

impl ExportConfig {
    pub fn temp_dir(&self) -> PathBuf {
        self.temp_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

impl Config {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml, only when ENV is set
    /// 3. Environment variables, `TOIAWASE_SECTION__KEY` (e.g. `TOIAWASE_SERVER__PORT`)
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").ok().filter(|e| !e.is_empty());
        let mut cfg = Self::load_from("config", env.as_deref())?;

        // Load secrets from ENV (not in TOML)
        if cfg.store == StoreKind::Mongodb {
            cfg.mongodb_uri = std::env::var("MONGODB_URI").map_err(|_| {
                ConfigError::Message("MONGODB_URI environment variable is required".to_string())
            })?;
        }

        Ok(cfg)
    }

    /// Layer `<dir>/default.toml`, `<dir>/<profile>.toml` and `TOIAWASE_*`
    /// variables. Secrets are not read.
    pub fn load_from(dir: impl AsRef<Path>, profile: Option<&str>) -> Result<Self, ConfigError> {
        let dir = dir.as_ref();

        // 1. Load default config
        let mut builder = ConfigLoader::builder()
            .add_source(File::from(dir.join("default.toml").as_path()).required(false));

        // 2. Load environment-specific config
        if let Some(profile) = profile {
            let path = dir.join(format!("{profile}.toml"));
            builder = builder.add_source(File::from(path.as_path()).required(false));
        }

        // 3. Environment variables override everything
        let builder = builder.add_source(
            Environment::with_prefix("TOIAWASE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder().add_source(File::from(path.as_ref()));

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load config from an inline TOML document
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder().add_source(File::from_str(toml, FileFormat::Toml));

        let config = builder.build()?;
        config.try_deserialize()
    }
}
