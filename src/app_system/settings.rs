use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

pub const CONFIG_FILE: &str = "portal.toml";
pub const ENV_PREFIX: &str = "PORTAL";

/// Runtime settings for the portal binary.
///
/// Layered as defaults, then `portal.toml` if present, then `PORTAL_*`
/// environment variables (e.g. `PORTAL_USER_COUNT=50`).
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PortalSettings {
    /// Number of fixture users the store is seeded with.
    pub user_count: usize,
    pub seed: u64,
    /// Directory holding the persisted session marker.
    pub session_dir: PathBuf,
    pub page_size: usize,
    pub log_filter: String,
    pub channel_buffer: usize,
}

impl PortalSettings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(Path::new(CONFIG_FILE), ENV_PREFIX)
    }

    pub fn load_with(file: &Path, env_prefix: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("user_count", 200_i64)?
            .set_default("seed", 42_i64)?
            .set_default("session_dir", ".portal-session")?
            .set_default("page_size", 25_i64)?
            .set_default("log_filter", "info")?
            .set_default("channel_buffer", 32_i64)?
            .add_source(File::from(file).format(FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix(env_prefix).try_parsing(true))
            .build()?;

        config.try_deserialize()
    }
}
