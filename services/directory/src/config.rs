use std::path::PathBuf;

use serde::Deserialize;

use staffdesk_core::config::Config;

/// Which store backs the repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Database,
    /// Seeded in-process store, nothing survives a restart.
    Memory,
}

/// Directory service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct DirectoryConfig {
    /// PostgreSQL connection URL. Required for [`StoreBackend::Database`].
    #[serde(default)]
    pub database_url: Option<String>,
    /// TCP port for the HTTP server (default 8000). Env var: `DIRECTORY_PORT`.
    #[serde(default = "default_port")]
    pub directory_port: u16,
    /// Public base URL, used to build image URLs.
    #[serde(default = "default_app_url")]
    pub app_url: String,
    /// Directory holding uploaded images, served under `/storage`.
    #[serde(default = "default_storage_root")]
    pub storage_root: PathBuf,
    #[serde(default)]
    pub store_backend: StoreBackend,
    /// Session token lifetime in seconds. `0` disables expiry.
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,
    /// Password of the seeded `admin` account in memory mode.
    #[serde(default = "default_demo_admin_password")]
    pub demo_admin_password: String,
}

impl Config for DirectoryConfig {}

impl DirectoryConfig {
    pub fn token_ttl(&self) -> Option<chrono::Duration> {
        match self.token_ttl_secs {
            0 => None,
            secs => Some(chrono::Duration::seconds(
                i64::try_from(secs).unwrap_or(i64::MAX),
            )),
        }
    }
}

fn default_port() -> u16 {
    8000
}

fn default_app_url() -> String {
    "http://127.0.0.1:8000".to_owned()
}

fn default_storage_root() -> PathBuf {
    PathBuf::from("storage/app/public")
}

fn default_token_ttl_secs() -> u64 {
    7 * 24 * 60 * 60
}

fn default_demo_admin_password() -> String {
    "password".to_owned()
}
