use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::DeskError;

pub const CUSTOMERS_ROUTE: &str = "/dashboard/customers";
pub const INVOICES_ROUTE: &str = "/dashboard/invoices";

/// Sub-directory of the public dir that receives customer images.
pub const CUSTOMER_IMAGE_DIR: &str = "customers";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub basic: BasicConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicConfig {
    pub listen_addr: String,
    pub database_url: String,
    pub loglevel: String,
    /// Root of the statically served directory; images land in `<public_dir>/customers`.
    pub public_dir: PathBuf,
    /// Maximum accepted request body, in bytes.
    pub body_limit: usize,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".to_string(),
            database_url: "sqlite:data.db".to_string(),
            loglevel: "info".to_string(),
            public_dir: PathBuf::from("public"),
            body_limit: 4 * 1024 * 1024,
        }
    }
}

impl Config {
    /// Defaults, then `config.toml`, then `DESK_*` environment variables.
    /// A malformed source is an error, never a silent fallback to defaults.
    pub fn load() -> Result<Self, DeskError> {
        Ok(Self::figment().extract()?)
    }

    fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file("config.toml"))
            .merge(
                Env::prefixed("DESK_")
                    .map(|key| format!("basic.{}", key.as_str().to_ascii_lowercase()).into()),
            )
    }

    pub fn image_dir(&self) -> PathBuf {
        self.basic.public_dir.join(CUSTOMER_IMAGE_DIR)
    }
}
