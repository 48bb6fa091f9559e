use std::{net::IpAddr, path::{Path, PathBuf}};

use tokio::fs;

use crate::Paging;

pub const CONFIG_PATH: &str = "openmensa_mock.toml";

pub async fn read(config_path: impl AsRef<Path>) -> anyhow::Result<Config> {
    let config_path = config_path.as_ref();

    let canon = fs::canonicalize(".").await?;
    tracing::info!("try reading config file {config_path:?} at {canon:?}");

    let config = if fs::try_exists(config_path).await? {
        tracing::info!("found config");

        let config = fs::read_to_string(config_path).await?;
        let config = toml::from_str(&config)?;
        tracing::info!("read config");
        config
    } else {
        tracing::info!("config does not exist, using default config");
        Config::default()
    };

    tracing::info!("using config: {config:#?}");
    Ok(config)
}

#[derive(Debug, Default, serde::Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub paging: Paging,
    /// json file with [`crate::Fixtures`], demo data if missing
    pub fixtures: Option<PathBuf>,
}

#[derive(Debug, serde::Deserialize)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            address: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
        }
    }
}
