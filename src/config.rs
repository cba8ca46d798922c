use std::path::PathBuf;

use crate::resources;

/// Environment variable overriding the download directory.
pub const DOWNLOAD_DIR_ENV: &str = "LOADAPP_DOWNLOAD_DIR";

/// Every download lands on this path below the download directory.
pub const DESTINATION: &str = "repos/github_repository.zip";

#[derive(Debug, Clone)]
pub struct ChannelConfig {
    pub id: String,
    pub name: String,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            id: resources::NOTIFICATION_CHANNEL_ID.to_string(),
            name: resources::NOTIFICATION_CHANNEL_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub download_dir: PathBuf,
    pub channel: ChannelConfig,
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            download_dir: dirs::download_dir().unwrap_or_else(|| PathBuf::from(".")),
            channel: ChannelConfig::default(),
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}

impl AppConfig {
    /// Defaults, with the download directory taken from `LOADAPP_DOWNLOAD_DIR` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(dir) = std::env::var_os(DOWNLOAD_DIR_ENV).filter(|d| !d.is_empty()) {
            config.download_dir = PathBuf::from(dir);
        }
        config
    }

    pub fn destination(&self) -> PathBuf {
        self.download_dir.join(DESTINATION)
    }
}
