use std::path::PathBuf;

use crate::resources;

/// A fetch handed to the download manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
    pub destination: PathBuf,
    pub title: String,
    pub description: String,
}

impl DownloadRequest {
    pub fn new(url: impl Into<String>, destination: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            destination: destination.into(),
            title: resources::APP_NAME.to_string(),
            description: resources::APP_DESCRIPTION.to_string(),
        }
    }
}
