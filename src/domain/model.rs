use std::fmt;

use crate::resources;

/// Visual state of the loading button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    /// Ready for input; also the state after a download completes.
    #[default]
    Idle,
    /// A download is in flight.
    Busy,
    /// Reserved; entering it has no visual effect.
    #[allow(dead_code)]
    Clicked,
}

/// One of the fixed repositories the user can pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DownloadOption {
    Glide,
    LoadApp,
    Retrofit,
}

impl DownloadOption {
    pub const ALL: [DownloadOption; 3] = [
        DownloadOption::Glide,
        DownloadOption::LoadApp,
        DownloadOption::Retrofit,
    ];

    /// Text shown next to the radio button, also used as the file description.
    pub fn description(self) -> &'static str {
        match self {
            DownloadOption::Glide => resources::GLIDE_TEXT,
            DownloadOption::LoadApp => resources::LOAD_APP_TEXT,
            DownloadOption::Retrofit => resources::RETROFIT_TEXT,
        }
    }

    pub fn url(self) -> &'static str {
        match self {
            DownloadOption::Glide => resources::URL_GLIDE,
            DownloadOption::LoadApp => resources::URL_LOAD_APP,
            DownloadOption::Retrofit => resources::URL_RETROFIT,
        }
    }

    /// Transient message shown when the download starts.
    pub fn started_message(self) -> &'static str {
        match self {
            DownloadOption::Glide => resources::GLIDE_MESSAGE,
            DownloadOption::LoadApp => resources::LOAD_APP_MESSAGE,
            DownloadOption::Retrofit => resources::RETROFIT_MESSAGE,
        }
    }
}

impl fmt::Display for DownloadOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Opaque identifier handed out by the download manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DownloadId(pub(crate) u64);

impl fmt::Display for DownloadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadStatus {
    Pending,
    Running,
    Successful { bytes: u64 },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadResult {
    pub file_description: String,
    pub succeeded: bool,
}

impl DownloadResult {
    pub fn new(file_description: impl Into<String>, succeeded: bool) -> Self {
        Self {
            file_description: file_description.into(),
            succeeded,
        }
    }

    /// Localized "Success" / "Fail" label.
    pub fn status_label(&self) -> &'static str {
        if self.succeeded {
            resources::SUCCESS
        } else {
            resources::FAILED
        }
    }
}
