pub mod download_manager;
pub mod notification;

pub use download_manager::DownloadManager;
