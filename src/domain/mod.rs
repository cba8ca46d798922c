pub mod error;
pub mod model;

pub use error::AppError;
pub use model::{ButtonState, DownloadId, DownloadOption, DownloadResult, DownloadStatus};
