use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::{future::BoxFuture, FutureExt, StreamExt};
use parking_lot::Mutex;
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::{
    api::{DownloadRequest, HttpClient},
    domain::{AppError, DownloadId, DownloadStatus},
};

/// Handle returned by [`DownloadManager::enqueue`].
///
/// `completion` performs the transfer and resolves exactly once with the
/// request's id; the final status is then available through
/// [`DownloadManager::query`].
pub struct Enqueued {
    pub id: DownloadId,
    pub completion: BoxFuture<'static, DownloadId>,
}

#[derive(Debug, Clone)]
struct DownloadRecord {
    request: DownloadRequest,
    status: DownloadStatus,
}

#[derive(Clone)]
pub struct DownloadManager {
    client: HttpClient,
    next_id: Arc<AtomicU64>,
    records: Arc<Mutex<HashMap<DownloadId, DownloadRecord>>>,
}

impl DownloadManager {
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            next_id: Arc::new(AtomicU64::new(1)),
            records: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Validates `request` and registers it.
    ///
    /// Nothing touches the network or the filesystem until the returned
    /// completion future is polled.
    pub fn enqueue(&self, request: DownloadRequest) -> Result<Enqueued, AppError> {
        let url = validate(&request)?;

        let id = DownloadId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.records.lock().insert(
            id,
            DownloadRecord {
                request: request.clone(),
                status: DownloadStatus::Pending,
            },
        );
        tracing::info!(
            %id,
            url = %url,
            title = %request.title,
            description = %request.description,
            "Download enqueued"
        );

        let manager = self.clone();
        let completion = async move {
            manager.record(id, DownloadStatus::Running);
            let status = match manager.fetch(url.as_str(), &request.destination).await {
                Ok(bytes) => {
                    tracing::info!(%id, bytes, "Download finished");
                    DownloadStatus::Successful { bytes }
                }
                Err(e) => {
                    tracing::warn!(%id, "Download failed: {}", e);
                    DownloadStatus::Failed {
                        reason: e.to_string(),
                    }
                }
            };
            manager.record(id, status);
            id
        }
        .boxed();

        Ok(Enqueued { id, completion })
    }

    pub fn query(&self, id: DownloadId) -> Option<DownloadStatus> {
        self.records.lock().get(&id).map(|r| r.status.clone())
    }

    /// Returns the status of `id` and forgets the request once that status
    /// is final. Pending and running requests stay registered.
    pub fn take_status(&self, id: DownloadId) -> Option<DownloadStatus> {
        let status = self.query(id)?;
        if matches!(
            status,
            DownloadStatus::Successful { .. } | DownloadStatus::Failed { .. }
        ) {
            self.records.lock().remove(&id);
        }
        Some(status)
    }

    pub fn request(&self, id: DownloadId) -> Option<DownloadRequest> {
        self.records.lock().get(&id).map(|r| r.request.clone())
    }

    pub fn request_count(&self) -> usize {
        self.records.lock().len()
    }

    pub(crate) fn record(&self, id: DownloadId, status: DownloadStatus) {
        if let Some(record) = self.records.lock().get_mut(&id) {
            record.status = status;
        }
    }

    /// Streams `url` into a `.part` sibling of `destination` and renames it
    /// into place only once the whole body is on disk. A failed transfer
    /// leaves any previous file at `destination` untouched.
    async fn fetch(&self, url: &str, destination: &Path) -> Result<u64, AppError> {
        let (_total, stream) = self
            .client
            .download_file_stream(url)
            .await
            .map_err(|e| AppError::Http(e.to_string()))?;
        let mut stream = stream.boxed();

        if let Some(parent) = destination.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::Io(format!("Failed to create directory: {}", e)))?;
        }

        let partial = partial_path(destination);
        let written = async {
            let mut file = tokio::fs::File::create(&partial)
                .await
                .map_err(|e| AppError::Io(format!("Failed to create file: {}", e)))?;

            let mut downloaded = 0u64;
            while let Some(chunk) = stream.next().await {
                let chunk = chunk.map_err(|e| AppError::Http(e.to_string()))?;
                file.write_all(&chunk)
                    .await
                    .map_err(|e| AppError::Io(format!("Write error: {}", e)))?;
                downloaded += chunk.len() as u64;
            }

            file.sync_all()
                .await
                .map_err(|e| AppError::Io(format!("Failed to sync file: {}", e)))?;
            drop(file);

            tokio::fs::rename(&partial, destination)
                .await
                .map_err(|e| AppError::Io(format!("Failed to move file into place: {}", e)))?;
            Ok::<_, AppError>(downloaded)
        }
        .await;

        if written.is_err() {
            let _ = tokio::fs::remove_file(&partial).await;
        }
        written
    }
}

fn partial_path(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".part");
    destination.with_file_name(name)
}

fn validate(request: &DownloadRequest) -> Result<Url, AppError> {
    let url = Url::parse(&request.url)
        .map_err(|e| AppError::InvalidRequest(format!("{}: {}", request.url, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::InvalidRequest(format!(
            "unsupported scheme '{}'",
            url.scheme()
        )));
    }

    if request.destination.file_name().is_none() {
        return Err(AppError::InvalidRequest(format!(
            "destination {} has no file name",
            request.destination.display()
        )));
    }

    Ok(url)
}
