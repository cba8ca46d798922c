use futures::Stream;
use futures::TryStreamExt;
use reqwest::Client;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Server returned {0}")]
    Status(reqwest::StatusCode),
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Thin wrapper over a shared `reqwest::Client`.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(user_agent: &str) -> Self {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Falling back to default HTTP client: {}", e);
                Client::new()
            });
        Self { client }
    }

    /// Starts a GET and returns (content length, body stream).
    pub async fn download_file_stream(
        &self,
        download_url: &str,
    ) -> Result<(Option<u64>, impl Stream<Item = Result<bytes::Bytes>>)> {
        let response = self.client.get(download_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        let total_size = response.content_length();
        let stream = response.bytes_stream().map_err(ApiError::RequestError);

        Ok((total_size, stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn test_streams_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/archive.zip")
            .with_status(200)
            .with_body("zipdata")
            .create_async()
            .await;

        let client = HttpClient::new("load-app-test");
        let (total, stream) = client
            .download_file_stream(&format!("{}/archive.zip", server.url()))
            .await
            .unwrap();
        let chunks: Vec<_> = stream.collect().await;
        let body: Vec<u8> = chunks
            .into_iter()
            .flat_map(|c| c.unwrap().to_vec())
            .collect();

        assert_eq!(total, Some(7));
        assert_eq!(body, b"zipdata");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/missing.zip")
            .with_status(404)
            .create_async()
            .await;

        let client = HttpClient::new("load-app-test");
        let result = client
            .download_file_stream(&format!("{}/missing.zip", server.url()))
            .await;

        assert!(matches!(result, Err(ApiError::Status(s)) if s.as_u16() == 404));
    }
}
