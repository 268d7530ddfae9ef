//! HTTP client for the backend health endpoint

use reqwest::Client;

/// Client for the backend's non-RPC routes
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn health_url(&self) -> String {
        format!("{}/health", self.base_url)
    }

    /// Check if backend is healthy; returns the response body
    pub async fn health_check(&self) -> Result<String, reqwest::Error> {
        self.client
            .get(self.health_url())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }

    pub async fn is_healthy(&self) -> bool {
        match self.health_check().await {
            Ok(body) => body.trim() == "OK",
            Err(e) => {
                tracing::debug!("Health check failed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    /// Answer one HTTP request with `response`; returns the server's origin.
    async fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });

        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_ok_body_is_healthy() {
        let origin =
            serve_once("HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nOK").await;
        let client = BackendClient::new(&origin);
        assert!(client.is_healthy().await);
    }

    #[tokio::test]
    async fn test_health_check_returns_body() {
        let origin =
            serve_once("HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nOK").await;
        let client = BackendClient::new(&origin);
        assert_eq!(client.health_check().await.unwrap(), "OK");
    }

    #[tokio::test]
    async fn test_other_body_is_unhealthy() {
        let origin = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Length: 8\r\nConnection: close\r\n\r\nstarting",
        )
        .await;
        let client = BackendClient::new(&origin);
        assert!(!client.is_healthy().await);
    }

    #[tokio::test]
    async fn test_server_error_is_unhealthy() {
        let origin = serve_once(
            "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 2\r\nConnection: close\r\n\r\nOK",
        )
        .await;
        let client = BackendClient::new(&origin);
        let err = client.health_check().await.unwrap_err();
        assert_eq!(err.status(), Some(reqwest::StatusCode::INTERNAL_SERVER_ERROR));

        let origin = serve_once(
            "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 2\r\nConnection: close\r\n\r\nOK",
        )
        .await;
        assert!(!BackendClient::new(&origin).is_healthy().await);
    }

    #[test]
    fn test_health_url() {
        let client = BackendClient::new("http://localhost:8080");
        assert_eq!(client.health_url(), "http://localhost:8080/health");
    }

    #[test]
    fn test_health_url_trailing_slash() {
        let client = BackendClient::new("http://localhost:8080/");
        assert_eq!(client.health_url(), "http://localhost:8080/health");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_unhealthy() {
        let client = BackendClient::new("http://127.0.0.1:1");
        assert!(!client.is_healthy().await);
    }
}
