//! Yandex Practicum adapter (homework statuses).
//!
//! Implements the `hwb-core` `HomeworkApi` port over `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

use hwb_core::{config::Config, domain::Timestamp, errors::Error, ports::HomeworkApi, Result};

#[derive(Clone, Debug)]
pub struct PracticumClient {
    endpoint: String,
    token: String,
    http: reqwest::Client,
}

impl PracticumClient {
    pub fn new(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("http client build error: {e}")))?;
        Ok(Self {
            endpoint: endpoint.into(),
            token: token.into(),
            http,
        })
    }

    pub fn from_config(cfg: &Config) -> Result<Self> {
        Self::new(
            cfg.practicum_endpoint.clone(),
            cfg.practicum_token.clone(),
            cfg.http_timeout,
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl HomeworkApi for PracticumClient {
    async fn get_api_answer(&self, since: Timestamp) -> Result<Value> {
        let params = [("from_date", since)];
        debug!(endpoint = %self.endpoint, from_date = since, "Requesting homework statuses");

        let resp = self
            .http
            .get(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&params)
            .send()
            .await
            .map_err(|e| Error::ApiAnswer(format!("request to {} failed: {e}", self.endpoint)))?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(Error::ApiStatus {
                status: status.as_u16(),
                endpoint: self.endpoint.clone(),
                params: format!("from_date={since}"),
            });
        }

        resp.json::<Value>()
            .await
            .map_err(|e| Error::ApiAnswer(format!("response is not valid JSON: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
        task::JoinHandle,
    };

    /// One-shot HTTP server: answers a single request with `status` and `body`
    /// and hands back the raw request text it received.
    async fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );

        let handle = tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let mut request = Vec::new();
            loop {
                let n = sock.read(&mut buf).await.unwrap();
                request.extend_from_slice(&buf[..n]);
                if n == 0 || request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            sock.write_all(response.as_bytes()).await.unwrap();
            sock.shutdown().await.ok();
            String::from_utf8_lossy(&request).into_owned()
        });

        (format!("http://{addr}/api/user_api/homework_statuses/"), handle)
    }

    fn client(endpoint: &str) -> PracticumClient {
        PracticumClient::new(endpoint, "secret-token", Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn returns_decoded_payload_and_sends_auth() {
        let body = r#"{"homeworks":[{"homework_name":"hw1","status":"approved"}],"current_date":1000}"#;
        let (endpoint, server) = serve_once("200 OK", body).await;

        let payload = client(&endpoint).get_api_answer(1234).await.unwrap();
        assert_eq!(payload["current_date"], 1000);
        assert_eq!(payload["homeworks"][0]["homework_name"], "hw1");

        let request = server.await.unwrap();
        assert!(
            request.starts_with("GET /api/user_api/homework_statuses/?from_date=1234 "),
            "{request}"
        );
        assert!(
            request
                .to_lowercase()
                .contains("authorization: oauth secret-token"),
            "{request}"
        );
    }

    #[tokio::test]
    async fn non_ok_status_is_api_status_error() {
        let (endpoint, server) = serve_once("503 Service Unavailable", "{}").await;

        let err = client(&endpoint).get_api_answer(77).await.unwrap_err();
        match err {
            Error::ApiStatus {
                status,
                endpoint: ep,
                params,
            } => {
                assert_eq!(status, 503);
                assert_eq!(ep, endpoint);
                assert_eq!(params, "from_date=77");
            }
            other => panic!("unexpected error: {other}"),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn invalid_json_is_api_answer_error() {
        let (endpoint, server) = serve_once("200 OK", "<html>oops</html>").await;

        let err = client(&endpoint).get_api_answer(1).await.unwrap_err();
        assert!(matches!(err, Error::ApiAnswer(_)), "{err}");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn connection_failure_is_api_answer_error() {
        // Bind then drop to get a port nobody listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{addr}/"))
            .get_api_answer(1)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ApiAnswer(_)), "{err}");
    }

    #[tokio::test]
    async fn silent_server_times_out_as_api_answer_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        // Accept and hold the connection without ever answering.
        let server = tokio::spawn(async move {
            let (_sock, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        let client =
            PracticumClient::new(format!("http://{addr}/"), "t", Duration::from_millis(100))
                .unwrap();
        let res = tokio::time::timeout(Duration::from_secs(5), client.get_api_answer(1))
            .await
            .expect("client timeout did not fire");
        let err = res.unwrap_err();
        assert!(matches!(err, Error::ApiAnswer(_)), "{err}");

        server.abort();
    }
}
