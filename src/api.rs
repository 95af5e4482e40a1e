//! Thin client for the Euclid GCD service.
//!
//! Bearer-authenticated calls map a 401 to `ApiError::Unauthorized` so
//! callers can clear the session uniformly. The login and register endpoints
//! answer 401 for rejected credentials instead; those surface the service's
//! message as a plain `ApiError::Service`.

use crate::model::{AuthResponse, Credentials, GcdResult, HistoryItem};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Rejected client-side before any request was sent.
    #[error("{0}")]
    Validation(String),
    /// The service answered 401; the cached session is no longer valid.
    #[error("unauthorized")]
    Unauthorized,
    /// The service answered with a non-success status. `message` is the
    /// service-provided detail, or a per-operation fallback.
    #[error("{message}")]
    Service { status: u16, message: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// Human-readable message for UI layers.
    pub fn to_message(&self) -> String {
        match self {
            ApiError::Unauthorized => "Session expired. Please log in again.".to_string(),
            other => other.to_string(),
        }
    }
}

/// Error body shape of the service (`{"detail": "..."}`).
#[derive(Debug, Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    detail: Option<String>,
}

/// Pick the surfaced message for a failed response: service detail verbatim,
/// otherwise the operation's generic fallback.
fn service_message(body: &str, fallback: &str) -> String {
    serde_json::from_str::<ErrorPayload>(body)
        .ok()
        .and_then(|p| p.detail)
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn set_token(&mut self, token: &str) {
        self.token = Some(token.to_string());
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn bearer(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.token.as_deref() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn handle<T: DeserializeOwned>(
        resp: Response,
        fallback: &str,
    ) -> Result<T, ApiError> {
        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Service {
                status: status.as_u16(),
                message: service_message(&body, fallback),
            });
        }
        Ok(resp.json::<T>().await?)
    }

    async fn auth(&self, path: &str, creds: &Credentials, fallback: &str) -> Result<AuthResponse, ApiError> {
        debug!(path, email = %creds.email, "auth request");
        let resp = self.http.post(self.url(path)).json(creds).send().await?;
        // A 401 from the auth endpoints means rejected credentials, not an
        // expired session; surface the service's own message.
        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Service {
                status: status.as_u16(),
                message: service_message(&body, fallback),
            });
        }
        Self::handle(resp, fallback).await
    }

    pub async fn login(&self, creds: &Credentials) -> Result<AuthResponse, ApiError> {
        self.auth("/auth/login", creds, "Login failed. Please try again.")
            .await
    }

    pub async fn register(&self, creds: &Credentials) -> Result<AuthResponse, ApiError> {
        self.auth(
            "/auth/register",
            creds,
            "Registration failed. Please try again.",
        )
        .await
    }

    /// Request a GCD trace. Non-positive inputs are rejected before any
    /// request goes out.
    pub async fn calculate(&self, a: u64, b: u64) -> Result<GcdResult, ApiError> {
        if a == 0 || b == 0 {
            return Err(ApiError::Validation(
                "Both numbers must be positive integers.".to_string(),
            ));
        }
        debug!(a, b, "calculate request");
        let resp = self
            .bearer(self.http.post(self.url("/gcd/calculate")))
            .json(&serde_json::json!({ "a": a, "b": b }))
            .send()
            .await?;
        Self::handle(resp, "Calculation failed. Please try again.").await
    }

    pub async fn history(&self) -> Result<Vec<HistoryItem>, ApiError> {
        debug!("history request");
        let resp = self
            .bearer(self.http.get(self.url("/gcd/history")))
            .send()
            .await?;
        Self::handle(resp, "Could not load history.").await
    }

    pub async fn history_item(&self, id: i64) -> Result<HistoryItem, ApiError> {
        debug!(id, "history item request");
        let resp = self
            .bearer(self.http.get(self.url(&format!("/gcd/history/{id}"))))
            .send()
            .await?;
        Self::handle(resp, "Could not load the history item.").await
    }

    /// Delete one history item. The service answers 204 on success.
    pub async fn delete_history(&self, id: i64) -> Result<(), ApiError> {
        debug!(id, "delete history request");
        let resp = self
            .bearer(self.http.delete(self.url(&format!("/gcd/history/{id}"))))
            .send()
            .await?;
        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Service {
                status: status.as_u16(),
                message: service_message(&body, "Could not delete the history item."),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_field_is_surfaced_verbatim() {
        let msg = service_message(
            r#"{"detail": "Numbers must be greater than zero"}"#,
            "Calculation failed. Please try again.",
        );
        assert_eq!(msg, "Numbers must be greater than zero");
    }

    #[test]
    fn missing_detail_falls_back_to_generic_message() {
        assert_eq!(
            service_message("{}", "Could not load history."),
            "Could not load history."
        );
        assert_eq!(
            service_message("<html>bad gateway</html>", "Could not load history."),
            "Could not load history."
        );
        assert_eq!(
            service_message(r#"{"detail": "  "}"#, "Could not load history."),
            "Could not load history."
        );
    }

    #[tokio::test]
    async fn calculate_rejects_non_positive_input_without_a_request() {
        // Port 9 (discard) is never listened on; a sent request would error
        // differently than the validation path.
        let client = ApiClient::new("http://127.0.0.1:9", Duration::from_millis(100)).unwrap();
        let err = client.calculate(0, 18).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        let err = client.calculate(48, 0).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn login_401_surfaces_the_rejected_credentials_detail() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = sock.read(&mut buf).await;
            let body = r#"{"detail": "Invalid email or password"}"#;
            let reply = format!(
                "HTTP/1.1 401 Unauthorized\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            let _ = sock.write_all(reply.as_bytes()).await;
        });

        let client =
            ApiClient::new(&format!("http://{addr}"), Duration::from_secs(2)).unwrap();
        let err = client
            .login(&Credentials {
                email: "user@example.com".to_string(),
                password: "wrong".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Service { status: 401, .. }));
        assert_eq!(err.to_message(), "Invalid email or password");
    }

    #[test]
    fn unauthorized_message_tells_the_user_to_log_in() {
        assert_eq!(
            ApiError::Unauthorized.to_message(),
            "Session expired. Please log in again."
        );
    }
}
