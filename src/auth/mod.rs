//! Session authentication module
//!
//! Cookie-based session authentication against the Acumatica `entity/auth`
//! endpoints. One session is shared by the whole process, created lazily on
//! the first request and re-created after the server invalidates it.

use crate::config::RuntimeConfig;
use reqwest::header::{HeaderMap, COOKIE, SET_COOKIE};
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

/// Authentication errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Acumatica login failed ({status}): {body}")]
    LoginFailed { status: u16, body: String },

    #[error("Login succeeded but no session cookie returned")]
    MissingSessionCookie,

    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Credentials payload for the login endpoint
#[derive(Serialize)]
struct LoginRequest<'a> {
    name: &'a str,
    password: &'a str,
    company: &'a str,
}

/// Shared session state for the Acumatica entity API.
///
/// Holds at most one session cookie. Reads and writes go through an async
/// lock, so concurrent requests may race into duplicate logins but never
/// observe a torn cookie value; the last login wins.
pub struct AcumaticaSession {
    config: Arc<RuntimeConfig>,
    http_client: Client,
    cookie: RwLock<Option<String>>,
}

impl AcumaticaSession {
    /// Create a new session manager. No network traffic happens until the
    /// first request needs a cookie.
    pub fn new(config: Arc<RuntimeConfig>) -> Self {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("failed to build HTTP client");

        Self {
            config,
            http_client,
            cookie: RwLock::new(None),
        }
    }

    fn login_url(&self) -> String {
        format!("{}/entity/auth/login", self.config.base_url)
    }

    fn logout_url(&self) -> String {
        format!("{}/entity/auth/logout", self.config.base_url)
    }

    /// Return the held session cookie, logging in first if none is held.
    pub async fn ensure_session(&self) -> Result<String, AuthError> {
        {
            let cookie = self.cookie.read().await;
            if let Some(ref cookie) = *cookie {
                tracing::debug!("Using existing session cookie");
                return Ok(cookie.clone());
            }
        }

        tracing::info!("No session held, logging in to {}", self.config.base_url);
        self.login().await
    }

    /// Authenticate against the login endpoint and store the session cookie.
    pub async fn login(&self) -> Result<String, AuthError> {
        let body = LoginRequest {
            name: &self.config.username,
            password: &self.config.password,
            company: &self.config.company,
        };

        let response = self
            .http_client
            .post(self.login_url())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Login failed: {} - {}", status, body);
            return Err(AuthError::LoginFailed { status, body });
        }

        let cookie =
            extract_session_cookie(response.headers()).ok_or(AuthError::MissingSessionCookie)?;

        {
            let mut held = self.cookie.write().await;
            *held = Some(cookie.clone());
        }

        tracing::info!("Login succeeded, session established");
        Ok(cookie)
    }

    /// End the server-side session if one is held.
    ///
    /// The cookie is cleared unconditionally; a logout request that fails is
    /// logged and otherwise ignored.
    pub async fn logout(&self) {
        let cookie = {
            let mut held = self.cookie.write().await;
            held.take()
        };

        let cookie = match cookie {
            Some(cookie) => cookie,
            None => return,
        };

        let result = self
            .http_client
            .post(self.logout_url())
            .header(COOKIE, cookie)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                tracing::info!("Logged out");
            }
            Ok(response) => {
                tracing::warn!("Logout returned status {}", response.status());
            }
            Err(e) => {
                tracing::warn!("Logout request failed: {}", e);
            }
        }
    }

    /// True when a session cookie is currently held.
    pub async fn is_authenticated(&self) -> bool {
        self.cookie.read().await.is_some()
    }

    /// Drop the held cookie, forcing a fresh login on the next request.
    pub async fn invalidate(&self) {
        let mut held = self.cookie.write().await;
        *held = None;
    }
}

/// Extract the session cookie pairs from login response headers.
///
/// Keeps the leading `name=value` of every `Set-Cookie` header and joins the
/// pairs with `"; "`, dropping attributes such as `Path` or `HttpOnly`. A
/// value that itself contains `;` is truncated at the first one; the server
/// is not known to emit such cookies.
fn extract_session_cookie(headers: &HeaderMap) -> Option<String> {
    let pairs: Vec<&str> = headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|cookie| cookie.split(';').next())
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .collect();

    if pairs.is_empty() {
        None
    } else {
        Some(pairs.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;
    use std::time::Duration;

    fn test_config() -> Arc<RuntimeConfig> {
        Arc::new(RuntimeConfig {
            base_url: "https://erp.example.com".to_string(),
            username: "admin".to_string(),
            password: "secret".to_string(),
            company: "Company".to_string(),
            endpoint: "Default".to_string(),
            version: "25.200.001".to_string(),
            timeout: Duration::from_secs(30),
        })
    }

    fn headers(values: &[&str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for value in values {
            headers.append(SET_COOKIE, HeaderValue::from_str(value).unwrap());
        }
        headers
    }

    #[test]
    fn test_auth_urls() {
        let session = AcumaticaSession::new(test_config());
        assert_eq!(session.login_url(), "https://erp.example.com/entity/auth/login");
        assert_eq!(session.logout_url(), "https://erp.example.com/entity/auth/logout");
    }

    #[test]
    fn test_extract_strips_cookie_attributes() {
        let headers = headers(&["ASP.NET_SessionId=abc123; Path=/; HttpOnly"]);
        assert_eq!(
            extract_session_cookie(&headers).as_deref(),
            Some("ASP.NET_SessionId=abc123")
        );
    }

    #[test]
    fn test_extract_joins_multiple_cookies() {
        let headers = headers(&["sessionId=abc123; Path=/; HttpOnly", "extra=xyz; Secure"]);
        assert_eq!(
            extract_session_cookie(&headers).as_deref(),
            Some("sessionId=abc123; extra=xyz")
        );
    }

    #[test]
    fn test_extract_keeps_plain_cookies() {
        let headers = headers(&["token=plain"]);
        assert_eq!(extract_session_cookie(&headers).as_deref(), Some("token=plain"));
    }

    #[test]
    fn test_extract_without_cookies() {
        assert_eq!(extract_session_cookie(&HeaderMap::new()), None);
    }

    #[tokio::test]
    async fn test_session_starts_unauthenticated() {
        let session = AcumaticaSession::new(test_config());
        assert!(!session.is_authenticated().await);
    }
}
