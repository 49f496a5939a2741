//! OAuth "authorization code" flow against GitHub
//!
//! The flow runs entirely on the user's machine:
//!
//! ```text
//! bind 127.0.0.1:<port> ──► print + open authorize URL ──► user approves in browser
//!                                                             │
//! Credential ◄── POST /login/oauth/access_token ◄── GET /oauth/callback?code&state
//! ```

use crate::browser;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use http::header::ACCEPT;
use log::{debug, info, warn};
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::net::SocketAddr;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use url::Url;
use uuid::Uuid;

const GITHUB_WEB_URL: &str = "https://github.com";
const AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
const TOKEN_ROUTE: &str = "/login/oauth/access_token";
pub const CALLBACK_PATH: &str = "/oauth/callback";

/// Cached OAuth access token
///
/// Field names follow the usual OAuth2 token JSON layout so files written
/// by other OAuth2 clients keep working.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    /// Absolute expiry, if the provider issued an expiring token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl Credential {
    /// A bare bearer token without refresh metadata
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: Some("bearer".to_string()),
            refresh_token: None,
            expiry: None,
            scope: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("OAuth client id and secret are required; set HACKTOBERFEST_CLIENT_ID and HACKTOBERFEST_CLIENT_SECRET")]
    MissingClientCredentials,

    #[error("failed to listen for the OAuth callback on {addr}")]
    Listener {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read the OAuth callback")]
    Callback(#[from] std::io::Error),

    #[error("authorization was denied: {0}")]
    Denied(String),

    #[error("OAuth callback state did not match the authorization request")]
    StateMismatch,

    #[error("OAuth callback did not contain an authorization code")]
    MissingCode,

    #[error("token exchange failed: {0}")]
    Exchange(String),

    #[error("invalid authorization url")]
    Url(#[from] url::ParseError),

    #[error("GitHub request failed")]
    Http(#[from] octocrab::Error),
}

/// Produces a fresh credential, typically by asking the user
#[async_trait]
pub trait Authorizer: Send + Sync {
    async fn authorize(&self) -> Result<Credential, AuthError>;
}

/// OAuth app identity and callback settings
#[derive(Clone)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub scopes: Vec<String>,
    pub callback_port: u16,
}

impl fmt::Debug for OAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("scopes", &self.scopes)
            .field("callback_port", &self.callback_port)
            .finish()
    }
}

impl OAuthConfig {
    /// Create a config requesting the `repo` scope
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        callback_port: u16,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            scopes: vec!["repo".to_string()],
            callback_port,
        }
    }

    pub fn redirect_uri(&self) -> String {
        format!("http://127.0.0.1:{}{}", self.callback_port, CALLBACK_PATH)
    }

    /// Build the URL the user opens to grant access
    pub fn authorize_url(&self, state: &str) -> Result<Url, url::ParseError> {
        Url::parse_with_params(
            AUTHORIZE_URL,
            &[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.redirect_uri().as_str()),
                ("scope", self.scopes.join(" ").as_str()),
                ("state", state),
            ],
        )
    }

    fn ensure_client_credentials(&self) -> Result<(), AuthError> {
        if self.client_id.is_empty() || self.client_secret.is_empty() {
            return Err(AuthError::MissingClientCredentials);
        }
        Ok(())
    }
}

/// Interactive authorizer: local callback listener plus system browser
#[derive(Debug, Clone)]
pub struct BrowserAuthorizer {
    config: OAuthConfig,
}

impl BrowserAuthorizer {
    pub fn new(config: OAuthConfig) -> Self {
        Self { config }
    }

    async fn exchange(&self, code: &str) -> Result<Credential, AuthError> {
        debug!("Exchanging authorization code for a token");

        let crab = Octocrab::builder()
            .base_uri(GITHUB_WEB_URL)?
            .add_header(ACCEPT, "application/json".to_string())
            .build()?;

        let request = ExchangeRequest {
            client_id: &self.config.client_id,
            client_secret: &self.config.client_secret,
            code,
            redirect_uri: self.config.redirect_uri(),
        };

        let response: TokenResponse = crab.post(TOKEN_ROUTE, Some(&request)).await?;
        response.into_credential(Utc::now())
    }
}

#[async_trait]
impl Authorizer for BrowserAuthorizer {
    async fn authorize(&self) -> Result<Credential, AuthError> {
        self.config.ensure_client_credentials()?;

        let state = Uuid::new_v4().to_string();
        let addr = SocketAddr::from(([127, 0, 0, 1], self.config.callback_port));
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| AuthError::Listener { addr, source })?;

        let url = self.config.authorize_url(&state)?;
        eprintln!("Open this URL in your browser to authorize hacktoberfest-cli:\n\n    {url}\n");
        browser::open_url(url.as_str()).await;

        info!("Waiting for OAuth callback on {}", addr);
        let code = wait_for_callback(&listener, &state).await?;

        let credential = self.exchange(&code).await?;
        info!("Authorization complete");
        Ok(credential)
    }
}

#[derive(Serialize)]
struct ExchangeRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    code: &'a str,
    redirect_uri: String,
}

/// Body of the token endpoint response; errors come back with status 200
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    token_type: Option<String>,
    scope: Option<String>,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
    error: Option<String>,
    error_description: Option<String>,
}

impl TokenResponse {
    fn into_credential(self, now: DateTime<Utc>) -> Result<Credential, AuthError> {
        if let Some(error) = self.error {
            return Err(AuthError::Exchange(describe(error, self.error_description)));
        }

        let access_token = self
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AuthError::Exchange("response contained no access token".into()))?;

        Ok(Credential {
            access_token,
            token_type: self.token_type,
            refresh_token: self.refresh_token.filter(|t| !t.is_empty()),
            expiry: self
                .expires_in
                .map(|secs| now + chrono::Duration::seconds(secs)),
            scope: self.scope,
        })
    }
}

fn describe(error: String, description: Option<String>) -> String {
    match description {
        Some(description) => format!("{error}: {description}"),
        None => error,
    }
}

/// Accept connections until the browser hits the callback path
///
/// Only the callback request decides the outcome; a broken stray connection
/// is logged and skipped.
async fn wait_for_callback(
    listener: &TcpListener,
    expected_state: &str,
) -> Result<String, AuthError> {
    loop {
        let (mut stream, peer) = listener.accept().await?;
        let request_line = match read_request_head(&mut stream).await {
            Ok(line) => line,
            Err(e) => {
                warn!("Ignoring unreadable request from {}: {}", peer, e);
                continue;
            }
        };
        debug!("Callback listener got '{}' from {}", request_line.trim_end(), peer);

        match parse_callback(&request_line, expected_state) {
            Ok(None) => {
                if let Err(e) = respond(&mut stream, "404 Not Found", "Not found.").await {
                    warn!("Failed to answer {}: {}", peer, e);
                }
            }
            Ok(Some(code)) => {
                let page =
                    "Authorization complete. You can close this tab and return to the terminal.";
                if let Err(e) = respond(&mut stream, "200 OK", page).await {
                    warn!("Failed to send confirmation page: {}", e);
                }
                return Ok(code);
            }
            Err(e) => {
                if let Err(io) = respond(&mut stream, "400 Bad Request", &e.to_string()).await {
                    warn!("Failed to send error page: {}", io);
                }
                return Err(e);
            }
        }
    }
}

/// Read the request line and drain the headers
async fn read_request_head(stream: &mut TcpStream) -> std::io::Result<String> {
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader.read_line(&mut request_line).await?;

    let mut header = String::new();
    loop {
        header.clear();
        let n = reader.read_line(&mut header).await?;
        if n == 0 || header == "\r\n" || header == "\n" {
            break;
        }
    }

    Ok(request_line)
}

async fn respond(stream: &mut TcpStream, status: &str, message: &str) -> std::io::Result<()> {
    let body = format!(
        "<!doctype html><html><head><title>hacktoberfest-cli</title></head><body><p>{message}</p></body></html>"
    );
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}

/// Extract the authorization code from an HTTP request line
///
/// Returns `Ok(None)` for requests that are not for the callback path.
fn parse_callback(
    request_line: &str,
    expected_state: &str,
) -> Result<Option<String>, AuthError> {
    let mut parts = request_line.split_whitespace();
    let (Some("GET"), Some(target)) = (parts.next(), parts.next()) else {
        return Ok(None);
    };

    let Ok(url) = Url::parse(&format!("http://127.0.0.1{target}")) else {
        return Ok(None);
    };
    if url.path() != CALLBACK_PATH {
        return Ok(None);
    }

    let params: HashMap<String, String> = url.query_pairs().into_owned().collect();

    if let Some(error) = params.get("error") {
        return Err(AuthError::Denied(describe(
            error.clone(),
            params.get("error_description").cloned(),
        )));
    }
    if params.get("state").map(String::as_str) != Some(expected_state) {
        return Err(AuthError::StateMismatch);
    }

    match params.get("code") {
        Some(code) if !code.is_empty() => Ok(Some(code.clone())),
        _ => Err(AuthError::MissingCode),
    }
}
