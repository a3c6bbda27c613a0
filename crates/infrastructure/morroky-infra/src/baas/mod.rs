//! Client for a Supabase-compatible backend: GoTrue auth, PostgREST tables
//! and object storage, all spoken over plain HTTP.

mod auth;
mod rest;
mod storage;

use std::sync::RwLock;

use morroky_config::BaasConfig;
use morroky_core::{AuthChange, AuthUser};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use tokio::sync::broadcast;

use crate::error::BaasError;

pub use storage::object_name;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: AuthUser,
}

pub struct BaasClient {
    http: Client,
    base_url: String,
    anon_key: String,
    session: RwLock<Option<Session>>,
    auth_tx: broadcast::Sender<AuthChange>,
}

impl BaasClient {
    pub fn new(http: Client, config: &BaasConfig) -> Self {
        let (auth_tx, _) = broadcast::channel(16);
        Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
            session: RwLock::new(None),
            auth_tx,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> Option<Session> {
        self.session.read().ok().and_then(|s| s.clone())
    }

    /// Signed-in user from the in-memory session, without a network round trip.
    pub fn session_user(&self) -> Option<AuthUser> {
        self.session().map(|s| s.user)
    }

    /// Stream of sign-in / sign-out transitions made through this client.
    pub fn subscribe_auth(&self) -> broadcast::Receiver<AuthChange> {
        self.auth_tx.subscribe()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attaches the project key and the caller's bearer token. Without a
    /// session the anon key doubles as bearer, which row policies treat as
    /// an anonymous visitor.
    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        let bearer = self
            .session()
            .map(|s| s.access_token)
            .unwrap_or_else(|| self.anon_key.clone());
        req.header("apikey", &self.anon_key).bearer_auth(bearer)
    }

    fn set_session(&self, session: Option<Session>) {
        let change = match &session {
            Some(s) => AuthChange::SignedIn(s.user.clone()),
            None => AuthChange::SignedOut,
        };
        if let Ok(mut guard) = self.session.write() {
            *guard = session;
        }
        tracing::debug!(event = change.event_name(), "auth state changed");
        // No receivers is fine: nobody listens before the app boots.
        let _ = self.auth_tx.send(change);
    }
}

/// Passes success responses through and turns everything else into
/// [`BaasError::Api`] carrying the service's own message.
async fn check(resp: Response) -> Result<Response, BaasError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let err = BaasError::from_body(status.as_u16(), &body);
    tracing::warn!(status = status.as_u16(), "backend request failed: {err}");
    Err(err)
}
