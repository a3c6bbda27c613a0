use morroky_core::AuthUser;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde_json::{json, Value};

use super::{check, BaasClient, Session};
use crate::error::BaasError;

impl BaasClient {
    /// Creates an account. Projects with e-mail confirmation return only the
    /// user and no session; in that case nobody is signed in yet.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, BaasError> {
        let resp = self
            .authorize(self.http.post(self.url("/auth/v1/signup")))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let body: Value = check(resp).await?.json().await?;

        if body.get("access_token").is_some() {
            let session: Session = serde_json::from_value(body)?;
            let user = session.user.clone();
            self.set_session(Some(session));
            return Ok(user);
        }

        let user_value = body.get("user").cloned().unwrap_or(body);
        Ok(serde_json::from_value(user_value)?)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, BaasError> {
        let resp = self
            .authorize(self.http.post(self.url("/auth/v1/token")))
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let session: Session = check(resp).await?.json().await?;
        let user = session.user.clone();
        self.set_session(Some(session));
        Ok(user)
    }

    /// Address the browser must visit to start the provider's OAuth flow.
    pub fn oauth_authorize_url(&self, provider: &str, redirect_to: Option<&str>) -> String {
        let mut url = format!(
            "{}/auth/v1/authorize?provider={}",
            self.base_url,
            utf8_percent_encode(provider, NON_ALPHANUMERIC)
        );
        if let Some(redirect) = redirect_to {
            url.push_str("&redirect_to=");
            url.push_str(&utf8_percent_encode(redirect, NON_ALPHANUMERIC).to_string());
        }
        url
    }

    /// Revokes the session server-side when there is one; the local session is
    /// dropped either way.
    pub async fn sign_out(&self) -> Result<(), BaasError> {
        let had_session = self.session().is_some();
        let result = if had_session {
            let resp = self
                .authorize(self.http.post(self.url("/auth/v1/logout")))
                .send()
                .await;
            match resp {
                Ok(resp) => check(resp).await.map(|_| ()),
                Err(e) => Err(e.into()),
            }
        } else {
            Ok(())
        };
        if had_session {
            self.set_session(None);
        }
        result
    }

    /// Verifies the stored token. An expired or revoked token signs the user out.
    pub async fn current_user(&self) -> Result<Option<AuthUser>, BaasError> {
        if self.session().is_none() {
            return Ok(None);
        }
        let resp = self
            .authorize(self.http.get(self.url("/auth/v1/user")))
            .send()
            .await?;
        if resp.status().as_u16() == 401 {
            self.set_session(None);
            return Ok(None);
        }
        let user: AuthUser = check(resp).await?.json().await?;
        Ok(Some(user))
    }

    pub(crate) fn require_user(&self) -> Result<AuthUser, BaasError> {
        self.session_user().ok_or(BaasError::NotSignedIn)
    }
}
