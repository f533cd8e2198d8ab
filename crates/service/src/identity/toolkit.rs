use std::time::Duration;

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use super::errors::IdentityError;
use super::provider::{IdentityProvider, NewIdentity};

/// Connection settings for an Identity Toolkit v1 compatible endpoint.
#[derive(Debug, Clone)]
pub struct IdentityToolkitConfig {
    /// e.g. `https://identitytoolkit.googleapis.com` or the emulator's
    /// `http://localhost:9099/identitytoolkit.googleapis.com`
    pub base_url: String,
    pub project_id: String,
    pub api_key: String,
    pub access_token: Option<String>,
    pub timeout: Duration,
}

/// Identity provider backed by the Identity Toolkit REST API.
pub struct IdentityToolkitClient {
    http: reqwest::Client,
    cfg: IdentityToolkitConfig,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateAccountResponse {
    local_id: String,
}

#[derive(Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

impl IdentityToolkitClient {
    pub fn new(cfg: IdentityToolkitConfig) -> Result<Self, IdentityError> {
        let http = reqwest::Client::builder()
            .timeout(cfg.timeout)
            .build()
            .map_err(|e| IdentityError::Transport(e.to_string()))?;
        Ok(Self { http, cfg })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.cfg.base_url.trim_end_matches('/'), path)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        let rb = self.http.post(self.url(path));
        if self.cfg.api_key.is_empty() {
            rb
        } else {
            rb.query(&[("key", self.cfg.api_key.as_str())])
        }
    }

    /// Project-scoped admin call; carries the service access token when configured.
    fn admin_post(&self, path: &str) -> RequestBuilder {
        let rb = self.post(&format!("projects/{}/{}", self.cfg.project_id, path));
        match &self.cfg.access_token {
            Some(token) => rb.bearer_auth(token),
            None => rb,
        }
    }

    async fn rejected(resp: Response) -> IdentityError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .map(|e| e.error.message)
            .unwrap_or(body);
        IdentityError::Rejected { status, message }
    }
}

fn transport(e: reqwest::Error) -> IdentityError {
    IdentityError::Transport(e.to_string())
}

fn decode(e: reqwest::Error) -> IdentityError {
    IdentityError::Decode(e.to_string())
}

#[async_trait]
impl IdentityProvider for IdentityToolkitClient {
    #[instrument(skip(self, params), fields(email = %params.email))]
    async fn create_identity(&self, params: NewIdentity) -> Result<String, IdentityError> {
        let resp = self.admin_post("accounts").json(&params).send().await.map_err(transport)?;
        if !resp.status().is_success() {
            return Err(Self::rejected(resp).await);
        }
        let created: CreateAccountResponse = resp.json().await.map_err(decode)?;
        debug!(uid = %created.local_id, "identity_created");
        Ok(created.local_id)
    }

    async fn verify_token(&self, token: &str) -> Result<String, IdentityError> {
        let resp = self
            .post("accounts:lookup")
            .json(&serde_json::json!({ "idToken": token }))
            .send()
            .await
            .map_err(transport)?;
        if !resp.status().is_success() {
            debug!(status = resp.status().as_u16(), "token lookup rejected");
            return Err(IdentityError::InvalidToken);
        }
        let found: LookupResponse = resp.json().await.map_err(decode)?;
        found
            .users
            .into_iter()
            .next()
            .map(|u| u.local_id)
            .ok_or(IdentityError::InvalidToken)
    }

    #[instrument(skip(self))]
    async fn delete_identity(&self, uid: &str) -> Result<(), IdentityError> {
        let resp = self
            .admin_post("accounts:delete")
            .json(&serde_json::json!({ "localId": uid }))
            .send()
            .await
            .map_err(transport)?;
        if !resp.status().is_success() {
            let err = Self::rejected(resp).await;
            warn!(error = %err, "identity delete rejected");
            return Err(err);
        }
        Ok(())
    }
}
