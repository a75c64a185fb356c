use crate::config::BackendConfig;
use crate::error::ClientError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::sync::watch;
use url::Url;

/// The authenticated user's profile as the backend returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub collection_id: String,
    pub collection_name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub email_visibility: bool,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
    /// Collection-defined profile fields (`name`, `avatar`, ...).
    #[serde(default, flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// The client's authentication snapshot: the bearer token and the record it
/// was issued for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthModel {
    pub token: String,
    pub record: UserRecord,
}

#[derive(Debug, Serialize)]
struct PasswordAuthBody<'a> {
    identity: &'a str,
    password: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct BackendErrorBody {
    #[serde(default)]
    message: String,
}

/// Long-lived handle to the hosted backend. One instance per process,
/// constructed by [`Session`](crate::session::Session) at startup.
///
/// Auth state lives in a watch channel: every transition (login, refresh,
/// logout) is broadcast, so observers never hold a stale snapshot.
pub struct BackendClient {
    base_url: Url,
    http: reqwest::Client,
    auth: watch::Sender<Option<AuthModel>>,
}

impl BackendClient {
    pub fn new(cfg: &BackendConfig) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(concat!("capella/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()
            .expect("failed to build reqwest client for the backend");

        let (auth, _) = watch::channel::<Option<AuthModel>>(None);

        Self {
            base_url: cfg.base_url.clone(),
            http,
            auth,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Auth state at this instant.
    pub fn auth_snapshot(&self) -> Option<AuthModel> {
        self.auth.borrow().clone()
    }

    /// Observe every subsequent auth-state change.
    pub fn subscribe(&self) -> watch::Receiver<Option<AuthModel>> {
        self.auth.subscribe()
    }

    /// Replace the auth state and notify observers.
    pub fn set_auth(&self, model: AuthModel) {
        self.auth.send_replace(Some(model));
    }

    /// Drop the auth state (logout is purely client-side).
    pub fn clear_auth(&self) {
        self.auth.send_replace(None);
    }

    /// Password login against an auth collection. On success the new state
    /// is stored and broadcast before returning.
    pub async fn auth_with_password(
        &self,
        collection: &str,
        identity: &str,
        password: &str,
    ) -> Result<AuthModel, ClientError> {
        let url = self
            .base_url
            .join(&format!("api/collections/{collection}/auth-with-password"))?;

        let response = self
            .http
            .post(url)
            .json(&PasswordAuthBody { identity, password })
            .send()
            .await?;

        let model = read_auth_response(response).await?;
        self.set_auth(model.clone());
        Ok(model)
    }

    /// Exchange the current token for a fresh one. The stored state is left
    /// untouched on failure.
    pub async fn auth_refresh(&self, collection: &str) -> Result<AuthModel, ClientError> {
        let token = self.auth.borrow().as_ref().map(|model| model.token.clone());
        let Some(token) = token else {
            return Err(ClientError::Backend {
                status: 401,
                message: "no auth token to refresh".to_string(),
            });
        };

        let url = self
            .base_url
            .join(&format!("api/collections/{collection}/auth-refresh"))?;

        let response = self
            .http
            .post(url)
            .header(reqwest::header::AUTHORIZATION, token)
            .send()
            .await?;

        let model = read_auth_response(response).await?;
        self.set_auth(model.clone());
        Ok(model)
    }
}

async fn read_auth_response(response: reqwest::Response) -> Result<AuthModel, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<AuthModel>().await?);
    }

    let body = response
        .json::<BackendErrorBody>()
        .await
        .unwrap_or_default();
    let message = if body.message.is_empty() {
        "backend request failed".to_string()
    } else {
        body.message
    };

    Err(ClientError::Backend {
        status: status.as_u16(),
        message,
    })
}
