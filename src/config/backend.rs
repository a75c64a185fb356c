use serde::{Deserialize, Serialize};
use url::Url;

/// Hosted backend endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Base endpoint of the hosted backend.
    /// TOML: `backend.base_url`. Default: `http://127.0.0.1:8090`.
    #[serde(default = "default_base_url")]
    pub base_url: Url,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> Url {
    Url::parse("http://127.0.0.1:8090").expect("default backend URL is valid")
}
