use crate::router::HistoryMode;
use serde::{Deserialize, Serialize};

/// Navigation shell configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Base path the app is served under.
    /// TOML: `app.base_path`. Default: the `CAPELLA_BASE_PATH` build-time
    /// environment variable when set, otherwise `/`.
    #[serde(default = "default_base_path")]
    pub base_path: String,

    /// History mode handed to the navigation runtime.
    /// TOML: `app.history`. Default: `web`.
    #[serde(default)]
    pub history: HistoryMode,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            history: HistoryMode::default(),
        }
    }
}

fn default_base_path() -> String {
    option_env!("CAPELLA_BASE_PATH").unwrap_or("/").to_string()
}
