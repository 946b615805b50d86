use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WebConfig {
    /// Answer cross-origin requests from any origin, so the admin UI can be
    /// served from a different host during development.
    /// TOML: `web.cors`. Default: `true`.
    #[serde(default = "default_cors")]
    pub cors: bool,

    /// Directory holding the built admin UI. Requests that match no API
    /// route are served from here when set.
    /// TOML: `web.static_dir`. Default: unset.
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            cors: default_cors(),
            static_dir: None,
        }
    }
}

fn default_cors() -> bool {
    true
}
