// Credential Resolution
// API token lookup: environment variables first, config file second.
// Absence or a placeholder value is a valid, handled state (heuristic mode),
// not an error.

use super::config_store::ConfigStore;
use std::env;

const TOKEN_ENV_VARS: [&str; 2] = ["ESSAYLENS_API_TOKEN", "REPLICATE_API_TOKEN"];

/// True when the value is obviously not a real credential: empty, a docs
/// placeholder, or an unexpanded template like `<your-token>`.
pub fn is_placeholder(token: &str) -> bool {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return true;
    }
    if trimmed.starts_with('<') && trimmed.ends_with('>') {
        return true;
    }
    matches!(
        trimmed.to_ascii_lowercase().as_str(),
        "your-api-token" | "your_api_token_here" | "changeme" | "placeholder"
    )
}

/// Resolve the detection API token from environment or config file.
pub fn resolve_api_token() -> Option<String> {
    for key in TOKEN_ENV_VARS {
        if let Ok(val) = env::var(key) {
            let v = val.trim();
            if !is_placeholder(v) {
                return Some(v.to_string());
            }
        }
    }

    if let Some(config_dir) = ConfigStore::default_config_dir() {
        let store = ConfigStore::new(config_dir);
        if let Ok(Some(token)) = store.get_api_token() {
            if !is_placeholder(&token) {
                return Some(token);
            }
        }
    }

    None
}
