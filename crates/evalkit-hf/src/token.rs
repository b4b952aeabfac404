//! Access token discovery.
//!
//! Lookup order: explicit value, `HF_TOKEN`, then the token file written by
//! `huggingface-cli login` (read through `hf_hub::Cache`).

use tracing::debug;

/// Environment variable holding a Hub access token.
pub const TOKEN_ENV: &str = "HF_TOKEN";

/// Resolve the access token to send with Hub requests.
///
/// Blank values are treated as absent. Returns `None` when no token is
/// configured anywhere, which means anonymous access.
pub fn resolve_token(explicit: Option<String>) -> Option<String> {
    if let Some(token) = non_blank(explicit) {
        debug!("using explicitly provided Hub token");
        return Some(token);
    }

    if let Some(token) = non_blank(std::env::var(TOKEN_ENV).ok()) {
        debug!("using Hub token from {TOKEN_ENV}");
        return Some(token);
    }

    let token = non_blank(cached_token());
    if token.is_some() {
        debug!("using Hub token from local login cache");
    }
    token
}

/// Token stored by a previous `huggingface-cli login`, if any.
fn cached_token() -> Option<String> {
    // hf_hub resolves its cache under the home directory and panics without one
    let has_home = ["HF_HOME", "HOME", "USERPROFILE"]
        .iter()
        .any(|var| std::env::var_os(var).is_some());
    if !has_home {
        return None;
    }
    hf_hub::Cache::from_env().token()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
