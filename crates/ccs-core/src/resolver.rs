//! Active-profile resolution
//!
//! Infers which catalog entry the live `settings.json` was switched from.
//! This is a best-effort heuristic: profiles with identical credentials and
//! model are indistinguishable, and the first one in catalog order wins.

use serde_json::Value;

use crate::error::StoreResult;
use crate::json_file::read_json_if_exists;
use crate::paths::ClaudePaths;
use crate::profile::{env_field, ProfileCatalog, AUTH_TOKEN_KEY, BASE_URL_KEY, ENV_KEY, MODEL_KEY};

/// How a profile matched the active settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Whole document is structurally equal
    Exact,
    /// Token, base URL and model agree
    Fallback,
}

/// The catalog entry currently in effect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveProfile {
    pub key: String,
    pub kind: MatchKind,
}

/// Find the profile matching `active`, scanning the catalog in order
///
/// Each candidate is checked for structural equality first; failing that,
/// a candidate carrying an `env` object matches if the auth token, base URL
/// and model are equal on both sides (absent on both sides counts as equal).
#[must_use]
pub fn resolve_active(profiles: &ProfileCatalog, active: &Value) -> Option<ActiveProfile> {
    profiles.iter().find_map(|(key, profile)| {
        let kind = if profile == active {
            MatchKind::Exact
        } else if has_env(profile) && same_credentials(profile, active) {
            MatchKind::Fallback
        } else {
            return None;
        };
        Some(ActiveProfile {
            key: key.clone(),
            kind,
        })
    })
}

/// Load the live settings document, `None` if Claude Code is not configured
///
/// # Errors
/// Returns `Parse` if `settings.json` exists but is not valid JSON
pub fn read_active_settings(paths: &ClaudePaths) -> StoreResult<Option<Value>> {
    read_json_if_exists(&paths.settings_file())
}

fn has_env(profile: &Value) -> bool {
    profile.get(ENV_KEY).is_some_and(Value::is_object)
}

fn same_credentials(profile: &Value, active: &Value) -> bool {
    env_field(profile, AUTH_TOKEN_KEY) == env_field(active, AUTH_TOKEN_KEY)
        && env_field(profile, BASE_URL_KEY) == env_field(active, BASE_URL_KEY)
        && profile.get(MODEL_KEY) == active.get(MODEL_KEY)
}
