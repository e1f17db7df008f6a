//! Switching the active Claude Code settings to a stored profile

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::json_file::{read_json_if_exists, write_json};
use crate::paths::ClaudePaths;
use crate::profile::{env_field, is_truthy, ProfileStore, AUTH_TOKEN_KEY, BASE_URL_KEY};

/// Provider entry in `providers.json` updated by a switch
pub const PROVIDER_KEY: &str = "anthropic";

/// What a switch changed
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchOutcome {
    /// Profile switched to
    pub key: String,
    /// Content now in `settings.json`
    pub profile: Value,
    /// Whether `providers.json` was rewritten
    pub providers_updated: bool,
}

/// Overwrite `settings.json` with the profile called `key`
///
/// When the profile carries an auth token or base URL and `providers.json`
/// already exists, its `anthropic` entry is updated as well.
///
/// # Errors
/// Returns `ProfileNotFound` if `key` is not in the catalog, or any file
/// access/parse error from the files involved
pub fn switch_profile(paths: &ClaudePaths, key: &str) -> StoreResult<SwitchOutcome> {
    let profile = ProfileStore::new(paths).get_profile(key)?;

    write_json(&paths.settings_file(), &profile)?;
    info!(profile = key, "switched active settings");

    let providers_updated = update_providers(paths, &profile)?;

    Ok(SwitchOutcome {
        key: key.to_string(),
        profile,
        providers_updated,
    })
}

/// Merge the profile's credentials into an existing `providers.json`
fn update_providers(paths: &ClaudePaths, profile: &Value) -> StoreResult<bool> {
    let base_url = env_field(profile, BASE_URL_KEY).filter(|v| is_truthy(v));
    let api_key = env_field(profile, AUTH_TOKEN_KEY).filter(|v| is_truthy(v));
    if base_url.is_none() && api_key.is_none() {
        return Ok(false);
    }

    let path = paths.providers_file();
    let Some(mut providers) = read_json_if_exists::<Value>(&path)? else {
        debug!(path = %path.display(), "no providers file, skipping credential update");
        return Ok(false);
    };
    let root = providers
        .as_object_mut()
        .ok_or_else(|| StoreError::parse(&path, "expected a JSON object"))?;

    // Other fields of the provider entry are kept as they were.
    let mut entry = match root.get(PROVIDER_KEY) {
        Some(Value::Object(previous)) => previous.clone(),
        _ => Map::new(),
    };
    if let Some(url) = base_url {
        entry.insert("base_url".to_string(), url.clone());
    }
    if let Some(key) = api_key {
        entry.insert("api_key".to_string(), key.clone());
    }
    root.insert(PROVIDER_KEY.to_string(), Value::Object(entry));

    write_json(&path, &providers)?;
    debug!(path = %path.display(), "updated provider credentials");
    Ok(true)
}
