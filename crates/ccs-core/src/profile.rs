//! Profile catalog storage
//!
//! The catalog maps a profile name to an arbitrary settings document. No
//! schema is enforced; unknown fields and key order survive every round-trip.

use std::path::{Path, PathBuf};

use serde_json::{json, Map, Value};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::json_file::{ensure_json_file, read_json, write_json};
use crate::paths::ClaudePaths;

/// Profile name → settings document, in insertion order
pub type ProfileCatalog = Map<String, Value>;

/// Key of the nested environment object inside a profile
pub const ENV_KEY: &str = "env";
/// Credential token inside `env`
pub const AUTH_TOKEN_KEY: &str = "ANTHROPIC_AUTH_TOKEN";
/// API base URL inside `env`
pub const BASE_URL_KEY: &str = "ANTHROPIC_BASE_URL";
/// Model identifier at the top level of a profile
pub const MODEL_KEY: &str = "model";
/// Human-readable description at the top level of a profile
pub const DESCRIPTION_KEY: &str = "description";

/// Durable access to `profiles-settings.json`
#[derive(Debug, Clone)]
pub struct ProfileStore {
    settings_path: PathBuf,
}

impl ProfileStore {
    /// Create a store for the catalog under `paths`
    #[must_use]
    pub fn new(paths: &ClaudePaths) -> Self {
        Self::at(paths.profiles_file())
    }

    /// Create a store for a catalog at an explicit location
    #[must_use]
    pub fn at(settings_path: impl Into<PathBuf>) -> Self {
        Self {
            settings_path: settings_path.into(),
        }
    }

    /// Make sure the catalog file exists, initialising it to `{}`
    ///
    /// # Errors
    /// Returns an error if the directory or file cannot be created
    pub fn ensure_file(&self) -> StoreResult<()> {
        ensure_json_file(&self.settings_path, &json!({}))
    }

    /// Load the full catalog
    ///
    /// # Errors
    /// Returns `Parse` if the file is not a JSON object
    pub fn get_profiles(&self) -> StoreResult<ProfileCatalog> {
        self.ensure_file()?;
        match read_json::<Value>(&self.settings_path)? {
            Value::Object(map) => Ok(map),
            other => Err(StoreError::parse(
                &self.settings_path,
                format!("expected a JSON object, found {}", json_kind(&other)),
            )),
        }
    }

    /// Profile names in stored order
    ///
    /// # Errors
    /// Same as [`ProfileStore::get_profiles`]
    pub fn list_keys(&self) -> StoreResult<Vec<String>> {
        Ok(self.get_profiles()?.keys().cloned().collect())
    }

    /// Look up one profile by name
    ///
    /// # Errors
    /// Returns `ProfileNotFound` if the key is not in the catalog
    pub fn get_profile(&self, key: &str) -> StoreResult<Value> {
        self.get_profiles()?
            .remove(key)
            .ok_or_else(|| StoreError::ProfileNotFound {
                key: key.to_string(),
            })
    }

    /// Overwrite the whole catalog verbatim
    ///
    /// # Errors
    /// Returns an error if the file cannot be written
    pub fn save_profiles(&self, profiles: &ProfileCatalog) -> StoreResult<()> {
        debug!(count = profiles.len(), "saving profile catalog");
        write_json(&self.settings_path, profiles)
    }

    /// Remove one profile, keeping the order of the rest
    ///
    /// # Errors
    /// Returns `ProfileNotFound` if the key is not in the catalog
    pub fn remove_profile(&self, key: &str) -> StoreResult<Value> {
        let mut profiles = self.get_profiles()?;
        let removed = profiles
            .shift_remove(key)
            .ok_or_else(|| StoreError::ProfileNotFound {
                key: key.to_string(),
            })?;
        self.save_profiles(&profiles)?;
        Ok(removed)
    }

    /// Write the `example` template when the catalog is empty
    ///
    /// Returns whether the template was written.
    ///
    /// # Errors
    /// Same as [`ProfileStore::get_profiles`]
    pub fn seed_example_if_empty(&self) -> StoreResult<bool> {
        if !self.get_profiles()?.is_empty() {
            return Ok(false);
        }
        self.save_profiles(&example_catalog())?;
        Ok(true)
    }

    /// Path of the catalog file, for display
    #[must_use]
    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }
}

/// Template catalog offered to new users
#[must_use]
pub fn example_catalog() -> ProfileCatalog {
    let mut catalog = Map::new();
    catalog.insert(
        "example".to_string(),
        json!({
            "env": {
                "ANTHROPIC_AUTH_TOKEN": "your-api-key",
                "ANTHROPIC_BASE_URL": "https://api.anthropic.com"
            },
            "model": "opus"
        }),
    );
    catalog
}

/// Field of the profile's `env` object, if any
#[must_use]
pub fn env_field<'a>(profile: &'a Value, key: &str) -> Option<&'a Value> {
    profile.get(ENV_KEY).and_then(|env| env.get(key))
}

/// JSON truthiness: `null`, `false`, `0` and `""` count as unset
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Render a scalar for display without JSON quoting
#[must_use]
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Short label for a profile: description, else base URL, else model
#[must_use]
pub fn profile_summary(profile: &Value) -> Option<String> {
    [
        profile.get(DESCRIPTION_KEY),
        env_field(profile, BASE_URL_KEY),
        profile.get(MODEL_KEY),
    ]
    .into_iter()
    .flatten()
    .find(|v| is_truthy(v))
    .map(display_value)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
