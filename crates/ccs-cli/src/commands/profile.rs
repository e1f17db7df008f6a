//! Profile CLI commands
//!
//! Handles: ccs list/open/switch/current

use std::path::Path;
use std::process::Command;

use anyhow::{bail, Context, Result};
use serde_json::Value;

use ccs_core::profile::{
    display_value, env_field, is_truthy, profile_summary, AUTH_TOKEN_KEY, BASE_URL_KEY,
    DESCRIPTION_KEY, MODEL_KEY,
};
use ccs_core::{
    read_active_settings, resolve_active, switch_profile, ClaudePaths, MatchKind, ProfileStore,
};

use super::run_to_completion;
use crate::prompt;

const RULE_WIDTH: usize = 30;
const DISABLE_TRAFFIC_KEY: &str = "CLAUDE_CODE_DISABLE_NONESSENTIAL_TRAFFIC";

pub fn execute_list() -> Result<()> {
    let paths = ClaudePaths::from_env()?;
    let store = ProfileStore::new(&paths);
    let keys = store.list_keys().context("Failed to list profiles")?;

    if keys.is_empty() {
        println!("No profiles found.");
        println!("Profile file: {}", store.settings_path().display());
        println!("Use 'ccs open' to edit the profile file");
        println!("Use 'ccs ui' to edit profiles in the browser");
        return Ok(());
    }

    println!("\nProfiles:");
    println!("{}", "─".repeat(RULE_WIDTH));
    for (index, key) in keys.iter().enumerate() {
        println!("  {}. {key}", index + 1);
    }
    println!("{}", "─".repeat(RULE_WIDTH));
    println!("\nProfile file: {}", store.settings_path().display());
    println!("Use 'ccs open' to edit profiles\n");

    Ok(())
}

pub fn execute_open() -> Result<()> {
    let paths = ClaudePaths::from_env()?;
    let store = ProfileStore::new(&paths);

    if store.seed_example_if_empty()? {
        println!("Created an example profile to get you started");
    }
    let path = store.settings_path();
    println!("Opening profile file: {}", path.display());

    if let Err(e) = open_in_editor(path) {
        println!("Open the file manually: {}", path.display());
        return Err(e.context("Failed to open profile file"));
    }

    println!("Save the file when you are done editing");
    Ok(())
}

/// `$VISUAL`, then `$EDITOR`, then a platform default
fn open_in_editor(path: &Path) -> Result<()> {
    let path_arg = path.to_string_lossy();
    let editor = std::env::var("VISUAL")
        .or_else(|_| std::env::var("EDITOR"))
        .ok()
        .filter(|e| !e.trim().is_empty());

    let command = match editor {
        Some(editor) => super::command_line(&editor, &path_arg)?,
        None if cfg!(target_os = "macos") => {
            let mut command = Command::new("open");
            command.arg("-t").arg(path);
            command
        }
        None if cfg!(windows) => {
            let mut command = Command::new("notepad");
            command.arg(path);
            command
        }
        None => {
            let mut command = Command::new("nano");
            command.arg(path);
            command
        }
    };

    run_to_completion(command, "editor")
}

pub fn execute_switch(profile: Option<String>) -> Result<()> {
    let paths = ClaudePaths::from_env()?;
    let store = ProfileStore::new(&paths);
    let profiles = store.get_profiles().context("Failed to load profiles")?;

    let key = match profile {
        Some(key) => key,
        None if profiles.is_empty() => {
            println!("No profiles found.");
            println!("Add profiles to the profile file first");
            println!("Profile file: {}", store.settings_path().display());
            return Ok(());
        }
        None => {
            let keys: Vec<&String> = profiles.keys().collect();
            let labels: Vec<String> = profiles
                .iter()
                .map(|(key, value)| match profile_summary(value) {
                    Some(summary) => format!("{key} - {summary}"),
                    None => key.clone(),
                })
                .collect();
            let index = prompt::select("Select a profile to switch to", &labels)?;
            keys[index].clone()
        }
    };

    if !profiles.contains_key(&key) {
        let available: Vec<&str> = profiles.keys().map(String::as_str).collect();
        bail!(
            "Profile '{key}' not found. Available profiles: {}",
            available.join(", ")
        );
    }

    let outcome = switch_profile(&paths, &key).context("Failed to switch profile")?;

    println!("Switched to profile: {}", outcome.key);
    if let Some(model) = outcome.profile.get(MODEL_KEY).filter(|v| is_truthy(v)) {
        println!("Model: {}", display_value(model));
    }
    if let Some(url) = env_field(&outcome.profile, BASE_URL_KEY).filter(|v| is_truthy(v)) {
        println!("API URL: {}", display_value(url));
    }
    if outcome.providers_updated {
        println!("Updated provider credentials: {}", paths.providers_file().display());
    }

    Ok(())
}

pub fn execute_current() -> Result<()> {
    let paths = ClaudePaths::from_env()?;
    let settings_path = paths.settings_file();

    let Some(active) = read_active_settings(&paths).context("Failed to read active settings")?
    else {
        println!("No settings.json found at {}", settings_path.display());
        println!("Claude Code may not be configured yet");
        return Ok(());
    };

    let profiles = ProfileStore::new(&paths)
        .get_profiles()
        .context("Failed to load profiles")?;

    println!();
    match resolve_active(&profiles, &active) {
        Some(found) => {
            let suffix = match found.kind {
                MatchKind::Exact => "",
                MatchKind::Fallback => " (matched by credentials and model)",
            };
            println!("Current profile: {}{suffix}", found.key);
            if let Some(description) = profiles
                .get(&found.key)
                .and_then(|p| p.get(DESCRIPTION_KEY))
                .filter(|v| is_truthy(v))
            {
                println!("Description: {}", display_value(description));
            }
        }
        None => {
            println!("Current profile: custom");
            println!("(does not match any profile in profiles-settings.json)");
        }
    }

    println!();
    println!("Details:");
    print_settings_details(&active);
    println!();
    println!("Settings file: {}", settings_path.display());
    println!();

    Ok(())
}

fn print_settings_details(active: &Value) {
    if let Some(model) = active.get(MODEL_KEY).filter(|v| is_truthy(v)) {
        println!("  Model: {}", display_value(model));
    }
    if let Some(url) = env_field(active, BASE_URL_KEY).filter(|v| is_truthy(v)) {
        println!("  API URL: {}", display_value(url));
    }
    if let Some(token) = env_field(active, AUTH_TOKEN_KEY).filter(|v| is_truthy(v)) {
        println!("  API Key: {}", mask_token(&display_value(token)));
    }
    if env_field(active, DISABLE_TRAFFIC_KEY).is_some_and(is_truthy) {
        println!("  Non-essential traffic disabled: yes");
    }
}

/// First 10 characters, `...`, last 4
fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    let head: String = chars.iter().take(10).collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("{head}...{tail}")
}
