//! Well-known file locations under the Claude configuration directory

use std::path::{Path, PathBuf};

use crate::error::{StoreError, StoreResult};

/// Environment variable overriding the `.claude` directory
pub const CLAUDE_DIR_ENV: &str = "CCS_CLAUDE_DIR";

const PROFILES_FILE: &str = "profiles-settings.json";
const PROJECTS_FILE: &str = "ccs-project.json";
const SETTINGS_FILE: &str = "settings.json";
const PROVIDERS_FILE: &str = "providers.json";

/// Locations of every file ccs reads or writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaudePaths {
    claude_dir: PathBuf,
}

impl ClaudePaths {
    /// Anchor all paths at an explicit `.claude` directory
    #[must_use]
    pub fn new(claude_dir: impl Into<PathBuf>) -> Self {
        Self {
            claude_dir: claude_dir.into(),
        }
    }

    /// Resolve the `.claude` directory from the environment
    ///
    /// Uses `CCS_CLAUDE_DIR` when set, otherwise `~/.claude`.
    ///
    /// # Errors
    /// Returns an error if no home directory can be determined
    pub fn from_env() -> StoreResult<Self> {
        if let Some(dir) = std::env::var_os(CLAUDE_DIR_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::new(dir));
        }
        let home = dirs::home_dir().ok_or(StoreError::HomeNotFound)?;
        Ok(Self::new(home.join(".claude")))
    }

    #[must_use]
    pub fn claude_dir(&self) -> &Path {
        &self.claude_dir
    }

    /// Profile catalog (`profiles-settings.json`)
    #[must_use]
    pub fn profiles_file(&self) -> PathBuf {
        self.claude_dir.join(PROFILES_FILE)
    }

    /// Project catalog (`ccs-project.json`)
    #[must_use]
    pub fn projects_file(&self) -> PathBuf {
        self.claude_dir.join(PROJECTS_FILE)
    }

    /// Active settings read by Claude Code at startup
    #[must_use]
    pub fn settings_file(&self) -> PathBuf {
        self.claude_dir.join(SETTINGS_FILE)
    }

    /// Provider credentials (`providers.json`)
    #[must_use]
    pub fn providers_file(&self) -> PathBuf {
        self.claude_dir.join(PROVIDERS_FILE)
    }
}
