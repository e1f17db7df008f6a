//! ccs core - profile and project stores for the Claude Code switcher
//!
//! This crate owns the JSON files under `~/.claude` that ccs manages: the
//! profile catalog, the project catalog, and the active settings written by
//! a switch. Every operation re-reads the files; nothing is cached.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod error;
pub mod json_file;
pub mod paths;
pub mod profile;
pub mod project;
pub mod resolver;
pub mod switch;

pub use error::{StoreError, StoreResult};
pub use paths::ClaudePaths;
pub use profile::{ProfileCatalog, ProfileStore};
pub use project::{Project, ProjectStore};
pub use resolver::{read_active_settings, resolve_active, ActiveProfile, MatchKind};
pub use switch::{switch_profile, SwitchOutcome};
