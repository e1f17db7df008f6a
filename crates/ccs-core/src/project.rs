//! Project catalog storage

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::json_file::{ensure_json_file, read_json, write_json};
use crate::paths::ClaudePaths;

/// A registered project directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Unique display name
    pub name: String,
    /// Absolute, resolved directory path
    pub path: String,
    /// Any other fields of the record, written back unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Project {
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            extra: Map::new(),
        }
    }

    /// Default name for a project at `path`: its last component
    #[must_use]
    pub fn default_name(path: &Path) -> Option<String> {
        path.file_name()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}

/// Durable access to `ccs-project.json`
///
/// The store compares paths as plain strings; callers resolve and validate
/// them before calling [`ProjectStore::add_project`].
#[derive(Debug, Clone)]
pub struct ProjectStore {
    projects_path: PathBuf,
}

impl ProjectStore {
    /// Create a store for the catalog under `paths`
    #[must_use]
    pub fn new(paths: &ClaudePaths) -> Self {
        Self::at(paths.projects_file())
    }

    /// Create a store for a catalog at an explicit location
    #[must_use]
    pub fn at(projects_path: impl Into<PathBuf>) -> Self {
        Self {
            projects_path: projects_path.into(),
        }
    }

    /// Make sure the catalog file exists, initialising it to `[]`
    ///
    /// # Errors
    /// Returns an error if the directory or file cannot be created
    pub fn ensure_file(&self) -> StoreResult<()> {
        ensure_json_file(&self.projects_path, &Vec::<Project>::new())
    }

    /// All projects in insertion order
    ///
    /// # Errors
    /// Returns `Parse` if the file is not an array of `{name, path}` records
    pub fn get_projects(&self) -> StoreResult<Vec<Project>> {
        self.ensure_file()?;
        read_json(&self.projects_path)
    }

    /// Append a project
    ///
    /// # Errors
    /// Returns `DuplicateName` or `DuplicatePath` if either is already
    /// registered; the file is left untouched in that case
    pub fn add_project(&self, project: Project) -> StoreResult<()> {
        let mut projects = self.get_projects()?;

        if projects.iter().any(|p| p.name == project.name) {
            return Err(StoreError::DuplicateName { name: project.name });
        }
        if projects.iter().any(|p| p.path == project.path) {
            return Err(StoreError::DuplicatePath { path: project.path });
        }

        debug!(name = %project.name, path = %project.path, "adding project");
        projects.push(project);
        write_json(&self.projects_path, &projects)
    }

    /// Remove the project called `name`, keeping the order of the rest
    ///
    /// # Errors
    /// Returns `ProjectNotFound` if no project has that name
    pub fn remove_project(&self, name: &str) -> StoreResult<Project> {
        let mut projects = self.get_projects()?;
        let index = projects
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| StoreError::ProjectNotFound {
                name: name.to_string(),
            })?;

        let removed = projects.remove(index);
        debug!(name = %removed.name, "removing project");
        write_json(&self.projects_path, &projects)?;
        Ok(removed)
    }

    /// Path of the project called `name`
    ///
    /// # Errors
    /// Same as [`ProjectStore::get_projects`]
    pub fn get_project_path(&self, name: &str) -> StoreResult<Option<String>> {
        Ok(self
            .get_projects()?
            .into_iter()
            .find(|p| p.name == name)
            .map(|p| p.path))
    }

    /// Path of the catalog file, for display
    #[must_use]
    pub fn projects_path(&self) -> &Path {
        &self.projects_path
    }
}
