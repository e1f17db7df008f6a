//! Project CLI commands
//!
//! Handles: ccs project list/add/remove/cd and ccs code

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use tracing::info;

use ccs_core::{ClaudePaths, Project, ProjectStore, StoreError};

use super::run_to_completion;
use crate::prompt;

/// Environment variable overriding the Claude Code binary
const CLAUDE_BIN_ENV: &str = "CCS_CLAUDE_BIN";
const DEFAULT_CLAUDE_BIN: &str = "claude";

/// Project commands
#[derive(Subcommand)]
pub enum ProjectCommands {
    /// List all projects
    #[command(visible_alias = "ls")]
    List,
    /// Add a project directory
    Add {
        /// Project directory (prompted if omitted)
        path: Option<String>,
        /// Project name (defaults to the directory name)
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Remove a project
    #[command(visible_alias = "rm")]
    Remove {
        /// Project name (pick from a list if omitted)
        name: Option<String>,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Print a project's directory, e.g. `cd "$(ccs project cd site)"`
    Cd {
        /// Project name (pick from a list if omitted)
        name: Option<String>,
    },
}

/// Execute project command
pub fn execute(cmd: ProjectCommands) -> Result<()> {
    let paths = ClaudePaths::from_env()?;
    let store = ProjectStore::new(&paths);

    match cmd {
        ProjectCommands::List => execute_list(&store),
        ProjectCommands::Add { path, name } => execute_add(&store, path, name),
        ProjectCommands::Remove { name, force } => execute_remove(&store, name, force),
        ProjectCommands::Cd { name } => execute_cd(&store, name),
    }
}

fn execute_list(store: &ProjectStore) -> Result<()> {
    let projects = store.get_projects().context("Failed to load projects")?;

    if projects.is_empty() {
        print_empty_hint();
        return Ok(());
    }

    println!("Projects:\n");
    for (index, project) in projects.iter().enumerate() {
        println!("{}. {}", index + 1, project.name);
        println!("   {}\n", project.path);
    }
    Ok(())
}

fn execute_add(store: &ProjectStore, path: Option<String>, name: Option<String>) -> Result<()> {
    let existing = store.get_projects().context("Failed to load projects")?;

    let resolved = match path {
        Some(path) => resolve_project_dir(&path)?,
        None => {
            let answer = prompt::input("Project path", None, |input: &String| {
                let resolved = resolve_project_dir(input).map_err(|e| format!("{e:#}"))?;
                let resolved = resolved.to_string_lossy();
                if existing.iter().any(|p| p.path == resolved) {
                    return Err("This path is already in the project list".to_string());
                }
                Ok(())
            })?;
            resolve_project_dir(&answer)?
        }
    };

    let default_name = Project::default_name(&resolved).unwrap_or_else(|| "project".to_string());
    let name = match name {
        Some(name) => name.trim().to_string(),
        None if std::io::stdin().is_terminal() => {
            prompt::input("Project name", Some(default_name), |input: &String| {
                let input = input.trim();
                if input.is_empty() {
                    return Err("Project name cannot be empty".to_string());
                }
                if existing.iter().any(|p| p.name == input) {
                    return Err("This project name already exists".to_string());
                }
                Ok(())
            })?
        }
        None => default_name,
    };
    if name.is_empty() {
        bail!("Project name cannot be empty");
    }

    let project = Project::new(name, resolved.to_string_lossy());
    store
        .add_project(project.clone())
        .context("Failed to add project")?;

    info!(name = %project.name, "project added");
    println!("Added project '{}' ({})", project.name, project.path);
    Ok(())
}

/// Resolve user input to an absolute, existing directory
///
/// Relative paths are taken against the current directory. Normalisation
/// happens here because the store only compares strings.
fn resolve_project_dir(input: &str) -> Result<PathBuf> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        bail!("Project path cannot be empty");
    }

    let candidate = Path::new(trimmed);
    let absolute = if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        std::env::current_dir()
            .context("Failed to get current directory")?
            .join(candidate)
    };

    let resolved = absolute
        .canonicalize()
        .with_context(|| format!("Project path does not exist: {}", absolute.display()))?;
    if !resolved.is_dir() {
        bail!("Project path must be a directory: {}", resolved.display());
    }
    Ok(resolved)
}

fn execute_remove(store: &ProjectStore, name: Option<String>, force: bool) -> Result<()> {
    let Some(name) = name_or_pick(store, name, "Select a project to remove")? else {
        return Ok(());
    };

    if !force && !prompt::confirm(&format!("Remove project '{name}'?"))? {
        println!("Cancelled.");
        return Ok(());
    }

    store
        .remove_project(&name)
        .context("Failed to remove project")?;
    println!("Removed project '{name}'");
    Ok(())
}

fn execute_cd(store: &ProjectStore, name: Option<String>) -> Result<()> {
    let Some(name) = name_or_pick(store, name, "Select a project directory")? else {
        return Ok(());
    };
    let path = existing_project_dir(store, &name)?;

    // Only the path goes to stdout so the output can feed `cd`
    println!("{}", path.display());
    Ok(())
}

/// Launch Claude Code with a project as the working directory
pub fn execute_code(name: Option<String>) -> Result<()> {
    let paths = ClaudePaths::from_env()?;
    let store = ProjectStore::new(&paths);

    let Some(name) = name_or_pick(&store, name, "Select a project to launch")? else {
        return Ok(());
    };
    let path = existing_project_dir(&store, &name)?;

    let binary = std::env::var(CLAUDE_BIN_ENV)
        .ok()
        .filter(|b| !b.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_CLAUDE_BIN.to_string());

    println!("Launching project '{name}'");
    println!("Project path: {}", path.display());
    info!(project = %name, binary = %binary, "launching claude");

    let mut command = Command::new(&binary);
    command.current_dir(&path);
    run_to_completion(command, &binary)
}

/// Use `name` if given, otherwise let the user pick; `None` when there are no projects
fn name_or_pick(store: &ProjectStore, name: Option<String>, message: &str) -> Result<Option<String>> {
    if let Some(name) = name {
        return Ok(Some(name));
    }

    let projects = store.get_projects().context("Failed to load projects")?;
    if projects.is_empty() {
        print_empty_hint();
        return Ok(None);
    }

    let labels: Vec<String> = projects
        .iter()
        .map(|p| format!("{} ({})", p.name, p.path))
        .collect();
    let index = prompt::select(message, &labels)?;
    Ok(Some(projects[index].name.clone()))
}

fn existing_project_dir(store: &ProjectStore, name: &str) -> Result<PathBuf> {
    let path = store
        .get_project_path(name)?
        .ok_or_else(|| StoreError::ProjectNotFound {
            name: name.to_string(),
        })?;

    let path = PathBuf::from(path);
    if !path.is_dir() {
        bail!("Project directory does not exist: {}", path.display());
    }
    Ok(path)
}

fn print_empty_hint() {
    println!("No projects yet. Use 'ccs project add' to add one.");
}
