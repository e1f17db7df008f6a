//! ccs CLI - Claude Code configuration switcher
//!
//! Provides `ccs list`, `ccs switch`, `ccs current`, `ccs ui`, `ccs project`
//! and `ccs code`.

mod commands;
mod prompt;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::project::ProjectCommands;

#[derive(Parser)]
#[command(name = "ccs")]
#[command(about = "ccs - Claude Code configuration switcher")]
#[command(version)]
#[command(arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all profile names
    #[command(visible_alias = "ls")]
    List,
    /// Open the profile file in an editor
    Open,
    /// Switch to a profile (pick from a list if omitted)
    #[command(visible_alias = "use")]
    Switch {
        /// Profile name
        profile: Option<String>,
    },
    /// Show the profile currently in use
    #[command(visible_alias = "now")]
    Current,
    /// Start the web UI for managing profiles
    Ui {
        /// Port to listen on (default 3456, or CCS_UI_PORT)
        #[arg(short, long)]
        port: Option<u16>,
        /// Do not open a browser
        #[arg(long)]
        no_open: bool,
    },
    /// Manage project directories
    Project {
        #[command(subcommand)]
        action: ProjectCommands,
    },
    /// Launch Claude Code inside a project
    Code {
        /// Project name (pick from a list if omitted)
        name: Option<String>,
    },
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::List => commands::profile::execute_list(),
        Commands::Open => commands::profile::execute_open(),
        Commands::Switch { profile } => commands::profile::execute_switch(profile),
        Commands::Current => commands::profile::execute_current(),
        Commands::Ui { port, no_open } => commands::ui::execute(port, !no_open),
        Commands::Project { action } => commands::project::execute(action),
        Commands::Code { name } => commands::project::execute_code(name),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr so stdout stays usable in `cd "$(ccs project cd x)"`
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
