//! Command-line interface for `resident_desk`.
//!
//! This module provides the CLI parsing and command routing using clap.
//! Each command opens the portal, replays the events it stands for and
//! prints the resulting view.

pub mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgGroup, Args, Parser, Subcommand};

use crate::config::CliOverrides;
use crate::logging;

/// `resident_desk` (desk) - Resident complaint desk.
#[derive(Parser, Debug)]
#[command(name = "desk")]
#[command(
    author,
    version,
    about = "Resident complaint desk with committee updates (local JSON storage)",
    long_about = None,
    after_help = "All data stays in the local data directory: no server, no sync."
)]
pub struct Cli {
    /// Output format: text (default) or json
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Storage directory (overrides config and DESK_DATA_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Also append JSON logs to this file
    #[arg(long, global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Submit a new issue
    Submit(SubmitArgs),

    /// List issues with status filter and search
    List(ListArgs),

    /// Committee update: set status and add a note
    Update(UpdateArgs),

    /// Show one issue card
    Show(ShowArgs),

    /// Log in (when login is required)
    Login(LoginArgs),

    /// Log out; issues are kept
    Logout,

    /// Show who is logged in
    Whoami,

    /// Print the effective configuration
    Config,

    /// Generate shell completions
    Completions(CompletionsArgs),

    /// Show version information
    Version,
}

#[derive(Args, Debug, Clone, Default)]
pub struct SubmitArgs {
    /// Resident name
    #[arg(long = "name", value_name = "NAME")]
    pub resident_name: String,

    /// Unit / flat number
    #[arg(long = "unit", value_name = "UNIT")]
    pub unit_number: String,

    /// Contact number
    #[arg(long = "contact", value_name = "PHONE")]
    pub contact_number: String,

    /// Category (Maintenance, Security, Housekeeping, ...)
    #[arg(long)]
    pub category: String,

    /// Issue title
    #[arg(long)]
    pub title: String,

    /// Issue description
    #[arg(long)]
    pub description: String,
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Status filter: All, Open, "In Progress", Resolved
    #[arg(short, long, default_value = "All")]
    pub status: String,

    /// Search title, resident name and unit number
    #[arg(long)]
    pub search: Option<String>,

    /// Show committee controls on each card
    #[arg(long)]
    pub committee: bool,
}

impl Default for ListArgs {
    fn default() -> Self {
        Self {
            status: "All".to_string(),
            search: None,
            committee: false,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct UpdateArgs {
    /// Issue ID (e.g. OB-4821)
    pub id: String,

    /// New status: Open, "In Progress", Resolved
    #[arg(short, long)]
    pub status: String,

    /// Progress note; blank notes change the status only
    #[arg(short, long)]
    pub note: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    /// Issue ID (e.g. OB-4821)
    pub id: String,

    /// Show committee controls
    #[arg(long)]
    pub committee: bool,
}

#[derive(Args, Debug, Clone)]
#[command(group(ArgGroup::new("method").required(true).args(["google", "name"])))]
pub struct LoginArgs {
    /// One-click Google login (mock)
    #[arg(long, conflicts_with_all = ["name", "mobile"])]
    pub google: bool,

    /// Your name
    #[arg(long, requires = "mobile")]
    pub name: Option<String>,

    /// Your mobile number
    #[arg(long, requires = "name")]
    pub mobile: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

/// Run the CLI.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    let overrides = CliOverrides {
        data_dir: cli.data_dir.clone(),
    };
    let json = cli.json;
    let _span = tracing::info_span!(
        "run",
        command = cli.command.as_ref().map_or("none", Commands::name)
    )
    .entered();

    match cli.command {
        Some(Commands::Submit(args)) => commands::submit::execute(&args, json, &overrides)?,
        Some(Commands::List(args)) => commands::list::execute(&args, json, &overrides)?,
        Some(Commands::Update(args)) => commands::update::execute(&args, json, &overrides)?,
        Some(Commands::Show(args)) => commands::show::execute(&args, json, &overrides)?,
        Some(Commands::Login(args)) => commands::session::login(&args, json, &overrides)?,
        Some(Commands::Logout) => commands::session::logout(json, &overrides)?,
        Some(Commands::Whoami) => commands::session::whoami(json, &overrides)?,
        Some(Commands::Config) => commands::config::execute(json, &overrides)?,
        Some(Commands::Completions(args)) => commands::completions::execute(&args),
        Some(Commands::Version) => commands::version::execute(json)?,
        None => println!("desk - resident complaint desk. Use --help for usage."),
    }

    Ok(())
}

impl Commands {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Submit(_) => "submit",
            Self::List(_) => "list",
            Self::Update(_) => "update",
            Self::Show(_) => "show",
            Self::Login(_) => "login",
            Self::Logout => "logout",
            Self::Whoami => "whoami",
            Self::Config => "config",
            Self::Completions(_) => "completions",
            Self::Version => "version",
        }
    }
}
