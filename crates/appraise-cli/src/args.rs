use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{PlanCommands, ReviewArgs};

/// Command-line shell for the performance plan review workflow
///
/// Employees draft and submit plans, supervisors review them, and an
/// optional reviewer gives the final approval. Each reviewing role keeps its
/// own append-only comment history on the plan.
#[derive(Parser)]
#[command(version, about, name = "appraise")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/appraise/appraise.db
    #[arg(long, global = true, env = "APPRAISE_DATABASE_FILE")]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
///
/// - `plan`: create, list, show and submit plans
/// - `review`: act on a plan as its supervisor or reviewer
#[derive(Subcommand)]
pub enum Commands {
    /// Manage plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Comment on, approve or send back a plan
    #[command(alias = "r")]
    Review(ReviewArgs),
}
