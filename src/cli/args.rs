//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand};

use crate::config::{DEFAULT_SERVER_HOST, ROLE_USER, VALID_ROLES};

/// Shift planner - work-cell rotation and planning API
#[derive(Parser, Debug)]
#[command(name = "shift-planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),

    /// Manage login accounts
    User(UserArgs),

    /// Generate a year of rotation planning for every CE
    Populate(PopulateArgs),
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(short = 'H', long, default_value = DEFAULT_SERVER_HOST, env = "SERVER_HOST")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "SERVER_PORT")]
    pub port: u16,
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

/// Arguments for the user command
#[derive(Parser, Debug)]
pub struct UserArgs {
    #[command(subcommand)]
    pub action: UserAction,
}

#[derive(Subcommand, Debug)]
pub enum UserAction {
    /// Create a login account
    Create {
        #[arg(short, long)]
        username: String,

        #[arg(short, long, env = "NEW_USER_PASSWORD")]
        password: String,

        #[arg(
            short,
            long,
            default_value = ROLE_USER,
            value_parser = PossibleValuesParser::new(VALID_ROLES.iter().copied())
        )]
        role: String,
    },
}

/// Arguments for the populate command
#[derive(Parser, Debug)]
pub struct PopulateArgs {
    /// Year to generate; rows are added even if the year already has some
    #[arg(short, long)]
    pub year: i32,
}
