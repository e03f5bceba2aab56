//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Start the HTTP server
//! - `migrate` - Database migrations
//! - `user` - Account seeding
//! - `populate` - Yearly rotation generation

pub mod args;

pub use args::{Cli, Commands};
