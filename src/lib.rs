//! Shift planner - workforce scheduling backend
//!
//! Manages employees, skills, sectors, work-cells ("CEs"), reservists and
//! shift-planning entries behind a JWT-protected REST API. The core is the
//! planning engine in [`services::scheduling`], which generates the rotating
//! work-cell pattern, swaps employees between positions and assigns
//! substitutes, always inside one transaction.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Planning rows, the rotation, staff records and users
//! - **services**: Use cases and the planning engine
//! - **infra**: Database, repositories and the Unit of Work
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared response bodies
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Seed an administrator
//! cargo run -- user create --username admin --password '...' --role admin
//!
//! # Generate a year of rotation
//! cargo run -- populate --year 2025
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Password, User, UserRole};
pub use errors::{AppError, AppResult};
