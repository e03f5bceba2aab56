//! HTTP request handlers.
//!
//! Each module exposes read routes (any valid token) and admin routes
//! separately; `routes.rs` decides which middleware guards them.

pub mod auth_handler;
pub mod catalog_handler;
pub mod employee_handler;
pub mod planning_handler;

pub use auth_handler::{auth_routes, session_routes};
pub use catalog_handler::{catalog_admin_routes, catalog_read_routes};
pub use employee_handler::{employee_admin_routes, employee_read_routes};
pub use planning_handler::{planning_admin_routes, planning_read_routes};
