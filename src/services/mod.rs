//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure. Handlers see only
//! the service traits; the managers behind them reach the database through
//! a Unit of Work.

mod auth_service;
mod catalog_service;
pub mod container;
mod employee_service;
mod planning_service;
pub mod scheduling;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator, Claims, LoginResponse};
pub use catalog_service::{CatalogManager, CatalogService};
pub use employee_service::{EmployeeManager, EmployeeService};
pub use planning_service::{PlanningManager, PlanningService};
pub use scheduling::WeekendRebuild;

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
