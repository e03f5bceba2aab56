//! Repository layer - Data access abstraction
//!
//! Users sit behind a mockable trait. The planning, employee and catalog
//! repositories are generic over the connection so the same queries run on
//! the pool and inside a unit-of-work transaction.

mod catalog_repository;
mod employee_repository;
pub(crate) mod entities;
mod planning_repository;
mod skill_links;
mod user_repository;

pub use catalog_repository::CatalogRepository;
pub use employee_repository::EmployeeRepository;
pub use planning_repository::PlanningRepository;
pub use skill_links::{replace_skill_set, SkillOwner};
pub use user_repository::{UserRepository, UserStore};

// Export mock for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
