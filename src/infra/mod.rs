//! Infrastructure layer - External systems integration
//!
//! Database connection, migrations, repositories and the Unit of Work
//! that scopes multi-step writes to one transaction.

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{
    CatalogRepository, EmployeeRepository, PlanningRepository, UserRepository, UserStore,
};
pub use unit_of_work::{Persistence, TransactionContext, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockUserRepository;
