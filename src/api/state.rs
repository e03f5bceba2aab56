//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{
    AuthService, CatalogService, EmployeeService, PlanningService, ServiceContainer, Services,
};

/// Services and infrastructure shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub planning_service: Arc<dyn PlanningService>,
    pub employee_service: Arc<dyn EmployeeService>,
    pub catalog_service: Arc<dyn CatalogService>,
    /// Kept for the health check
    pub database: Arc<Database>,
}

impl AppState {
    /// Build every service over the database connection.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);
        Self::from_container(&container, database)
    }

    /// Take the services out of any container, mocked ones included.
    pub fn from_container(container: &dyn ServiceContainer, database: Arc<Database>) -> Self {
        Self {
            auth_service: container.auth(),
            planning_service: container.plannings(),
            employee_service: container.employees(),
            catalog_service: container.catalog(),
            database,
        }
    }
}
