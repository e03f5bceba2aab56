//! Service Container - Centralized service access.
//!
//! Handlers depend on service traits, never on the managers behind them.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, CatalogManager, CatalogService, EmployeeManager, EmployeeService,
    PlanningManager, PlanningService,
};
use crate::config::Config;
use crate::infra::Persistence;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn plannings(&self) -> Arc<dyn PlanningService>;

    fn employees(&self) -> Arc<dyn EmployeeService>;

    fn catalog(&self) -> Arc<dyn CatalogService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    planning_service: Arc<dyn PlanningService>,
    employee_service: Arc<dyn EmployeeService>,
    catalog_service: Arc<dyn CatalogService>,
}

impl Services {
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        planning_service: Arc<dyn PlanningService>,
        employee_service: Arc<dyn EmployeeService>,
        catalog_service: Arc<dyn CatalogService>,
    ) -> Self {
        Self {
            auth_service,
            planning_service,
            employee_service,
            catalog_service,
        }
    }

    /// Wire every service over one shared Unit of Work
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        let uow = Arc::new(Persistence::new(db));

        Self::new(
            Arc::new(Authenticator::new(uow.clone(), config)),
            Arc::new(PlanningManager::new(uow.clone())),
            Arc::new(EmployeeManager::new(uow.clone())),
            Arc::new(CatalogManager::new(uow)),
        )
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn plannings(&self) -> Arc<dyn PlanningService> {
        self.planning_service.clone()
    }

    fn employees(&self) -> Arc<dyn EmployeeService> {
        self.employee_service.clone()
    }

    fn catalog(&self) -> Arc<dyn CatalogService> {
        self.catalog_service.clone()
    }
}
