//! Employee service - staff records and assignment changes.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use super::scheduling;
use crate::domain::{
    AssignmentOutcome, CreateEmployee, Employee, EmployeeFilter, EmployeeListing, Skill,
    UpdateEmployee,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::with_transaction;

#[async_trait]
pub trait EmployeeService: Send + Sync {
    async fn list_employees(&self, filter: EmployeeFilter) -> AppResult<Vec<EmployeeListing>>;

    async fn employee_skills(&self, id: i32) -> AppResult<Vec<Skill>>;

    async fn create_employee(&self, input: CreateEmployee) -> AppResult<Employee>;

    /// Apply an assignment change; may ask for swap confirmation instead
    async fn update_employee(&self, id: i32, input: UpdateEmployee) -> AppResult<AssignmentOutcome>;

    async fn delete_employee(&self, id: i32) -> AppResult<()>;
}

pub struct EmployeeManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> EmployeeManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> EmployeeService for EmployeeManager<U> {
    async fn list_employees(&self, filter: EmployeeFilter) -> AppResult<Vec<EmployeeListing>> {
        let employees = self.uow.employees().list(&filter).await?;
        tracing::debug!(ce_id = ?filter.ce_id, count = employees.len(), "Employees listed");
        Ok(employees)
    }

    async fn employee_skills(&self, id: i32) -> AppResult<Vec<Skill>> {
        self.uow.employees().skills_of(id).await
    }

    async fn create_employee(&self, mut input: CreateEmployee) -> AppResult<Employee> {
        input.name = input.name.trim().to_string();
        if input.name.is_empty() {
            return Err(AppError::validation("Name is required"));
        }

        let employee = with_transaction!(self.uow, |ctx| {
            if let Some(ce_id) = input.ce_id {
                if !ctx.catalog().ce_exists(ce_id).await? {
                    return Err(AppError::not_found("CE"));
                }
            }
            if let Some(sector_id) = input.sector_id {
                if !ctx.catalog().sector_exists(sector_id).await? {
                    return Err(AppError::not_found("Sector"));
                }
            }
            ctx.employees().create(input).await
        })?;

        tracing::info!(employee_id = employee.id, ce_id = ?employee.ce_id, "Employee created");
        Ok(employee)
    }

    async fn update_employee(&self, id: i32, input: UpdateEmployee) -> AppResult<AssignmentOutcome> {
        let today = Utc::now().date_naive();
        // Serializable so two concurrent moves cannot both see the target free
        self.uow
            .transaction_serializable(move |ctx| {
                Box::pin(async move {
                    scheduling::update_employee_assignment(&ctx, id, input, today).await
                })
            })
            .await
    }

    async fn delete_employee(&self, id: i32) -> AppResult<()> {
        with_transaction!(self.uow, |ctx| ctx.employees().delete(id).await)?;
        tracing::info!(employee_id = id, "Employee deleted");
        Ok(())
    }
}
