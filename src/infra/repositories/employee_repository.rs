//! Employee repository.

use std::collections::HashMap;

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use super::catalog_repository::CatalogRepository;
use super::entities::{employee, employee_skill, skill};
use super::skill_links::{replace_skill_set, SkillOwner};
use crate::domain::{CreateEmployee, Employee, EmployeeFilter, EmployeeListing, Skill, Summary};
use crate::errors::{AppError, AppResult, OptionExt};

pub struct EmployeeRepository<'a, C> {
    conn: &'a C,
}

fn to_domain((model, skills): (employee::Model, Vec<skill::Model>)) -> Employee {
    let mut skills: Vec<Skill> = skills.into_iter().map(Skill::from).collect();
    skills.sort_by_key(|s| s.id);

    Employee {
        id: model.id,
        name: model.name,
        ce_id: model.ce_id,
        sector_id: model.sector_id,
        skills,
    }
}

impl<'a, C: ConnectionTrait> EmployeeRepository<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Employee>> {
        let found = employee::Entity::find_by_id(id)
            .find_with_related(skill::Entity)
            .all(self.conn)
            .await?;
        Ok(found.into_iter().next().map(to_domain))
    }

    pub async fn get(&self, id: i32) -> AppResult<Employee> {
        self.find_by_id(id).await?.ok_or_not_found("Employee")
    }

    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        Ok(employee::Entity::find_by_id(id).count(self.conn).await? > 0)
    }

    pub async fn list(&self, filter: &EmployeeFilter) -> AppResult<Vec<EmployeeListing>> {
        let mut query = employee::Entity::find();
        if let Some(ce_id) = filter.ce_id {
            query = query.filter(employee::Column::CeId.eq(ce_id));
        }
        if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            query = query.filter(employee::Column::Name.contains(search));
        }

        let employees: Vec<Employee> = query
            .order_by_asc(employee::Column::Id)
            .find_with_related(skill::Entity)
            .all(self.conn)
            .await?
            .into_iter()
            .map(to_domain)
            .collect();

        let catalog = CatalogRepository::new(self.conn);
        let ces = catalog
            .ce_summaries(employees.iter().filter_map(|e| e.ce_id).collect())
            .await?;
        let sectors = catalog
            .sector_summaries(employees.iter().filter_map(|e| e.sector_id).collect())
            .await?;

        Ok(employees
            .into_iter()
            .map(|e| EmployeeListing {
                ce: e.ce_id.and_then(|id| ces.get(&id).cloned()),
                sector: e.sector_id.and_then(|id| sectors.get(&id).cloned()),
                id: e.id,
                name: e.name,
                ce_id: e.ce_id,
                sector_id: e.sector_id,
                skills: e.skills,
            })
            .collect())
    }

    /// Employees attached to a work-cell
    pub async fn attached_to(&self, ce_id: i32) -> AppResult<Vec<Employee>> {
        Ok(employee::Entity::find()
            .filter(employee::Column::CeId.eq(ce_id))
            .order_by_asc(employee::Column::Id)
            .find_with_related(skill::Entity)
            .all(self.conn)
            .await?
            .into_iter()
            .map(to_domain)
            .collect())
    }

    /// The employee other than `excluding` holding a work-cell/sector position
    pub async fn find_occupant(
        &self,
        ce_id: i32,
        sector_id: i32,
        excluding: i32,
    ) -> AppResult<Option<Employee>> {
        let occupant = employee::Entity::find()
            .filter(employee::Column::CeId.eq(ce_id))
            .filter(employee::Column::SectorId.eq(sector_id))
            .filter(employee::Column::Id.ne(excluding))
            .order_by_asc(employee::Column::Id)
            .one(self.conn)
            .await?;

        match occupant {
            Some(model) => self.find_by_id(model.id).await,
            None => Ok(None),
        }
    }

    pub async fn create(&self, input: CreateEmployee) -> AppResult<Employee> {
        let model = employee::ActiveModel {
            id: NotSet,
            name: Set(input.name),
            ce_id: Set(input.ce_id),
            sector_id: Set(input.sector_id),
        }
        .insert(self.conn)
        .await?;

        replace_skill_set(self.conn, SkillOwner::Employee(model.id), &input.skills).await?;
        self.get(model.id).await
    }

    /// Overwrite name and position. `None` clears the work-cell or sector.
    pub async fn save_position(
        &self,
        id: i32,
        name: &str,
        ce_id: Option<i32>,
        sector_id: Option<i32>,
    ) -> AppResult<()> {
        let result = employee::Entity::update_many()
            .col_expr(employee::Column::Name, Expr::value(name))
            .col_expr(employee::Column::CeId, Expr::value(ce_id))
            .col_expr(employee::Column::SectorId, Expr::value(sector_id))
            .filter(employee::Column::Id.eq(id))
            .exec(self.conn)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Employee"));
        }
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        employee_skill::Entity::delete_many()
            .filter(employee_skill::Column::EmployeeId.eq(id))
            .exec(self.conn)
            .await?;

        let result = employee::Entity::delete_by_id(id).exec(self.conn).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("Employee"));
        }
        Ok(())
    }

    pub async fn skills_of(&self, id: i32) -> AppResult<Vec<Skill>> {
        Ok(self.get(id).await?.skills)
    }

    pub async fn summaries(&self, ids: Vec<i32>) -> AppResult<HashMap<i32, Summary>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        Ok(employee::Entity::find()
            .filter(employee::Column::Id.is_in(ids))
            .all(self.conn)
            .await?
            .into_iter()
            .map(|m| (m.id, Summary { id: m.id, name: m.name }))
            .collect())
    }
}
