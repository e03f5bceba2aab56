//! Planning repository.
//!
//! Generic over the connection so the same queries run on the pool for
//! reads and on a [`sea_orm::DatabaseTransaction`] inside a unit of work.

use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use super::entities::planning::{self, ActiveModel, Entity as PlanningEntity};
use crate::domain::{NewPlanning, Planning, PlanningStatus, Shift};
use crate::errors::{AppError, AppResult, OptionExt};

/// Rows per INSERT statement, kept under SQLite's bound-parameter limit
const INSERT_CHUNK: usize = 64;

pub struct PlanningRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> PlanningRepository<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Planning>> {
        PlanningEntity::find_by_id(id)
            .one(self.conn)
            .await?
            .map(Planning::try_from)
            .transpose()
    }

    /// Load an entry or fail with `NotFound`.
    pub async fn get(&self, id: i32) -> AppResult<Planning> {
        self.find_by_id(id).await?.ok_or_not_found("Planning entry")
    }

    /// All rows of an ISO week, optionally restricted to one year
    pub async fn list_week(&self, week: i32, year: Option<i32>) -> AppResult<Vec<Planning>> {
        let mut query = PlanningEntity::find().filter(planning::Column::Week.eq(week));
        if let Some(year) = year {
            query = query.filter(planning::Column::Year.eq(year));
        }

        query
            .order_by_asc(planning::Column::Date)
            .order_by_asc(planning::Column::Id)
            .all(self.conn)
            .await?
            .into_iter()
            .map(Planning::try_from)
            .collect()
    }

    pub async fn count(&self) -> AppResult<u64> {
        Ok(PlanningEntity::find().count(self.conn).await?)
    }

    pub async fn insert(&self, row: NewPlanning) -> AppResult<Planning> {
        let model = to_active_model(row).insert(self.conn).await?;
        Planning::try_from(model)
    }

    /// Insert rows in chunks, returning how many were written
    pub async fn insert_many(&self, rows: Vec<NewPlanning>) -> AppResult<u64> {
        let mut written = 0;
        for chunk in rows.chunks(INSERT_CHUNK) {
            written += PlanningEntity::insert_many(chunk.iter().cloned().map(to_active_model))
                .exec_without_returning(self.conn)
                .await?;
        }
        Ok(written)
    }

    pub async fn set_status(
        &self,
        id: i32,
        status: PlanningStatus,
        substitute_id: Option<i32>,
    ) -> AppResult<Planning> {
        let model = PlanningEntity::find_by_id(id)
            .one(self.conn)
            .await?
            .ok_or_not_found("Planning entry")?;

        let mut active: ActiveModel = model.into();
        active.status = Set(status.to_string());
        if substitute_id.is_some() {
            active.substitute_id = Set(substitute_id);
        }
        active.updated_at = Set(Utc::now());

        Planning::try_from(active.update(self.conn).await?)
    }

    /// Another row on the same date and shift currently held by `employee_id`
    pub async fn find_holder(
        &self,
        employee_id: i32,
        date: NaiveDate,
        shift: Shift,
        excluding: i32,
    ) -> AppResult<Option<Planning>> {
        PlanningEntity::find()
            .filter(planning::Column::EmployeeId.eq(employee_id))
            .filter(planning::Column::Date.eq(date))
            .filter(planning::Column::Shift.eq(shift.code()))
            .filter(planning::Column::Id.ne(excluding))
            .one(self.conn)
            .await?
            .map(Planning::try_from)
            .transpose()
    }

    /// Clear the employee of a row and mark it unassigned
    pub async fn evict(&self, id: i32) -> AppResult<()> {
        let result = PlanningEntity::update_many()
            .col_expr(planning::Column::EmployeeId, Expr::value(Option::<i32>::None))
            .col_expr(
                planning::Column::Status,
                Expr::value(PlanningStatus::Unassigned.as_str()),
            )
            .col_expr(planning::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(planning::Column::Id.eq(id))
            .exec(self.conn)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Planning entry"));
        }
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = PlanningEntity::delete_by_id(id).exec(self.conn).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("Planning entry"));
        }
        Ok(())
    }

    /// Delete the employee-level rows sharing a slot's date, shift and week,
    /// including rows left behind by eviction.
    ///
    /// Rows are matched on date, shift and week only, not on work-cell. Cells
    /// that share a rotation template (CE 5 runs CE 1's) also share slot
    /// coordinates, so deleting one cell's slot removes the other cell's
    /// staff rows too and leaves its slot without staff.
    pub async fn delete_slot_assignments(&self, slot: &Planning) -> AppResult<u64> {
        let result = PlanningEntity::delete_many()
            .filter(planning::Column::Date.eq(slot.date))
            .filter(planning::Column::Shift.eq(slot.shift.code()))
            .filter(planning::Column::Week.eq(slot.week))
            .filter(planning::Column::Id.ne(slot.id))
            .filter(planning::Column::IsCeSlot.eq(false))
            .exec(self.conn)
            .await?;
        Ok(result.rows_affected)
    }

    /// A work-cell's own slots dated on or after `from`, earliest first
    pub async fn ce_slots_from(&self, ce_id: i32, from: NaiveDate) -> AppResult<Vec<Planning>> {
        PlanningEntity::find()
            .filter(planning::Column::CeId.eq(ce_id))
            .filter(planning::Column::Date.gte(from))
            .filter(planning::Column::IsCeSlot.eq(true))
            .order_by_asc(planning::Column::Date)
            .order_by_asc(planning::Column::Id)
            .all(self.conn)
            .await?
            .into_iter()
            .map(Planning::try_from)
            .collect()
    }

    /// Point an employee's rows on `slot.date` at the slot's shift and work-cell
    pub async fn align_to_slot(
        &self,
        employee_id: i32,
        slot: &Planning,
        sector_id: Option<i32>,
    ) -> AppResult<u64> {
        let result = PlanningEntity::update_many()
            .col_expr(planning::Column::SectorId, Expr::value(sector_id))
            .col_expr(planning::Column::Shift, Expr::value(slot.shift.code()))
            .col_expr(planning::Column::CeId, Expr::value(slot.ce_id))
            .col_expr(planning::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(planning::Column::EmployeeId.eq(employee_id))
            .filter(planning::Column::Date.eq(slot.date))
            .exec(self.conn)
            .await?;
        Ok(result.rows_affected)
    }

    /// Set work-cell and sector on every row of an employee dated on or after `from`
    pub async fn reassign_from(
        &self,
        employee_id: i32,
        ce_id: Option<i32>,
        sector_id: Option<i32>,
        from: NaiveDate,
    ) -> AppResult<u64> {
        let result = PlanningEntity::update_many()
            .col_expr(planning::Column::CeId, Expr::value(ce_id))
            .col_expr(planning::Column::SectorId, Expr::value(sector_id))
            .col_expr(planning::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(planning::Column::EmployeeId.eq(employee_id))
            .filter(planning::Column::Date.gte(from))
            .exec(self.conn)
            .await?;
        Ok(result.rows_affected)
    }

    /// Delete every row, work-cell and employee level, on the given dates
    pub async fn delete_on_dates(&self, dates: &[NaiveDate]) -> AppResult<u64> {
        let result = PlanningEntity::delete_many()
            .filter(planning::Column::Date.is_in(dates.iter().copied()))
            .exec(self.conn)
            .await?;
        Ok(result.rows_affected)
    }
}

fn to_active_model(row: NewPlanning) -> ActiveModel {
    let now = Utc::now();
    ActiveModel {
        id: NotSet,
        date: Set(row.date),
        week: Set(row.week()),
        year: Set(row.year()),
        shift: Set(row.shift.code().to_string()),
        ce_id: Set(row.ce_id),
        sector_id: Set(row.sector_id),
        employee_id: Set(row.employee_id),
        status: Set(row.status.to_string()),
        substitute_id: Set(None),
        is_ce_slot: Set(row.ce_slot),
        created_at: Set(now),
        updated_at: Set(now),
    }
}
