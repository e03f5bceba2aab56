//! Planning service - weekly views and every planning mutation.
//!
//! Reads go straight to the pool. Writes run the scheduling engine inside a
//! unit-of-work transaction.

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use std::sync::Arc;

use super::scheduling::{self, WeekendRebuild};
use crate::domain::planning::{day_label, parse_planning_date};
use crate::domain::{
    AddCePlanning, AddPlanning, BulkReassign, Planning, PlanningView, ShiftType, ShiftTypeChange,
    UpdateCeStatus, UpdatePlanning,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::with_transaction;

#[async_trait]
pub trait PlanningService: Send + Sync {
    /// Rows of an ISO week, ordered by date then shift
    async fn get_plannings(&self, week: Option<i32>, year: Option<i32>) -> AppResult<Vec<PlanningView>>;

    async fn add_planning(&self, input: AddPlanning) -> AppResult<Planning>;

    async fn add_ce_planning(&self, input: AddCePlanning) -> AppResult<Planning>;

    async fn update_planning(&self, id: i32, input: UpdatePlanning) -> AppResult<Planning>;

    async fn update_ce_status(&self, id: i32, input: UpdateCeStatus) -> AppResult<Planning>;

    async fn delete_planning(&self, id: i32) -> AppResult<()>;

    /// Returns the number of employee rows removed with the slot
    async fn delete_ce_planning(&self, id: i32) -> AppResult<u64>;

    /// Returns the number of rows created
    async fn populate_yearly_planning(&self, year: i32) -> AppResult<u64>;

    async fn update_planning_shift_type(&self, input: ShiftTypeChange) -> AppResult<WeekendRebuild>;

    /// Returns the number of rows moved
    async fn bulk_update_planning(&self, input: BulkReassign) -> AppResult<u64>;
}

pub struct PlanningManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> PlanningManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Resolve names for the work-cell, sector, employee and substitute of each row
    async fn to_views(&self, mut rows: Vec<Planning>) -> AppResult<Vec<PlanningView>> {
        rows.sort_by(|a, b| (a.date, a.shift, a.id).cmp(&(b.date, b.shift, b.id)));

        let catalog = self.uow.catalog();
        let ces = catalog
            .ce_summaries(rows.iter().filter_map(|r| r.ce_id).collect())
            .await?;
        let sectors = catalog
            .sector_summaries(rows.iter().filter_map(|r| r.sector_id).collect())
            .await?;
        let people = self
            .uow
            .employees()
            .summaries(
                rows.iter()
                    .flat_map(|r| [r.employee_id, r.substitute_id])
                    .flatten()
                    .collect(),
            )
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| PlanningView {
                id: r.id,
                date: r.date,
                day: day_label(r.date).to_string(),
                week: r.week,
                year: r.year,
                shift: r.shift,
                status: r.status,
                ce: r.ce_id.and_then(|id| ces.get(&id).cloned()),
                sector: r.sector_id.and_then(|id| sectors.get(&id).cloned()),
                employee: r.employee_id.and_then(|id| people.get(&id).cloned()),
                substitute: r.substitute_id.and_then(|id| people.get(&id).cloned()),
            })
            .collect())
    }
}

#[async_trait]
impl<U: UnitOfWork> PlanningService for PlanningManager<U> {
    async fn get_plannings(&self, week: Option<i32>, year: Option<i32>) -> AppResult<Vec<PlanningView>> {
        let week = week
            .filter(|w| *w > 0)
            .ok_or_else(|| AppError::validation("Invalid week parameter"))?;

        let rows = self.uow.plannings().list_week(week, year).await?;
        tracing::debug!(week, ?year, rows = rows.len(), "Planning week loaded");
        self.to_views(rows).await
    }

    async fn add_planning(&self, input: AddPlanning) -> AppResult<Planning> {
        with_transaction!(self.uow, |ctx| scheduling::add_planning(&ctx, input).await)
    }

    async fn add_ce_planning(&self, input: AddCePlanning) -> AppResult<Planning> {
        with_transaction!(self.uow, |ctx| scheduling::add_ce_planning(&ctx, input).await)
    }

    async fn update_planning(&self, id: i32, input: UpdatePlanning) -> AppResult<Planning> {
        with_transaction!(self.uow, |ctx| {
            scheduling::update_planning(&ctx, id, input.status, input.substitute_id).await
        })
    }

    async fn update_ce_status(&self, id: i32, input: UpdateCeStatus) -> AppResult<Planning> {
        with_transaction!(self.uow, |ctx| {
            scheduling::update_ce_status(&ctx, id, input.status).await
        })
    }

    async fn delete_planning(&self, id: i32) -> AppResult<()> {
        with_transaction!(self.uow, |ctx| scheduling::delete_planning(&ctx, id).await)
    }

    async fn delete_ce_planning(&self, id: i32) -> AppResult<u64> {
        with_transaction!(self.uow, |ctx| scheduling::delete_ce_planning(&ctx, id).await)
    }

    async fn populate_yearly_planning(&self, year: i32) -> AppResult<u64> {
        with_transaction!(self.uow, |ctx| {
            scheduling::populate_yearly_planning(&ctx, year).await
        })
    }

    async fn update_planning_shift_type(&self, input: ShiftTypeChange) -> AppResult<WeekendRebuild> {
        let shift_type: ShiftType = input.shift_type.parse()?;
        let year = input.year.unwrap_or_else(|| Utc::now().year());
        let week = input.week;

        with_transaction!(self.uow, |ctx| {
            scheduling::update_planning_shift_type(&ctx, week, shift_type, year).await
        })
    }

    async fn bulk_update_planning(&self, input: BulkReassign) -> AppResult<u64> {
        let start = parse_planning_date(&input.start_date)?;
        if !self.uow.employees().exists(input.employee_id).await? {
            return Err(AppError::not_found("Employee"));
        }

        let moved = self
            .uow
            .plannings()
            .reassign_from(input.employee_id, Some(input.ce_id), Some(input.sector_id), start)
            .await?;

        tracing::info!(
            employee_id = input.employee_id,
            ce_id = input.ce_id,
            sector_id = input.sector_id,
            %start,
            moved,
            "Planning bulk updated"
        );
        Ok(moved)
    }
}
