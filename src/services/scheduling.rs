//! Planning mutation engine.
//!
//! Every function here takes the transaction context of the caller's unit
//! of work, so a multi-step mutation either lands completely or not at all.
//! `today` is passed in rather than read from the clock; it marks where
//! "future" planning rows begin when an assignment moves.

use chrono::{NaiveDate, Weekday};

use crate::config::WEEKS_PER_YEAR;
use crate::domain::planning::{check_week, parse_planning_date};
use crate::domain::schedule::WEEKDAYS;
use crate::domain::{
    weekly_pattern, AddCePlanning, AddPlanning, AssignmentOutcome, Employee, NewPlanning,
    Planning, PlanningStatus, Shift, ShiftType, UpdateEmployee,
};
use crate::errors::{AppError, AppResult};
use crate::infra::repositories::{replace_skill_set, SkillOwner};
use crate::infra::TransactionContext;

/// Rows touched by a weekend rebuild
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekendRebuild {
    pub removed: u64,
    pub created: u64,
}

fn ensure_positive(id: i32, field: &str) -> AppResult<()> {
    if id <= 0 {
        return Err(AppError::validation(format!("{} is required", field)));
    }
    Ok(())
}

/// One row per employee attached to a work-cell, on the cell's slot
fn staff_rows(
    date: NaiveDate,
    shift: Shift,
    ce_id: i32,
    staff: &[Employee],
    status: PlanningStatus,
) -> impl Iterator<Item = NewPlanning> + '_ {
    staff
        .iter()
        .map(move |e| NewPlanning::assignment(date, shift, Some(ce_id), e.sector_id, e.id, status))
}

/// A work-cell slot followed by its staff rows
fn slot_with_staff(
    date: NaiveDate,
    shift: Shift,
    ce_id: i32,
    staff: &[Employee],
    status: PlanningStatus,
) -> Vec<NewPlanning> {
    std::iter::once(NewPlanning::ce_slot(date, shift, ce_id, status))
        .chain(staff_rows(date, shift, ce_id, staff, status))
        .collect()
}

// =============================================================================
// Single entries
// =============================================================================

/// Create one employee-level row.
pub async fn add_planning(ctx: &TransactionContext<'_>, input: AddPlanning) -> AppResult<Planning> {
    let date = parse_planning_date(&input.date)?;
    check_week(date, input.week)?;
    ensure_positive(input.sector_id, "sector_id")?;
    ensure_positive(input.employee_id, "employee_id")?;
    let status = input.status.unwrap_or(PlanningStatus::Scheduled).ensure_assignable()?;

    if !ctx.catalog().sector_exists(input.sector_id).await? {
        return Err(AppError::not_found("Sector"));
    }
    let employee = ctx.employees().get(input.employee_id).await?;

    let row = ctx
        .plannings()
        .insert(NewPlanning::assignment(
            date,
            input.shift,
            employee.ce_id,
            Some(input.sector_id),
            employee.id,
            status,
        ))
        .await?;

    tracing::info!(planning_id = row.id, employee_id = employee.id, %date, shift = %row.shift, "Planning entry added");
    Ok(row)
}

/// Create a work-cell slot and cascade one row per attached employee.
pub async fn add_ce_planning(
    ctx: &TransactionContext<'_>,
    input: AddCePlanning,
) -> AppResult<Planning> {
    let date = parse_planning_date(&input.date)?;
    check_week(date, input.week)?;
    ensure_positive(input.ce_id, "ce_id")?;
    let status = input.status.unwrap_or(PlanningStatus::Scheduled).ensure_assignable()?;

    if !ctx.catalog().ce_exists(input.ce_id).await? {
        return Err(AppError::not_found("CE"));
    }
    let staff = ctx.employees().attached_to(input.ce_id).await?;

    let plannings = ctx.plannings();
    let slot = plannings
        .insert(NewPlanning::ce_slot(date, input.shift, input.ce_id, status))
        .await?;
    let cascaded = plannings
        .insert_many(staff_rows(date, input.shift, input.ce_id, &staff, status).collect())
        .await?;

    tracing::info!(planning_id = slot.id, ce_id = input.ce_id, %date, cascaded, "CE planning added");
    Ok(slot)
}

/// Set the status of an entry, optionally assigning a substitute.
///
/// A substitute already holding another row on the same date and shift is
/// evicted from it first: that row loses its employee and becomes
/// `Unassigned`.
pub async fn update_planning(
    ctx: &TransactionContext<'_>,
    id: i32,
    status: PlanningStatus,
    substitute_id: Option<i32>,
) -> AppResult<Planning> {
    let status = status.ensure_assignable()?;
    let plannings = ctx.plannings();
    let target = plannings.get(id).await?;

    if let Some(substitute_id) = substitute_id {
        if !ctx.employees().exists(substitute_id).await? {
            return Err(AppError::not_found("Substitute employee"));
        }

        while let Some(held) = plannings
            .find_holder(substitute_id, target.date, target.shift, target.id)
            .await?
        {
            plannings.evict(held.id).await?;
            tracing::info!(
                evicted_from = held.id,
                substitute_id,
                date = %target.date,
                shift = %target.shift,
                "Substitute evicted from conflicting slot"
            );
        }
    }

    let updated = plannings.set_status(id, status, substitute_id).await?;
    tracing::info!(planning_id = id, %status, ?substitute_id, "Planning entry updated");
    Ok(updated)
}

/// Set the status of a work-cell slot. Employee rows are left alone.
pub async fn update_ce_status(
    ctx: &TransactionContext<'_>,
    id: i32,
    status: PlanningStatus,
) -> AppResult<Planning> {
    let status = status.ensure_assignable()?;
    let plannings = ctx.plannings();

    if !plannings.get(id).await?.is_ce_slot() {
        return Err(AppError::validation("Entry is not a CE planning slot"));
    }

    let updated = plannings.set_status(id, status, None).await?;
    tracing::info!(planning_id = id, %status, "CE planning status updated");
    Ok(updated)
}

pub async fn delete_planning(ctx: &TransactionContext<'_>, id: i32) -> AppResult<()> {
    let plannings = ctx.plannings();
    if plannings.get(id).await?.is_ce_slot() {
        return Err(AppError::validation(
            "Entry is a CE planning slot; delete it through delete_ce_planning",
        ));
    }

    plannings.delete(id).await?;
    tracing::info!(planning_id = id, "Planning entry deleted");
    Ok(())
}

/// Delete a work-cell slot and every employee row on its date, shift and
/// week. Returns how many employee rows went with it.
pub async fn delete_ce_planning(ctx: &TransactionContext<'_>, id: i32) -> AppResult<u64> {
    let plannings = ctx.plannings();
    let slot = plannings.get(id).await?;
    if !slot.is_ce_slot() {
        return Err(AppError::validation("Entry is not a CE planning slot"));
    }

    let cascaded = plannings.delete_slot_assignments(&slot).await?;
    plannings.delete(id).await?;

    tracing::info!(planning_id = id, date = %slot.date, shift = %slot.shift, cascaded, "CE planning deleted");
    Ok(cascaded)
}

// =============================================================================
// Assignment changes
// =============================================================================

/// Move an employee's future rows to a new position.
///
/// Rows on dates where the work-cell has a slot take that slot's shift,
/// then every remaining future row is pointed at the new work-cell and
/// sector.
async fn carry_schedule(
    ctx: &TransactionContext<'_>,
    employee_id: i32,
    ce_id: Option<i32>,
    sector_id: Option<i32>,
    today: NaiveDate,
) -> AppResult<u64> {
    let plannings = ctx.plannings();

    if let Some(ce_id) = ce_id {
        for slot in plannings.ce_slots_from(ce_id, today).await? {
            plannings.align_to_slot(employee_id, &slot, sector_id).await?;
        }
    }

    let moved = plannings
        .reassign_from(employee_id, ce_id, sector_id, today)
        .await?;
    tracing::debug!(employee_id, ?ce_id, ?sector_id, moved, "Future planning carried over");
    Ok(moved)
}

/// Change an employee's name, position and skills.
///
/// When another employee already holds the target position the change is
/// refused with [`AssignmentOutcome::SwapRequired`] unless `swap` is set,
/// in which case the occupant takes over the employee's old position and
/// both schedules are carried over.
pub async fn update_employee_assignment(
    ctx: &TransactionContext<'_>,
    id: i32,
    input: UpdateEmployee,
    today: NaiveDate,
) -> AppResult<AssignmentOutcome> {
    let employees = ctx.employees();
    let employee = employees.get(id).await?;

    let name = match input.name.as_deref().map(str::trim) {
        Some("") => return Err(AppError::validation("Name cannot be empty")),
        Some(name) => name.to_string(),
        None => employee.name.clone(),
    };
    let ce_id = input.ce_id.or(employee.ce_id);
    let sector_id = input.sector_id.or(employee.sector_id);
    let moved = (ce_id, sector_id) != (employee.ce_id, employee.sector_id);

    if let Some(ce) = input.ce_id {
        if !ctx.catalog().ce_exists(ce).await? {
            return Err(AppError::not_found("CE"));
        }
    }
    if let Some(sector) = input.sector_id {
        if !ctx.catalog().sector_exists(sector).await? {
            return Err(AppError::not_found("Sector"));
        }
    }

    if moved {
        let occupant = match (ce_id, sector_id) {
            (Some(ce), Some(sector)) => employees.find_occupant(ce, sector, id).await?,
            _ => None,
        };

        if let Some(existing) = occupant {
            if !input.swap {
                tracing::info!(employee_id = id, occupant_id = existing.id, "Assignment needs swap confirmation");
                return Ok(AssignmentOutcome::SwapRequired { existing });
            }

            employees
                .save_position(existing.id, &existing.name, employee.ce_id, employee.sector_id)
                .await?;
            carry_schedule(ctx, existing.id, employee.ce_id, employee.sector_id, today).await?;
            tracing::info!(
                employee_id = id,
                occupant_id = existing.id,
                ?ce_id,
                ?sector_id,
                "Employees swapped positions"
            );
        }
    }

    employees.save_position(id, &name, ce_id, sector_id).await?;
    if moved {
        carry_schedule(ctx, id, ce_id, sector_id, today).await?;
    }

    if let Some(skills) = &input.skills {
        replace_skill_set(ctx.connection(), SkillOwner::Employee(id), skills).await?;
    }

    tracing::info!(employee_id = id, moved, "Employee updated");
    Ok(AssignmentOutcome::Updated(employees.get(id).await?))
}

// =============================================================================
// Bulk generation
// =============================================================================

/// Generate the rotation for every work-cell over ISO weeks 1 to 52.
///
/// Existing rows are not checked: running this twice for the same year
/// writes every row twice.
pub async fn populate_yearly_planning(ctx: &TransactionContext<'_>, year: i32) -> AppResult<u64> {
    let mut rows = Vec::new();

    for ce_id in ctx.catalog().ce_ids().await? {
        let staff = ctx.employees().attached_to(ce_id).await?;

        for week in 1..=WEEKS_PER_YEAR {
            for (day, shifts) in weekly_pattern(ce_id, week as i32) {
                let Some(date) = NaiveDate::from_isoywd_opt(year, week, WEEKDAYS[day]) else {
                    return Err(AppError::validation(format!("Invalid year: {}", year)));
                };
                for shift in shifts {
                    rows.extend(slot_with_staff(date, shift, ce_id, &staff, PlanningStatus::Scheduled));
                }
            }
        }
    }

    let created = ctx.plannings().insert_many(rows).await?;
    tracing::info!(year, created, "Yearly planning populated");
    Ok(created)
}

/// Rebuild the weekend of an ISO week for a shift type.
///
/// All Saturday and Sunday rows of the week are removed, then each weekend
/// slot the shift type keeps is re-created for the work-cell the rotation
/// tables name, together with that cell's employees.
pub async fn update_planning_shift_type(
    ctx: &TransactionContext<'_>,
    week: i32,
    shift_type: ShiftType,
    year: i32,
) -> AppResult<WeekendRebuild> {
    let weekend_day = |weekday: Weekday| {
        u32::try_from(week)
            .ok()
            .and_then(|w| NaiveDate::from_isoywd_opt(year, w, weekday))
            .ok_or_else(|| AppError::validation(format!("Week {} does not exist in {}", week, year)))
    };
    let saturday = weekend_day(Weekday::Sat)?;
    let sunday = weekend_day(Weekday::Sun)?;

    let plannings = ctx.plannings();
    let removed = plannings.delete_on_dates(&[saturday, sunday]).await?;

    let mut created = 0;
    for slot in shift_type.weekend_slots() {
        let ce_id = slot.covering_ce(week);
        if !ctx.catalog().ce_exists(ce_id).await? {
            return Err(AppError::not_found(format!("Covering CE {}", ce_id)));
        }

        let date = if slot.weekday == Weekday::Sat { saturday } else { sunday };

        let staff = ctx.employees().attached_to(ce_id).await?;
        created += plannings
            .insert_many(slot_with_staff(date, slot.shift, ce_id, &staff, PlanningStatus::Scheduled))
            .await?;
    }

    tracing::info!(week, year, shift_type = shift_type.label(), removed, created, "Weekend planning rebuilt");
    Ok(WeekendRebuild { removed, created })
}
