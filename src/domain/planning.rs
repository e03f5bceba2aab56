//! Planning entries: shift codes, statuses and the rows built from them.

use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::config::PLANNING_DATE_FORMAT;
use crate::errors::{AppError, AppResult};

/// Shift code of a planning slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum Shift {
    #[serde(rename = "M")]
    Morning,
    #[serde(rename = "S")]
    Afternoon,
    #[serde(rename = "N")]
    Night,
}

impl Shift {
    pub fn code(&self) -> &'static str {
        match self {
            Shift::Morning => "M",
            Shift::Afternoon => "S",
            Shift::Night => "N",
        }
    }
}

impl FromStr for Shift {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(Shift::Morning),
            "S" => Ok(Shift::Afternoon),
            "N" => Ok(Shift::Night),
            other => Err(AppError::validation(format!("Unknown shift code: {}", other))),
        }
    }
}

impl std::fmt::Display for Shift {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Status of a planning entry.
///
/// `Unassigned` only appears when a substitute assignment evicts
/// the previous holder of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PlanningStatus {
    #[serde(rename = "Scheduled")]
    Scheduled,
    #[serde(rename = "Day shift")]
    DayShift,
    #[serde(rename = "Absent (Planned)")]
    AbsentPlanned,
    #[serde(rename = "Absent (Unplanned)")]
    AbsentUnplanned,
    #[serde(rename = "Training")]
    Training,
    #[serde(rename = "Unassigned")]
    Unassigned,
}

impl PlanningStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanningStatus::Scheduled => "Scheduled",
            PlanningStatus::DayShift => "Day shift",
            PlanningStatus::AbsentPlanned => "Absent (Planned)",
            PlanningStatus::AbsentUnplanned => "Absent (Unplanned)",
            PlanningStatus::Training => "Training",
            PlanningStatus::Unassigned => "Unassigned",
        }
    }

    /// Reject statuses a client may not set directly.
    pub fn ensure_assignable(self) -> AppResult<Self> {
        if self == PlanningStatus::Unassigned {
            return Err(AppError::validation(
                "Status 'Unassigned' is only set by substitute eviction",
            ));
        }
        Ok(self)
    }
}

impl FromStr for PlanningStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Scheduled" => Ok(PlanningStatus::Scheduled),
            "Day shift" => Ok(PlanningStatus::DayShift),
            "Absent (Planned)" => Ok(PlanningStatus::AbsentPlanned),
            "Absent (Unplanned)" => Ok(PlanningStatus::AbsentUnplanned),
            "Training" => Ok(PlanningStatus::Training),
            "Unassigned" => Ok(PlanningStatus::Unassigned),
            other => Err(AppError::validation(format!("Unknown planning status: {}", other))),
        }
    }
}

impl std::fmt::Display for PlanningStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored planning entry.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Planning {
    pub id: i32,
    pub date: NaiveDate,
    pub week: i32,
    pub year: i32,
    pub shift: Shift,
    pub ce_id: Option<i32>,
    pub sector_id: Option<i32>,
    pub employee_id: Option<i32>,
    pub status: PlanningStatus,
    pub substitute_id: Option<i32>,
    /// Fixed at creation. Eviction and status changes never turn an
    /// employee-level row into a slot.
    pub ce_slot: bool,
}

impl Planning {
    pub fn is_ce_slot(&self) -> bool {
        self.ce_slot
    }
}

/// A planning row about to be inserted. Week and year always come from the date.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPlanning {
    pub date: NaiveDate,
    pub shift: Shift,
    pub ce_id: Option<i32>,
    pub sector_id: Option<i32>,
    pub employee_id: Option<i32>,
    pub status: PlanningStatus,
    pub ce_slot: bool,
}

impl NewPlanning {
    pub fn ce_slot(date: NaiveDate, shift: Shift, ce_id: i32, status: PlanningStatus) -> Self {
        Self {
            date,
            shift,
            ce_id: Some(ce_id),
            sector_id: None,
            employee_id: None,
            status,
            ce_slot: true,
        }
    }

    pub fn assignment(
        date: NaiveDate,
        shift: Shift,
        ce_id: Option<i32>,
        sector_id: Option<i32>,
        employee_id: i32,
        status: PlanningStatus,
    ) -> Self {
        Self {
            date,
            shift,
            ce_id,
            sector_id,
            employee_id: Some(employee_id),
            status,
            ce_slot: false,
        }
    }

    pub fn week(&self) -> i32 {
        self.date.iso_week().week() as i32
    }

    pub fn year(&self) -> i32 {
        self.date.iso_week().year()
    }
}

/// Parse a `YYYY-MM-DD` date coming off the wire.
pub fn parse_planning_date(raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), PLANNING_DATE_FORMAT)
        .map_err(|_| AppError::validation("Invalid date format. Use YYYY-MM-DD"))
}

/// Check that a client-supplied week matches the ISO week of the date.
pub fn check_week(date: NaiveDate, week: Option<i32>) -> AppResult<()> {
    match week {
        Some(week) if week != date.iso_week().week() as i32 => Err(AppError::validation(format!(
            "Week {} does not match date {} (ISO week {})",
            week,
            date,
            date.iso_week().week()
        ))),
        _ => Ok(()),
    }
}

/// Two-letter weekday label used by planning grids.
pub fn day_label(date: NaiveDate) -> &'static str {
    match date.weekday() {
        chrono::Weekday::Mon => "Mo",
        chrono::Weekday::Tue => "Tu",
        chrono::Weekday::Wed => "We",
        chrono::Weekday::Thu => "Th",
        chrono::Weekday::Fri => "Fr",
        chrono::Weekday::Sat => "Sa",
        chrono::Weekday::Sun => "Su",
    }
}

/// Identity and display name of a referenced entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Summary {
    pub id: i32,
    pub name: String,
}

/// A planning entry as listed to clients, with references resolved.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PlanningView {
    pub id: i32,
    pub date: NaiveDate,
    #[schema(example = "Tu")]
    pub day: String,
    pub week: i32,
    pub year: i32,
    pub shift: Shift,
    pub status: PlanningStatus,
    pub ce: Option<Summary>,
    pub sector: Option<Summary>,
    pub employee: Option<Summary>,
    pub substitute: Option<Summary>,
}

// =============================================================================
// Requests
// =============================================================================

/// Employee-level planning entry to create
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AddPlanning {
    #[schema(example = "2025-03-04")]
    pub date: String,
    /// Optional; must agree with the ISO week of `date`
    pub week: Option<i32>,
    pub shift: Shift,
    #[validate(range(min = 1, message = "sector_id is required"))]
    pub sector_id: i32,
    #[validate(range(min = 1, message = "employee_id is required"))]
    pub employee_id: i32,
    pub status: Option<PlanningStatus>,
}

/// Work-cell-level planning entry to create
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AddCePlanning {
    #[schema(example = "2025-03-04")]
    pub date: String,
    pub week: Option<i32>,
    pub shift: Shift,
    #[validate(range(min = 1, message = "ce_id is required"))]
    pub ce_id: i32,
    pub status: Option<PlanningStatus>,
}

/// Status change with optional substitute assignment
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdatePlanning {
    pub status: PlanningStatus,
    #[serde(alias = "substituteId")]
    #[validate(range(min = 1, message = "substitute_id must be positive"))]
    pub substitute_id: Option<i32>,
}

/// Status change on a work-cell slot
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateCeStatus {
    pub status: PlanningStatus,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct PopulateYear {
    #[validate(range(min = 2000, max = 2100, message = "year must be between 2000 and 2100"))]
    pub year: i32,
}

/// Weekend coverage change for one week
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ShiftTypeChange {
    #[validate(range(min = 1, max = 53, message = "week must be between 1 and 53"))]
    pub week: i32,
    #[serde(alias = "shiftType")]
    #[schema(example = "4x8 N")]
    pub shift_type: String,
    pub year: Option<i32>,
}

/// Move every future row of an employee to a new work-cell and sector
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct BulkReassign {
    #[validate(range(min = 1, message = "employee_id is required"))]
    pub employee_id: i32,
    #[validate(range(min = 1, message = "ce_id is required"))]
    pub ce_id: i32,
    #[validate(range(min = 1, message = "sector_id is required"))]
    pub sector_id: i32,
    #[schema(example = "2025-03-04")]
    pub start_date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_codes_parse() {
        assert_eq!("M".parse::<Shift>().unwrap(), Shift::Morning);
        assert_eq!("S".parse::<Shift>().unwrap(), Shift::Afternoon);
        assert_eq!("N".parse::<Shift>().unwrap(), Shift::Night);
        assert!("X".parse::<Shift>().is_err());
    }

    #[test]
    fn test_status_wire_names() {
        let status: PlanningStatus = serde_json::from_str("\"Absent (Unplanned)\"").unwrap();
        assert_eq!(status, PlanningStatus::AbsentUnplanned);
        assert_eq!(status.as_str().parse::<PlanningStatus>().unwrap(), status);
        assert_eq!(serde_json::to_string(&PlanningStatus::DayShift).unwrap(), "\"Day shift\"");
    }

    #[test]
    fn test_unassigned_cannot_be_set_directly() {
        assert!(PlanningStatus::Unassigned.ensure_assignable().is_err());
        assert!(PlanningStatus::Training.ensure_assignable().is_ok());
    }

    #[test]
    fn test_new_planning_derives_iso_week_and_year() {
        // 2024-12-30 is Monday of ISO week 1 of 2025
        let date = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
        let row = NewPlanning::ce_slot(date, Shift::Morning, 1, PlanningStatus::Scheduled);
        assert_eq!(row.week(), 1);
        assert_eq!(row.year(), 2025);
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_planning_date("2025-13-01").is_err());
        assert!(parse_planning_date("04/03/2025").is_err());
        assert_eq!(
            parse_planning_date("2025-03-04").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 4).unwrap()
        );
    }

    #[test]
    fn test_check_week() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
        assert!(check_week(date, None).is_ok());
        assert!(check_week(date, Some(10)).is_ok());
        assert!(check_week(date, Some(11)).is_err());
    }

    #[test]
    fn test_day_label() {
        assert_eq!(day_label(NaiveDate::from_ymd_opt(2025, 3, 4).unwrap()), "Tu");
        assert_eq!(day_label(NaiveDate::from_ymd_opt(2025, 3, 9).unwrap()), "Su");
    }

    #[test]
    fn test_refilled_evicted_row_is_not_a_ce_slot() {
        let row = Planning {
            id: 1,
            date: NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
            week: 10,
            year: 2025,
            shift: Shift::Night,
            ce_id: Some(2),
            sector_id: Some(3),
            employee_id: None,
            status: PlanningStatus::Scheduled,
            substitute_id: Some(7),
            ce_slot: false,
        };
        assert!(!row.is_ce_slot());
    }

    #[test]
    fn test_constructors_fix_row_kind() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
        assert!(NewPlanning::ce_slot(date, Shift::Morning, 1, PlanningStatus::Scheduled).ce_slot);
        assert!(
            !NewPlanning::assignment(date, Shift::Morning, Some(1), None, 4, PlanningStatus::Scheduled)
                .ce_slot
        );
    }
}
