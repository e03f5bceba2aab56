//! Work-cell shift rotation and weekend coverage policy.
//!
//! Every work-cell follows the same four weekly templates, offset by its
//! identity so that in any given week the cells cover different shifts.
//! Weekend slots are assigned from fixed rotation tables that name the
//! cell whose template holds that slot in the week.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::planning::Shift;
use crate::config::ROTATION_WEEKS;
use crate::errors::AppError;

/// Shifts worked on each weekday, Monday first.
pub type WeekTemplate = [&'static [Shift]; 7];

const OFF: &[Shift] = &[];
const MORNING: &[Shift] = &[Shift::Morning];
const AFTERNOON: &[Shift] = &[Shift::Afternoon];
const NIGHT: &[Shift] = &[Shift::Night];

/// Weekday order used by template indexes.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// The four weeks of the rotation.
pub const ROTATION_TEMPLATES: [WeekTemplate; ROTATION_WEEKS as usize] = [
    // morning week
    [OFF, MORNING, MORNING, MORNING, MORNING, MORNING, OFF],
    // afternoon week
    [AFTERNOON, AFTERNOON, AFTERNOON, AFTERNOON, OFF, OFF, OFF],
    // night week
    [NIGHT, NIGHT, OFF, OFF, AFTERNOON, OFF, NIGHT],
    // recovery week
    [MORNING, OFF, OFF, OFF, OFF, OFF, OFF],
];

/// Work-cell covering Saturday morning, indexed by `week mod 4`.
pub const SATURDAY_MORNING_COVER: [i32; ROTATION_WEEKS as usize] = [2, 1, 4, 3];

/// Work-cell covering Sunday night, indexed by `week mod 4`.
pub const SUNDAY_NIGHT_COVER: [i32; ROTATION_WEEKS as usize] = [4, 3, 2, 1];

/// Index into [`ROTATION_TEMPLATES`] for a work-cell in a given week.
pub fn template_index(ce_id: i32, week: i32) -> usize {
    let cycle = ROTATION_WEEKS as i32;
    let ce_index = (ce_id - 1).rem_euclid(cycle);
    let week_in_cycle = (week - 1).rem_euclid(cycle);
    ((ce_index + week_in_cycle) % cycle) as usize
}

/// Shift pattern of a work-cell for one week, keyed by weekday index (0 = Monday).
///
/// Every weekday is present; days off map to an empty list.
pub fn weekly_pattern(ce_id: i32, week: i32) -> BTreeMap<usize, Vec<Shift>> {
    ROTATION_TEMPLATES[template_index(ce_id, week)]
        .iter()
        .enumerate()
        .map(|(day, shifts)| (day, shifts.to_vec()))
        .collect()
}

/// A weekend slot whose covering work-cell rotates weekly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekendSlot {
    pub weekday: Weekday,
    pub shift: Shift,
    cover: &'static [i32; ROTATION_WEEKS as usize],
}

impl WeekendSlot {
    pub fn covering_ce(&self, week: i32) -> i32 {
        self.cover[week.rem_euclid(ROTATION_WEEKS as i32) as usize]
    }
}

pub const SATURDAY_MORNING: WeekendSlot = WeekendSlot {
    weekday: Weekday::Sat,
    shift: Shift::Morning,
    cover: &SATURDAY_MORNING_COVER,
};

pub const SUNDAY_NIGHT: WeekendSlot = WeekendSlot {
    weekday: Weekday::Sun,
    shift: Shift::Night,
    cover: &SUNDAY_NIGHT_COVER,
};

/// Named weekend coverage policy for a week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ShiftType {
    /// Saturday morning and Sunday night
    #[serde(rename = "4x8 L")]
    FullWeekend,
    /// Saturday morning only
    #[serde(rename = "4x8 N")]
    SaturdayOnly,
    /// No weekend shifts
    #[serde(rename = "4x8 C")]
    NoWeekend,
}

impl ShiftType {
    pub fn weekend_slots(&self) -> &'static [WeekendSlot] {
        match self {
            ShiftType::FullWeekend => &[SATURDAY_MORNING, SUNDAY_NIGHT],
            ShiftType::SaturdayOnly => &[SATURDAY_MORNING],
            ShiftType::NoWeekend => &[],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ShiftType::FullWeekend => "4x8 L",
            ShiftType::SaturdayOnly => "4x8 N",
            ShiftType::NoWeekend => "4x8 C",
        }
    }
}

impl FromStr for ShiftType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "4x8 L" => Ok(ShiftType::FullWeekend),
            "4x8 N" => Ok(ShiftType::SaturdayOnly),
            "4x8 C" => Ok(ShiftType::NoWeekend),
            other => Err(AppError::validation(format!("Unknown shift type: {}", other))),
        }
    }
}
