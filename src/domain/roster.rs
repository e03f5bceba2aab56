//! Staff and organisation: employees, work-cells, sectors, skills, reservists.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::planning::Summary;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Skill {
    pub id: i32,
    pub name: String,
}

/// Employee with its current assignment and skills
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Employee {
    pub id: i32,
    pub name: String,
    pub ce_id: Option<i32>,
    pub sector_id: Option<i32>,
    pub skills: Vec<Skill>,
}

impl Employee {
    pub fn summary(&self) -> Summary {
        Summary {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

/// Employee as listed, with work-cell and sector names resolved
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EmployeeListing {
    pub id: i32,
    pub name: String,
    pub ce_id: Option<i32>,
    pub sector_id: Option<i32>,
    pub ce: Option<Summary>,
    pub sector: Option<Summary>,
    pub skills: Vec<Skill>,
}

/// Result of an assignment change.
///
/// A conflict with the current occupant is a negotiated outcome, not an
/// error: nothing is written and the caller may retry with `swap`.
#[derive(Debug, Clone, PartialEq)]
pub enum AssignmentOutcome {
    Updated(Employee),
    SwapRequired { existing: Employee },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Sector {
    pub id: i32,
    pub name: String,
    pub required_skills: Vec<Skill>,
}

/// Raw `sector_required_skills` link row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SectorSkillLink {
    pub sector_id: i32,
    pub skill_id: i32,
}

/// Work-cell with the employees attached to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Ce {
    pub id: i32,
    pub name: String,
    pub employees: Vec<Summary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Reservist {
    pub id: i32,
    pub name: String,
    pub skills: Vec<Skill>,
}

// =============================================================================
// Requests
// =============================================================================

/// Name-only payload for skills and work-cells
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NameInput {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SectorInput {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Replaces the required skill set when present
    #[serde(default)]
    pub required_skills: Option<Vec<i32>>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ReservistInput {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    pub skills: Option<Vec<i32>>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateEmployee {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub ce_id: Option<i32>,
    pub sector_id: Option<i32>,
    #[serde(default)]
    pub skills: Vec<i32>,
}

/// Assignment change for an employee
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateEmployee {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    pub ce_id: Option<i32>,
    pub sector_id: Option<i32>,
    /// Replaces the skill set when present
    pub skills: Option<Vec<i32>>,
    /// Exchange positions with the current occupant of the target
    #[serde(default)]
    pub swap: bool,
}

/// Filters for the employee listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeFilter {
    pub ce_id: Option<i32>,
    pub search: Option<String>,
}
