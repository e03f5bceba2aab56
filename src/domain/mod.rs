//! Domain layer - Core business entities and logic
//!
//! Planning rows, the work-cell rotation, staff records and users.
//! Nothing here touches the database.

pub mod password;
pub mod planning;
pub mod roster;
pub mod schedule;
pub mod user;

pub use password::Password;
pub use planning::{
    AddCePlanning, AddPlanning, BulkReassign, NewPlanning, Planning, PlanningStatus, PlanningView,
    PopulateYear, Shift, ShiftTypeChange, Summary, UpdateCeStatus, UpdatePlanning,
};
pub use roster::{
    AssignmentOutcome, Ce, CreateEmployee, Employee, EmployeeFilter, EmployeeListing, NameInput,
    Reservist, ReservistInput, Sector, SectorInput, SectorSkillLink, Skill, UpdateEmployee,
};
pub use schedule::{weekly_pattern, ShiftType, WeekendSlot};
pub use user::{User, UserRole};
