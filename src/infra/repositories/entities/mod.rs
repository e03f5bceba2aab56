//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod ce;
pub mod employee;
pub mod employee_skill;
pub mod planning;
pub mod reservist;
pub mod reservist_skill;
pub mod sector;
pub mod sector_required_skill;
pub mod skill;
pub mod user;
