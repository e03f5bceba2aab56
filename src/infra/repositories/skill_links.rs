//! Skill association sets.
//!
//! Employees, sectors and reservists each own a set of skills stored in a
//! link table. Updating a set always replaces it wholesale.

use std::collections::BTreeSet;

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

use super::entities::{employee_skill, reservist_skill, sector_required_skill, skill};
use crate::errors::{AppError, AppResult};

/// Owner of a skill set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillOwner {
    Employee(i32),
    Sector(i32),
    Reservist(i32),
}

macro_rules! replace_links {
    ($conn:expr, $link:ident, $owner_field:ident, $owner_col:ident, $owner_id:expr, $skill_ids:expr) => {{
        $link::Entity::delete_many()
            .filter($link::Column::$owner_col.eq($owner_id))
            .exec($conn)
            .await?;

        if !$skill_ids.is_empty() {
            $link::Entity::insert_many($skill_ids.iter().map(|&skill_id| $link::ActiveModel {
                $owner_field: Set($owner_id),
                skill_id: Set(skill_id),
            }))
            .exec_without_returning($conn)
            .await?;
        }
    }};
}

/// Replace the full skill set of `owner` with `skill_ids`.
///
/// Duplicates are collapsed. Every id must name an existing skill.
/// Run this inside the caller's transaction so the delete and insert
/// land together.
pub async fn replace_skill_set<C: ConnectionTrait>(
    conn: &C,
    owner: SkillOwner,
    skill_ids: &[i32],
) -> AppResult<()> {
    let skill_ids: Vec<i32> = skill_ids.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();

    if !skill_ids.is_empty() {
        let known = skill::Entity::find()
            .filter(skill::Column::Id.is_in(skill_ids.clone()))
            .count(conn)
            .await?;
        if known != skill_ids.len() as u64 {
            return Err(AppError::not_found("Skill"));
        }
    }

    match owner {
        SkillOwner::Employee(id) => {
            replace_links!(conn, employee_skill, employee_id, EmployeeId, id, skill_ids)
        }
        SkillOwner::Sector(id) => {
            replace_links!(conn, sector_required_skill, sector_id, SectorId, id, skill_ids)
        }
        SkillOwner::Reservist(id) => {
            replace_links!(conn, reservist_skill, reservist_id, ReservistId, id, skill_ids)
        }
    }

    tracing::debug!(?owner, skills = skill_ids.len(), "Skill set replaced");
    Ok(())
}
