//! Catalog repository: skills, work-cells, sectors and reservists.
//!
//! These are flat named records. Sectors and reservists carry a skill set,
//! work-cells are listed with the employees attached to them.

use std::collections::HashMap;

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use super::entities::{ce, employee, reservist, sector, sector_required_skill, skill};
use super::skill_links::{replace_skill_set, SkillOwner};
use crate::domain::{Ce, Reservist, Sector, SectorSkillLink, Skill, Summary};
use crate::errors::{AppError, AppResult, OptionExt};

pub struct CatalogRepository<'a, C> {
    conn: &'a C,
}

fn to_skills(models: Vec<skill::Model>) -> Vec<Skill> {
    let mut skills: Vec<Skill> = models.into_iter().map(Skill::from).collect();
    skills.sort_by_key(|s| s.id);
    skills
}

fn to_sector((model, skills): (sector::Model, Vec<skill::Model>)) -> Sector {
    Sector {
        id: model.id,
        name: model.name,
        required_skills: to_skills(skills),
    }
}

fn to_reservist((model, skills): (reservist::Model, Vec<skill::Model>)) -> Reservist {
    Reservist {
        id: model.id,
        name: model.name,
        skills: to_skills(skills),
    }
}

fn to_ce((model, employees): (ce::Model, Vec<employee::Model>)) -> Ce {
    let mut employees: Vec<Summary> = employees
        .into_iter()
        .map(|e| Summary { id: e.id, name: e.name })
        .collect();
    employees.sort_by_key(|e| e.id);

    Ce {
        id: model.id,
        name: model.name,
        employees,
    }
}

/// Fail with `NotFound(entity)` when an update or delete touched nothing
fn ensure_touched(rows_affected: u64, entity: &str) -> AppResult<()> {
    if rows_affected == 0 {
        return Err(AppError::not_found(entity));
    }
    Ok(())
}

impl<'a, C: ConnectionTrait> CatalogRepository<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    // =========================================================================
    // Skills
    // =========================================================================

    pub async fn list_skills(&self) -> AppResult<Vec<Skill>> {
        Ok(skill::Entity::find()
            .order_by_asc(skill::Column::Id)
            .all(self.conn)
            .await?
            .into_iter()
            .map(Skill::from)
            .collect())
    }

    pub async fn create_skill(&self, name: &str) -> AppResult<Skill> {
        let model = skill::ActiveModel {
            id: NotSet,
            name: Set(name.to_owned()),
        }
        .insert(self.conn)
        .await?;
        Ok(model.into())
    }

    pub async fn rename_skill(&self, id: i32, name: &str) -> AppResult<Skill> {
        let result = skill::Entity::update_many()
            .col_expr(skill::Column::Name, Expr::value(name))
            .filter(skill::Column::Id.eq(id))
            .exec(self.conn)
            .await?;
        ensure_touched(result.rows_affected, "Skill")?;

        Ok(Skill {
            id,
            name: name.to_owned(),
        })
    }

    pub async fn delete_skill(&self, id: i32) -> AppResult<()> {
        let result = skill::Entity::delete_by_id(id).exec(self.conn).await?;
        ensure_touched(result.rows_affected, "Skill")
    }

    // =========================================================================
    // Work-cells
    // =========================================================================

    pub async fn list_ces(&self) -> AppResult<Vec<Ce>> {
        Ok(ce::Entity::find()
            .order_by_asc(ce::Column::Id)
            .find_with_related(employee::Entity)
            .all(self.conn)
            .await?
            .into_iter()
            .map(to_ce)
            .collect())
    }

    pub async fn get_ce(&self, id: i32) -> AppResult<Ce> {
        ce::Entity::find_by_id(id)
            .find_with_related(employee::Entity)
            .all(self.conn)
            .await?
            .into_iter()
            .next()
            .map(to_ce)
            .ok_or_not_found("CE")
    }

    /// Ids of every work-cell, ascending
    pub async fn ce_ids(&self) -> AppResult<Vec<i32>> {
        Ok(ce::Entity::find()
            .order_by_asc(ce::Column::Id)
            .all(self.conn)
            .await?
            .into_iter()
            .map(|m| m.id)
            .collect())
    }

    pub async fn ce_exists(&self, id: i32) -> AppResult<bool> {
        Ok(ce::Entity::find_by_id(id).count(self.conn).await? > 0)
    }

    pub async fn create_ce(&self, name: &str) -> AppResult<Ce> {
        let model = ce::ActiveModel {
            id: NotSet,
            name: Set(name.to_owned()),
        }
        .insert(self.conn)
        .await?;

        Ok(Ce {
            id: model.id,
            name: model.name,
            employees: Vec::new(),
        })
    }

    pub async fn rename_ce(&self, id: i32, name: &str) -> AppResult<Ce> {
        let result = ce::Entity::update_many()
            .col_expr(ce::Column::Name, Expr::value(name))
            .filter(ce::Column::Id.eq(id))
            .exec(self.conn)
            .await?;
        ensure_touched(result.rows_affected, "CE")?;

        self.get_ce(id).await
    }

    pub async fn delete_ce(&self, id: i32) -> AppResult<()> {
        let result = ce::Entity::delete_by_id(id).exec(self.conn).await?;
        ensure_touched(result.rows_affected, "CE")
    }

    // =========================================================================
    // Sectors
    // =========================================================================

    pub async fn list_sectors(&self) -> AppResult<Vec<Sector>> {
        Ok(sector::Entity::find()
            .order_by_asc(sector::Column::Id)
            .find_with_related(skill::Entity)
            .all(self.conn)
            .await?
            .into_iter()
            .map(to_sector)
            .collect())
    }

    pub async fn get_sector(&self, id: i32) -> AppResult<Sector> {
        sector::Entity::find_by_id(id)
            .find_with_related(skill::Entity)
            .all(self.conn)
            .await?
            .into_iter()
            .next()
            .map(to_sector)
            .ok_or_not_found("Sector")
    }

    pub async fn sector_exists(&self, id: i32) -> AppResult<bool> {
        Ok(sector::Entity::find_by_id(id).count(self.conn).await? > 0)
    }

    /// Raw `sector_required_skills` rows
    pub async fn sector_links(&self) -> AppResult<Vec<SectorSkillLink>> {
        Ok(sector_required_skill::Entity::find()
            .order_by_asc(sector_required_skill::Column::SectorId)
            .order_by_asc(sector_required_skill::Column::SkillId)
            .all(self.conn)
            .await?
            .into_iter()
            .map(|m| SectorSkillLink {
                sector_id: m.sector_id,
                skill_id: m.skill_id,
            })
            .collect())
    }

    pub async fn create_sector(&self, name: &str, required_skills: &[i32]) -> AppResult<Sector> {
        let model = sector::ActiveModel {
            id: NotSet,
            name: Set(name.to_owned()),
        }
        .insert(self.conn)
        .await?;

        replace_skill_set(self.conn, SkillOwner::Sector(model.id), required_skills).await?;
        self.get_sector(model.id).await
    }

    /// Rename a sector, replacing its required skills when given
    pub async fn update_sector(
        &self,
        id: i32,
        name: &str,
        required_skills: Option<&[i32]>,
    ) -> AppResult<Sector> {
        let result = sector::Entity::update_many()
            .col_expr(sector::Column::Name, Expr::value(name))
            .filter(sector::Column::Id.eq(id))
            .exec(self.conn)
            .await?;
        ensure_touched(result.rows_affected, "Sector")?;

        if let Some(skills) = required_skills {
            replace_skill_set(self.conn, SkillOwner::Sector(id), skills).await?;
        }
        self.get_sector(id).await
    }

    pub async fn delete_sector(&self, id: i32) -> AppResult<()> {
        let result = sector::Entity::delete_by_id(id).exec(self.conn).await?;
        ensure_touched(result.rows_affected, "Sector")
    }

    // =========================================================================
    // Reservists
    // =========================================================================

    pub async fn list_reservists(&self) -> AppResult<Vec<Reservist>> {
        Ok(reservist::Entity::find()
            .order_by_asc(reservist::Column::Id)
            .find_with_related(skill::Entity)
            .all(self.conn)
            .await?
            .into_iter()
            .map(to_reservist)
            .collect())
    }

    pub async fn get_reservist(&self, id: i32) -> AppResult<Reservist> {
        reservist::Entity::find_by_id(id)
            .find_with_related(skill::Entity)
            .all(self.conn)
            .await?
            .into_iter()
            .next()
            .map(to_reservist)
            .ok_or_not_found("Reservist")
    }

    pub async fn create_reservist(&self, name: &str, skills: &[i32]) -> AppResult<Reservist> {
        let model = reservist::ActiveModel {
            id: NotSet,
            name: Set(name.to_owned()),
        }
        .insert(self.conn)
        .await?;

        replace_skill_set(self.conn, SkillOwner::Reservist(model.id), skills).await?;
        self.get_reservist(model.id).await
    }

    pub async fn update_reservist(
        &self,
        id: i32,
        name: &str,
        skills: Option<&[i32]>,
    ) -> AppResult<Reservist> {
        let result = reservist::Entity::update_many()
            .col_expr(reservist::Column::Name, Expr::value(name))
            .filter(reservist::Column::Id.eq(id))
            .exec(self.conn)
            .await?;
        ensure_touched(result.rows_affected, "Reservist")?;

        if let Some(skills) = skills {
            replace_skill_set(self.conn, SkillOwner::Reservist(id), skills).await?;
        }
        self.get_reservist(id).await
    }

    pub async fn delete_reservist(&self, id: i32) -> AppResult<()> {
        let result = reservist::Entity::delete_by_id(id).exec(self.conn).await?;
        ensure_touched(result.rows_affected, "Reservist")
    }

    // =========================================================================
    // Name lookups
    // =========================================================================

    pub async fn ce_summaries(&self, ids: Vec<i32>) -> AppResult<HashMap<i32, Summary>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        Ok(ce::Entity::find()
            .filter(ce::Column::Id.is_in(ids))
            .all(self.conn)
            .await?
            .into_iter()
            .map(|m| (m.id, Summary::from(m)))
            .collect())
    }

    pub async fn sector_summaries(&self, ids: Vec<i32>) -> AppResult<HashMap<i32, Summary>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        Ok(sector::Entity::find()
            .filter(sector::Column::Id.is_in(ids))
            .all(self.conn)
            .await?
            .into_iter()
            .map(|m| (m.id, Summary { id: m.id, name: m.name }))
            .collect())
    }
}
