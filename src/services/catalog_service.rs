//! Catalog service - skills, work-cells, sectors and reservists.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{
    Ce, NameInput, Reservist, ReservistInput, Sector, SectorInput, SectorSkillLink, Skill,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::with_transaction;

#[async_trait]
pub trait CatalogService: Send + Sync {
    // Skills
    async fn list_skills(&self) -> AppResult<Vec<Skill>>;
    async fn create_skill(&self, input: NameInput) -> AppResult<Skill>;
    async fn update_skill(&self, id: i32, input: NameInput) -> AppResult<Skill>;
    async fn delete_skill(&self, id: i32) -> AppResult<()>;

    // Work-cells
    async fn list_ces(&self) -> AppResult<Vec<Ce>>;
    async fn create_ce(&self, input: NameInput) -> AppResult<Ce>;
    async fn update_ce(&self, id: i32, input: NameInput) -> AppResult<Ce>;
    async fn delete_ce(&self, id: i32) -> AppResult<()>;

    // Sectors
    async fn list_sectors(&self) -> AppResult<Vec<Sector>>;
    async fn sector_required_skills(&self) -> AppResult<Vec<SectorSkillLink>>;
    async fn create_sector(&self, input: SectorInput) -> AppResult<Sector>;
    async fn update_sector(&self, id: i32, input: SectorInput) -> AppResult<Sector>;
    async fn delete_sector(&self, id: i32) -> AppResult<()>;

    // Reservists
    async fn list_reservists(&self) -> AppResult<Vec<Reservist>>;
    async fn create_reservist(&self, input: ReservistInput) -> AppResult<Reservist>;
    async fn update_reservist(&self, id: i32, input: ReservistInput) -> AppResult<Reservist>;
    async fn delete_reservist(&self, id: i32) -> AppResult<()>;
}

/// Trimmed, non-empty name
fn clean_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Name is required"));
    }
    Ok(name.to_string())
}

pub struct CatalogManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CatalogManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> CatalogService for CatalogManager<U> {
    // =========================================================================
    // Skills
    // =========================================================================

    async fn list_skills(&self) -> AppResult<Vec<Skill>> {
        self.uow.catalog().list_skills().await
    }

    async fn create_skill(&self, input: NameInput) -> AppResult<Skill> {
        let skill = self.uow.catalog().create_skill(&clean_name(&input.name)?).await?;
        tracing::info!(skill_id = skill.id, name = %skill.name, "Skill created");
        Ok(skill)
    }

    async fn update_skill(&self, id: i32, input: NameInput) -> AppResult<Skill> {
        let skill = self.uow.catalog().rename_skill(id, &clean_name(&input.name)?).await?;
        tracing::info!(skill_id = id, "Skill renamed");
        Ok(skill)
    }

    async fn delete_skill(&self, id: i32) -> AppResult<()> {
        self.uow.catalog().delete_skill(id).await?;
        tracing::info!(skill_id = id, "Skill deleted");
        Ok(())
    }

    // =========================================================================
    // Work-cells
    // =========================================================================

    async fn list_ces(&self) -> AppResult<Vec<Ce>> {
        self.uow.catalog().list_ces().await
    }

    async fn create_ce(&self, input: NameInput) -> AppResult<Ce> {
        let ce = self.uow.catalog().create_ce(&clean_name(&input.name)?).await?;
        tracing::info!(ce_id = ce.id, name = %ce.name, "CE created");
        Ok(ce)
    }

    async fn update_ce(&self, id: i32, input: NameInput) -> AppResult<Ce> {
        let ce = self.uow.catalog().rename_ce(id, &clean_name(&input.name)?).await?;
        tracing::info!(ce_id = id, "CE renamed");
        Ok(ce)
    }

    /// Employees of the cell become unassigned; its planning rows go with it.
    async fn delete_ce(&self, id: i32) -> AppResult<()> {
        self.uow.catalog().delete_ce(id).await?;
        tracing::info!(ce_id = id, "CE deleted");
        Ok(())
    }

    // =========================================================================
    // Sectors
    // =========================================================================

    async fn list_sectors(&self) -> AppResult<Vec<Sector>> {
        self.uow.catalog().list_sectors().await
    }

    async fn sector_required_skills(&self) -> AppResult<Vec<SectorSkillLink>> {
        self.uow.catalog().sector_links().await
    }

    async fn create_sector(&self, input: SectorInput) -> AppResult<Sector> {
        let name = clean_name(&input.name)?;
        let skills = input.required_skills.unwrap_or_default();

        let sector = with_transaction!(self.uow, |ctx| {
            ctx.catalog().create_sector(&name, &skills).await
        })?;

        tracing::info!(sector_id = sector.id, required = sector.required_skills.len(), "Sector created");
        Ok(sector)
    }

    async fn update_sector(&self, id: i32, input: SectorInput) -> AppResult<Sector> {
        let name = clean_name(&input.name)?;
        let skills = input.required_skills;

        let sector = with_transaction!(self.uow, |ctx| {
            ctx.catalog().update_sector(id, &name, skills.as_deref()).await
        })?;

        tracing::info!(sector_id = id, "Sector updated");
        Ok(sector)
    }

    async fn delete_sector(&self, id: i32) -> AppResult<()> {
        self.uow.catalog().delete_sector(id).await?;
        tracing::info!(sector_id = id, "Sector deleted");
        Ok(())
    }

    // =========================================================================
    // Reservists
    // =========================================================================

    async fn list_reservists(&self) -> AppResult<Vec<Reservist>> {
        self.uow.catalog().list_reservists().await
    }

    async fn create_reservist(&self, input: ReservistInput) -> AppResult<Reservist> {
        let name = clean_name(&input.name)?;
        let skills = input.skills.unwrap_or_default();

        let reservist = with_transaction!(self.uow, |ctx| {
            ctx.catalog().create_reservist(&name, &skills).await
        })?;

        tracing::info!(reservist_id = reservist.id, "Reservist created");
        Ok(reservist)
    }

    async fn update_reservist(&self, id: i32, input: ReservistInput) -> AppResult<Reservist> {
        let name = clean_name(&input.name)?;
        let skills = input.skills;

        let reservist = with_transaction!(self.uow, |ctx| {
            ctx.catalog().update_reservist(id, &name, skills.as_deref()).await
        })?;

        tracing::info!(reservist_id = id, "Reservist updated");
        Ok(reservist)
    }

    async fn delete_reservist(&self, id: i32) -> AppResult<()> {
        self.uow.catalog().delete_reservist(id).await?;
        tracing::info!(reservist_id = id, "Reservist deleted");
        Ok(())
    }
}
