//! Planning entity. Shift and status are stored as their wire strings.

use sea_orm::entity::prelude::*;

use crate::domain::Planning;
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "plannings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub date: Date,
    pub week: i32,
    pub year: i32,
    pub shift: String,
    pub ce_id: Option<i32>,
    pub sector_id: Option<i32>,
    pub employee_id: Option<i32>,
    pub status: String,
    pub substitute_id: Option<i32>,
    pub is_ce_slot: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Planning {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let shift = model
            .shift
            .parse()
            .map_err(|_| AppError::internal(format!("Planning {} has shift '{}'", model.id, model.shift)))?;
        let status = model
            .status
            .parse()
            .map_err(|_| AppError::internal(format!("Planning {} has status '{}'", model.id, model.status)))?;

        Ok(Planning {
            id: model.id,
            date: model.date,
            week: model.week,
            year: model.year,
            shift,
            ce_id: model.ce_id,
            sector_id: model.sector_id,
            employee_id: model.employee_id,
            status,
            substitute_id: model.substitute_id,
            ce_slot: model.is_ce_slot,
        })
    }
}
