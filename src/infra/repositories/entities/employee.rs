//! Employee entity. Work-cell and sector are nullable so that deleting
//! either leaves the employee unassigned rather than dangling.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub ce_id: Option<i32>,
    pub sector_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::ce::Entity",
        from = "Column::CeId",
        to = "super::ce::Column::Id",
        on_delete = "SetNull"
    )]
    Ce,
    #[sea_orm(
        belongs_to = "super::sector::Entity",
        from = "Column::SectorId",
        to = "super::sector::Column::Id",
        on_delete = "SetNull"
    )]
    Sector,
}

impl Related<super::ce::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ce.def()
    }
}

impl Related<super::sector::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sector.def()
    }
}

impl Related<super::skill::Entity> for Entity {
    fn to() -> RelationDef {
        super::employee_skill::Relation::Skill.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::employee_skill::Relation::Employee.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
