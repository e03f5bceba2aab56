//! `reservist_skills` link table.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "reservist_skills")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub reservist_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub skill_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::reservist::Entity",
        from = "Column::ReservistId",
        to = "super::reservist::Column::Id",
        on_delete = "Cascade"
    )]
    Reservist,
    #[sea_orm(
        belongs_to = "super::skill::Entity",
        from = "Column::SkillId",
        to = "super::skill::Column::Id",
        on_delete = "Cascade"
    )]
    Skill,
}

impl ActiveModelBehavior for ActiveModel {}
