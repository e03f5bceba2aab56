use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "reservists")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::skill::Entity> for Entity {
    fn to() -> RelationDef {
        super::reservist_skill::Relation::Skill.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::reservist_skill::Relation::Reservist.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
