use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "sectors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

/// Required skills, through `sector_required_skills`
impl Related<super::skill::Entity> for Entity {
    fn to() -> RelationDef {
        super::sector_required_skill::Relation::Skill.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::sector_required_skill::Relation::Sector.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
