use sea_orm::entity::prelude::*;

use crate::domain::Skill;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "skills")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Skill {
    fn from(model: Model) -> Self {
        Skill {
            id: model.id,
            name: model.name,
        }
    }
}
