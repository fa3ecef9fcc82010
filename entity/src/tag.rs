use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tag")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::work_tag::Entity")]
    WorkTag,
}

impl Related<super::work_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkTag.def()
    }
}

impl Related<super::work::Entity> for Entity {
    fn to() -> RelationDef {
        super::work_tag::Relation::Work.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::work_tag::Relation::Tag.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
