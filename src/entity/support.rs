//! Support entity for SeaORM.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "supports")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub pipeline_id: i32,
    pub support_code: String,
    pub support_level: Option<String>,
    pub pipe_ref: Option<String>,
    pub cup_type: Option<String>,
    pub area_type: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pipeline::Entity",
        from = "Column::PipelineId",
        to = "super::pipeline::Column::Id",
        on_delete = "Cascade"
    )]
    Pipeline,
    #[sea_orm(has_many = "super::inspection::Entity")]
    Inspections,
}

impl Related<super::pipeline::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pipeline.def()
    }
}

impl Related<super::inspection::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Inspections.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
