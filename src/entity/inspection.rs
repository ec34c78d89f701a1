//! Inspection entity for SeaORM.
//!
//! Question answers live in `inspection_answer`, one row per question.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "inspections")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub support_id: i32,
    /// Inspector (opaque user reference).
    pub inspector: Option<String>,
    pub inspection_date: DateTimeUtc,
    pub status: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::support::Entity",
        from = "Column::SupportId",
        to = "super::support::Column::Id",
        on_delete = "Cascade"
    )]
    Support,
    #[sea_orm(has_many = "super::inspection_answer::Entity")]
    Answers,
}

impl Related<super::support::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Support.def()
    }
}

impl Related<super::inspection_answer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Answers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
