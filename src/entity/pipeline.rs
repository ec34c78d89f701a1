//! Pipeline entity for SeaORM.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "pipelines")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub pipeline_name: String,
    pub location: Option<String>,
    /// Assigned engineer (opaque user reference).
    pub engineer: Option<String>,
    pub status: String,
    pub area: Option<String>,
    pub system_name: Option<String>,
    pub drawing_iso_number: Option<String>,
    pub design_pressure_bar_min: Option<f64>,
    pub design_pressure_bar_max: Option<f64>,
    pub design_temp_c_min: Option<f64>,
    pub design_temp_c_max: Option<f64>,
    pub content_material: Option<String>,
    pub material_grade: Option<String>,
    pub material_lining: Option<String>,
    pub diameter: Option<String>,
    pub pipe_schedule: Option<String>,
    pub pipe_thickness: Option<f64>,
    pub insulation: Option<String>,
    pub design_code: Option<String>,
    pub corr_allowance: Option<f64>,
    pub operation_pressure: Option<f64>,
    pub operation_temp: Option<f64>,
    pub painting: Option<String>,
    /// JSON array of attachment references.
    #[sea_orm(column_type = "Text")]
    pub images: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::support::Entity")]
    Supports,
}

impl Related<super::support::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supports.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
