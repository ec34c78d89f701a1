//! Create pipelines table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Pipeline::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Pipeline::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Pipeline::PipelineName).string().not_null())
                    .col(ColumnDef::new(Pipeline::Location).string())
                    .col(ColumnDef::new(Pipeline::Engineer).string())
                    .col(
                        ColumnDef::new(Pipeline::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Pipeline::Area).string())
                    .col(ColumnDef::new(Pipeline::SystemName).string())
                    .col(ColumnDef::new(Pipeline::DrawingIsoNumber).string())
                    .col(ColumnDef::new(Pipeline::DesignPressureBarMin).double())
                    .col(ColumnDef::new(Pipeline::DesignPressureBarMax).double())
                    .col(ColumnDef::new(Pipeline::DesignTempCMin).double())
                    .col(ColumnDef::new(Pipeline::DesignTempCMax).double())
                    .col(ColumnDef::new(Pipeline::ContentMaterial).string())
                    .col(ColumnDef::new(Pipeline::MaterialGrade).string())
                    .col(ColumnDef::new(Pipeline::MaterialLining).string())
                    .col(ColumnDef::new(Pipeline::Diameter).string())
                    .col(ColumnDef::new(Pipeline::PipeSchedule).string())
                    .col(ColumnDef::new(Pipeline::PipeThickness).double())
                    .col(ColumnDef::new(Pipeline::Insulation).string_len(3))
                    .col(ColumnDef::new(Pipeline::DesignCode).string())
                    .col(ColumnDef::new(Pipeline::CorrAllowance).double())
                    .col(ColumnDef::new(Pipeline::OperationPressure).double())
                    .col(ColumnDef::new(Pipeline::OperationTemp).double())
                    .col(ColumnDef::new(Pipeline::Painting).string())
                    .col(
                        ColumnDef::new(Pipeline::Images)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(
                        ColumnDef::new(Pipeline::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Pipeline::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Dashboard time windows filter on creation time
        manager
            .create_index(
                Index::create()
                    .name("idx_pipelines_created_at")
                    .table(Pipeline::Table)
                    .col(Pipeline::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Pipeline::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Pipeline {
    #[sea_orm(iden = "pipelines")]
    Table,
    Id,
    PipelineName,
    Location,
    Engineer,
    Status,
    Area,
    SystemName,
    DrawingIsoNumber,
    DesignPressureBarMin,
    DesignPressureBarMax,
    #[sea_orm(iden = "design_temp_c_min")]
    DesignTempCMin,
    #[sea_orm(iden = "design_temp_c_max")]
    DesignTempCMax,
    ContentMaterial,
    MaterialGrade,
    MaterialLining,
    Diameter,
    PipeSchedule,
    PipeThickness,
    Insulation,
    DesignCode,
    CorrAllowance,
    OperationPressure,
    OperationTemp,
    Painting,
    Images,
    CreatedAt,
    UpdatedAt,
}
