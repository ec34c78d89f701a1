//! Create supports table.

use sea_orm_migration::prelude::*;

use super::m20261001_000001_create_pipelines::Pipeline;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Support::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Support::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Support::PipelineId).integer().not_null())
                    .col(ColumnDef::new(Support::SupportCode).string().not_null())
                    .col(ColumnDef::new(Support::SupportLevel).string())
                    .col(ColumnDef::new(Support::PipeRef).string())
                    .col(ColumnDef::new(Support::CupType).string_len(10))
                    .col(
                        ColumnDef::new(Support::AreaType)
                            .string()
                            .not_null()
                            .default("N/A"),
                    )
                    .col(
                        ColumnDef::new(Support::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Support::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Support::Table, Support::PipelineId)
                            .to(Pipeline::Table, Pipeline::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_supports_pipeline_id")
                    .table(Support::Table)
                    .col(Support::PipelineId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Support::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Support {
    #[sea_orm(iden = "supports")]
    Table,
    Id,
    PipelineId,
    SupportCode,
    SupportLevel,
    PipeRef,
    CupType,
    AreaType,
    CreatedAt,
    UpdatedAt,
}
