//! Create inspections and inspection_answers tables.
//!
//! Each inspection owns nine answer rows, one per standard question.

use sea_orm_migration::prelude::*;

use super::m20261001_000002_create_supports::Support;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Inspection::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Inspection::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Inspection::SupportId).integer().not_null())
                    .col(ColumnDef::new(Inspection::Inspector).string())
                    .col(
                        ColumnDef::new(Inspection::InspectionDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Inspection::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Inspection::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Inspection::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Inspection::Table, Inspection::SupportId)
                            .to(Support::Table, Support::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_inspections_support_id")
                    .table(Inspection::Table)
                    .col(Inspection::SupportId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(InspectionAnswer::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(InspectionAnswer::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(InspectionAnswer::InspectionId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InspectionAnswer::QuestionIndex)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(InspectionAnswer::Condition).string_len(2))
                    .col(ColumnDef::new(InspectionAnswer::Comment).text())
                    .col(ColumnDef::new(InspectionAnswer::Recommendation).text())
                    .col(
                        ColumnDef::new(InspectionAnswer::Images)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(InspectionAnswer::Table, InspectionAnswer::InspectionId)
                            .to(Inspection::Table, Inspection::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_inspection_answers_question")
                    .table(InspectionAnswer::Table)
                    .col(InspectionAnswer::InspectionId)
                    .col(InspectionAnswer::QuestionIndex)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(InspectionAnswer::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Inspection::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Inspection {
    #[sea_orm(iden = "inspections")]
    Table,
    Id,
    SupportId,
    Inspector,
    InspectionDate,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum InspectionAnswer {
    #[sea_orm(iden = "inspection_answers")]
    Table,
    Id,
    InspectionId,
    QuestionIndex,
    Condition,
    Comment,
    Recommendation,
    Images,
}
