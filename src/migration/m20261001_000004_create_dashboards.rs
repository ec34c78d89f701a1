//! Create dashboards table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Dashboard::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Dashboard::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Dashboard::Name)
                            .string()
                            .not_null()
                            .default("Main Dashboard"),
                    )
                    .col(
                        ColumnDef::new(Dashboard::FilterOption)
                            .string_len(10)
                            .not_null()
                            .default("all"),
                    )
                    .col(
                        ColumnDef::new(Dashboard::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Dashboard::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Dashboard::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Dashboard {
    #[sea_orm(iden = "dashboards")]
    Table,
    Id,
    Name,
    FilterOption,
    CreatedAt,
    UpdatedAt,
}
