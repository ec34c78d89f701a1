//! SeaORM database migrations.

pub use sea_orm_migration::prelude::*;

mod m20261001_000001_create_pipelines;
mod m20261001_000002_create_supports;
mod m20261001_000003_create_inspections;
mod m20261001_000004_create_dashboards;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_create_pipelines::Migration),
            Box::new(m20261001_000002_create_supports::Migration),
            Box::new(m20261001_000003_create_inspections::Migration),
            Box::new(m20261001_000004_create_dashboards::Migration),
        ]
    }
}
