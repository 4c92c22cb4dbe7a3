pub use sea_orm_migration::prelude::*;

pub mod entities;
mod m20261016_000001_links_table;
mod m20261016_000002_files_table;
mod m20261016_000003_activity_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261016_000001_links_table::Migration),
            Box::new(m20261016_000002_files_table::Migration),
            Box::new(m20261016_000003_activity_table::Migration),
        ]
    }
}
