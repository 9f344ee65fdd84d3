pub use sea_orm_migration::prelude::*;

mod m20250601_000001_create_schema_and_base_db_setup;
mod m20250601_000002_base_migration;
mod m20250715_000000_add_meeting_sorting_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_schema_and_base_db_setup::Migration),
            Box::new(m20250601_000002_base_migration::Migration),
            Box::new(m20250715_000000_add_meeting_sorting_indexes::Migration),
        ]
    }
}
