pub use sea_orm_migration::prelude::*;

mod m20250216_000001_create_investors_table;
mod m20250216_000002_create_commitments_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250216_000001_create_investors_table::Migration),
            Box::new(m20250216_000002_create_commitments_table::Migration),
        ]
    }
}
