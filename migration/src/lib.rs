pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_cities;
mod m20240601_000002_create_points_of_interest;
mod m20240601_000003_seed_city_info;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_cities::Migration),
            Box::new(m20240601_000002_create_points_of_interest::Migration),
            Box::new(m20240601_000003_seed_city_info::Migration),
        ]
    }
}
