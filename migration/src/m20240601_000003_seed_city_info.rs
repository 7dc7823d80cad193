use sea_orm_migration::{prelude::*, sea_orm::DbBackend};

use super::m20240601_000001_create_cities::City;
use super::m20240601_000002_create_points_of_interest::PointOfInterest;

#[derive(DeriveMigrationName)]
pub struct Migration;

const CITIES: [(i32, &str, &str); 3] = [
    (1, "New York City", "The one with that big park."),
    (2, "Antwerp", "The one with the cathedral that was never really finished."),
    (3, "Paris", "The one with that big tower."),
];

const POINTS_OF_INTEREST: [(i32, i32, &str, &str); 7] = [
    (1, 1, "Central Park", "A very tall building."),
    (2, 1, "Empire State Building", "A very tall building."),
    (3, 1, "The Cloisters", "The Met Cloisters."),
    (
        4,
        2,
        "Cathedral of Our Lady",
        "A Gothic style cathedral, conceived by architects Jan and Pieter Appelmans.",
    ),
    (5, 2, "Antwerp Central Station", "The the finest example of railway architecture in Belgium."),
    (
        6,
        3,
        "Eiffel Tower",
        "A wrought iron lattice tower on the Champ de Mars, named after engineer Gustave Eiffel.",
    ),
    (
        7,
        3,
        "The Louvre",
        "The world's largest art museum and a historic monument in Paris, France.",
    ),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut cities = Query::insert()
            .into_table(City::Table)
            .columns([City::Id, City::Name, City::Description])
            .to_owned();
        for (id, name, description) in CITIES {
            cities.values_panic([id.into(), name.into(), description.into()]);
        }
        manager.exec_stmt(cities).await?;

        let mut points = Query::insert()
            .into_table(PointOfInterest::Table)
            .columns([
                PointOfInterest::Id,
                PointOfInterest::CityId,
                PointOfInterest::Name,
                PointOfInterest::Description,
            ])
            .to_owned();
        for (id, city_id, name, description) in POINTS_OF_INTEREST {
            points.values_panic([id.into(), city_id.into(), name.into(), description.into()]);
        }
        manager.exec_stmt(points).await?;

        // Explicit ids leave Postgres sequences behind the seeded rows.
        if manager.get_database_backend() == DbBackend::Postgres {
            let db = manager.get_connection();
            db.execute_unprepared(
                "SELECT setval(pg_get_serial_sequence('city', 'id'), (SELECT MAX(id) FROM city))",
            )
            .await?;
            db.execute_unprepared(
                "SELECT setval(pg_get_serial_sequence('point_of_interest', 'id'), \
                 (SELECT MAX(id) FROM point_of_interest))",
            )
            .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .exec_stmt(Query::delete().from_table(PointOfInterest::Table).to_owned())
            .await?;
        manager
            .exec_stmt(Query::delete().from_table(City::Table).to_owned())
            .await
    }
}
