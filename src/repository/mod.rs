//! Request-scoped access to cities and their points of interest.
//!
//! A `CityInfoRepository` wraps one database transaction. Reads and writes made
//! through it are only persisted by `save_changes`; dropping the repository
//! without saving rolls everything back.

use axum::{extract::FromRequestParts, http::request::Parts};
use sea_orm::{
    sea_query::{Alias, Expr, Func, SimpleExpr},
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, DbBackend, DbErr, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::entities::{city, point_of_interest};
use crate::error::AppError;
use crate::models::PaginationMetadata;
use crate::AppState;

pub struct CityInfoRepository {
    txn: DatabaseTransaction,
}

impl CityInfoRepository {
    pub async fn begin(db: &DatabaseConnection) -> Result<Self, DbErr> {
        Ok(Self {
            txn: db.begin().await?,
        })
    }

    /// Filtered, name-ordered page of cities plus metadata for the whole
    /// filtered set.
    pub async fn list_cities(
        &self,
        name: Option<&str>,
        search_query: Option<&str>,
        page_number: u64,
        page_size: u64,
    ) -> Result<(Vec<city::Model>, PaginationMetadata), DbErr> {
        let mut query = city::Entity::find();

        if let Some(name) = name.filter(|n| !n.is_empty()) {
            query = query.filter(city::Column::Name.eq(name.trim()));
        }

        if let Some(search) = search_query.filter(|q| !q.is_empty()) {
            let search = search.trim();
            let backend = self.txn.get_database_backend();
            query = query.filter(
                Condition::any()
                    .add(contains(backend, city::Column::Name, search))
                    .add(contains(backend, city::Column::Description, search)),
            );
        }

        let total_item_count = query.clone().count(&self.txn).await?;
        let metadata = PaginationMetadata::new(total_item_count, page_size, page_number);

        let Some(offset) = metadata.offset() else {
            return Ok((Vec::new(), metadata));
        };

        let cities = query
            .order_by_asc(city::Column::Name)
            .offset(offset)
            .limit(page_size)
            .all(&self.txn)
            .await?;

        Ok((cities, metadata))
    }

    /// The city and, when asked for, its points of interest ordered by id.
    pub async fn get_city(
        &self,
        city_id: i32,
        include_points_of_interest: bool,
    ) -> Result<Option<(city::Model, Vec<point_of_interest::Model>)>, DbErr> {
        let Some(city) = city::Entity::find_by_id(city_id).one(&self.txn).await? else {
            return Ok(None);
        };

        let points = if include_points_of_interest {
            city.find_related(point_of_interest::Entity)
                .order_by_asc(point_of_interest::Column::Id)
                .all(&self.txn)
                .await?
        } else {
            Vec::new()
        };

        Ok(Some((city, points)))
    }

    pub async fn city_exists(&self, city_id: i32) -> Result<bool, DbErr> {
        let count = city::Entity::find_by_id(city_id).count(&self.txn).await?;
        Ok(count > 0)
    }

    pub async fn city_exists_by_name(&self, name: &str) -> Result<bool, DbErr> {
        let count = city::Entity::find()
            .filter(city::Column::Name.eq(name))
            .count(&self.txn)
            .await?;
        Ok(count > 0)
    }

    /// Inserts the city and reads it back by its generated id.
    pub async fn add_city(&self, city: city::ActiveModel) -> Result<city::Model, DbErr> {
        let inserted = city::Entity::insert(city).exec(&self.txn).await?;

        city::Entity::find_by_id(inserted.last_insert_id)
            .one(&self.txn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("city {}", inserted.last_insert_id)))
    }

    pub async fn list_points_of_interest(
        &self,
        city_id: i32,
    ) -> Result<Vec<point_of_interest::Model>, DbErr> {
        point_of_interest::Entity::find()
            .filter(point_of_interest::Column::CityId.eq(city_id))
            .order_by_asc(point_of_interest::Column::Id)
            .all(&self.txn)
            .await
    }

    pub async fn get_point_of_interest(
        &self,
        city_id: i32,
        point_of_interest_id: i32,
    ) -> Result<Option<point_of_interest::Model>, DbErr> {
        point_of_interest::Entity::find_by_id(point_of_interest_id)
            .filter(point_of_interest::Column::CityId.eq(city_id))
            .one(&self.txn)
            .await
    }

    /// Attaches the point to `city_id`, whatever city the model carried.
    pub async fn add_point_of_interest(
        &self,
        city_id: i32,
        mut point_of_interest: point_of_interest::ActiveModel,
    ) -> Result<point_of_interest::Model, DbErr> {
        point_of_interest.city_id = Set(city_id);
        point_of_interest.insert(&self.txn).await
    }

    pub async fn update_point_of_interest(
        &self,
        point_of_interest: point_of_interest::ActiveModel,
    ) -> Result<point_of_interest::Model, DbErr> {
        point_of_interest.update(&self.txn).await
    }

    pub async fn delete_point_of_interest(
        &self,
        point_of_interest: &point_of_interest::Model,
    ) -> Result<(), DbErr> {
        point_of_interest::Entity::delete_by_id(point_of_interest.id)
            .exec(&self.txn)
            .await?;
        Ok(())
    }

    /// Commits the unit of work.
    pub async fn save_changes(self) -> Result<bool, DbErr> {
        self.txn.commit().await?;
        Ok(true)
    }
}

/// Case-sensitive substring match; SQL `LIKE` folds ASCII case on SQLite.
fn contains(backend: DbBackend, column: city::Column, needle: &str) -> SimpleExpr {
    let position = match backend {
        DbBackend::Postgres => Func::cust(Alias::new("strpos")),
        _ => Func::cust(Alias::new("instr")),
    };
    Expr::expr(position.arg(Expr::col(column)).arg(needle.to_string())).gt(0)
}

impl FromRequestParts<AppState> for CityInfoRepository {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(CityInfoRepository::begin(&state.db).await?)
    }
}
