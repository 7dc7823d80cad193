use axum::{
    extract::OriginalUri,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::models::{CityDto, CityWithoutPointsOfInterestDto, CreateCityDto};
use crate::repository::CityInfoRepository;
use crate::utils::extract::{PathParams, QueryParams, ValidatedJson};
use crate::utils::negotiate::{Negotiated, ResponseFormat};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitiesQuery {
    pub name: Option<String>,
    pub search_query: Option<String>,
    #[serde(default = "default_page_number")]
    pub page_number: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

fn default_page_number() -> u64 {
    1
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityQuery {
    #[serde(default)]
    pub include_points_of_interest: bool,
}

/// List cities, optionally filtered, one page at a time
pub async fn list_cities(
    format: ResponseFormat,
    repo: CityInfoRepository,
    QueryParams(query): QueryParams<CitiesQuery>,
) -> AppResult<Response> {

    if query.page_number < 1 {
        return Err(AppError::field("pageNumber", "The page number must be at least 1."));
    }
    if query.page_size < 1 {
        return Err(AppError::field("pageSize", "The page size must be at least 1."));
    }
    let page_size = query.page_size.min(MAX_PAGE_SIZE);

    let (cities, metadata) = repo
        .list_cities(
            query.name.as_deref(),
            query.search_query.as_deref(),
            query.page_number,
            page_size,
        )
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Exception while listing cities");
            AppError::Internal("Listing cities failed".to_string())
        })?;

    let pagination = serde_json::to_string(&metadata)
        .map_err(|e| AppError::Internal(format!("Failed to serialize pagination: {}", e)))?;

    let body: Vec<CityWithoutPointsOfInterestDto> =
        cities.into_iter().map(CityWithoutPointsOfInterestDto::from).collect();

    Ok((
        [("X-Pagination", pagination)],
        Negotiated::list(format, "Cities", "City", body),
    )
        .into_response())
}

/// Get a city, with its points of interest when asked for
pub async fn get_city(
    format: ResponseFormat,
    repo: CityInfoRepository,
    PathParams(city_id): PathParams<i32>,
    QueryParams(query): QueryParams<CityQuery>,
) -> AppResult<Response> {
    let (city, points) = repo
        .get_city(city_id, query.include_points_of_interest)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("City with id {} wasn't found", city_id)))?;

    if query.include_points_of_interest {
        return Ok(Negotiated::new(format, "City", CityDto::new(city, points)).into_response());
    }

    Ok(Negotiated::new(format, "City", CityWithoutPointsOfInterestDto::from(city)).into_response())
}

/// Create a city with a name no other city uses
pub async fn create_city(
    format: ResponseFormat,
    OriginalUri(uri): OriginalUri,
    repo: CityInfoRepository,
    ValidatedJson(payload): ValidatedJson<CreateCityDto>,
) -> AppResult<Response> {
    if repo.city_exists_by_name(&payload.name).await? {
        return Err(AppError::BadRequest("City already exists".to_string()));
    }

    let city = repo.add_city(payload.into()).await.map_err(duplicate_name)?;
    repo.save_changes().await.map_err(duplicate_name)?;

    tracing::info!(city_id = city.id, name = %city.name, "City created");

    let location = format!("{}/{}", uri.path().trim_end_matches('/'), city.id);
    Ok((
        [(header::LOCATION, location)],
        Negotiated::new(format, "City", CityWithoutPointsOfInterestDto::from(city))
            .with_status(StatusCode::CREATED),
    )
        .into_response())
}

/// A concurrent insert can slip past the pre-check; the unique index catches it.
fn duplicate_name(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::BadRequest("City already exists".to_string())
        }
        _ => AppError::Database(err),
    }
}
