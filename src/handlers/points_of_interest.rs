use axum::{
    extract::{OriginalUri, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use json_patch::Patch;
use sea_orm::{DbErr, SqlErr};

use crate::entities::point_of_interest;
use crate::error::{AppError, AppResult};
use crate::models::{PointOfInterestDto, PointOfInterestForCreationDto, PointOfInterestForUpdateDto};
use crate::repository::CityInfoRepository;
use crate::utils::extract::{JsonBody, PathParams, ValidatedJson};
use crate::utils::negotiate::{Negotiated, ResponseFormat};
use crate::utils::patch::apply_patch;
use crate::AppState;

async fn ensure_city_exists(repo: &CityInfoRepository, city_id: i32) -> AppResult<()> {
    if !repo.city_exists(city_id).await? {
        tracing::info!(
            "City with id {} wasn't found when accessing points of interest.",
            city_id
        );
        return Err(city_not_found(city_id));
    }
    Ok(())
}

async fn find_point_of_interest(
    repo: &CityInfoRepository,
    city_id: i32,
    point_of_interest_id: i32,
) -> AppResult<point_of_interest::Model> {
    ensure_city_exists(repo, city_id).await?;

    repo.get_point_of_interest(city_id, point_of_interest_id)
        .await?
        .ok_or_else(|| {
            tracing::info!(
                "Point of interest with id {} wasn't found when accessing points of interest.",
                point_of_interest_id
            );
            AppError::NotFound(format!(
                "Point of interest with id {} wasn't found",
                point_of_interest_id
            ))
        })
}

fn city_not_found(city_id: i32) -> AppError {
    AppError::NotFound(format!("City with id {} wasn't found", city_id))
}

/// List the points of interest of a city
pub async fn list_points_of_interest(
    format: ResponseFormat,
    repo: CityInfoRepository,
    PathParams(city_id): PathParams<i32>,
) -> AppResult<Response> {
    let listed = async {
        ensure_city_exists(&repo, city_id).await?;
        Ok::<_, AppError>(repo.list_points_of_interest(city_id).await?)
    }
    .await;

    let points = match listed {
        Ok(points) => points,
        Err(AppError::Database(e)) => {
            tracing::error!(
                error = %e,
                "Exception while getting points of interest for city with id {}",
                city_id
            );
            return Err(AppError::Internal(
                "Listing points of interest failed".to_string(),
            ));
        }
        Err(other) => return Err(other),
    };

    let body: Vec<PointOfInterestDto> = points.into_iter().map(PointOfInterestDto::from).collect();
    Ok(Negotiated::list(format, "PointsOfInterest", "PointOfInterest", body).into_response())
}

/// Get a single point of interest of a city
pub async fn get_point_of_interest(
    format: ResponseFormat,
    repo: CityInfoRepository,
    PathParams((city_id, point_of_interest_id)): PathParams<(i32, i32)>,
) -> AppResult<Response> {
    let point = find_point_of_interest(&repo, city_id, point_of_interest_id).await?;

    Ok(Negotiated::new(format, "PointOfInterest", PointOfInterestDto::from(point)).into_response())
}

/// Add a point of interest to a city
pub async fn create_point_of_interest(
    format: ResponseFormat,
    OriginalUri(uri): OriginalUri,
    repo: CityInfoRepository,
    PathParams(city_id): PathParams<i32>,
    ValidatedJson(payload): ValidatedJson<PointOfInterestForCreationDto>,
) -> AppResult<Response> {
    ensure_city_exists(&repo, city_id).await?;

    let point = repo
        .add_point_of_interest(city_id, payload.into_active_model(city_id))
        .await
        .map_err(|e| missing_city(e, city_id))?;
    repo.save_changes().await.map_err(|e| missing_city(e, city_id))?;

    let location = format!("{}/{}", uri.path().trim_end_matches('/'), point.id);
    Ok((
        [(header::LOCATION, location)],
        Negotiated::new(format, "PointOfInterest", PointOfInterestDto::from(point))
            .with_status(StatusCode::CREATED),
    )
        .into_response())
}

/// Replace every mutable field of a point of interest
pub async fn update_point_of_interest(
    repo: CityInfoRepository,
    PathParams((city_id, point_of_interest_id)): PathParams<(i32, i32)>,
    ValidatedJson(payload): ValidatedJson<PointOfInterestForUpdateDto>,
) -> AppResult<StatusCode> {
    let point = find_point_of_interest(&repo, city_id, point_of_interest_id).await?;

    repo.update_point_of_interest(payload.apply_to(point)).await?;
    repo.save_changes().await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Apply a JSON Patch document to a point of interest
pub async fn partially_update_point_of_interest(
    repo: CityInfoRepository,
    PathParams((city_id, point_of_interest_id)): PathParams<(i32, i32)>,
    JsonBody(patch): JsonBody<Patch>,
) -> AppResult<StatusCode> {
    let point = find_point_of_interest(&repo, city_id, point_of_interest_id).await?;

    let to_patch = PointOfInterestForUpdateDto::from(&point);
    let patched = apply_patch(&to_patch, &patch)?;

    repo.update_point_of_interest(patched.apply_to(point)).await?;
    repo.save_changes().await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a point of interest and notify by mail
pub async fn delete_point_of_interest(
    State(state): State<AppState>,
    repo: CityInfoRepository,
    PathParams((city_id, point_of_interest_id)): PathParams<(i32, i32)>,
) -> AppResult<StatusCode> {
    let point = find_point_of_interest(&repo, city_id, point_of_interest_id).await?;

    repo.delete_point_of_interest(&point).await?;
    repo.save_changes().await?;

    state.mailer.send(
        "Point of interest deleted.",
        &format!(
            "Point of interest {} with id {} was deleted.",
            point.name, point.id
        ),
    );

    Ok(StatusCode::NO_CONTENT)
}

/// The city can vanish between the existence check and the insert.
fn missing_city(err: DbErr, city_id: i32) -> AppError {
    match err.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => city_not_found(city_id),
        _ => AppError::Database(err),
    }
}
