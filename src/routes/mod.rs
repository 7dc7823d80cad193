use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

use crate::handlers::{auth, cities, files, points_of_interest};
use crate::middleware::auth::auth_middleware;
use crate::AppState;

/// Multipart framing on top of the largest accepted file.
const UPLOAD_BODY_LIMIT: usize = files::MAX_UPLOAD_BYTES + 64 * 1024;

pub fn create_router(state: AppState) -> Router {
    // Protected routes (require a bearer token)
    let city_routes = Router::new()
        .route("/cities", get(cities::list_cities).post(cities::create_city))
        .route("/cities/{city_id}", get(cities::get_city));

    let point_of_interest_routes = Router::new()
        .route(
            "/cities/{city_id}/pointsofinterest",
            get(points_of_interest::list_points_of_interest)
                .post(points_of_interest::create_point_of_interest),
        )
        .route(
            "/cities/{city_id}/pointsofinterest/{point_of_interest_id}",
            get(points_of_interest::get_point_of_interest)
                .put(points_of_interest::update_point_of_interest)
                .patch(points_of_interest::partially_update_point_of_interest)
                .delete(points_of_interest::delete_point_of_interest),
        );

    let v1_routes = Router::new()
        .merge(city_routes)
        .merge(point_of_interest_routes.clone())
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Version 2 only revises points of interest
    let v2_routes = point_of_interest_routes
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let file_routes = Router::new()
        .route("/api/files", get(files::get_file).post(files::upload_file))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        // Public route
        .route("/api/v1/authentication/authenticate", post(auth::authenticate))
        .nest("/api/v1", v1_routes)
        .nest("/api/v2", v2_routes)
        .merge(file_routes)
        .with_state(state)
}
