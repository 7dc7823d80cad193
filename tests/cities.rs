mod common;

use axum::http::{header, Method, StatusCode};
use serde_json::{json, Value};

use city_info_api::repository::CityInfoRepository;
use common::{body_bytes, body_json, spawn_app};

fn pagination(response: &axum::response::Response) -> Value {
    let header = response
        .headers()
        .get("x-pagination")
        .expect("X-Pagination header")
        .to_str()
        .unwrap();
    serde_json::from_str(header).unwrap()
}

fn city_names(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn list_cities_returns_page_and_metadata() {
    let app = spawn_app().await;

    let response = app.get("/api/v1/cities?pageSize=5").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        pagination(&response),
        json!({ "totalItemCount": 3, "totalPages": 1, "pageSize": 5, "currentPage": 1 })
    );

    let body = body_json(response).await;
    assert_eq!(city_names(&body), vec!["Antwerp", "New York City", "Paris"]);
    assert!(body[0].get("pointsOfInterest").is_none());
    assert_eq!(body[1]["id"], 1);
}

#[tokio::test]
async fn page_size_is_capped() {
    let app = spawn_app().await;

    let response = app.get("/api/v1/cities?pageSize=500").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(pagination(&response)["pageSize"], 20);
}

#[tokio::test]
async fn second_page_holds_the_rest() {
    let app = spawn_app().await;

    let response = app.get("/api/v1/cities?pageSize=2&pageNumber=2").await;
    let metadata = pagination(&response);
    assert_eq!(metadata["totalPages"], 2);
    assert_eq!(metadata["currentPage"], 2);
    assert_eq!(city_names(&body_json(response).await), vec!["Paris"]);
}

#[tokio::test]
async fn page_number_below_one_is_rejected() {
    let app = spawn_app().await;

    let response = app.get("/api/v1/cities?pageNumber=0").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.get("/api/v1/cities?pageSize=0").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn page_beyond_any_offset_is_empty() {
    let app = spawn_app().await;

    for page_number in ["1000000000000000000", "576460752303423488"] {
        let response = app
            .get(&format!("/api/v1/cities?pageSize=20&pageNumber={page_number}"))
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let metadata = pagination(&response);
        assert_eq!(metadata["totalItemCount"], 3);
        assert_eq!(metadata["currentPage"].to_string(), page_number);
        assert_eq!(body_json(response).await, json!([]));
    }
}

#[tokio::test]
async fn malformed_query_and_path_are_problem_documents() {
    let app = spawn_app().await;

    for uri in [
        "/api/v1/cities/1?includePointsOfInterest=yes",
        "/api/v1/cities/abc",
        "/api/v1/cities?pageNumber=first",
    ] {
        let response = app.get(uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/problem+json",
            "{uri}"
        );
        assert_eq!(body_json(response).await["status"], 400);
    }
}

#[tokio::test]
async fn unknown_path_is_not_found_without_token() {
    let app = spawn_app().await;

    let response = app
        .send(
            axum::http::Request::builder()
                .uri("/api/v1/nope")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn errors_stay_problem_json_for_xml_clients() {
    let app = spawn_app().await;

    let response = app
        .get_with_accept("/api/v1/cities/99", "application/xml")
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/problem+json"
    );
    assert_eq!(body_json(response).await["status"], 404);
}

#[tokio::test]
async fn list_cities_filters_by_name_and_search() {
    let app = spawn_app().await;

    let response = app.get("/api/v1/cities?name=Paris").await;
    assert_eq!(pagination(&response)["totalItemCount"], 1);
    assert_eq!(city_names(&body_json(response).await), vec!["Paris"]);

    let response = app.get("/api/v1/cities?searchQuery=tower").await;
    assert_eq!(city_names(&body_json(response).await), vec!["Paris"]);

    let response = app.get("/api/v1/cities?name=Nowhere").await;
    assert_eq!(pagination(&response)["totalItemCount"], 0);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn get_city_without_points() {
    let app = spawn_app().await;

    let response = app.get("/api/v1/cities/2").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["name"], "Antwerp");
    assert!(body.get("pointsOfInterest").is_none());
}

#[tokio::test]
async fn get_city_with_points() {
    let app = spawn_app().await;

    let response = app.get("/api/v1/cities/1?includePointsOfInterest=true").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["name"], "New York City");
    assert_eq!(body["numberOfPointsOfInterest"], 3);
    assert_eq!(body["pointsOfInterest"].as_array().unwrap().len(), 3);
    assert_eq!(body["pointsOfInterest"][0]["name"], "Central Park");
}

#[tokio::test]
async fn get_unknown_city_is_not_found() {
    let app = spawn_app().await;

    let response = app.get("/api/v1/cities/99").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/problem+json"
    );
}

#[tokio::test]
async fn create_city_returns_location() {
    let app = spawn_app().await;

    let response = app
        .send_json(
            Method::POST,
            "/api/v1/cities",
            json!({ "name": "Rome", "description": "The one with the colosseum." }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let location = response.headers()[header::LOCATION].to_str().unwrap().to_string();
    let body = body_json(response).await;
    assert_eq!(body["name"], "Rome");
    assert_eq!(location, format!("/api/v1/cities/{}", body["id"]));

    let response = app.get(&location).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn duplicate_city_is_rejected() {
    let app = spawn_app().await;

    let response = app
        .send_json(Method::POST, "/api/v1/cities", json!({ "name": "Paris" }))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let repo = CityInfoRepository::begin(&app.db).await.unwrap();
    let (_, metadata) = repo.list_cities(Some("Paris"), None, 1, 10).await.unwrap();
    assert_eq!(metadata.total_item_count, 1);
}

#[tokio::test]
async fn invalid_city_lists_field_errors() {
    let app = spawn_app().await;

    let response = app
        .send_json(Method::POST, "/api/v1/cities", json!({ "name": "" }))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["errors"]["name"].is_array());
}

#[tokio::test]
async fn cities_require_a_token() {
    let app = spawn_app().await;

    let response = app
        .send(
            axum::http::Request::builder()
                .uri("/api/v1/cities")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .send(
            axum::http::Request::builder()
                .uri("/api/v1/cities")
                .header(header::AUTHORIZATION, "Bearer not-a-token")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn xml_is_served_when_asked_for() {
    let app = spawn_app().await;

    let response = app
        .get_with_accept("/api/v1/cities/3", "application/xml")
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("application/xml"));

    let body = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(body.starts_with("<City>"));
    assert!(body.contains("<name>Paris</name>"));
}

#[tokio::test]
async fn unsupported_accept_is_not_acceptable() {
    let app = spawn_app().await;

    let response = app.get_with_accept("/api/v1/cities/3", "text/html").await;
    assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
}
