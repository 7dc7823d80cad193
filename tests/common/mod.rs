#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request},
    response::Response,
    Router,
};
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use city_info_api::{
    config::Config,
    db,
    routes,
    services::RecordingMailService,
    utils::jwt::{create_token, CityInfoUser},
    AppState,
};

pub const TEST_SECRET: &str = "Y2l0eS1pbmZvLXRlc3Qtc2lnbmluZy1rZXktMDEyMzQ1Njc4OWFiY2RlZg==";

pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
    pub mailer: Arc<RecordingMailService>,
    pub config: Config,
    pub token: String,
}

pub fn test_config() -> Config {
    let scratch = std::env::temp_dir().join(format!("city-info-api-{}", Uuid::new_v4()));

    Config {
        database_url: "sqlite::memory:".to_string(),
        auth_secret: TEST_SECRET.to_string(),
        auth_issuer: "https://localhost:7169".to_string(),
        auth_audience: "cityinfoapi".to_string(),
        jwt_expiration_hours: 1,
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        file_download_path: scratch.join("getting-started-with-rest-slides.pdf"),
        upload_dir: scratch.join("uploads"),
        mail_to: "admin@mycompany.com".to_string(),
        mail_from: "noreply@mycompany.com".to_string(),
    }
}

/// Router over a freshly migrated in-memory database holding the demo data.
pub async fn spawn_app() -> TestApp {
    let config = test_config();

    let db = db::connect(&config).await.expect("connect to in-memory database");
    db::migrate(&db).await.expect("run migrations");

    let mailer = Arc::new(RecordingMailService::default());
    let state = AppState {
        db: db.clone(),
        config: config.clone(),
        mailer: mailer.clone(),
    };

    let token = create_token(
        &CityInfoUser {
            user_id: 1,
            user_name: "tester".to_string(),
            first_name: "Rahim".to_string(),
            last_name: "Pamelo".to_string(),
            city: "Antwerp".to_string(),
        },
        &config,
    )
    .expect("sign test token");

    TestApp {
        router: routes::create_router(state),
        db,
        mailer,
        config,
        token,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    fn authorized(&self, method: Method, uri: &str) -> axum::http::request::Builder {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.send(self.authorized(Method::GET, uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn get_with_accept(&self, uri: &str, accept: &str) -> Response {
        self.send(
            self.authorized(Method::GET, uri)
                .header(header::ACCEPT, accept)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn send_json(&self, method: Method, uri: &str, body: Value) -> Response {
        self.send(
            self.authorized(method, uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn send_patch(&self, uri: &str, body: Value) -> Response {
        self.send(
            self.authorized(Method::PATCH, uri)
                .header(header::CONTENT_TYPE, "application/json-patch+json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn delete(&self, uri: &str) -> Response {
        self.send(self.authorized(Method::DELETE, uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn upload(&self, content_type: &str, file_name: &str, data: &[u8]) -> Response {
        let boundary = "city-info-boundary";
        let mut body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        self.send(
            self.authorized(Method::POST, "/api/files")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
    }

    pub fn upload_dir(&self) -> PathBuf {
        self.config.upload_dir.clone()
    }
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body")
        .to_vec()
}

pub async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).expect("JSON body")
}
