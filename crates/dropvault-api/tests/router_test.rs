//! Router-level tests.
//!
//! These exercise the request paths that resolve before any AWS call:
//! input validation, authentication gating, and error rendering. The SDK
//! clients are constructed lazily, so building the full state never
//! touches the network.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use dropvault_api::middleware::rate_limit::RateLimiter;
use dropvault_api::router::build_router;
use dropvault_api::state::AppState;
use dropvault_core::config::AppConfig;
use dropvault_core::traits::ObjectStore;

fn test_app() -> Router {
    let mut config: AppConfig = serde_json::from_str("{}").expect("default config");
    config.storage.bucket = "test-bucket".to_string();
    config.rate_limit.enabled = false;

    let dynamo = dropvault_database::client::build_client(&config.aws);
    let file_repo = Arc::new(dropvault_database::repositories::FileRepository::new(
        dynamo.clone(),
        config.tables.files.clone(),
    ));
    let user_repo = Arc::new(dropvault_database::repositories::UserRepository::new(
        dynamo,
        config.tables.users.clone(),
        config.tables.users_email_index.clone(),
    ));

    let object_store: Arc<dyn ObjectStore> = Arc::new(
        dropvault_storage::S3ObjectStore::new(&config.aws, &config.storage)
            .expect("object store"),
    );

    let password_hasher = Arc::new(dropvault_auth::PasswordHasher::new());
    let jwt_encoder = Arc::new(dropvault_auth::JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(dropvault_auth::JwtDecoder::new(&config.auth));

    let upload_service = Arc::new(dropvault_service::file::UploadService::new(
        Arc::clone(&file_repo),
        Arc::clone(&object_store),
        config.storage.clone(),
    ));
    let download_service = Arc::new(dropvault_service::file::DownloadService::new(
        Arc::clone(&file_repo),
        Arc::clone(&object_store),
        config.storage.clone(),
    ));
    let user_service = Arc::new(dropvault_service::user::UserService::new(
        Arc::clone(&user_repo),
        Arc::clone(&password_hasher),
        Arc::clone(&jwt_encoder),
        &config.auth,
    ));

    let rate_limiter = RateLimiter::from_config(&config.rate_limit);

    build_router(AppState {
        config: Arc::new(config),
        object_store,
        file_repo,
        user_repo,
        jwt_encoder,
        jwt_decoder,
        password_hasher,
        upload_service,
        download_service,
        user_service,
        rate_limiter,
    })
}

async fn send(app: Router, method: &str, path: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .oneshot(builder.body(body).expect("request"))
        .await
        .expect("response");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body");
    let value: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn landing_page_renders() {
    let response = test_app()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Transfer Complete"));
}

#[tokio::test]
async fn upload_requires_authentication() {
    let (status, body) = send(test_app(), "POST", "/api/files/upload", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED, "{body:?}");
    assert_eq!(body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn upload_rejects_garbage_token() {
    let response = test_app()
        .oneshot(
            Request::post("/api/files/upload")
                .header("authorization", "Bearer not-a-jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn download_rejects_empty_identifier() {
    let (status, body) = send(
        test_app(),
        "POST",
        "/api/files/download",
        Some(json!({ "hashed_secret": "", "shared_secret": "s1" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body:?}");
    assert_eq!(body["error"], "VALIDATION");
}

#[tokio::test]
async fn download_rejects_empty_secret() {
    let (status, _) = send(
        test_app(),
        "POST",
        "/api/files/download/url",
        Some(json!({ "hashed_secret": "abc123", "shared_secret": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn register_rejects_invalid_email() {
    let (status, body) = send(
        test_app(),
        "POST",
        "/api/auth/register",
        Some(json!({ "name": "Ada", "email": "not-an-email", "password": "longenough" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body:?}");
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (status, _) = send(test_app(), "GET", "/api/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
