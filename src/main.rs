//! DropVault server — secret-gated file sharing over S3 and DynamoDB.
//!
//! Main entry point that wires all crates together and starts the server.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use dropvault_core::config::AppConfig;
use dropvault_core::error::AppError;
use dropvault_core::traits::ObjectStore;

#[tokio::main]
async fn main() {
    let env = std::env::var("DROPVAULT_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting DropVault v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Metadata store clients ───────────────────────────
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

    // ── Step 2: Object store ─────────────────────────────────────
    let object_store: Arc<dyn ObjectStore> = Arc::new(dropvault_storage::S3ObjectStore::new(
        &config.aws,
        &config.storage,
    )?);

    // ── Step 3: Auth primitives ──────────────────────────────────
    let password_hasher = Arc::new(dropvault_auth::PasswordHasher::new());
    let jwt_encoder = Arc::new(dropvault_auth::JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(dropvault_auth::JwtDecoder::new(&config.auth));

    // ── Step 4: Services ─────────────────────────────────────────
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

    // ── Step 5: HTTP server ──────────────────────────────────────
    let rate_limiter =
        dropvault_api::middleware::rate_limit::RateLimiter::from_config(&config.rate_limit);

    let app_state = dropvault_api::state::AppState {
        config: Arc::new(config.clone()),
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
    };

    let app = dropvault_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("DropVault server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    tracing::info!("DropVault server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
