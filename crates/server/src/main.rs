//! Wedplan server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, middleware};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wedplan_api::{middleware::AppState, router as api_router};
use wedplan_common::{
    Config, GooglePlacesClient, NaverLocalClient, PlaceSearchConfig, PlaceSearchProvider,
};
use wedplan_core::{
    AccountService, CalendarService, CommunityService, DailyLogService, GroupService,
    NoticeService, ScheduleService, VendorService,
};
use wedplan_db::repositories::{
    DailyLogRepository, GroupRepository, NoticeRepository, PostRepository, ProfileRepository,
    TaskRepository, UserRepository, VendorRepository,
};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wedplan=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting wedplan server...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database and run migrations
    let db = wedplan_db::init(&config).await?;
    info!("Connected to database");

    info!("Running database migrations...");
    wedplan_db::migrate(&db).await?;
    info!("Migrations completed");

    // Initialize repositories
    let db = Arc::new(db);
    let user_repo = UserRepository::new(Arc::clone(&db));
    let group_repo = GroupRepository::new(Arc::clone(&db));
    let profile_repo = ProfileRepository::new(Arc::clone(&db));
    let task_repo = TaskRepository::new(Arc::clone(&db));
    let log_repo = DailyLogRepository::new(Arc::clone(&db));
    let vendor_repo = VendorRepository::new(Arc::clone(&db));
    let post_repo = PostRepository::new(Arc::clone(&db));
    let notice_repo = NoticeRepository::new(Arc::clone(&db));

    // Initialize place-search providers; missing credentials simply
    // disable that backend.
    let place_config = PlaceSearchConfig {
        timeout_secs: config.places.timeout_secs,
        ..PlaceSearchConfig::default()
    };
    let mut providers: Vec<Arc<dyn PlaceSearchProvider>> = Vec::new();
    if let Some(google) =
        GooglePlacesClient::new(config.places.google_api_key.clone(), place_config.clone())
    {
        providers.push(Arc::new(google));
    }
    if let Some(naver) = NaverLocalClient::new(
        config.places.naver_client_id.clone(),
        config.places.naver_client_secret.clone(),
        place_config,
    ) {
        providers.push(Arc::new(naver));
    }
    info!(providers = providers.len(), "Initialized place-search providers");

    // Initialize services
    let account_service = AccountService::new(user_repo);
    let schedule_service = ScheduleService::new(task_repo.clone());
    let group_service = GroupService::new(group_repo, profile_repo, schedule_service.clone());
    let calendar_service = CalendarService::new(task_repo, log_repo.clone());
    let daily_log_service = DailyLogService::new(log_repo);
    let vendor_service =
        VendorService::new(vendor_repo, providers, config.places.sync_ttl_hours);
    let community_service = CommunityService::new(post_repo);
    let notice_service = NoticeService::new(notice_repo);

    // Create app state
    let state = AppState {
        account_service,
        group_service,
        schedule_service,
        calendar_service,
        daily_log_service,
        vendor_service,
        community_service,
        notice_service,
    };

    // Build router
    let app = Router::new()
        .nest("/api", api_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            wedplan_api::middleware::auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
