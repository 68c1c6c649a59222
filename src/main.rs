use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use menu_rs::{
    handlers::{api, health_check, metrics_handler},
    init_observability,
    moderation::PurgomalumClient,
    observability::{observability_middleware, Metrics},
    repositories::{InMemoryMenuGroupRepository, InMemoryMenuRepository, InMemoryProductRepository},
    services::{MenuGroupService, MenuService, ProductService},
    shutdown_observability, Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration first (basic logging only)
    let config = Config::from_environment()?;
    println!("Configuration loaded successfully");

    // Initialize comprehensive observability
    init_observability(
        &config.observability.service_name,
        &config.observability.service_version,
        &config.observability.otlp_endpoint,
        config.observability.enable_json_logging,
    )?;

    info!("Starting menu-rs service");
    info!(
        "Service: {} v{}",
        config.observability.service_name, config.observability.service_version
    );
    info!("Moderation endpoint: {}", config.moderation.base_url);

    // Initialize metrics
    let metrics = Arc::new(Metrics::new()?);
    info!("Metrics initialized successfully");

    // Initialize repositories
    let menu_repository = Arc::new(InMemoryMenuRepository::new());
    let menu_group_repository = Arc::new(InMemoryMenuGroupRepository::new());
    let product_repository = Arc::new(InMemoryProductRepository::new());
    info!("Repositories initialized successfully");

    // Initialize the profanity moderation client
    let profanity_client = Arc::new(PurgomalumClient::new(
        config.moderation.base_url.clone(),
        config.moderation.timeout(),
    )?);
    info!("Moderation client initialized successfully");

    // Initialize services
    let menu_service = Arc::new(MenuService::new(
        menu_repository.clone(),
        menu_group_repository.clone(),
        product_repository.clone(),
        profanity_client.clone(),
    ));
    let menu_group_service = Arc::new(MenuGroupService::new(menu_group_repository));
    let product_service = Arc::new(ProductService::new(
        product_repository,
        menu_repository,
        profanity_client,
    ));
    info!("Services initialized successfully");

    // Build the application router
    let app = create_app(metrics, menu_service, menu_group_service, product_service);

    // Create socket address
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;

    // Set up graceful shutdown
    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install CTRL+C signal handler: {}", e);
        }
        info!("Shutdown signal received");
        shutdown_observability().await;
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

fn create_app(
    metrics: Arc<Metrics>,
    menu_service: Arc<MenuService>,
    menu_group_service: Arc<MenuGroupService>,
    product_service: Arc<ProductService>,
) -> Router {
    let metrics_for_middleware = metrics.clone();

    let api_state = api::ApiState {
        menu_service,
        menu_group_service,
        product_service,
    };

    Router::new()
        // Health and metrics endpoints (with metrics state)
        .route("/health/status", get(health_check))
        .route("/metrics", get(metrics_handler))
        .with_state(metrics)
        // Menu endpoints
        .route("/api/menus", post(api::create_menu).get(api::list_menus))
        .route("/api/menus/:menu_id/price", put(api::change_menu_price))
        .route("/api/menus/:menu_id/display", put(api::display_menu))
        .route("/api/menus/:menu_id/hide", put(api::hide_menu))
        // Menu group endpoints
        .route(
            "/api/menu-groups",
            post(api::create_menu_group).get(api::list_menu_groups),
        )
        // Product endpoints
        .route(
            "/api/products",
            post(api::create_product).get(api::list_products),
        )
        .route(
            "/api/products/:product_id/price",
            put(api::change_product_price),
        )
        .with_state(api_state)
        // Add middleware layers (order matters - outer to inner)
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(move |req, next| {
            observability_middleware(metrics_for_middleware.clone(), req, next)
        }))
}
