use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use reqwest::Client;
use rust_decimal::Decimal;
use tokio::net::TcpListener;
use wiremock::{matchers::method, matchers::path, Mock, MockServer, Request, Respond, ResponseTemplate};

use menu_rs::{
    handlers::{api, health_check, metrics_handler},
    moderation::PurgomalumClient,
    observability::{observability_middleware, Metrics},
    repositories::{InMemoryMenuGroupRepository, InMemoryMenuRepository, InMemoryProductRepository},
    services::{MenuGroupService, MenuService, ProductService},
};
use menu_rs::models::{CreateMenuGroupRequest, CreateProductRequest, MenuGroup, Product};

pub struct TestEnvironment {
    pub client: Client,
    pub base_url: String,
    #[allow(dead_code)]
    pub moderation_server: MockServer,
}

/// Flags any text containing "damn" as profane, everything else passes
struct ProfanityResponder;

impl Respond for ProfanityResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let profane = request
            .url
            .query_pairs()
            .any(|(key, value)| key == "text" && value.to_lowercase().contains("damn"));
        ResponseTemplate::new(200).set_body_string(if profane { "true" } else { "false" })
    }
}

impl TestEnvironment {
    pub async fn new() -> Self {
        let moderation_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/containsprofanity"))
            .respond_with(ProfanityResponder)
            .mount(&moderation_server)
            .await;

        let app = create_test_app(&moderation_server.uri());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind listener");
        let addr = listener.local_addr().expect("Failed to get local address");
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Failed to serve app");
        });

        // Wait for server to start
        tokio::time::sleep(Duration::from_millis(100)).await;

        let client = Client::new();

        Self {
            client,
            base_url,
            moderation_server,
        }
    }

    /// Register a menu group and return it
    pub async fn create_menu_group(&self, name: &str) -> MenuGroup {
        let response = self
            .client
            .post(format!("{}/api/menu-groups", self.base_url))
            .json(&CreateMenuGroupRequest {
                name: name.to_string(),
            })
            .send()
            .await
            .expect("Failed to create menu group");

        assert_eq!(response.status().as_u16(), 201);
        response.json().await.expect("Failed to parse menu group")
    }

    /// Register a product and return it
    pub async fn create_product(&self, name: &str, price: Decimal) -> Product {
        let response = self
            .client
            .post(format!("{}/api/products", self.base_url))
            .json(&CreateProductRequest {
                name: name.to_string(),
                price,
            })
            .send()
            .await
            .expect("Failed to create product");

        assert_eq!(response.status().as_u16(), 201);
        response.json().await.expect("Failed to parse product")
    }
}

fn create_test_app(moderation_base_url: &str) -> Router {
    let metrics = Arc::new(Metrics::new().expect("Failed to create metrics"));
    let metrics_for_middleware = metrics.clone();

    let menu_repository = Arc::new(InMemoryMenuRepository::new());
    let menu_group_repository = Arc::new(InMemoryMenuGroupRepository::new());
    let product_repository = Arc::new(InMemoryProductRepository::new());

    let profanity_client = Arc::new(
        PurgomalumClient::new(moderation_base_url.to_string(), Duration::from_secs(5))
            .expect("Failed to create moderation client"),
    );

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

    let api_state = api::ApiState {
        menu_service,
        menu_group_service,
        product_service,
    };

    Router::new()
        .route("/health/status", get(health_check))
        .route("/metrics", get(metrics_handler))
        .with_state(metrics)
        .route("/api/menus", post(api::create_menu).get(api::list_menus))
        .route("/api/menus/:menu_id/price", put(api::change_menu_price))
        .route("/api/menus/:menu_id/display", put(api::display_menu))
        .route("/api/menus/:menu_id/hide", put(api::hide_menu))
        .route(
            "/api/menu-groups",
            post(api::create_menu_group).get(api::list_menu_groups),
        )
        .route(
            "/api/products",
            post(api::create_product).get(api::list_products),
        )
        .route(
            "/api/products/:product_id/price",
            put(api::change_product_price),
        )
        .with_state(api_state)
        .layer(middleware::from_fn(move |req, next| {
            observability_middleware(metrics_for_middleware.clone(), req, next)
        }))
}
