use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::models::{
    ChangeMenuPriceRequest, ChangeProductPriceRequest, CreateMenuGroupRequest, CreateMenuRequest,
    CreateProductRequest, Menu, MenuGroup, Product, RepositoryError, ServiceError,
};
use crate::services::{MenuGroupService, MenuService, ProductService};

/// Shared application state containing all services
#[derive(Clone)]
pub struct ApiState {
    pub menu_service: Arc<MenuService>,
    pub menu_group_service: Arc<MenuGroupService>,
    pub product_service: Arc<ProductService>,
}

// =============================================================================
// MENU ENDPOINTS
// =============================================================================

/// Register a new menu
#[instrument(name = "create_menu", skip(state, request), fields(name = %request.name))]
pub async fn create_menu(
    State(state): State<ApiState>,
    Json(request): Json<CreateMenuRequest>,
) -> Result<(StatusCode, Json<Menu>), (StatusCode, Json<Value>)> {
    crate::info_with_trace!("Creating menu: {}", request.name);

    match state.menu_service.create(request).await {
        Ok(menu) => {
            crate::info_with_trace!("Successfully created menu: {}", menu.id);
            Ok((StatusCode::CREATED, Json(menu)))
        }
        Err(err) => {
            crate::error_with_trace!("Failed to create menu: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

/// List all menus
#[instrument(name = "list_menus", skip(state))]
pub async fn list_menus(
    State(state): State<ApiState>,
) -> Result<Json<Vec<Menu>>, (StatusCode, Json<Value>)> {
    match state.menu_service.find_all().await {
        Ok(menus) => {
            crate::info_with_trace!("Successfully listed {} menus", menus.len());
            Ok(Json(menus))
        }
        Err(err) => {
            crate::error_with_trace!("Failed to list menus: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

/// Change the price of a menu
#[instrument(name = "change_menu_price", skip(state, request), fields(menu_id = %menu_id))]
pub async fn change_menu_price(
    State(state): State<ApiState>,
    Path(menu_id): Path<Uuid>,
    Json(request): Json<ChangeMenuPriceRequest>,
) -> Result<Json<Menu>, (StatusCode, Json<Value>)> {
    crate::info_with_trace!("Changing price for menu: {}", menu_id);

    match state.menu_service.change_price(menu_id, request).await {
        Ok(menu) => {
            crate::info_with_trace!("Successfully changed menu price");
            Ok(Json(menu))
        }
        Err(err) => {
            crate::error_with_trace!("Failed to change menu price: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

/// Make a menu visible to customers
#[instrument(name = "display_menu", skip(state), fields(menu_id = %menu_id))]
pub async fn display_menu(
    State(state): State<ApiState>,
    Path(menu_id): Path<Uuid>,
) -> Result<Json<Menu>, (StatusCode, Json<Value>)> {
    crate::info_with_trace!("Displaying menu: {}", menu_id);

    match state.menu_service.display(menu_id).await {
        Ok(menu) => {
            crate::info_with_trace!("Successfully displayed menu");
            Ok(Json(menu))
        }
        Err(err) => {
            crate::error_with_trace!("Failed to display menu: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

/// Hide a menu from customers
#[instrument(name = "hide_menu", skip(state), fields(menu_id = %menu_id))]
pub async fn hide_menu(
    State(state): State<ApiState>,
    Path(menu_id): Path<Uuid>,
) -> Result<Json<Menu>, (StatusCode, Json<Value>)> {
    crate::info_with_trace!("Hiding menu: {}", menu_id);

    match state.menu_service.hide(menu_id).await {
        Ok(menu) => {
            crate::info_with_trace!("Successfully hid menu");
            Ok(Json(menu))
        }
        Err(err) => {
            crate::error_with_trace!("Failed to hide menu: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

// =============================================================================
// MENU GROUP ENDPOINTS
// =============================================================================

/// Register a new menu group
#[instrument(name = "create_menu_group", skip(state, request), fields(name = %request.name))]
pub async fn create_menu_group(
    State(state): State<ApiState>,
    Json(request): Json<CreateMenuGroupRequest>,
) -> Result<(StatusCode, Json<MenuGroup>), (StatusCode, Json<Value>)> {
    crate::info_with_trace!("Creating menu group: {}", request.name);

    match state.menu_group_service.create(request).await {
        Ok(menu_group) => {
            crate::info_with_trace!("Successfully created menu group: {}", menu_group.id);
            Ok((StatusCode::CREATED, Json(menu_group)))
        }
        Err(err) => {
            crate::error_with_trace!("Failed to create menu group: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

/// List all menu groups
#[instrument(name = "list_menu_groups", skip(state))]
pub async fn list_menu_groups(
    State(state): State<ApiState>,
) -> Result<Json<Vec<MenuGroup>>, (StatusCode, Json<Value>)> {
    match state.menu_group_service.find_all().await {
        Ok(menu_groups) => Ok(Json(menu_groups)),
        Err(err) => {
            crate::error_with_trace!("Failed to list menu groups: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

// =============================================================================
// PRODUCT ENDPOINTS
// =============================================================================

/// Register a new product
#[instrument(name = "create_product", skip(state, request), fields(name = %request.name))]
pub async fn create_product(
    State(state): State<ApiState>,
    Json(request): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>), (StatusCode, Json<Value>)> {
    crate::info_with_trace!("Creating product: {}", request.name);

    match state.product_service.create(request).await {
        Ok(product) => {
            crate::info_with_trace!("Successfully created product: {}", product.id);
            Ok((StatusCode::CREATED, Json(product)))
        }
        Err(err) => {
            crate::error_with_trace!("Failed to create product: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

/// Change the price of a product, hiding menus that become over-priced
#[instrument(name = "change_product_price", skip(state, request), fields(product_id = %product_id))]
pub async fn change_product_price(
    State(state): State<ApiState>,
    Path(product_id): Path<Uuid>,
    Json(request): Json<ChangeProductPriceRequest>,
) -> Result<Json<Product>, (StatusCode, Json<Value>)> {
    crate::info_with_trace!("Changing price for product: {}", product_id);

    match state.product_service.change_price(product_id, request).await {
        Ok(product) => {
            crate::info_with_trace!("Successfully changed product price");
            Ok(Json(product))
        }
        Err(err) => {
            crate::error_with_trace!("Failed to change product price: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

/// List all products
#[instrument(name = "list_products", skip(state))]
pub async fn list_products(
    State(state): State<ApiState>,
) -> Result<Json<Vec<Product>>, (StatusCode, Json<Value>)> {
    match state.product_service.find_all().await {
        Ok(products) => Ok(Json(products)),
        Err(err) => {
            crate::error_with_trace!("Failed to list products: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Convert ServiceError to HTTP response
fn service_error_to_response(err: ServiceError) -> (StatusCode, Json<Value>) {
    let (status, message) = match err {
        ServiceError::MenuNotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
        ServiceError::MenuGroupNotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
        ServiceError::ProductNotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
        ServiceError::MenuNotDisplayable { .. } => (StatusCode::CONFLICT, err.to_string()),
        ServiceError::ValidationError { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
        ServiceError::Moderation { .. } => (
            StatusCode::BAD_GATEWAY,
            "Moderation service error".to_string(),
        ),
        ServiceError::Repository { source } => match source {
            RepositoryError::NotFound => (StatusCode::NOT_FOUND, "Resource not found".to_string()),
            RepositoryError::ConnectionFailed => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Storage backend unavailable".to_string(),
            ),
            RepositoryError::ConstraintViolation { .. } => {
                (StatusCode::CONFLICT, source.to_string())
            }
        },
    };

    (
        status,
        Json(json!({
            "error": message,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moderation::ModerationError;

    #[test]
    fn test_not_found_errors_map_to_404() {
        let id = Uuid::new_v4();
        for err in [
            ServiceError::MenuNotFound { id },
            ServiceError::MenuGroupNotFound { id },
            ServiceError::ProductNotFound { id },
        ] {
            let (status, _) = service_error_to_response(err);
            assert_eq!(status, StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn test_validation_error_maps_to_400() {
        let (status, body) = service_error_to_response(ServiceError::ValidationError {
            message: "Menu price cannot be negative".to_string(),
        });

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("cannot be negative"));
    }

    #[test]
    fn test_not_displayable_maps_to_409() {
        let (status, _) = service_error_to_response(ServiceError::MenuNotDisplayable {
            menu_id: Uuid::new_v4(),
        });

        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[test]
    fn test_moderation_error_maps_to_502() {
        let err = ServiceError::Moderation {
            source: ModerationError::UnexpectedBody {
                body: "maybe".to_string(),
            },
        };

        let (status, _) = service_error_to_response(err);
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_repository_errors() {
        let (status, _) = service_error_to_response(ServiceError::Repository {
            source: RepositoryError::ConnectionFailed,
        });
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

        let (status, _) = service_error_to_response(ServiceError::Repository {
            source: RepositoryError::NotFound,
        });
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
