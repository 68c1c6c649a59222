use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Product;

/// A named, priced collection of menu products belonging to a menu group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub menu_group_id: Uuid,
    pub displayed: bool,
    pub menu_products: Vec<MenuProduct>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Association of a product with a quantity within a menu
///
/// Quantity is signed so that negative input survives deserialization and is
/// rejected by validation instead of a serde type error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuProduct {
    pub product: Product,
    pub quantity: i64,
}

/// Request model for registering a new menu
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMenuRequest {
    pub name: String,
    pub price: Decimal,
    pub menu_group_id: Uuid,
    #[serde(default)]
    pub displayed: bool,
    pub menu_products: Vec<MenuProductRequest>,
}

/// A product reference within a create-menu request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuProductRequest {
    pub product_id: Uuid,
    pub quantity: i64,
}

/// Request model for changing the price of an existing menu
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeMenuPriceRequest {
    pub price: Decimal,
}

impl Menu {
    /// Create a new Menu with a generated ID and timestamps, from an already
    /// validated request and its resolved menu products
    pub fn new(request: CreateMenuRequest, menu_products: Vec<MenuProduct>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: request.name,
            price: request.price,
            menu_group_id: request.menu_group_id,
            displayed: request.displayed,
            menu_products,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sum of product price times quantity over all menu products
    pub fn menu_product_total(&self) -> Decimal {
        self.menu_products
            .iter()
            .map(|menu_product| menu_product.product.price * Decimal::from(menu_product.quantity))
            .sum()
    }

    /// Whether the menu price exceeds the sum of its menu product prices
    pub fn price_exceeds_product_total(&self) -> bool {
        self.price > self.menu_product_total()
    }

    pub fn change_price(&mut self, price: Decimal) {
        self.price = price;
        self.updated_at = Utc::now();
    }

    pub fn set_displayed(&mut self, displayed: bool) {
        self.displayed = displayed;
        self.updated_at = Utc::now();
    }
}
