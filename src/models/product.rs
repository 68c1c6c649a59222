use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A sellable product that menus are composed of
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
}

/// Request model for registering a new product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: Decimal,
}

/// Request model for changing the price of an existing product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeProductPriceRequest {
    pub price: Decimal,
}

impl Product {
    pub fn new(request: CreateProductRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: request.name,
            price: request.price,
        }
    }

    pub fn change_price(&mut self, price: Decimal) {
        self.price = price;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_product_creation() {
        let product = Product::new(CreateProductRequest {
            name: "Fried Chicken".to_string(),
            price: dec!(6000),
        });

        assert_eq!(product.name, "Fried Chicken");
        assert_eq!(product.price, dec!(6000));
        assert!(!product.id.is_nil());
    }

    #[test]
    fn test_change_price() {
        let mut product = Product::new(CreateProductRequest {
            name: "Fried Chicken".to_string(),
            price: dec!(6000),
        });

        product.change_price(dec!(6500));
        assert_eq!(product.price, dec!(6500));
    }
}
