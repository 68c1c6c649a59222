use rust_decimal::Decimal;

use super::{
    CreateMenuGroupRequest, CreateProductRequest, MenuProductRequest, ValidationError,
    ValidationResult,
};

/// Trait for validating input models
pub trait Validate {
    fn validate(&self) -> ValidationResult<()>;
}

/// Validation constants
pub const MAX_NAME_LENGTH: usize = 255;

impl Validate for CreateMenuGroupRequest {
    fn validate(&self) -> ValidationResult<()> {
        validate_name("menu_group_name", &self.name)
    }
}

impl Validate for CreateProductRequest {
    fn validate(&self) -> ValidationResult<()> {
        validate_price("product_price", &self.price)?;
        validate_name("product_name", &self.name)
    }
}

/// Validate a display name: non-empty after trimming and within column bounds
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::RequiredField {
            field: field.to_string(),
        });
    }

    if trimmed.len() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max_length: MAX_NAME_LENGTH,
            actual_length: trimmed.len(),
        });
    }

    Ok(())
}

/// Validate a price: zero is allowed, negative is not
pub fn validate_price(field: &str, price: &Decimal) -> ValidationResult<()> {
    if *price < Decimal::ZERO {
        return Err(ValidationError::Negative {
            field: field.to_string(),
            value: price.to_string(),
        });
    }

    Ok(())
}

/// Validate a menu product reference: quantity must be zero or more
pub fn validate_menu_product(menu_product: &MenuProductRequest) -> ValidationResult<()> {
    if menu_product.quantity < 0 {
        return Err(ValidationError::Negative {
            field: "quantity".to_string(),
            value: menu_product.quantity.to_string(),
        });
    }

    Ok(())
}
