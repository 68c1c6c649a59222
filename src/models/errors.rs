use thiserror::Error;
use uuid::Uuid;

use crate::moderation::ModerationError;

/// Service-level errors that can occur in business logic
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Menu not found: {id}")]
    MenuNotFound { id: Uuid },

    #[error("Menu group not found: {id}")]
    MenuGroupNotFound { id: Uuid },

    #[error("Product not found: {id}")]
    ProductNotFound { id: Uuid },

    #[error("Menu {menu_id} cannot be displayed: price exceeds the menu product total")]
    MenuNotDisplayable { menu_id: Uuid },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Repository error: {source}")]
    Repository {
        #[from]
        source: RepositoryError,
    },

    #[error("Moderation service error: {source}")]
    Moderation {
        #[from]
        source: ModerationError,
    },
}

/// Repository-level errors for data access operations
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Storage backend unavailable")]
    ConnectionFailed,

    #[error("Item not found")]
    NotFound,

    #[error("Constraint violation: {message}")]
    ConstraintViolation { message: String },
}

/// Validation errors for input data
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredField { field: String },

    #[error("Field cannot be negative: {field}={value}")]
    Negative { field: String, value: String },

    #[error("Field too long: {field}, max_length={max_length}, actual_length={actual_length}")]
    TooLong {
        field: String,
        max_length: usize,
        actual_length: usize,
    },

    #[error("Menu price {price} exceeds menu product total {total}")]
    PriceAboveProductTotal { price: String, total: String },

    #[error("Menu must contain at least one menu product")]
    EmptyMenuProducts,

    #[error("Unknown product referenced: {id}")]
    UnknownProduct { id: Uuid },

    #[error("Field contains profanity: {field}")]
    Profanity { field: String },
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::ValidationError {
            message: err.to_string(),
        }
    }
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Result type alias for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Result type alias for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;
