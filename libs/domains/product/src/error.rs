use thiserror::Error;

/// Failure taxonomy of the product service.
///
/// Variants carrying a `String` embed the configured operator-facing message
/// (see [`crate::messages::Messages`]); `Display` yields exactly that message,
/// which is what fallbacks surface to callers. All variants are treated alike
/// by the circuit guards: they count against the breaker and are converted to
/// fallback values, never surfaced raw.
#[derive(Debug, Error)]
pub enum ProductError {
    /// The collection had no products at all on a list request
    #[error("{0}")]
    NotFoundAll(String),

    /// No record exists for the requested product name
    #[error("{0}")]
    NotFound(String),

    /// A live product already holds the requested name
    #[error("{0}")]
    AlreadyExists(String),

    /// The store returned nothing for an otherwise-valid create
    #[error("{0}")]
    NotFoundCreate(String),

    /// The store returned nothing for an otherwise-valid update
    #[error("{0}")]
    NotFoundUpdate(String),

    /// The store returned nothing for an otherwise-valid delete
    #[error("{0}")]
    NotFoundDelete(String),

    #[error("invalid input: {0}")]
    Validation(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("publish error: {0}")]
    Publish(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_variants_display_verbatim() {
        let err = ProductError::NotFound("Product not found.".to_string());
        assert_eq!(err.to_string(), "Product not found.");

        let err = ProductError::AlreadyExists("Product already exists.".to_string());
        assert_eq!(err.to_string(), "Product already exists.");
    }

    #[test]
    fn test_database_variant_prefixes_source() {
        let err = ProductError::Database("connection reset".to_string());
        assert_eq!(err.to_string(), "database error: connection reset");
    }
}
