//! Operator-facing message strings.

/// Configurable error and confirmation messages surfaced through fallbacks
/// and the delete envelope.
#[derive(Clone, Debug)]
pub struct Messages {
    pub not_found_all: String,
    pub not_found: String,
    pub already_exists: String,
    pub not_found_create: String,
    pub not_found_update: String,
    pub not_found_delete: String,
    pub product_deleted: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            not_found_all: "No products found.".to_string(),
            not_found: "Product not found.".to_string(),
            already_exists: "Product already exists.".to_string(),
            not_found_create: "Product could not be created.".to_string(),
            not_found_update: "Product could not be updated.".to_string(),
            not_found_delete: "Product could not be deleted.".to_string(),
            product_deleted: "Product deleted successfully.".to_string(),
        }
    }
}

impl Messages {
    /// Load from `MSG_*` environment variables, keeping the English defaults
    /// for anything unset.
    pub fn from_env() -> Self {
        fn var(key: &str, default: String) -> String {
            std::env::var(key).unwrap_or(default)
        }

        let defaults = Self::default();
        Self {
            not_found_all: var("MSG_NOT_FOUND_ALL", defaults.not_found_all),
            not_found: var("MSG_NOT_FOUND", defaults.not_found),
            already_exists: var("MSG_ALREADY_EXISTS", defaults.already_exists),
            not_found_create: var("MSG_NOT_FOUND_CREATE", defaults.not_found_create),
            not_found_update: var("MSG_NOT_FOUND_UPDATE", defaults.not_found_update),
            not_found_delete: var("MSG_NOT_FOUND_DELETE", defaults.not_found_delete),
            product_deleted: var("MSG_PRODUCT_DELETED", defaults.product_deleted),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_overrides_single_message() {
        temp_env::with_var("MSG_NOT_FOUND", Some("Producto no encontrado."), || {
            let messages = Messages::from_env();
            assert_eq!(messages.not_found, "Producto no encontrado.");
            assert_eq!(messages.product_deleted, "Product deleted successfully.");
        });
    }

    #[test]
    fn test_defaults_are_distinct() {
        let messages = Messages::default();
        let all = [
            &messages.not_found_all,
            &messages.not_found,
            &messages.already_exists,
            &messages.not_found_create,
            &messages.not_found_update,
            &messages.not_found_delete,
            &messages.product_deleted,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in all.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
