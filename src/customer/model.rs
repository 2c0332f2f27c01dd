use serde::{Deserialize, Serialize};

use super::errors::CustomerError;

// ============================================================================
// Customer Schemas
// ============================================================================

/// A persisted customer account, as stored and as returned by every endpoint.
///
/// Optional columns serialize as `null` so every key is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Customer {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub suspended: bool,
}

/// Request body for create and full update.
///
/// `first_name`, `last_name` and `email` are required and may not be `null`.
/// Unknown keys such as `id` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CustomerData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    /// Honoured by update only; new customers always start active.
    #[serde(default)]
    pub suspended: Option<bool>,
}

impl CustomerData {
    pub fn from_json(body: &[u8]) -> Result<Self, CustomerError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(CustomerError::InvalidCustomer(
                "body of request contained bad or no data".to_string(),
            ));
        }
        serde_json::from_slice(body).map_err(|e| CustomerError::InvalidCustomer(e.to_string()))
    }
}
