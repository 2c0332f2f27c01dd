// ============================================================================
// Customer Domain
// ============================================================================
//
// - Model (Customer response schema, CustomerData request schema)
// - Validation (email / domain shape checks)
// - Filter (list query parameters -> predicate / WHERE clause)
// - Errors (CustomerError, mapped to HTTP statuses)
// - Store (SQLite persistence)
// - Handlers (one per endpoint)
//
// ============================================================================

pub mod errors;
pub mod filter;
pub mod handlers;
pub mod model;
pub mod store;
pub mod validation;

pub use errors::CustomerError;
pub use filter::{CustomerFilter, CustomerQuery, EmailFilter};
pub use model::{Customer, CustomerData};
pub use store::CustomerStore;
pub use validation::{validate_domain_format, validate_email_format};
