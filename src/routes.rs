//! The route table.
//!
//! Every endpoint the service exposes is registered here, once, at startup:
//!
//! | Method | Path                          | Handler             |
//! |--------|-------------------------------|---------------------|
//! | GET    | `/health`                     | [`health::check`]   |
//! | GET    | `/`                           | [`index`]           |
//! | GET    | `/api`                        | [`api_metadata`]    |
//! | POST   | `/customers`                  | create              |
//! | GET    | `/customers`                  | list (filtered)     |
//! | GET    | `/customers/{id}`             | read                |
//! | PUT    | `/customers/{id}`             | update              |
//! | DELETE | `/customers/{id}`             | delete              |
//! | PUT    | `/customers/{id}/suspend`     | suspend             |
//! | PUT    | `/customers/{id}/activate`    | activate            |

use serde_json::json;

use crate::customer::handlers::{
    activate_customer, create_customer, delete_customer, get_customer, list_customers,
    suspend_customer, update_customer,
};
use crate::health;
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;
use crate::state::AppState;

pub const SERVICE_NAME: &str = "Customer REST API Service";
pub const SERVICE_VERSION: &str = "1.0.0";

pub fn router(state: AppState) -> Router<AppState> {
    Router::new(state)
        .on(Method::Get,    "/health",                  health::check)
        .on(Method::Get,    "/",                        index)
        .on(Method::Get,    "/api",                     api_metadata)
        .on(Method::Post,   "/customers",               create_customer)
        .on(Method::Get,    "/customers",               list_customers)
        .on(Method::Get,    "/customers/{id}",          get_customer)
        .on(Method::Put,    "/customers/{id}",          update_customer)
        .on(Method::Delete, "/customers/{id}",          delete_customer)
        .on(Method::Put,    "/customers/{id}/suspend",  suspend_customer)
        .on(Method::Put,    "/customers/{id}/activate", activate_customer)
}

/// `GET /`: service name, version and the collection URL.
pub async fn index(_state: AppState, req: Request) -> Response {
    Response::json(&json!({
        "name": SERVICE_NAME,
        "version": SERVICE_VERSION,
        "paths": format!("{}/customers", req.base_url()),
    }))
}

/// `GET /api`: absolute URL of every customer operation.
pub async fn api_metadata(_state: AppState, req: Request) -> Response {
    let collection = format!("{}/customers", req.base_url());
    let resource = format!("{collection}/0");
    Response::json(&json!({
        "name": SERVICE_NAME,
        "version": SERVICE_VERSION,
        "paths": {
            "create": collection,
            "list_all": collection,
            "read_one": resource,
            "update": resource,
            "delete": resource,
            "suspend": format!("{resource}/suspend"),
            "activate": format!("{resource}/activate"),
            "find_by_email": format!("{collection}?email=test%40example.com"),
        },
    }))
}
