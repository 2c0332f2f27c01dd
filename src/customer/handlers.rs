//! Customer endpoints.
//!
//! Each handler validates its input, makes one store call, and shapes the
//! response. Failures come back as [`CustomerError`] and are turned into
//! status codes by its `IntoResponse` impl.

use tracing::{error, info};

use super::errors::CustomerError;
use super::filter::CustomerQuery;
use super::model::CustomerData;
use crate::request::Request;
use crate::response::Response;
use crate::state::AppState;
use crate::status::Status;

const JSON: &str = "application/json";

/// `POST /customers`
pub async fn create_customer(state: AppState, req: Request) -> Result<Response, CustomerError> {
    info!("Request to Create a Customer...");
    check_content_type(&req, JSON)?;

    let data = CustomerData::from_json(req.body())?;
    let customer = state.store.create(&data).await?;
    info!("Customer with new id [{}] saved!", customer.id);

    let location = format!("{}/customers/{}", req.base_url(), customer.id);
    Ok(Response::builder()
        .status(Status::Created)
        .header("location", &location)
        .json(&customer))
}

/// `GET /customers`
pub async fn list_customers(state: AppState, req: Request) -> Result<Response, CustomerError> {
    info!("Request for customer list");
    let filter = CustomerQuery::from_request(&req).build()?;
    let customers = state.store.list(&filter).await?;
    info!("Returning {} customers", customers.len());
    Ok(Response::json(&customers))
}

/// `GET /customers/{id}`
pub async fn get_customer(state: AppState, req: Request) -> Result<Response, CustomerError> {
    let id = customer_id(&req)?;
    info!("Request to Retrieve a customer with id [{id}]");

    let customer = state
        .store
        .find(id)
        .await?
        .ok_or_else(|| CustomerError::NotFound(id.to_string()))?;
    info!("Returning customer: {} {}", customer.first_name, customer.last_name);
    Ok(Response::json(&customer))
}

/// `PUT /customers/{id}`
///
/// Checks run in order: content type, existence, body.
pub async fn update_customer(state: AppState, req: Request) -> Result<Response, CustomerError> {
    let id = customer_id(&req)?;
    info!("Request to Update a customer with id [{id}]");
    check_content_type(&req, JSON)?;

    if state.store.find(id).await?.is_none() {
        return Err(CustomerError::NotFound(id.to_string()));
    }
    let data = CustomerData::from_json(req.body())?;

    // A concurrent delete between the lookup and the write still reads as 404.
    let customer = state
        .store
        .update(id, &data)
        .await?
        .ok_or_else(|| CustomerError::NotFound(id.to_string()))?;
    info!("Customer with ID: {id} updated.");
    Ok(Response::json(&customer))
}

/// `DELETE /customers/{id}`: always 204, whether or not the customer existed.
pub async fn delete_customer(state: AppState, req: Request) -> Result<Response, CustomerError> {
    let id = customer_id(&req)?;
    info!("Request to Delete a customer with id [{id}]");

    if state.store.delete(id).await? {
        info!("Customer with ID: {id} found.");
    }
    info!("Customer with ID: {id} delete complete.");
    Ok(Response::status(Status::NoContent))
}

/// `PUT /customers/{id}/suspend`
pub async fn suspend_customer(state: AppState, req: Request) -> Result<Response, CustomerError> {
    let id = customer_id(&req)?;
    info!("Request to suspend customer with id [{id}]");

    let customer = state
        .store
        .set_suspended(id, true)
        .await?
        .ok_or_else(|| CustomerError::NotFound(id.to_string()))?;
    info!("Customer with ID [{id}] has been suspended");
    Ok(Response::json(&customer))
}

/// `PUT /customers/{id}/activate`
pub async fn activate_customer(state: AppState, req: Request) -> Result<Response, CustomerError> {
    let id = customer_id(&req)?;
    info!("Request to activate customer with id [{id}]");

    let customer = state
        .store
        .set_suspended(id, false)
        .await?
        .ok_or_else(|| CustomerError::NotFound(id.to_string()))?;
    info!("Customer with ID [{id}] has been activated");
    Ok(Response::json(&customer))
}

/// The `{id}` path segment. Anything but an integer names no customer.
fn customer_id(req: &Request) -> Result<i64, CustomerError> {
    let raw = req.param("id").unwrap_or_default();
    raw.parse().map_err(|_| CustomerError::NotFound(raw.to_string()))
}

fn check_content_type(req: &Request, expected: &'static str) -> Result<(), CustomerError> {
    match req.content_type() {
        Some(content_type) if content_type == expected => Ok(()),
        Some(content_type) => {
            error!("Invalid Content-Type: {content_type}");
            Err(CustomerError::UnsupportedMediaType(expected))
        }
        None => {
            error!("No Content-Type specified.");
            Err(CustomerError::UnsupportedMediaType(expected))
        }
    }
}
