//! Customer handlers

use crate::error::ApiError;
use crate::AppState;
use addrbook_types::{
    Address, Customer, CustomerSearch, CustomerSummary, CustomerUpdate, NewCustomer,
};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::{debug, info};

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    message: &'static str,
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewCustomer>, JsonRejection>,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
    let Json(req) = payload?;

    let customer = state
        .db
        .create_customer(&req)
        .await
        .map_err(ApiError::store("Failed to create customer"))?;

    info!("Created customer {}", customer.id);
    Ok((StatusCode::CREATED, Json(customer)))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Customer>, ApiError> {
    state
        .db
        .get_customer(&id)
        .await
        .map_err(ApiError::store("Error retrieving customer details"))?
        .map(Json)
        .ok_or(ApiError::NotFound("Customer not found"))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CustomerUpdate>, JsonRejection>,
) -> Result<Json<Customer>, ApiError> {
    let Json(req) = payload?;

    state
        .db
        .update_customer(&id, &req)
        .await
        .map_err(ApiError::store("Failed to update customer information"))?
        .map(Json)
        .ok_or(ApiError::NotFound("Customer not found"))
}

/// Confirms even when no row matched the id.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let removed = state
        .db
        .delete_customer(&id)
        .await
        .map_err(ApiError::store("Error deleting customer"))?;

    debug!("Deleted {} customer row(s) for {}", removed, id);
    Ok(Json(DeleteResponse {
        message: "Customer successfully deleted",
    }))
}

pub async fn addresses(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Address>>, ApiError> {
    let addresses = state
        .db
        .list_addresses(&id)
        .await
        .map_err(ApiError::store("Error fetching addresses"))?;

    Ok(Json(addresses))
}

pub async fn with_one_address(
    State(state): State<AppState>,
) -> Result<Json<Vec<CustomerSummary>>, ApiError> {
    let customers = state
        .db
        .customers_with_one_address()
        .await
        .map_err(ApiError::store("Error fetching customers with one address"))?;

    Ok(Json(customers))
}

pub async fn search(
    State(state): State<AppState>,
    query: Result<Query<CustomerSearch>, QueryRejection>,
) -> Result<Json<Vec<Customer>>, ApiError> {
    let Query(filters) = query?;

    let customers = state
        .db
        .search_customers(&filters)
        .await
        .map_err(ApiError::store("Error searching customers"))?;

    Ok(Json(customers))
}
