//! Address handlers

use crate::error::ApiError;
use crate::AppState;
use addrbook_types::{Address, AddressUpdate};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<AddressUpdate>, JsonRejection>,
) -> Result<Json<Address>, ApiError> {
    let Json(req) = payload?;

    state
        .db
        .update_address(&id, &req)
        .await
        .map_err(ApiError::store("Error updating address"))?
        .map(Json)
        .ok_or(ApiError::NotFound("Address not found"))
}
