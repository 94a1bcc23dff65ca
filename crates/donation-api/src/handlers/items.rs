//! Food inventory handlers
//!
//! Every response carries a `success` flag next to its payload, matching the
//! error body produced by [`ApiError`].

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use donation_core::{DonationError, InventoryStats, ItemInput, ItemView};
use serde::Serialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Response for the item list
#[derive(Debug, Serialize)]
pub struct ItemListResponse {
    pub success: bool,
    pub items: Vec<ItemView>,
}

/// Response carrying a single item
#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub success: bool,
    pub item: ItemView,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: InventoryStats,
}

impl ItemResponse {
    fn new(item: ItemView) -> Json<Self> {
        Json(Self {
            success: true,
            item,
        })
    }
}

/// Expiry state is reported relative to the server's local date
fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// An id that does not parse cannot name an item
fn item_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| DonationError::ItemNotFound(raw.to_string()).into())
}

fn item_input(payload: Result<Json<ItemInput>, JsonRejection>) -> Result<ItemInput, ApiError> {
    payload
        .map(|Json(input)| input)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// GET /api/items
/// List every item, consumed ones included
pub async fn list_items(State(state): State<AppState>) -> Json<ItemListResponse> {
    let today = today();
    let items = state
        .inventory()
        .list()
        .await
        .iter()
        .map(|item| item.view(today))
        .collect();

    Json(ItemListResponse {
        success: true,
        items,
    })
}

/// POST /api/items
pub async fn create_item(
    State(state): State<AppState>,
    payload: Result<Json<ItemInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ItemResponse>), ApiError> {
    let item = state.inventory().create(item_input(payload)?).await?;

    tracing::info!(
        id = %item.id,
        name = %item.name,
        expiry_date = %item.expiry_date,
        "Inventory item added"
    );

    Ok((StatusCode::CREATED, ItemResponse::new(item.view(today()))))
}

/// GET /api/items/{id}
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ItemResponse>, ApiError> {
    let item = state.inventory().get(item_id(&id)?).await?;
    Ok(ItemResponse::new(item.view(today())))
}

/// PUT /api/items/{id}
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ItemInput>, JsonRejection>,
) -> Result<Json<ItemResponse>, ApiError> {
    let id = item_id(&id)?;
    let item = state.inventory().update(id, item_input(payload)?).await?;

    tracing::info!(id = %item.id, name = %item.name, "Inventory item updated");
    Ok(ItemResponse::new(item.view(today())))
}

/// PATCH /api/items/{id}/consume
pub async fn consume_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ItemResponse>, ApiError> {
    let item = state.inventory().consume(item_id(&id)?).await?;

    tracing::info!(id = %item.id, name = %item.name, "Inventory item consumed");
    Ok(ItemResponse::new(item.view(today())))
}

/// DELETE /api/items/{id}
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ItemResponse>, ApiError> {
    let item = state.inventory().delete(item_id(&id)?).await?;

    tracing::info!(id = %item.id, name = %item.name, "Inventory item deleted");
    Ok(ItemResponse::new(item.view(today())))
}

/// GET /api/stats
pub async fn inventory_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse {
        success: true,
        stats: state.inventory().stats(today()).await,
    })
}
