//! Operator endpoint for marking order items shipped.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use common::{ShippingMethod, Sku};
use serde::Deserialize;
use shipping::{MarkShippedRequest, MarkShippedResponse};

use super::AppState;
use crate::clients::{CatalogClient, ShippingClient, WarehouseClient};
use crate::error::ApiError;

#[derive(Deserialize)]
pub struct ShipmentRequest {
    pub shipping_method: ShippingMethod,
    #[serde(default)]
    pub note: String,
}

/// POST /v1/commerce/orders/{order_id}/items/{sku}/shipment
///
/// Extraction failures are answered with the same `{"error": ...}` body as
/// every other gateway error.
pub async fn create<C: CatalogClient, W: WarehouseClient, S: ShippingClient>(
    State(state): State<Arc<AppState<C, W, S>>>,
    path: Result<Path<(u64, String)>, PathRejection>,
    body: Result<Json<ShipmentRequest>, JsonRejection>,
) -> Result<Json<MarkShippedResponse>, ApiError> {
    let Path((order_id, sku)) = path?;
    let Json(req) = body?;
    mark_shipped(&state, order_id, sku, req).await
}

#[tracing::instrument(skip(state, req))]
async fn mark_shipped<C: CatalogClient, W: WarehouseClient, S: ShippingClient>(
    state: &AppState<C, W, S>,
    order_id: u64,
    sku: String,
    req: ShipmentRequest,
) -> Result<Json<MarkShippedResponse>, ApiError> {
    let response = state
        .shipping
        .mark_item_shipped(MarkShippedRequest {
            order_id,
            sku: Sku::new(sku),
            shipping_method: req.shipping_method,
            note: req.note,
        })
        .await?;
    Ok(Json(response))
}
