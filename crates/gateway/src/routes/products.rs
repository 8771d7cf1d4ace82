//! Aggregated product endpoint.

use std::sync::Arc;
use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};
use common::Sku;

use super::AppState;
use crate::aggregator::ProductView;
use crate::clients::{CatalogClient, ShippingClient, WarehouseClient};
use crate::error::ApiError;

/// GET /v1/commerce/products/{sku}: catalog details joined with stock.
#[tracing::instrument(skip(state))]
pub async fn get<C: CatalogClient, W: WarehouseClient, S: ShippingClient>(
    State(state): State<Arc<AppState<C, W, S>>>,
    Path(sku): Path<String>,
) -> Result<Json<ProductView>, ApiError> {
    metrics::counter!("gateway_product_requests_total").increment(1);
    let start = Instant::now();

    let result = state.aggregator.get_product(&Sku::new(sku)).await;
    metrics::histogram!("gateway_product_request_duration_seconds")
        .record(start.elapsed().as_secs_f64());

    match result {
        Ok(view) => Ok(Json(view)),
        Err(err) => {
            metrics::counter!("gateway_product_request_errors_total", "class" => err.class().to_string())
                .increment(1);
            Err(err.into())
        }
    }
}
