//! Public commerce gateway.
//!
//! Serves the aggregated product view, an operator endpoint for marking
//! items shipped, health and Prometheus metrics. Structured logging comes
//! from `tracing`, metrics from the `metrics` facade.

pub mod aggregator;
pub mod clients;
pub mod config;
pub mod demo;
pub mod error;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::{get, post};
use catalog::{CatalogService, InMemoryCatalogRepository};
use events::{Broker, EventPublisher};
use metrics_exporter_prometheus::PrometheusHandle;
use shipping::{InMemoryShippingRepository, ShippingService};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use warehouse::{InMemoryWarehouseRepository, WarehouseService};

use aggregator::RequestAggregator;
use clients::{
    CatalogClient, LocalCatalogClient, LocalShippingClient, LocalWarehouseClient, ShippingClient,
    WarehouseClient,
};
use routes::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<C: CatalogClient, W: WarehouseClient, S: ShippingClient>(
    state: Arc<AppState<C, W, S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route(
            "/v1/commerce/products/{sku}",
            get(routes::products::get::<C, W, S>),
        )
        .route(
            "/v1/commerce/orders/{order_id}/items/{sku}/shipment",
            post(routes::shipments::create::<C, W, S>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// The in-memory stores behind the in-process services.
#[derive(Debug, Clone, Default)]
pub struct Stores {
    pub catalog: InMemoryCatalogRepository,
    pub shipping: InMemoryShippingRepository,
    pub warehouse: InMemoryWarehouseRepository,
}

impl Stores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores pre-filled by [`demo::seed`].
    pub fn seeded() -> Self {
        let stores = Self::new();
        demo::seed(&stores.catalog, &stores.shipping, &stores.warehouse);
        stores
    }
}

pub type DefaultState = AppState<
    LocalCatalogClient<InMemoryCatalogRepository>,
    LocalWarehouseClient<InMemoryWarehouseRepository>,
    LocalShippingClient<InMemoryShippingRepository, EventPublisher>,
>;

/// Wires the in-process services over the given stores and broker.
///
/// The stores are shared, not copied: writes through the returned state are
/// visible through `stores` and vice versa.
pub fn create_default_state(
    stores: &Stores,
    broker: Arc<dyn Broker>,
    downstream_timeout: Duration,
) -> Arc<DefaultState> {
    let catalog = LocalCatalogClient::new(CatalogService::new(stores.catalog.clone()));
    let warehouse = LocalWarehouseClient::new(WarehouseService::new(stores.warehouse.clone()));
    let shipping = LocalShippingClient::new(ShippingService::new(
        stores.shipping.clone(),
        EventPublisher::new(broker),
    ));

    Arc::new(AppState {
        aggregator: RequestAggregator::new(
            Arc::new(catalog),
            Arc::new(warehouse),
            downstream_timeout,
        ),
        shipping: Arc::new(shipping),
    })
}
