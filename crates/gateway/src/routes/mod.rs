pub mod health;
pub mod metrics;
pub mod products;
pub mod shipments;

use std::sync::Arc;

use crate::aggregator::RequestAggregator;
use crate::clients::{CatalogClient, ShippingClient, WarehouseClient};

/// Shared application state accessible from all handlers.
pub struct AppState<C: CatalogClient, W: WarehouseClient, S: ShippingClient> {
    pub aggregator: RequestAggregator<C, W>,
    pub shipping: Arc<S>,
}
