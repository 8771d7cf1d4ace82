//! Warehouse service.
//!
//! Reports on-hand stock for a SKU and keeps the stock counters current by
//! reacting to item-shipped events through [`StockDecrementHandler`].

pub mod error;
pub mod model;
pub mod repository;
pub mod service;
pub mod stock;

pub use error::WarehouseError;
pub use model::{DetailsRequest, WarehouseDetails};
pub use repository::{InMemoryWarehouseRepository, WarehouseRepository};
pub use service::{MIN_SKU_LEN, WarehouseService};
pub use stock::StockDecrementHandler;
