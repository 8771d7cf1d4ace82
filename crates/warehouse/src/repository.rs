//! Warehouse repository trait and in-memory implementation.
//!
//! The repository owns the per-SKU stock counters. Counters are plain signed
//! integers and are not clamped: shipping more than is on hand drives them
//! negative, and details report a negative counter as zero remaining.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};

use async_trait::async_trait;
use common::{Sku, StorageError};

use crate::model::WarehouseDetails;

/// Storage operations the warehouse relies on.
#[async_trait]
pub trait WarehouseRepository: Send + Sync {
    async fn get_warehouse_details(&self, sku: &Sku) -> Result<WarehouseDetails, StorageError>;

    /// Whether the SKU is stocked, regardless of on-hand quantity.
    async fn sku_exists(&self, sku: &Sku) -> Result<bool, StorageError>;

    /// Reduces the on-hand quantity of a SKU by one.
    async fn decrement_stock(&self, sku: &Sku) -> Result<(), StorageError>;

    /// Records that a shipment has been applied. Returns false when it was
    /// already recorded.
    async fn claim_shipment(&self, order_id: u64, sku: &Sku) -> Result<bool, StorageError>;

    /// Forgets a recorded shipment so that a redelivery is applied again.
    async fn release_shipment(&self, order_id: u64, sku: &Sku) -> Result<(), StorageError>;
}

#[derive(Debug, Clone)]
struct StockItem {
    manufacturer: String,
    model: String,
    on_hand: i64,
}

#[derive(Debug, Default)]
struct InMemoryWarehouseState {
    items: HashMap<Sku, StockItem>,
    applied: HashSet<(u64, Sku)>,
    fail: bool,
    fail_decrement: bool,
    calls: usize,
}

/// In-memory warehouse repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWarehouseRepository {
    state: Arc<RwLock<InMemoryWarehouseState>>,
}

impl InMemoryWarehouseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a stocked SKU.
    pub fn insert_item(
        &self,
        sku: Sku,
        manufacturer: impl Into<String>,
        model: impl Into<String>,
        on_hand: i64,
    ) {
        self.lock().items.insert(
            sku,
            StockItem {
                manufacturer: manufacturer.into(),
                model: model.into(),
                on_hand,
            },
        );
    }

    /// Raw counter for a SKU, without clamping.
    pub fn on_hand(&self, sku: &Sku) -> Option<i64> {
        self.lock().items.get(sku).map(|item| item.on_hand)
    }

    /// Makes every subsequent call fail with a storage error.
    pub fn set_fail(&self, fail: bool) {
        self.lock().fail = fail;
    }

    /// Makes only stock decrements fail.
    pub fn set_fail_decrement(&self, fail: bool) {
        self.lock().fail_decrement = fail;
    }

    /// Returns how many repository operations have been invoked.
    pub fn call_count(&self) -> usize {
        self.lock().calls
    }

    fn lock(&self) -> RwLockWriteGuard<'_, InMemoryWarehouseState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self) -> Result<RwLockWriteGuard<'_, InMemoryWarehouseState>, StorageError> {
        let mut state = self.lock();
        state.calls += 1;
        if state.fail {
            return Err(StorageError::new("warehouse store unavailable"));
        }
        Ok(state)
    }
}

#[async_trait]
impl WarehouseRepository for InMemoryWarehouseRepository {
    async fn get_warehouse_details(&self, sku: &Sku) -> Result<WarehouseDetails, StorageError> {
        let state = self.begin()?;
        let item = state
            .items
            .get(sku)
            .ok_or_else(|| StorageError::new(format!("stock record missing for {sku}")))?;
        Ok(WarehouseDetails {
            sku: sku.clone(),
            manufacturer: item.manufacturer.clone(),
            model: item.model.clone(),
            stock_remaining: u32::try_from(item.on_hand.max(0)).unwrap_or(u32::MAX),
        })
    }

    async fn sku_exists(&self, sku: &Sku) -> Result<bool, StorageError> {
        Ok(self.begin()?.items.contains_key(sku))
    }

    async fn decrement_stock(&self, sku: &Sku) -> Result<(), StorageError> {
        let mut state = self.begin()?;
        if state.fail_decrement {
            return Err(StorageError::new("stock counter unavailable"));
        }
        let item = state
            .items
            .get_mut(sku)
            .ok_or_else(|| StorageError::new(format!("stock record missing for {sku}")))?;
        item.on_hand -= 1;
        Ok(())
    }

    async fn claim_shipment(&self, order_id: u64, sku: &Sku) -> Result<bool, StorageError> {
        Ok(self.begin()?.applied.insert((order_id, sku.clone())))
    }

    async fn release_shipment(&self, order_id: u64, sku: &Sku) -> Result<(), StorageError> {
        self.begin()?.applied.remove(&(order_id, sku.clone()));
        Ok(())
    }
}
