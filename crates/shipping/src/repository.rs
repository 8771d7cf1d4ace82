//! Shipping repository trait and in-memory implementation.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use common::{ShippingMethod, Sku, StorageError};

use crate::model::{ShippingCost, ShippingStatus};

/// Storage operations the shipping service relies on.
#[async_trait]
pub trait ShippingRepository: Send + Sync {
    async fn get_shipping_costs(
        &self,
        sku: &Sku,
        zip_code: &str,
    ) -> Result<Vec<ShippingCost>, StorageError>;

    /// Records an item as shipped and returns its tracking number.
    async fn mark_shipped(
        &self,
        sku: &Sku,
        order_id: u64,
        note: &str,
        shipping_method: ShippingMethod,
    ) -> Result<String, StorageError>;

    async fn get_shipping_status(
        &self,
        order_id: u64,
        sku: &Sku,
    ) -> Result<ShippingStatus, StorageError>;

    async fn product_exists(&self, sku: &Sku) -> Result<bool, StorageError>;

    async fn order_exists(&self, order_id: u64) -> Result<bool, StorageError>;
}

#[derive(Debug, Default)]
struct InMemoryShippingState {
    costs: HashMap<Sku, Vec<ShippingCost>>,
    orders: HashSet<u64>,
    statuses: HashMap<(u64, Sku), ShippingStatus>,
    notes: HashMap<(u64, Sku), String>,
    next_tracking: u32,
    fail: bool,
    calls: usize,
}

/// In-memory shipping repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryShippingRepository {
    state: Arc<RwLock<InMemoryShippingState>>,
}

impl InMemoryShippingRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the shipping options offered for a SKU. Registers the SKU.
    pub fn set_costs(&self, sku: Sku, costs: Vec<ShippingCost>) {
        self.lock().costs.insert(sku, costs);
    }

    /// Registers an order.
    pub fn insert_order(&self, order_id: u64) {
        self.lock().orders.insert(order_id);
    }

    /// Makes every subsequent call fail with a storage error.
    pub fn set_fail(&self, fail: bool) {
        self.lock().fail = fail;
    }

    /// Returns how many repository operations have been invoked.
    pub fn call_count(&self) -> usize {
        self.lock().calls
    }

    /// Returns the note recorded when an item was marked shipped.
    pub fn note(&self, order_id: u64, sku: &Sku) -> Option<String> {
        self.lock().notes.get(&(order_id, sku.clone())).cloned()
    }

    fn lock(&self) -> std::sync::RwLockWriteGuard<'_, InMemoryShippingState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self) -> Result<std::sync::RwLockWriteGuard<'_, InMemoryShippingState>, StorageError> {
        let mut state = self.lock();
        state.calls += 1;
        if state.fail {
            return Err(StorageError::new("shipping store unavailable"));
        }
        Ok(state)
    }
}

#[async_trait]
impl ShippingRepository for InMemoryShippingRepository {
    async fn get_shipping_costs(
        &self,
        sku: &Sku,
        _zip_code: &str,
    ) -> Result<Vec<ShippingCost>, StorageError> {
        Ok(self.begin()?.costs.get(sku).cloned().unwrap_or_default())
    }

    async fn mark_shipped(
        &self,
        sku: &Sku,
        order_id: u64,
        note: &str,
        shipping_method: ShippingMethod,
    ) -> Result<String, StorageError> {
        let mut state = self.begin()?;
        state.next_tracking += 1;
        let tracking_number = format!("TRACK-{:04}", state.next_tracking);
        let key = (order_id, sku.clone());
        state.statuses.insert(
            key.clone(),
            ShippingStatus {
                shipping_method,
                tracking_number: tracking_number.clone(),
                shipped: true,
            },
        );
        state.notes.insert(key, note.to_string());
        Ok(tracking_number)
    }

    async fn get_shipping_status(
        &self,
        order_id: u64,
        sku: &Sku,
    ) -> Result<ShippingStatus, StorageError> {
        Ok(self
            .begin()?
            .statuses
            .get(&(order_id, sku.clone()))
            .cloned()
            .unwrap_or_else(ShippingStatus::not_shipped))
    }

    async fn product_exists(&self, sku: &Sku) -> Result<bool, StorageError> {
        Ok(self.begin()?.costs.contains_key(sku))
    }

    async fn order_exists(&self, order_id: u64) -> Result<bool, StorageError> {
        Ok(self.begin()?.orders.contains(&order_id))
    }
}
