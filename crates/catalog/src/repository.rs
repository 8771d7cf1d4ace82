//! Catalog repository trait and in-memory implementation.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use common::{Sku, StorageError};

use crate::model::{Product, ProductCategory};

/// Storage operations the catalog service relies on.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn get_product(&self, sku: &Sku) -> Result<Product, StorageError>;

    async fn get_categories(&self) -> Result<Vec<ProductCategory>, StorageError>;

    async fn get_products_in_category(
        &self,
        category_id: u64,
    ) -> Result<Vec<Product>, StorageError>;

    /// Finds products whose name or description contains `search_term`,
    /// restricted to `categories` unless it is empty.
    async fn find(
        &self,
        search_term: &str,
        categories: &[u64],
    ) -> Result<Vec<Product>, StorageError>;

    async fn category_exists(&self, category_id: u64) -> Result<bool, StorageError>;

    async fn product_exists(&self, sku: &Sku) -> Result<bool, StorageError>;
}

#[derive(Debug, Default)]
struct InMemoryCatalogState {
    products: HashMap<Sku, Product>,
    categories: BTreeMap<u64, ProductCategory>,
    memberships: HashMap<u64, BTreeSet<Sku>>,
    fail: bool,
    calls: usize,
}

/// In-memory catalog repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogRepository {
    state: Arc<RwLock<InMemoryCatalogState>>,
}

impl InMemoryCatalogRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a product.
    pub fn insert_product(&self, product: Product) {
        self.lock().products.insert(product.sku.clone(), product);
    }

    /// Adds or replaces a category.
    pub fn insert_category(&self, category: ProductCategory) {
        self.lock().categories.insert(category.id, category);
    }

    /// Places a product in a category.
    pub fn add_to_category(&self, category_id: u64, sku: Sku) {
        self.lock()
            .memberships
            .entry(category_id)
            .or_default()
            .insert(sku);
    }

    /// Makes every subsequent call fail with a storage error.
    pub fn set_fail(&self, fail: bool) {
        self.lock().fail = fail;
    }

    /// Returns how many repository operations have been invoked.
    pub fn call_count(&self) -> usize {
        self.lock().calls
    }

    fn lock(&self) -> std::sync::RwLockWriteGuard<'_, InMemoryCatalogState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self) -> Result<std::sync::RwLockWriteGuard<'_, InMemoryCatalogState>, StorageError> {
        let mut state = self.lock();
        state.calls += 1;
        if state.fail {
            return Err(StorageError::new("catalog store unavailable"));
        }
        Ok(state)
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalogRepository {
    async fn get_product(&self, sku: &Sku) -> Result<Product, StorageError> {
        self.begin()?
            .products
            .get(sku)
            .cloned()
            .ok_or_else(|| StorageError::new(format!("product record missing for {sku}")))
    }

    async fn get_categories(&self) -> Result<Vec<ProductCategory>, StorageError> {
        Ok(self.begin()?.categories.values().cloned().collect())
    }

    async fn get_products_in_category(
        &self,
        category_id: u64,
    ) -> Result<Vec<Product>, StorageError> {
        let state = self.begin()?;
        let products = state
            .memberships
            .get(&category_id)
            .into_iter()
            .flatten()
            .filter_map(|sku| state.products.get(sku).cloned())
            .collect();
        Ok(products)
    }

    async fn find(
        &self,
        search_term: &str,
        categories: &[u64],
    ) -> Result<Vec<Product>, StorageError> {
        let state = self.begin()?;
        let needle = search_term.to_lowercase();

        let in_scope = |sku: &Sku| {
            categories.is_empty()
                || categories.iter().any(|id| {
                    state
                        .memberships
                        .get(id)
                        .is_some_and(|members| members.contains(sku))
                })
        };

        let mut results: Vec<Product> = state
            .products
            .values()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
            })
            .filter(|p| in_scope(&p.sku))
            .cloned()
            .collect();
        results.sort_by(|a, b| a.sku.cmp(&b.sku));
        Ok(results)
    }

    async fn category_exists(&self, category_id: u64) -> Result<bool, StorageError> {
        Ok(self.begin()?.categories.contains_key(&category_id))
    }

    async fn product_exists(&self, sku: &Sku) -> Result<bool, StorageError> {
        Ok(self.begin()?.products.contains_key(sku))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(sku: &str, name: &str) -> Product {
        Product {
            sku: Sku::new(sku),
            name: name.to_string(),
            description: format!("A fine {name}"),
            manufacturer: "ACME".to_string(),
            model: "M-1".to_string(),
            price: 500,
        }
    }

    fn seeded() -> InMemoryCatalogRepository {
        let repo = InMemoryCatalogRepository::new();
        repo.insert_product(product("ABC000", "Widget"));
        repo.insert_product(product("ABC123", "Gadget"));
        repo.insert_product(product("XYZ999", "Widget Pro"));
        repo.insert_category(ProductCategory {
            id: 42,
            name: "Tools".to_string(),
            description: "Things that do things".to_string(),
        });
        repo.add_to_category(42, Sku::new("ABC000"));
        repo.add_to_category(42, Sku::new("ABC123"));
        repo
    }

    #[tokio::test]
    async fn test_products_in_category_in_sku_order() {
        let repo = seeded();
        let products = repo.get_products_in_category(42).await.unwrap();
        let skus: Vec<_> = products.iter().map(|p| p.sku.as_str()).collect();
        assert_eq!(skus, vec!["ABC000", "ABC123"]);
        assert!(repo.get_products_in_category(7).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_is_case_insensitive() {
        let repo = seeded();
        let results = repo.find("widget", &[]).await.unwrap();
        let skus: Vec<_> = results.iter().map(|p| p.sku.as_str()).collect();
        assert_eq!(skus, vec!["ABC000", "XYZ999"]);
    }

    #[tokio::test]
    async fn test_find_respects_categories() {
        let repo = seeded();
        let results = repo.find("widget", &[42]).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].sku.as_str(), "ABC000");
    }

    #[tokio::test]
    async fn test_existence_checks() {
        let repo = seeded();
        assert!(repo.product_exists(&Sku::new("ABC123")).await.unwrap());
        assert!(!repo.product_exists(&Sku::new("NOPE")).await.unwrap());
        assert!(repo.category_exists(42).await.unwrap());
        assert!(!repo.category_exists(1).await.unwrap());
    }

    #[tokio::test]
    async fn test_fail_and_call_count() {
        let repo = seeded();
        repo.set_fail(true);
        assert!(repo.get_categories().await.is_err());
        assert!(repo.product_exists(&Sku::new("ABC123")).await.is_err());
        assert_eq!(repo.call_count(), 2);
    }

    #[tokio::test]
    async fn test_poisoned_lock_is_recovered() {
        let repo = seeded();
        let writer = repo.clone();
        let crashed = std::thread::spawn(move || {
            let _guard = writer.state.write().unwrap();
            panic!("writer crashed while holding the catalog lock");
        })
        .join();
        assert!(crashed.is_err());
        assert!(repo.state.is_poisoned());

        assert!(repo.product_exists(&Sku::new("ABC123")).await.unwrap());
        assert_eq!(repo.get_categories().await.unwrap().len(), 1);
        assert_eq!(repo.call_count(), 2);
    }
}
