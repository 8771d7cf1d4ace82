//! Catalog service: validates requests and consults the repository.

use common::{ServiceError, StorageError};

use crate::error::CatalogError;
use crate::model::{
    CategoryProductsRequest, DetailRequest, Product, ProductCategory, SearchRequest,
};
use crate::repository::CatalogRepository;

/// Shortest search term the catalog accepts.
pub const MIN_SEARCH_TERM_LEN: usize = 3;

/// Stateless catalog request handler.
pub struct CatalogService<R: CatalogRepository> {
    repo: R,
}

impl<R: CatalogRepository> CatalogService<R> {
    /// Creates a new catalog service over a repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns a reference to the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Looks up a single product by SKU.
    #[tracing::instrument(skip(self), fields(sku = %request.sku))]
    pub async fn get_product_details(
        &self,
        request: &DetailRequest,
    ) -> Result<Product, ServiceError> {
        if request.sku.is_empty() {
            return Err(CatalogError::MissingRequest("product details").into());
        }

        let exists = self
            .repo
            .product_exists(&request.sku)
            .await
            .map_err(storage("Failed to check product existence"))?;
        if !exists {
            return Err(CatalogError::NoSuchProduct.into());
        }

        let product = self
            .repo
            .get_product(&request.sku)
            .await
            .map_err(storage("Failed to query product details"))?;
        Ok(product)
    }

    /// Lists every product category.
    #[tracing::instrument(skip(self))]
    pub async fn get_product_categories(&self) -> Result<Vec<ProductCategory>, ServiceError> {
        let categories = self
            .repo
            .get_categories()
            .await
            .map_err(storage("Failed to query categories"))?;
        Ok(categories)
    }

    /// Lists the products in a category.
    #[tracing::instrument(skip(self), fields(category_id = request.category_id))]
    pub async fn get_products_in_category(
        &self,
        request: &CategoryProductsRequest,
    ) -> Result<Vec<Product>, ServiceError> {
        let exists = self
            .repo
            .category_exists(request.category_id)
            .await
            .map_err(storage("Failed to check category existence"))?;
        if !exists {
            return Err(CatalogError::NoSuchCategory.into());
        }

        let products = self
            .repo
            .get_products_in_category(request.category_id)
            .await
            .map_err(storage("Failed to query products in category"))?;
        Ok(products)
    }

    /// Searches product names and descriptions.
    ///
    /// Terms shorter than [`MIN_SEARCH_TERM_LEN`] are rejected before the
    /// repository is consulted.
    #[tracing::instrument(skip(self))]
    pub async fn product_search(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<Product>, ServiceError> {
        if !is_valid_search_term(&request.search_term) {
            return Err(CatalogError::BadSearchTerm.into());
        }

        let results = self
            .repo
            .find(&request.search_term, &request.categories)
            .await
            .map_err(storage("Failed to search products"))?;
        tracing::debug!(results = results.len(), "search complete");
        Ok(results)
    }
}

fn is_valid_search_term(term: &str) -> bool {
    term.chars().count() >= MIN_SEARCH_TERM_LEN
}

fn storage(context: &'static str) -> impl FnOnce(StorageError) -> CatalogError {
    move |source| {
        tracing::error!(error = %source, context, "catalog repository failure");
        CatalogError::Storage { context, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryCatalogRepository;
    use common::{ErrorClass, Sku, TransportHint};

    fn product(sku: &str) -> Product {
        Product {
            sku: Sku::new(sku),
            name: "Widget".to_string(),
            description: "A widget".to_string(),
            manufacturer: "TOSHIBA".to_string(),
            model: "T-1000".to_string(),
            price: 500,
        }
    }

    fn service() -> CatalogService<InMemoryCatalogRepository> {
        let repo = InMemoryCatalogRepository::new();
        repo.insert_product(product("ABC000"));
        repo.insert_product(product("ABC123"));
        repo.insert_product(product("8675309"));
        repo.insert_category(ProductCategory {
            id: 42,
            name: "Widgets".to_string(),
            description: "All the widgets".to_string(),
        });
        repo.add_to_category(42, Sku::new("ABC000"));
        repo.add_to_category(42, Sku::new("ABC123"));
        CatalogService::new(repo)
    }

    #[tokio::test]
    async fn test_product_details_found() {
        let svc = service();
        let product = svc
            .get_product_details(&DetailRequest {
                sku: Sku::new("8675309"),
            })
            .await
            .unwrap();
        assert_eq!(product.name, "Widget");
        assert_eq!(product.price, 500);
    }

    #[tokio::test]
    async fn test_product_details_unknown_sku_is_not_found() {
        let svc = service();
        let err = svc
            .get_product_details(&DetailRequest {
                sku: Sku::new("nevergonnahappen"),
            })
            .await
            .unwrap_err();
        assert_eq!(err.class(), ErrorClass::NotFound);
        assert_eq!(err.hint(), TransportHint::NotFound);
        assert_eq!(err.message(), "No such product");
    }

    #[tokio::test]
    async fn test_product_details_empty_sku_is_bad_request() {
        let svc = service();
        let err = svc
            .get_product_details(&DetailRequest { sku: Sku::new("") })
            .await
            .unwrap_err();
        assert_eq!(err.class(), ErrorClass::BadRequest);
        assert_eq!(svc.repository().call_count(), 0);
    }

    #[tokio::test]
    async fn test_product_details_storage_failure_is_internal() {
        let svc = service();
        svc.repository().set_fail(true);
        let err = svc
            .get_product_details(&DetailRequest {
                sku: Sku::new("8675309"),
            })
            .await
            .unwrap_err();
        assert_eq!(err.class(), ErrorClass::InternalError);
        assert!(err
            .message()
            .starts_with("Failed to check product existence: "));
    }

    #[tokio::test]
    async fn test_products_within_category() {
        let svc = service();
        let products = svc
            .get_products_in_category(&CategoryProductsRequest { category_id: 42 })
            .await
            .unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[1].sku.as_str(), "ABC123");
    }

    #[tokio::test]
    async fn test_products_within_missing_category_is_not_found() {
        let svc = service();
        let err = svc
            .get_products_in_category(&CategoryProductsRequest { category_id: 1 })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.message(), "No such category");
    }

    #[tokio::test]
    async fn test_products_within_category_fails_when_repo_fails() {
        let svc = service();
        svc.repository().set_fail(true);
        let err = svc
            .get_products_in_category(&CategoryProductsRequest { category_id: 42 })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 500);
    }

    #[tokio::test]
    async fn test_categories_listed() {
        let svc = service();
        let categories = svc.get_product_categories().await.unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].id, 42);
    }

    #[tokio::test]
    async fn test_search_invokes_repository() {
        let svc = service();
        let results = svc
            .product_search(&SearchRequest {
                search_term: "widget".to_string(),
                categories: vec![1, 2, 42],
            })
            .await
            .unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(svc.repository().call_count(), 1);
    }

    #[tokio::test]
    async fn test_short_search_term_is_rejected_before_repository() {
        let svc = service();
        for term in ["", "ab"] {
            let err = svc
                .product_search(&SearchRequest {
                    search_term: term.to_string(),
                    categories: vec![1, 2, 3],
                })
                .await
                .unwrap_err();
            assert_eq!(err.class(), ErrorClass::BadRequest);
            assert_eq!(err.status_code(), 400);
        }
        assert_eq!(svc.repository().call_count(), 0);
    }

    #[tokio::test]
    async fn test_search_fails_when_repo_fails() {
        let svc = service();
        svc.repository().set_fail(true);
        let err = svc
            .product_search(&SearchRequest {
                search_term: "foo".to_string(),
                categories: vec![],
            })
            .await
            .unwrap_err();
        assert_eq!(err.class(), ErrorClass::InternalError);
    }
}
