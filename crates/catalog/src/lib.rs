//! Product catalog service.
//!
//! Answers product detail lookups, lists categories and their products, and
//! runs simple product searches. Every failure leaves the service as a
//! [`common::ServiceError`].

pub mod error;
pub mod model;
pub mod repository;
pub mod service;

pub use error::CatalogError;
pub use model::{CategoryProductsRequest, DetailRequest, Product, ProductCategory, SearchRequest};
pub use repository::{CatalogRepository, InMemoryCatalogRepository};
pub use service::{CatalogService, MIN_SEARCH_TERM_LEN};
