//! Shipping service.
//!
//! Marking an item shipped records it in the repository and then announces
//! it on the event bus. The announcement is best-effort: when publishing
//! fails the tracking number is still returned, with `success = false`.

use common::{ServiceError, StorageError};
use events::{ShipmentEvent, ShipmentPublisher};

use crate::error::ShippingError;
use crate::model::{
    MarkShippedRequest, MarkShippedResponse, ShippingCost, ShippingCostRequest, ShippingStatus,
    ShippingStatusRequest,
};
use crate::repository::ShippingRepository;

/// Stateless shipping request handler.
pub struct ShippingService<R: ShippingRepository, P: ShipmentPublisher> {
    repo: R,
    publisher: P,
}

impl<R: ShippingRepository, P: ShipmentPublisher> ShippingService<R, P> {
    /// Creates a new shipping service.
    pub fn new(repo: R, publisher: P) -> Self {
        Self { repo, publisher }
    }

    /// Returns a reference to the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Lists the shipping options for a SKU to a zip code.
    #[tracing::instrument(skip(self), fields(sku = %request.sku))]
    pub async fn get_shipping_cost(
        &self,
        request: &ShippingCostRequest,
    ) -> Result<Vec<ShippingCost>, ServiceError> {
        if request.sku.is_empty() || request.zip_code.is_empty() {
            return Err(ShippingError::MissingRequest("shipping cost").into());
        }

        let exists = self
            .repo
            .product_exists(&request.sku)
            .await
            .map_err(storage("Failed to check product existence"))?;
        if !exists {
            return Err(ShippingError::NoSuchSku.into());
        }

        let costs = self
            .repo
            .get_shipping_costs(&request.sku, &request.zip_code)
            .await
            .map_err(storage("Failed to retrieve shipping cost"))?;
        Ok(costs)
    }

    /// Records an item as shipped and announces it.
    #[tracing::instrument(skip(self), fields(order_id = request.order_id, sku = %request.sku))]
    pub async fn mark_item_shipped(
        &self,
        request: &MarkShippedRequest,
    ) -> Result<MarkShippedResponse, ServiceError> {
        if request.sku.is_empty() {
            return Err(ShippingError::MissingRequest("mark shipped").into());
        }
        if !request.shipping_method.is_known() {
            return Err(ShippingError::InvalidShippingMethod.into());
        }

        let exists = self
            .repo
            .order_exists(request.order_id)
            .await
            .map_err(storage("Failed to check order existence"))?;
        if !exists {
            return Err(ShippingError::NoSuchOrder.into());
        }

        let tracking_number = self
            .repo
            .mark_shipped(
                &request.sku,
                request.order_id,
                &request.note,
                request.shipping_method,
            )
            .await
            .map_err(storage("Failed to mark item as shipped"))?;

        let event = ShipmentEvent::new(
            request.sku.clone(),
            request.order_id,
            tracking_number.clone(),
            request.shipping_method,
            request.note.clone(),
        );
        let success = match self.publisher.publish_item_shipped(&event).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    %tracking_number,
                    "item marked shipped but the announcement was not published"
                );
                metrics::counter!("shipping_unannounced_shipments_total").increment(1);
                false
            }
        };

        Ok(MarkShippedResponse {
            tracking_number,
            success,
        })
    }

    /// Reports whether an item of an order has shipped.
    #[tracing::instrument(skip(self), fields(order_id = request.order_id, sku = %request.sku))]
    pub async fn get_shipping_status(
        &self,
        request: &ShippingStatusRequest,
    ) -> Result<ShippingStatus, ServiceError> {
        if request.sku.is_empty() {
            return Err(ShippingError::MissingRequest("shipping status").into());
        }

        let exists = self
            .repo
            .order_exists(request.order_id)
            .await
            .map_err(storage("Failed to check order existence"))?;
        if !exists {
            return Err(ShippingError::NoSuchOrder.into());
        }

        let status = self
            .repo
            .get_shipping_status(request.order_id, &request.sku)
            .await
            .map_err(storage("Failed to query shipping status"))?;
        Ok(status)
    }
}

fn storage(context: &'static str) -> impl FnOnce(StorageError) -> ShippingError {
    move |source| {
        tracing::error!(error = %source, context, "shipping repository failure");
        ShippingError::Storage { context, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryShippingRepository;
    use async_trait::async_trait;
    use common::{ErrorClass, ShippingMethod, Sku};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct FakePublisher {
        published: Arc<Mutex<Vec<ShipmentEvent>>>,
        fail: bool,
    }

    #[async_trait]
    impl ShipmentPublisher for FakePublisher {
        async fn publish_item_shipped(&self, event: &ShipmentEvent) -> events::Result<()> {
            if self.fail {
                return Err(events::EventError::PublishFailed {
                    topic: events::ITEM_SHIPPED_TOPIC.to_string(),
                    reason: "Faily Fail".to_string(),
                });
            }
            self.published.lock().unwrap().push(event.clone());
            Ok(())
        }
    }

    fn service_with(
        publisher: FakePublisher,
    ) -> ShippingService<InMemoryShippingRepository, FakePublisher> {
        let repo = InMemoryShippingRepository::new();
        repo.set_costs(
            Sku::new("8675309"),
            vec![
                ShippingCost {
                    price: 2500,
                    method: ShippingMethod::Fedex,
                },
                ShippingCost {
                    price: 1000,
                    method: ShippingMethod::Raven,
                },
            ],
        );
        repo.insert_order(42);
        ShippingService::new(repo, publisher)
    }

    fn mark_request(order_id: u64, method: ShippingMethod) -> MarkShippedRequest {
        MarkShippedRequest {
            order_id,
            sku: Sku::new("8675309"),
            shipping_method: method,
            note: String::new(),
        }
    }

    #[tokio::test]
    async fn test_shipping_cost_invokes_repository() {
        let svc = service_with(FakePublisher::default());
        let costs = svc
            .get_shipping_cost(&ShippingCostRequest {
                sku: Sku::new("8675309"),
                zip_code: "90210".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(costs.len(), 2);
        assert_eq!(costs[0].method, ShippingMethod::Fedex);
        assert_eq!(costs[0].price, 2500);
    }

    #[tokio::test]
    async fn test_shipping_cost_unknown_sku_is_not_found() {
        let svc = service_with(FakePublisher::default());
        let err = svc
            .get_shipping_cost(&ShippingCostRequest {
                sku: Sku::new("notarealsku"),
                zip_code: "90210".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_shipping_cost_repo_failure_keeps_cause() {
        let svc = service_with(FakePublisher::default());
        svc.repository().set_fail(true);
        let err = svc
            .get_shipping_cost(&ShippingCostRequest {
                sku: Sku::new("8675309"),
                zip_code: "90210".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 500);
        assert_eq!(
            err.message(),
            "Failed to check product existence: shipping store unavailable"
        );
    }

    #[tokio::test]
    async fn test_shipping_cost_missing_fields_is_bad_request() {
        let svc = service_with(FakePublisher::default());
        let err = svc
            .get_shipping_cost(&ShippingCostRequest {
                sku: Sku::new("8675309"),
                zip_code: String::new(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.class(), ErrorClass::BadRequest);
        assert_eq!(svc.repository().call_count(), 0);
    }

    #[tokio::test]
    async fn test_mark_shipped_publishes_one_event() {
        let publisher = FakePublisher::default();
        let svc = service_with(publisher.clone());

        let resp = svc
            .mark_item_shipped(&mark_request(42, ShippingMethod::Ups))
            .await
            .unwrap();

        assert!(!resp.tracking_number.is_empty());
        assert!(resp.success);
        let published = publisher.published.lock().unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].order_id, 42);
        assert_eq!(published[0].sku.as_str(), "8675309");
        assert_eq!(published[0].tracking_number, resp.tracking_number);
        assert_eq!(published[0].shipping_method, ShippingMethod::Ups);
    }

    #[tokio::test]
    async fn test_mark_shipped_unknown_order_is_not_found() {
        let publisher = FakePublisher::default();
        let svc = service_with(publisher.clone());
        let err = svc
            .mark_item_shipped(&mark_request(1, ShippingMethod::Ups))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.message(), "No such order");
        assert!(publisher.published.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mark_shipped_repo_failure_is_internal() {
        let svc = service_with(FakePublisher::default());
        svc.repository().set_fail(true);
        let err = svc
            .mark_item_shipped(&mark_request(42, ShippingMethod::Ups))
            .await
            .unwrap_err();
        assert_eq!(err.class(), ErrorClass::InternalError);
    }

    #[tokio::test]
    async fn test_mark_shipped_requires_known_method() {
        let svc = service_with(FakePublisher::default());
        let err = svc
            .mark_item_shipped(&mark_request(42, ShippingMethod::Unknown))
            .await
            .unwrap_err();
        assert_eq!(err.class(), ErrorClass::BadRequest);
        assert_eq!(svc.repository().call_count(), 0);
    }

    #[tokio::test]
    async fn test_mark_shipped_survives_publish_failure() {
        let publisher = FakePublisher {
            fail: true,
            ..FakePublisher::default()
        };
        let svc = service_with(publisher);

        let resp = svc
            .mark_item_shipped(&mark_request(42, ShippingMethod::Ups))
            .await
            .unwrap();

        assert_eq!(resp.tracking_number, "TRACK-0001");
        assert!(!resp.success);
        let status = svc
            .get_shipping_status(&ShippingStatusRequest {
                order_id: 42,
                sku: Sku::new("8675309"),
            })
            .await
            .unwrap();
        assert!(status.shipped);
    }

    #[tokio::test]
    async fn test_shipping_status_after_shipment() {
        let svc = service_with(FakePublisher::default());
        svc.mark_item_shipped(&mark_request(42, ShippingMethod::Raven))
            .await
            .unwrap();

        let status = svc
            .get_shipping_status(&ShippingStatusRequest {
                order_id: 42,
                sku: Sku::new("8675309"),
            })
            .await
            .unwrap();
        assert_eq!(status.shipping_method, ShippingMethod::Raven);
        assert_eq!(status.tracking_number, "TRACK-0001");
    }

    #[tokio::test]
    async fn test_shipping_status_unknown_order_is_not_found() {
        let svc = service_with(FakePublisher::default());
        let err = svc
            .get_shipping_status(&ShippingStatusRequest {
                order_id: 1,
                sku: Sku::new("8675309"),
            })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_shipping_status_repo_failure_keeps_cause() {
        let svc = service_with(FakePublisher::default());
        svc.repository().set_fail(true);
        let err = svc
            .get_shipping_status(&ShippingStatusRequest {
                order_id: 42,
                sku: Sku::new("8675309"),
            })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 500);
        assert!(err.message().starts_with("Failed to check order existence"));
    }
}
