//! Demo inventory for the single-process binary.

use catalog::{InMemoryCatalogRepository, Product, ProductCategory};
use common::{ShippingMethod, Sku};
use shipping::{InMemoryShippingRepository, ShippingCost};
use warehouse::InMemoryWarehouseRepository;

struct DemoItem {
    sku: &'static str,
    name: &'static str,
    description: &'static str,
    manufacturer: &'static str,
    model: &'static str,
    price: i64,
    category: u64,
    on_hand: i64,
}

const ITEMS: &[DemoItem] = &[
    DemoItem {
        sku: "8675309",
        name: "Widget",
        description: "A general purpose widget",
        manufacturer: "Acme",
        model: "W-1",
        price: 500,
        category: 1,
        on_hand: 42,
    },
    DemoItem {
        sku: "ABC123",
        name: "Sprocket",
        description: "Twelve tooth sprocket",
        manufacturer: "Spacely",
        model: "SP-12",
        price: 1299,
        category: 1,
        on_hand: 7,
    },
    DemoItem {
        sku: "HOOT0001",
        name: "Owl post subscription",
        description: "Letters delivered by raven or owl",
        manufacturer: "Eyrie",
        model: "RAVEN-1",
        price: 2500,
        category: 2,
        on_hand: 3,
    },
];

/// Orders the shipping service recognizes out of the box.
pub const DEMO_ORDERS: &[u64] = &[42, 43, 44];

/// Fills the in-memory stores with a small consistent inventory.
pub fn seed(
    catalog: &InMemoryCatalogRepository,
    shipping: &InMemoryShippingRepository,
    warehouse: &InMemoryWarehouseRepository,
) {
    catalog.insert_category(ProductCategory {
        id: 1,
        name: "Hardware".to_string(),
        description: "Nuts, bolts and everything between".to_string(),
    });
    catalog.insert_category(ProductCategory {
        id: 2,
        name: "Services".to_string(),
        description: "Things that are not things".to_string(),
    });

    for item in ITEMS {
        let sku = Sku::new(item.sku);
        catalog.insert_product(Product {
            sku: sku.clone(),
            name: item.name.to_string(),
            description: item.description.to_string(),
            manufacturer: item.manufacturer.to_string(),
            model: item.model.to_string(),
            price: item.price,
        });
        catalog.add_to_category(item.category, sku.clone());
        shipping.set_costs(
            sku.clone(),
            vec![
                ShippingCost {
                    price: 1500,
                    method: ShippingMethod::Fedex,
                },
                ShippingCost {
                    price: 900,
                    method: ShippingMethod::Usps,
                },
            ],
        );
        warehouse.insert_item(sku, item.manufacturer, item.model, item.on_hand);
    }

    for &order_id in DEMO_ORDERS {
        shipping.insert_order(order_id);
    }

    tracing::info!(products = ITEMS.len(), orders = DEMO_ORDERS.len(), "seeded demo data");
}
