//! One store per entity type over a shared gateway.

use std::sync::Arc;

use serde_json::json;

use milladmin_entities::{
    Branch, Category, Customer, Department, Grade, Labour, Machine, Product, ProductType, Quote,
    StockDiscard, TaxSlab, Uom, WorkShift,
};
use milladmin_gateway::{InMemoryGateway, RemoteGateway};
use milladmin_store::{CreatePolicy, EntityStore};

/// The per-entity stores of the panel.
///
/// Constructed once at startup; stores are cheap-clone handles shared with
/// the list/form controllers. Categories and departments keep the original
/// prepend-on-create behavior; everything else refetches so
/// server-computed fields stay accurate.
#[derive(Clone)]
pub struct AdminServices {
    pub gateway: Arc<dyn RemoteGateway>,
    pub branches: EntityStore<Branch>,
    pub categories: EntityStore<Category>,
    pub departments: EntityStore<Department>,
    pub grades: EntityStore<Grade>,
    pub machines: EntityStore<Machine>,
    pub products: EntityStore<Product>,
    pub product_types: EntityStore<ProductType>,
    pub tax_slabs: EntityStore<TaxSlab>,
    pub uoms: EntityStore<Uom>,
    pub work_shifts: EntityStore<WorkShift>,
    pub labours: EntityStore<Labour>,
    pub customers: EntityStore<Customer>,
    pub quotes: EntityStore<Quote>,
    pub stock_discards: EntityStore<StockDiscard>,
}

impl AdminServices {
    pub fn new(gateway: Arc<dyn RemoteGateway>) -> Self {
        Self {
            branches: EntityStore::new(gateway.clone()),
            categories: EntityStore::with_policy(gateway.clone(), CreatePolicy::Prepend),
            departments: EntityStore::with_policy(gateway.clone(), CreatePolicy::Prepend),
            grades: EntityStore::new(gateway.clone()),
            machines: EntityStore::new(gateway.clone()),
            products: EntityStore::new(gateway.clone()),
            product_types: EntityStore::new(gateway.clone()),
            tax_slabs: EntityStore::new(gateway.clone()),
            uoms: EntityStore::new(gateway.clone()),
            work_shifts: EntityStore::new(gateway.clone()),
            labours: EntityStore::new(gateway.clone()),
            customers: EntityStore::new(gateway.clone()),
            quotes: EntityStore::new(gateway.clone()),
            stock_discards: EntityStore::new(gateway.clone()),
            gateway,
        }
    }

    /// Demo mode: all stores over a seeded in-memory gateway.
    pub fn in_memory() -> (Self, Arc<InMemoryGateway>) {
        let gateway = Arc::new(InMemoryGateway::new());
        seed_demo(&gateway);
        let services = Self::new(gateway.clone());
        (services, gateway)
    }
}

fn seed_demo(gateway: &InMemoryGateway) {
    gateway.seed(
        "branch",
        vec![
            json!({"id": "0198a000-0000-7000-8000-000000000001", "name": "HQ", "mobile": "9876543210", "address": "Main St", "status": true}),
            json!({"id": "0198a000-0000-7000-8000-000000000002", "name": "East Yard", "mobile": "9000000001", "address": "Dock Rd", "status": true}),
        ],
    );
    gateway.seed(
        "category",
        vec![
            json!({"id": "0198a000-0000-7000-8000-000000000011", "name": "Sheets", "sequence": 0, "status": true}),
            json!({"id": "0198a000-0000-7000-8000-000000000012", "name": "Pipes", "sequence": 1, "status": true}),
            json!({"id": "0198a000-0000-7000-8000-000000000013", "name": "Fasteners", "sequence": 2, "status": false}),
        ],
    );
    gateway.seed(
        "uom",
        vec![
            json!({"id": "0198a000-0000-7000-8000-000000000021", "name": "Kilogram", "short_code": "kg", "status": true}),
            json!({"id": "0198a000-0000-7000-8000-000000000022", "name": "Meter", "short_code": "m", "status": true}),
        ],
    );
    gateway.seed(
        "product",
        vec![
            json!({
                "id": "0198a000-0000-7000-8000-000000000031",
                "name": "MS Sheet 2mm",
                "sku": "SHT-2MM",
                "category_id": "0198a000-0000-7000-8000-000000000011",
                "uom_id": "0198a000-0000-7000-8000-000000000021",
                "price": 540.0,
                "image": "products/sht-2mm.jpg",
                "status": true,
            }),
        ],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use milladmin_gateway::ListQuery;

    #[tokio::test]
    async fn in_memory_services_serve_seeded_data() {
        let (services, _gw) = AdminServices::in_memory();
        services.branches.fetch_list(ListQuery::default()).await.unwrap();
        services.categories.fetch_list(ListQuery::default()).await.unwrap();

        assert_eq!(services.branches.snapshot().len(), 2);
        assert_eq!(services.categories.total(), 3);
    }

    #[tokio::test]
    async fn stores_share_one_gateway() {
        let (services, gw) = AdminServices::in_memory();
        services.branches.fetch_list(ListQuery::default()).await.unwrap();
        services.products.fetch_list(ListQuery::default()).await.unwrap();
        assert_eq!(gw.call_count("admin/"), 2);
    }
}
