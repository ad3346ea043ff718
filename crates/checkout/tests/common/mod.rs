// tests/common/mod.rs
#![allow(dead_code)]

use std::sync::Arc;

use prometheus_client::registry::Registry;
use uuid::Uuid;

use checkout::{
    abstract_trait::{
        cart::DynCartQueryService,
        order::service::{DynOrderCommandService, DynOrderQueryService},
    },
    domain::requests::order::{CreateOrderRequest, OrderItemRequest},
    repository::memory::InMemoryCheckoutStore,
    service::{
        cart::CartQueryService,
        order::{OrderCommandService, OrderCommandServiceDeps, OrderQueryService},
    },
};

/// The full service stack wired over one in-memory store, the same way the
/// dependency container wires it over Postgres.
pub struct TestHarness {
    pub store: Arc<InMemoryCheckoutStore>,
    pub order_command: DynOrderCommandService,
    pub order_query: DynOrderQueryService,
    pub cart_query: DynCartQueryService,
}

pub fn harness() -> TestHarness {
    let store = Arc::new(InMemoryCheckoutStore::new());
    let mut registry = Registry::default();

    let deps = OrderCommandServiceDeps {
        command: store.clone(),
        query: store.clone(),
        book_query: store.clone(),
        order_item_query: store.clone(),
    };
    let order_command: DynOrderCommandService =
        Arc::new(OrderCommandService::new(deps, &mut registry));

    let order_query: DynOrderQueryService = Arc::new(OrderQueryService::new(
        store.clone(),
        store.clone(),
        &mut registry,
    ));

    let cart_query: DynCartQueryService = Arc::new(CartQueryService::new(store.clone(), &mut registry));

    TestHarness {
        store,
        order_command,
        order_query,
        cart_query,
    }
}

pub fn order_request(user_id: Uuid, items: Vec<OrderItemRequest>) -> CreateOrderRequest {
    CreateOrderRequest {
        user_id,
        payment_method: "card".to_string(),
        shipping_method: "standard".to_string(),
        customer_name: "Jane Reader".to_string(),
        customer_email: "jane@example.com".to_string(),
        customer_phone: "+15550100".to_string(),
        shipping_address: "1 Library Lane".to_string(),
        notes: None,
        items,
    }
}

pub fn line(book_id: Uuid, quantity: i32) -> OrderItemRequest {
    OrderItemRequest { book_id, quantity }
}
