use crate::{
    abstract_trait::{
        cart::DynCartQueryService,
        order::service::{DynOrderCommandService, DynOrderQueryService},
    },
    repository::{
        book::BookQueryRepository,
        cart::CartRepository,
        order::{OrderCommandRepository, OrderQueryRepository},
        order_item::OrderItemQueryRepository,
    },
    service::{
        cart::CartQueryService,
        order::{OrderCommandService, OrderCommandServiceDeps, OrderQueryService},
    },
};
use prometheus_client::registry::Registry;
use shared::config::ConnectionPool;
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct DependenciesInject {
    pub order_command: DynOrderCommandService,
    pub order_query: DynOrderQueryService,
    pub cart_query: DynCartQueryService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("order_command", &"OrderCommandService")
            .field("order_query", &"OrderQueryService")
            .field("cart_query", &"CartQueryService")
            .finish()
    }
}

impl DependenciesInject {
    pub fn new(pool: ConnectionPool, registry: &mut Registry) -> Self {
        let order_query_repo = Arc::new(OrderQueryRepository::new(pool.clone()));
        let order_command_repo = Arc::new(OrderCommandRepository::new(pool.clone()));
        let order_item_query_repo = Arc::new(OrderItemQueryRepository::new(pool.clone()));
        let book_query_repo = Arc::new(BookQueryRepository::new(pool.clone()));
        let cart_repo = Arc::new(CartRepository::new(pool));

        let order_command_deps = OrderCommandServiceDeps {
            command: order_command_repo,
            query: order_query_repo.clone(),
            book_query: book_query_repo,
            order_item_query: order_item_query_repo.clone(),
        };

        let order_command: DynOrderCommandService =
            Arc::new(OrderCommandService::new(order_command_deps, registry));

        let order_query: DynOrderQueryService = Arc::new(OrderQueryService::new(
            order_query_repo,
            order_item_query_repo,
            registry,
        ));

        let cart_query: DynCartQueryService = Arc::new(CartQueryService::new(cart_repo, registry));

        Self {
            order_command,
            order_query,
            cart_query,
        }
    }
}
