use crate::{
    abstract_trait::{
        order::{repository::DynOrderQueryRepository, service::OrderQueryServiceTrait},
        order_item::DynOrderItemQueryRepository,
    },
    domain::response::{api::ApiResponse, order::OrderResponse},
};
use shared::{
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics, Status},
};

use async_trait::async_trait;
use prometheus_client::registry::Registry;
use tokio::time::Instant;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct OrderQueryService {
    query: DynOrderQueryRepository,
    order_item_query: DynOrderItemQueryRepository,
    metrics: Metrics,
}

impl OrderQueryService {
    pub fn new(
        query: DynOrderQueryRepository,
        order_item_query: DynOrderItemQueryRepository,
        registry: &mut Registry,
    ) -> Self {
        let metrics = Metrics::new();
        registry.register(
            "order_query_service_request_counter",
            "Total number of requests to the OrderQueryService",
            metrics.request_counter.clone(),
        );
        registry.register(
            "order_query_service_request_duration",
            "Histogram of request durations for the OrderQueryService",
            metrics.request_duration.clone(),
        );

        Self {
            query,
            order_item_query,
            metrics,
        }
    }

    fn observe(&self, method: Method, status: Status, started: Instant) {
        self.metrics
            .record(method, status, started.elapsed().as_secs_f64());
    }
}

#[async_trait]
impl OrderQueryServiceTrait for OrderQueryService {
    async fn find_by_id(&self, order_id: Uuid) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        info!("🔍 Fetching order {}", order_id);

        let method = Method::Get;
        let started = Instant::now();

        let order = match self.query.find_by_id(order_id).await {
            Ok(Some(order)) => order,
            Ok(None) => {
                self.observe(method.clone(), Status::Error, started);
                return Err(ServiceError::Repo(RepositoryError::NotFound));
            }
            Err(e) => {
                error!("❌ Failed to fetch order {}: {e:?}", order_id);
                self.observe(method.clone(), Status::Error, started);
                return Err(ServiceError::Repo(e));
            }
        };

        let items = match self.order_item_query.find_by_order(order_id).await {
            Ok(items) => items,
            Err(e) => {
                self.observe(method.clone(), Status::Error, started);
                return Err(ServiceError::Repo(e));
            }
        };

        self.observe(method, Status::Success, started);

        Ok(ApiResponse {
            status: "success".into(),
            message: "Order retrieved successfully".into(),
            data: OrderResponse::from((order, items)),
        })
    }

    async fn find_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<ApiResponse<Vec<OrderResponse>>, ServiceError> {
        info!("📋 Fetching orders for user {}", user_id);

        let method = Method::Get;
        let started = Instant::now();

        let orders = match self.query.find_by_user(user_id).await {
            Ok(orders) => orders,
            Err(e) => {
                error!("❌ Failed to fetch orders for user {}: {e:?}", user_id);
                self.observe(method.clone(), Status::Error, started);
                return Err(ServiceError::Repo(e));
            }
        };

        let mut responses = Vec::with_capacity(orders.len());
        for order in orders {
            let items = match self.order_item_query.find_by_order(order.order_id).await {
                Ok(items) => items,
                Err(e) => {
                    self.observe(method.clone(), Status::Error, started);
                    return Err(ServiceError::Repo(e));
                }
            };
            responses.push(OrderResponse::from((order, items)));
        }

        info!(
            "✅ Retrieved {} order(s) for user {}",
            responses.len(),
            user_id
        );
        self.observe(method, Status::Success, started);

        Ok(ApiResponse {
            status: "success".into(),
            message: "Orders retrieved successfully".into(),
            data: responses,
        })
    }
}
