use crate::{
    abstract_trait::cart::{CartQueryServiceTrait, DynCartRepository},
    domain::response::{api::ApiResponse, cart::CartItemResponse},
};
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics, Status},
};

use async_trait::async_trait;
use prometheus_client::registry::Registry;
use tokio::time::Instant;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct CartQueryService {
    repository: DynCartRepository,
    metrics: Metrics,
}

impl CartQueryService {
    pub fn new(repository: DynCartRepository, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        registry.register(
            "cart_query_service_request_counter",
            "Total number of requests to the CartQueryService",
            metrics.request_counter.clone(),
        );
        registry.register(
            "cart_query_service_request_duration",
            "Histogram of request durations for the CartQueryService",
            metrics.request_duration.clone(),
        );

        Self {
            repository,
            metrics,
        }
    }

    fn observe(&self, method: Method, status: Status, started: Instant) {
        self.metrics
            .record(method, status, started.elapsed().as_secs_f64());
    }
}

#[async_trait]
impl CartQueryServiceTrait for CartQueryService {
    async fn find_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<ApiResponse<Vec<CartItemResponse>>, ServiceError> {
        info!("🛒 Fetching cart for user {}", user_id);

        let method = Method::Get;
        let started = Instant::now();

        let items = match self.repository.find_items_by_user(user_id).await {
            Ok(items) => items,
            Err(e) => {
                error!("❌ Failed to fetch cart for user {}: {e:?}", user_id);
                self.observe(method, Status::Error, started);
                return Err(ServiceError::Repo(e));
            }
        };

        self.observe(method, Status::Success, started);

        Ok(ApiResponse {
            status: "success".into(),
            message: "Cart retrieved successfully".into(),
            data: items.into_iter().map(CartItemResponse::from).collect(),
        })
    }
}
