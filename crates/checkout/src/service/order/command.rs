use crate::{
    abstract_trait::{
        book::DynBookQueryRepository,
        order::{
            repository::{DynOrderCommandRepository, DynOrderQueryRepository},
            service::OrderCommandServiceTrait,
        },
        order_item::DynOrderItemQueryRepository,
    },
    domain::{
        requests::order::{
            CancelOrderRequest, CreateOrderRecord, CreateOrderRequest, OrderLineRecord,
            UpdateOrderStatusRequest,
        },
        response::{api::ApiResponse, order::OrderResponse},
    },
    model::status::OrderStatus,
};
use shared::{
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics, Status},
};

use async_trait::async_trait;
use prometheus_client::registry::Registry;
use tokio::time::Instant;
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct OrderCommandService {
    command: DynOrderCommandRepository,
    query: DynOrderQueryRepository,
    book_query: DynBookQueryRepository,
    order_item_query: DynOrderItemQueryRepository,
    metrics: Metrics,
}

pub struct OrderCommandServiceDeps {
    pub command: DynOrderCommandRepository,
    pub query: DynOrderQueryRepository,
    pub book_query: DynBookQueryRepository,
    pub order_item_query: DynOrderItemQueryRepository,
}

impl OrderCommandService {
    pub fn new(deps: OrderCommandServiceDeps, registry: &mut Registry) -> Self {
        let OrderCommandServiceDeps {
            command,
            query,
            book_query,
            order_item_query,
        } = deps;

        let metrics = Metrics::new();
        registry.register(
            "order_command_service_request_counter",
            "Total number of requests to the OrderCommandService",
            metrics.request_counter.clone(),
        );
        registry.register(
            "order_command_service_request_duration",
            "Histogram of request durations for the OrderCommandService",
            metrics.request_duration.clone(),
        );

        Self {
            command,
            query,
            book_query,
            order_item_query,
            metrics,
        }
    }

    fn observe(&self, method: Method, status: Status, started: Instant) {
        self.metrics
            .record(method, status, started.elapsed().as_secs_f64());
    }
}

fn line_item_errors(req: &CreateOrderRequest) -> Vec<String> {
    let mut errors = Vec::new();
    if req.items.is_empty() {
        errors.push("Order must contain at least one item".to_string());
    }
    for item in &req.items {
        if item.quantity <= 0 {
            errors.push(format!(
                "Quantity for book {} must be positive, got {}",
                item.book_id, item.quantity
            ));
        }
    }
    errors
}

#[async_trait]
impl OrderCommandServiceTrait for OrderCommandService {
    async fn place_order(
        &self,
        req: &CreateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        info!(
            "🏗️ Placing order for user_id={} with {} item(s)",
            req.user_id,
            req.items.len()
        );

        let method = Method::Post;
        let started = Instant::now();

        let errors = line_item_errors(req);
        if !errors.is_empty() {
            self.observe(method, Status::Error, started);
            return Err(ServiceError::Validation(errors));
        }

        // Advisory pass: price every line against the catalog and refuse
        // obviously doomed requests before touching any stock. The commit
        // below re-checks under row locks.
        let mut total_amount: i64 = 0;
        let mut lines = Vec::with_capacity(req.items.len());

        for item in &req.items {
            let book = match self.book_query.find_by_id(item.book_id).await {
                Ok(Some(book)) => book,
                Ok(None) => {
                    warn!("⚠️ Order request names unknown book {}", item.book_id);
                    self.observe(method.clone(), Status::Error, started);
                    return Err(ServiceError::Validation(vec![format!(
                        "Unknown book id: {}",
                        item.book_id
                    )]));
                }
                Err(e) => {
                    error!("❌ Failed to fetch book {}: {e:?}", item.book_id);
                    self.observe(method.clone(), Status::Error, started);
                    return Err(ServiceError::Repo(e));
                }
            };

            if item.quantity > book.stock {
                self.observe(method.clone(), Status::Error, started);
                return Err(ServiceError::InsufficientStock {
                    book_id: item.book_id,
                    requested: item.quantity,
                    available: book.stock,
                });
            }

            total_amount += book.price * i64::from(item.quantity);
            lines.push(OrderLineRecord {
                book_id: item.book_id,
                quantity: item.quantity,
                price: book.price,
            });
        }

        let record = CreateOrderRecord {
            user_id: req.user_id,
            total_amount,
            payment_method: req.payment_method.clone(),
            shipping_method: req.shipping_method.clone(),
            customer_name: req.customer_name.clone(),
            customer_email: req.customer_email.clone(),
            customer_phone: req.customer_phone.clone(),
            shipping_address: req.shipping_address.clone(),
            notes: req.notes.clone(),
            lines,
        };

        let (order, items) = match self.command.create_order_with_items(&record).await {
            Ok(created) => created,
            Err(RepositoryError::InsufficientStock {
                book_id,
                requested,
                available,
            }) => {
                warn!(
                    "🚫 Order for user {} lost the stock race on book {}",
                    req.user_id, book_id
                );
                self.observe(method, Status::Error, started);
                return Err(ServiceError::InsufficientStock {
                    book_id,
                    requested,
                    available,
                });
            }
            Err(e) => {
                error!("❌ Failed to commit order for user {}: {e:?}", req.user_id);
                self.observe(method, Status::Error, started);
                return Err(ServiceError::Repo(e));
            }
        };

        info!("✅ Order {} placed for user {}", order.order_id, order.user_id);
        self.observe(method, Status::Success, started);

        Ok(ApiResponse {
            status: "success".into(),
            message: "Order placed successfully".into(),
            data: OrderResponse::from((order, items)),
        })
    }

    async fn update_order_status(
        &self,
        order_id: Uuid,
        req: &UpdateOrderStatusRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        info!("🔄 Updating status of order {} to {}", order_id, req.status);

        let method = Method::Put;
        let started = Instant::now();

        let target = req.status;

        // Read, check legality, then swap only if the status is still the one
        // we read. A failed swap means the order advanced in the meantime;
        // the chain of states is finite, so re-checking converges.
        loop {
            let order = match self.query.find_by_id(order_id).await {
                Ok(Some(order)) => order,
                Ok(None) => {
                    warn!("⚠️ Order {} not found", order_id);
                    self.observe(method.clone(), Status::Error, started);
                    return Err(ServiceError::Repo(RepositoryError::NotFound));
                }
                Err(e) => {
                    self.observe(method.clone(), Status::Error, started);
                    return Err(ServiceError::Repo(e));
                }
            };

            if !order.status.can_transition_to(target) {
                warn!(
                    "🚫 Illegal transition for order {}: {} -> {}",
                    order_id, order.status, target
                );
                self.observe(method.clone(), Status::Error, started);
                return Err(ServiceError::IllegalTransition {
                    from: order.status.to_string(),
                    to: target.to_string(),
                });
            }

            match self
                .command
                .update_status(order_id, order.status, target)
                .await
            {
                Ok(Some(updated)) => {
                    let items = self
                        .order_item_query
                        .find_by_order(order_id)
                        .await
                        .map_err(ServiceError::Repo)?;

                    info!("✅ Order {} is now {}", order_id, updated.status);
                    self.observe(method, Status::Success, started);

                    return Ok(ApiResponse {
                        status: "success".into(),
                        message: "Order status updated successfully".into(),
                        data: OrderResponse::from((updated, items)),
                    });
                }
                Ok(None) => {
                    info!("🔁 Order {} changed underneath us, retrying", order_id);
                    continue;
                }
                Err(e) => {
                    error!("❌ Failed to update status of order {}: {e:?}", order_id);
                    self.observe(method.clone(), Status::Error, started);
                    return Err(ServiceError::Repo(e));
                }
            }
        }
    }

    async fn cancel_order(
        &self,
        order_id: Uuid,
        req: &CancelOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        info!("🚫 Cancelling order {} for user {}", order_id, req.user_id);

        let method = Method::Post;
        let started = Instant::now();

        loop {
            let order = match self.query.find_by_id(order_id).await {
                Ok(Some(order)) => order,
                Ok(None) => {
                    self.observe(method.clone(), Status::Error, started);
                    return Err(ServiceError::Repo(RepositoryError::NotFound));
                }
                Err(e) => {
                    self.observe(method.clone(), Status::Error, started);
                    return Err(ServiceError::Repo(e));
                }
            };

            // Buyers only ever see their own orders, so an order that belongs
            // to someone else looks exactly like a missing one.
            if order.user_id != req.user_id {
                warn!(
                    "⚠️ User {} asked to cancel order {} they do not own",
                    req.user_id, order_id
                );
                self.observe(method.clone(), Status::Error, started);
                return Err(ServiceError::Repo(RepositoryError::NotFound));
            }

            if order.status != OrderStatus::Confirmed {
                warn!(
                    "🚫 Order {} cannot be cancelled by its buyer while {}",
                    order_id, order.status
                );
                self.observe(method.clone(), Status::Error, started);
                return Err(ServiceError::IllegalTransition {
                    from: order.status.to_string(),
                    to: OrderStatus::Cancelled.to_string(),
                });
            }

            match self
                .command
                .update_status(order_id, OrderStatus::Confirmed, OrderStatus::Cancelled)
                .await
            {
                Ok(Some(cancelled)) => {
                    let items = self
                        .order_item_query
                        .find_by_order(order_id)
                        .await
                        .map_err(ServiceError::Repo)?;

                    info!("✅ Order {} cancelled by its buyer", order_id);
                    self.observe(method, Status::Success, started);

                    return Ok(ApiResponse {
                        status: "success".into(),
                        message: "Order cancelled successfully".into(),
                        data: OrderResponse::from((cancelled, items)),
                    });
                }
                Ok(None) => {
                    info!("🔁 Order {} changed underneath us, retrying", order_id);
                    continue;
                }
                Err(e) => {
                    error!("❌ Failed to cancel order {}: {e:?}", order_id);
                    self.observe(method.clone(), Status::Error, started);
                    return Err(ServiceError::Repo(e));
                }
            }
        }
    }
}
