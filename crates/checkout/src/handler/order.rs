use crate::{
    abstract_trait::order::service::{DynOrderCommandService, DynOrderQueryService},
    domain::{
        requests::order::{
            CancelOrderRequest, CreateOrderRequest, FindOrdersQuery, UpdateOrderStatusRequest,
        },
        response::{api::ApiResponse, order::OrderResponse},
    },
    middleware::SimpleValidatedJson,
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use shared::errors::HttpError;
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Order",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = ApiResponse<OrderResponse>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Insufficient stock"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn place_order(
    Extension(service): Extension<DynOrderCommandService>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateOrderRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.place_order(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Order",
    params(FindOrdersQuery),
    responses(
        (status = 200, description = "Orders of the given buyer, newest first", body = ApiResponse<Vec<OrderResponse>>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_orders(
    Extension(service): Extension<DynOrderQueryService>,
    Query(params): Query<FindOrdersQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_user(params.user_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "Order",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order details", body = ApiResponse<OrderResponse>),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_order(
    Extension(service): Extension<DynOrderQueryService>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/orders/{id}/status",
    tag = "Order",
    params(("id" = Uuid, Path, description = "Order ID")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Order status updated", body = ApiResponse<OrderResponse>),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Transition not allowed from the current status"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_order_status(
    Extension(service): Extension<DynOrderCommandService>,
    Path(id): Path<Uuid>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateOrderStatusRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_order_status(id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/orders/{id}/cancel",
    tag = "Order",
    params(("id" = Uuid, Path, description = "Order ID")),
    request_body = CancelOrderRequest,
    responses(
        (status = 200, description = "Order cancelled", body = ApiResponse<OrderResponse>),
        (status = 404, description = "Order not found for this buyer"),
        (status = 409, description = "Order is past the point of cancellation"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn cancel_order(
    Extension(service): Extension<DynOrderCommandService>,
    Path(id): Path<Uuid>,
    SimpleValidatedJson(body): SimpleValidatedJson<CancelOrderRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.cancel_order(id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn order_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/orders", post(place_order))
        .route("/api/orders", get(get_orders))
        .route("/api/orders/{id}", get(get_order))
        .route("/api/orders/{id}/status", put(update_order_status))
        .route("/api/orders/{id}/cancel", post(cancel_order))
        .layer(Extension(app_state.di_container.order_command.clone()))
        .layer(Extension(app_state.di_container.order_query.clone()))
}
