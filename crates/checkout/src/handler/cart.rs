use crate::{
    abstract_trait::cart::DynCartQueryService,
    domain::{
        requests::cart::FindCartQuery,
        response::{api::ApiResponse, cart::CartItemResponse},
    },
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use shared::errors::HttpError;
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/cart",
    tag = "Cart",
    params(FindCartQuery),
    responses(
        (status = 200, description = "Cart contents for the given buyer", body = ApiResponse<Vec<CartItemResponse>>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_cart(
    Extension(service): Extension<DynCartQueryService>,
    Query(params): Query<FindCartQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_user(params.user_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn cart_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/cart", get(get_cart))
        .layer(Extension(app_state.di_container.cart_query.clone()))
}
