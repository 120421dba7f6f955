//! Service order REST API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::common::ValidatedJson;
use crate::api::dto::{ApiResponse, ListParams, PaginatedResponse};
use crate::api::handlers::{error_response, AppState};
use crate::domain::{OrderStatus, ServiceOrder};
use crate::shared::types::pagination;
use crate::shared::validations::validate_pagination;

/// A job the workshop has agreed to carry out
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceOrderResponse {
    /// Unique order ID
    pub id: i32,
    /// Customer the job is for
    pub customer_id: i32,
    /// Vehicle being worked on
    pub vehicle_id: Option<i32>,
    /// Quote this order was converted from, when there is one
    pub quote_id: Option<i32>,
    /// Description of the work
    pub description: String,
    /// `Open`, `InProgress`, `Completed`, `Delivered` or `Canceled`
    pub status: String,
    /// Agreed price
    pub total: Decimal,
    /// When the work finished
    pub completed_at: Option<DateTime<Utc>>,
    /// When the vehicle was handed back
    pub delivered_at: Option<DateTime<Utc>>,
    /// Creation date
    pub created_at: DateTime<Utc>,
    /// Last update date
    pub updated_at: DateTime<Utc>,
}

impl From<ServiceOrder> for ServiceOrderResponse {
    fn from(o: ServiceOrder) -> Self {
        Self {
            id: o.id,
            customer_id: o.customer_id,
            vehicle_id: o.vehicle_id,
            quote_id: o.quote_id,
            description: o.description,
            status: o.status.to_string(),
            total: o.total,
            completed_at: o.completed_at,
            delivered_at: o.delivered_at,
            created_at: o.created_at,
            updated_at: o.updated_at,
        }
    }
}

/// Request to open a service order
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateServiceOrderRequest {
    /// Customer the job is for
    pub customer_id: i32,
    /// Vehicle being worked on
    pub vehicle_id: Option<i32>,
    /// Description of the work (1–500 characters)
    #[validate(length(min = 1, max = 500))]
    pub description: String,
    /// Agreed price; defaults to 0
    pub total: Option<Decimal>,
}

/// Request to update a service order (partial update)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateServiceOrderRequest {
    /// New description
    #[validate(length(min = 1, max = 500))]
    pub description: Option<String>,
    /// New price
    pub total: Option<Decimal>,
}

/// Request to move an order through its workflow
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    /// Target status: `InProgress`, `Completed`, `Delivered` or `Canceled`
    pub status: String,
}

fn parse_order_status(s: &str) -> Result<OrderStatus, (StatusCode, Json<ApiResponse<()>>)> {
    match s {
        "Open" => Ok(OrderStatus::Open),
        "InProgress" => Ok(OrderStatus::InProgress),
        "Completed" => Ok(OrderStatus::Completed),
        "Delivered" => Ok(OrderStatus::Delivered),
        "Canceled" => Ok(OrderStatus::Canceled),
        other => Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format!(
                "Unknown order status '{}'",
                other
            ))),
        )),
    }
}

/// List service orders
///
/// Supports a case-insensitive `search` over the order description.
#[utoipa::path(
    get,
    path = "/api/v1/service-orders",
    tag = "Service Orders",
    params(ListParams),
    responses(
        (status = 200, description = "One page of service orders", body = ApiResponse<PaginatedResponse<ServiceOrderResponse>>)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_service_orders(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<
    Json<ApiResponse<PaginatedResponse<ServiceOrderResponse>>>,
    (StatusCode, Json<ApiResponse<()>>),
> {
    let (page, limit) = validate_pagination(params.page, params.limit);

    let mut orders = state
        .repos
        .service_orders()
        .find_all()
        .await
        .map_err(error_response)?;
    if let Some(term) = params.search.as_deref().filter(|t| !t.trim().is_empty()) {
        orders.retain(|o| o.matches_search(term));
    }

    let items: Vec<ServiceOrderResponse> = orders.into_iter().map(Into::into).collect();
    let result = pagination::compute(&items, limit, page);
    Ok(Json(ApiResponse::success(PaginatedResponse::from_page(result, limit))))
}

/// Get a service order by ID
#[utoipa::path(
    get,
    path = "/api/v1/service-orders/{id}",
    tag = "Service Orders",
    params(("id" = i32, Path, description = "Service order ID")),
    responses(
        (status = 200, description = "Service order details", body = ApiResponse<ServiceOrderResponse>),
        (status = 404, description = "Service order not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_service_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ServiceOrderResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state
        .repos
        .service_orders()
        .find_by_id(id)
        .await
        .map_err(error_response)?
    {
        Some(order) => Ok(Json(ApiResponse::success(order.into()))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Service order {} not found", id))),
        )),
    }
}

/// Open a service order
///
/// Orders can also be created by converting an approved quote; see
/// `POST /api/v1/quotes/{id}/convert`.
#[utoipa::path(
    post,
    path = "/api/v1/service-orders",
    tag = "Service Orders",
    request_body = CreateServiceOrderRequest,
    responses(
        (status = 201, description = "Service order opened", body = ApiResponse<ServiceOrderResponse>),
        (status = 404, description = "Customer not found"),
        (status = 422, description = "Validation failed")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_service_order(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateServiceOrderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ServiceOrderResponse>>), (StatusCode, Json<ApiResponse<()>>)>
{
    if state
        .repos
        .customers()
        .find_by_id(req.customer_id)
        .await
        .map_err(error_response)?
        .is_none()
    {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!(
                "Customer {} not found",
                req.customer_id
            ))),
        ));
    }

    let now = Utc::now();
    let order = ServiceOrder {
        id: 0, // assigned by the database
        customer_id: req.customer_id,
        vehicle_id: req.vehicle_id,
        quote_id: None,
        description: req.description,
        status: OrderStatus::Open,
        total: req.total.unwrap_or(Decimal::ZERO),
        completed_at: None,
        delivered_at: None,
        created_at: now,
        updated_at: now,
    };

    let saved = state
        .repos
        .service_orders()
        .save(order)
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(saved.into()))))
}

/// Update a service order
///
/// Partial update of description and price; use the status endpoint for
/// workflow transitions.
#[utoipa::path(
    put,
    path = "/api/v1/service-orders/{id}",
    tag = "Service Orders",
    params(("id" = i32, Path, description = "Service order ID")),
    request_body = UpdateServiceOrderRequest,
    responses(
        (status = 200, description = "Service order updated", body = ApiResponse<ServiceOrderResponse>),
        (status = 404, description = "Service order not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_service_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(req): ValidatedJson<UpdateServiceOrderRequest>,
) -> Result<Json<ApiResponse<ServiceOrderResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let Some(mut order) = state
        .repos
        .service_orders()
        .find_by_id(id)
        .await
        .map_err(error_response)?
    else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Service order {} not found", id))),
        ));
    };

    if let Some(description) = req.description {
        order.description = description;
    }
    if let Some(total) = req.total {
        order.total = total;
    }
    order.updated_at = Utc::now();

    state
        .repos
        .service_orders()
        .update(order.clone())
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(order.into())))
}

/// Move a service order through its workflow
///
/// Allowed transitions: Open → InProgress → Completed → Delivered, and
/// cancelation from Open or InProgress. Anything else is rejected.
#[utoipa::path(
    put,
    path = "/api/v1/service-orders/{id}/status",
    tag = "Service Orders",
    params(("id" = i32, Path, description = "Service order ID")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<ServiceOrderResponse>),
        (status = 400, description = "Transition not allowed"),
        (status = 404, description = "Service order not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateOrderStatusRequest>,
) -> Result<Json<ApiResponse<ServiceOrderResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let target = parse_order_status(&req.status)?;

    let Some(mut order) = state
        .repos
        .service_orders()
        .find_by_id(id)
        .await
        .map_err(error_response)?
    else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Service order {} not found", id))),
        ));
    };

    order.transition_to(target).map_err(error_response)?;
    order.updated_at = Utc::now();

    state
        .repos
        .service_orders()
        .update(order.clone())
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(order.into())))
}

/// Delete a service order
#[utoipa::path(
    delete,
    path = "/api/v1/service-orders/{id}",
    tag = "Service Orders",
    params(("id" = i32, Path, description = "Service order ID")),
    responses(
        (status = 200, description = "Service order deleted"),
        (status = 404, description = "Service order not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_service_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ApiResponse<()>>)> {
    state
        .repos
        .service_orders()
        .delete(id)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success("Service order deleted".to_string())))
}
