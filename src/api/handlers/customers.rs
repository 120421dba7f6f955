//! Customer REST API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::common::ValidatedJson;
use crate::api::dto::{ApiResponse, ListParams, PaginatedResponse};
use crate::api::handlers::{error_response, AppState};
use crate::api::handlers::quotes::QuoteResponse;
use crate::api::handlers::service_orders::ServiceOrderResponse;
use crate::api::handlers::vehicles::VehicleResponse;
use crate::domain::Customer;
use crate::shared::types::pagination;
use crate::shared::validations::validate_pagination;

/// A workshop customer
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CustomerResponse {
    /// Unique customer ID
    pub id: i32,
    /// Full name
    pub name: String,
    /// Phone number
    pub phone: Option<String>,
    /// Email address
    pub email: Option<String>,
    /// Identity/tax document, free-form
    pub document: Option<String>,
    /// Free-form notes
    pub notes: Option<String>,
    /// Creation date
    pub created_at: DateTime<Utc>,
    /// Last update date
    pub updated_at: DateTime<Utc>,
}

impl From<Customer> for CustomerResponse {
    fn from(c: Customer) -> Self {
        Self {
            id: c.id,
            name: c.name,
            phone: c.phone,
            email: c.email,
            document: c.document,
            notes: c.notes,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Request to create a customer
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCustomerRequest {
    /// Full name (1–120 characters)
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    /// Phone number
    pub phone: Option<String>,
    /// Email address
    #[validate(email)]
    pub email: Option<String>,
    /// Identity/tax document
    pub document: Option<String>,
    /// Free-form notes
    pub notes: Option<String>,
}

/// Request to update a customer (partial update)
///
/// Send only the fields you want to change.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCustomerRequest {
    /// New name
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,
    /// New phone number
    pub phone: Option<String>,
    /// New email address
    #[validate(email)]
    pub email: Option<String>,
    /// New document
    pub document: Option<String>,
    /// New notes
    pub notes: Option<String>,
}

/// List customers
///
/// Supports a case-insensitive `search` over name, phone, email and
/// document, applied before pagination.
#[utoipa::path(
    get,
    path = "/api/v1/customers",
    tag = "Customers",
    params(ListParams),
    responses(
        (status = 200, description = "One page of customers", body = ApiResponse<PaginatedResponse<CustomerResponse>>)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_customers(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<CustomerResponse>>>, (StatusCode, Json<ApiResponse<()>>)>
{
    let (page, limit) = validate_pagination(params.page, params.limit);

    let mut customers = state.repos.customers().find_all().await.map_err(error_response)?;
    if let Some(term) = params.search.as_deref().filter(|t| !t.trim().is_empty()) {
        customers.retain(|c| c.matches_search(term));
    }

    let items: Vec<CustomerResponse> = customers.into_iter().map(Into::into).collect();
    let result = pagination::compute(&items, limit, page);
    Ok(Json(ApiResponse::success(PaginatedResponse::from_page(result, limit))))
}

/// Get a customer by ID
#[utoipa::path(
    get,
    path = "/api/v1/customers/{id}",
    tag = "Customers",
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer details", body = ApiResponse<CustomerResponse>),
        (status = 404, description = "Customer not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<CustomerResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.repos.customers().find_by_id(id).await.map_err(error_response)? {
        Some(customer) => Ok(Json(ApiResponse::success(customer.into()))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Customer {} not found", id))),
        )),
    }
}

/// Create a customer
#[utoipa::path(
    post,
    path = "/api/v1/customers",
    tag = "Customers",
    request_body = CreateCustomerRequest,
    responses(
        (status = 201, description = "Customer created", body = ApiResponse<CustomerResponse>),
        (status = 422, description = "Validation failed")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_customer(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CustomerResponse>>), (StatusCode, Json<ApiResponse<()>>)>
{
    let now = Utc::now();
    let customer = Customer {
        id: 0, // assigned by the database
        name: req.name,
        phone: req.phone,
        email: req.email,
        document: req.document,
        notes: req.notes,
        created_at: now,
        updated_at: now,
    };

    let saved = state.repos.customers().save(customer).await.map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(saved.into()))))
}

/// Update a customer
///
/// Partial update; send only the fields to change.
#[utoipa::path(
    put,
    path = "/api/v1/customers/{id}",
    tag = "Customers",
    params(("id" = i32, Path, description = "Customer ID")),
    request_body = UpdateCustomerRequest,
    responses(
        (status = 200, description = "Customer updated", body = ApiResponse<CustomerResponse>),
        (status = 404, description = "Customer not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(req): ValidatedJson<UpdateCustomerRequest>,
) -> Result<Json<ApiResponse<CustomerResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let Some(existing) = state.repos.customers().find_by_id(id).await.map_err(error_response)?
    else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Customer {} not found", id))),
        ));
    };

    let updated = Customer {
        id: existing.id,
        name: req.name.unwrap_or(existing.name),
        phone: req.phone.or(existing.phone),
        email: req.email.or(existing.email),
        document: req.document.or(existing.document),
        notes: req.notes.or(existing.notes),
        created_at: existing.created_at,
        updated_at: Utc::now(),
    };

    state.repos.customers().update(updated.clone()).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(updated.into())))
}

/// Delete a customer
#[utoipa::path(
    delete,
    path = "/api/v1/customers/{id}",
    tag = "Customers",
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer deleted"),
        (status = 404, description = "Customer not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ApiResponse<()>>)> {
    state.repos.customers().delete(id).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success("Customer deleted".to_string())))
}

/// List a customer's vehicles
#[utoipa::path(
    get,
    path = "/api/v1/customers/{id}/vehicles",
    tag = "Customers",
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "The customer's vehicles", body = ApiResponse<Vec<VehicleResponse>>),
        (status = 404, description = "Customer not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_customer_vehicles(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<VehicleResponse>>>, (StatusCode, Json<ApiResponse<()>>)> {
    if state.repos.customers().find_by_id(id).await.map_err(error_response)?.is_none() {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Customer {} not found", id))),
        ));
    }

    let vehicles = state
        .repos
        .vehicles()
        .find_by_customer(id)
        .await
        .map_err(error_response)?;
    let items: Vec<VehicleResponse> = vehicles.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(items)))
}

/// List a customer's quotes
#[utoipa::path(
    get,
    path = "/api/v1/customers/{id}/quotes",
    tag = "Customers",
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "The customer's quotes", body = ApiResponse<Vec<QuoteResponse>>),
        (status = 404, description = "Customer not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_customer_quotes(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<QuoteResponse>>>, (StatusCode, Json<ApiResponse<()>>)> {
    if state.repos.customers().find_by_id(id).await.map_err(error_response)?.is_none() {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Customer {} not found", id))),
        ));
    }

    let quotes = state
        .repos
        .quotes()
        .find_by_customer(id)
        .await
        .map_err(error_response)?;
    let items: Vec<QuoteResponse> = quotes.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(items)))
}

/// List a customer's service orders
#[utoipa::path(
    get,
    path = "/api/v1/customers/{id}/service-orders",
    tag = "Customers",
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "The customer's service orders", body = ApiResponse<Vec<ServiceOrderResponse>>),
        (status = 404, description = "Customer not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_customer_orders(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<ServiceOrderResponse>>>, (StatusCode, Json<ApiResponse<()>>)> {
    if state.repos.customers().find_by_id(id).await.map_err(error_response)?.is_none() {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Customer {} not found", id))),
        ));
    }

    let orders = state
        .repos
        .service_orders()
        .find_by_customer(id)
        .await
        .map_err(error_response)?;
    let items: Vec<ServiceOrderResponse> = orders.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(items)))
}
