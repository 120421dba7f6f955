//! Vehicle REST API handlers

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
use crate::domain::Vehicle;
use crate::shared::types::pagination;
use crate::shared::validations::validate_pagination;

/// A customer's motorcycle
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VehicleResponse {
    /// Unique vehicle ID
    pub id: i32,
    /// Owning customer ID
    pub customer_id: i32,
    /// License plate
    pub plate: String,
    /// Brand (e.g. Honda, Yamaha)
    pub brand: String,
    /// Model (e.g. CG 160)
    pub model: String,
    /// Model year
    pub year: Option<i32>,
    /// Color
    pub color: Option<String>,
    /// Odometer reading in kilometers
    pub odometer_km: Option<i32>,
    /// Creation date
    pub created_at: DateTime<Utc>,
    /// Last update date
    pub updated_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(v: Vehicle) -> Self {
        Self {
            id: v.id,
            customer_id: v.customer_id,
            plate: v.plate,
            brand: v.brand,
            model: v.model,
            year: v.year,
            color: v.color,
            odometer_km: v.odometer_km,
            created_at: v.created_at,
            updated_at: v.updated_at,
        }
    }
}

/// Request to register a vehicle
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateVehicleRequest {
    /// Owning customer ID
    pub customer_id: i32,
    /// License plate (1–20 characters)
    #[validate(length(min = 1, max = 20))]
    pub plate: String,
    /// Brand
    #[validate(length(min = 1, max = 60))]
    pub brand: String,
    /// Model
    #[validate(length(min = 1, max = 60))]
    pub model: String,
    /// Model year
    pub year: Option<i32>,
    /// Color
    pub color: Option<String>,
    /// Odometer reading in kilometers
    pub odometer_km: Option<i32>,
}

/// Request to update a vehicle (partial update)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateVehicleRequest {
    /// New plate
    #[validate(length(min = 1, max = 20))]
    pub plate: Option<String>,
    /// New brand
    pub brand: Option<String>,
    /// New model
    pub model: Option<String>,
    /// New model year
    pub year: Option<i32>,
    /// New color
    pub color: Option<String>,
    /// New odometer reading
    pub odometer_km: Option<i32>,
}

/// List vehicles
///
/// Supports a case-insensitive `search` over plate, brand and model.
#[utoipa::path(
    get,
    path = "/api/v1/vehicles",
    tag = "Vehicles",
    params(ListParams),
    responses(
        (status = 200, description = "One page of vehicles", body = ApiResponse<PaginatedResponse<VehicleResponse>>)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_vehicles(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<VehicleResponse>>>, (StatusCode, Json<ApiResponse<()>>)>
{
    let (page, limit) = validate_pagination(params.page, params.limit);

    let mut vehicles = state.repos.vehicles().find_all().await.map_err(error_response)?;
    if let Some(term) = params.search.as_deref().filter(|t| !t.trim().is_empty()) {
        vehicles.retain(|v| v.matches_search(term));
    }

    let items: Vec<VehicleResponse> = vehicles.into_iter().map(Into::into).collect();
    let result = pagination::compute(&items, limit, page);
    Ok(Json(ApiResponse::success(PaginatedResponse::from_page(result, limit))))
}

/// Get a vehicle by ID
#[utoipa::path(
    get,
    path = "/api/v1/vehicles/{id}",
    tag = "Vehicles",
    params(("id" = i32, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle details", body = ApiResponse<VehicleResponse>),
        (status = 404, description = "Vehicle not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<VehicleResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.repos.vehicles().find_by_id(id).await.map_err(error_response)? {
        Some(vehicle) => Ok(Json(ApiResponse::success(vehicle.into()))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Vehicle {} not found", id))),
        )),
    }
}

/// Register a vehicle
///
/// The owning customer must exist.
#[utoipa::path(
    post,
    path = "/api/v1/vehicles",
    tag = "Vehicles",
    request_body = CreateVehicleRequest,
    responses(
        (status = 201, description = "Vehicle registered", body = ApiResponse<VehicleResponse>),
        (status = 404, description = "Owning customer not found"),
        (status = 422, description = "Validation failed")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_vehicle(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<VehicleResponse>>), (StatusCode, Json<ApiResponse<()>>)>
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
    let vehicle = Vehicle {
        id: 0, // assigned by the database
        customer_id: req.customer_id,
        plate: req.plate,
        brand: req.brand,
        model: req.model,
        year: req.year,
        color: req.color,
        odometer_km: req.odometer_km,
        created_at: now,
        updated_at: now,
    };

    let saved = state.repos.vehicles().save(vehicle).await.map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(saved.into()))))
}

/// Update a vehicle
///
/// Partial update; send only the fields to change.
#[utoipa::path(
    put,
    path = "/api/v1/vehicles/{id}",
    tag = "Vehicles",
    params(("id" = i32, Path, description = "Vehicle ID")),
    request_body = UpdateVehicleRequest,
    responses(
        (status = 200, description = "Vehicle updated", body = ApiResponse<VehicleResponse>),
        (status = 404, description = "Vehicle not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(req): ValidatedJson<UpdateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let Some(existing) = state.repos.vehicles().find_by_id(id).await.map_err(error_response)?
    else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Vehicle {} not found", id))),
        ));
    };

    let updated = Vehicle {
        id: existing.id,
        customer_id: existing.customer_id,
        plate: req.plate.unwrap_or(existing.plate),
        brand: req.brand.unwrap_or(existing.brand),
        model: req.model.unwrap_or(existing.model),
        year: req.year.or(existing.year),
        color: req.color.or(existing.color),
        odometer_km: req.odometer_km.or(existing.odometer_km),
        created_at: existing.created_at,
        updated_at: Utc::now(),
    };

    state.repos.vehicles().update(updated.clone()).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(updated.into())))
}

/// Delete a vehicle
#[utoipa::path(
    delete,
    path = "/api/v1/vehicles/{id}",
    tag = "Vehicles",
    params(("id" = i32, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle deleted"),
        (status = 404, description = "Vehicle not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ApiResponse<()>>)> {
    state.repos.vehicles().delete(id).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success("Vehicle deleted".to_string())))
}
