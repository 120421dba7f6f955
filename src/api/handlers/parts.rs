//! Parts inventory REST API handlers

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
use crate::domain::Part;
use crate::shared::types::pagination;
use crate::shared::validations::validate_pagination;

/// A stocked spare part
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PartResponse {
    /// Unique part ID
    pub id: i32,
    /// Part name
    pub name: String,
    /// Stock keeping unit code
    pub sku: Option<String>,
    /// Description
    pub description: Option<String>,
    /// On-hand quantity
    pub quantity: i32,
    /// Reorder threshold
    pub min_quantity: i32,
    /// Price per unit
    pub unit_price: Decimal,
    /// Supplier name
    pub supplier: Option<String>,
    /// `true` when on-hand quantity is at or below the reorder threshold
    pub is_low_stock: bool,
    /// Creation date
    pub created_at: DateTime<Utc>,
    /// Last update date
    pub updated_at: DateTime<Utc>,
}

impl From<Part> for PartResponse {
    fn from(p: Part) -> Self {
        let is_low_stock = p.is_low_stock();
        Self {
            id: p.id,
            name: p.name,
            sku: p.sku,
            description: p.description,
            quantity: p.quantity,
            min_quantity: p.min_quantity,
            unit_price: p.unit_price,
            supplier: p.supplier,
            is_low_stock,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Request to add a part to the inventory
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePartRequest {
    /// Part name (1–120 characters)
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    /// Stock keeping unit code
    pub sku: Option<String>,
    /// Description
    pub description: Option<String>,
    /// Initial on-hand quantity; defaults to 0
    #[validate(range(min = 0))]
    pub quantity: Option<i32>,
    /// Reorder threshold; defaults to 0
    #[validate(range(min = 0))]
    pub min_quantity: Option<i32>,
    /// Price per unit
    pub unit_price: Decimal,
    /// Supplier name
    pub supplier: Option<String>,
}

/// Request to update a part (partial update)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePartRequest {
    /// New name
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,
    /// New SKU
    pub sku: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New reorder threshold
    #[validate(range(min = 0))]
    pub min_quantity: Option<i32>,
    /// New unit price
    pub unit_price: Option<Decimal>,
    /// New supplier
    pub supplier: Option<String>,
}

/// Request for a stock movement
#[derive(Debug, Deserialize, ToSchema)]
pub struct AdjustStockRequest {
    /// Units to add (positive) or remove (negative)
    pub delta: i32,
}

/// List parts
///
/// Supports a case-insensitive `search` over name, SKU and supplier.
#[utoipa::path(
    get,
    path = "/api/v1/parts",
    tag = "Parts",
    params(ListParams),
    responses(
        (status = 200, description = "One page of parts", body = ApiResponse<PaginatedResponse<PartResponse>>)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_parts(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<PartResponse>>>, (StatusCode, Json<ApiResponse<()>>)>
{
    let (page, limit) = validate_pagination(params.page, params.limit);

    let mut parts = state.repos.parts().find_all().await.map_err(error_response)?;
    if let Some(term) = params.search.as_deref().filter(|t| !t.trim().is_empty()) {
        parts.retain(|p| p.matches_search(term));
    }

    let items: Vec<PartResponse> = parts.into_iter().map(Into::into).collect();
    let result = pagination::compute(&items, limit, page);
    Ok(Json(ApiResponse::success(PaginatedResponse::from_page(result, limit))))
}

/// Get a part by ID
#[utoipa::path(
    get,
    path = "/api/v1/parts/{id}",
    tag = "Parts",
    params(("id" = i32, Path, description = "Part ID")),
    responses(
        (status = 200, description = "Part details", body = ApiResponse<PartResponse>),
        (status = 404, description = "Part not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_part(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<PartResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.repos.parts().find_by_id(id).await.map_err(error_response)? {
        Some(part) => Ok(Json(ApiResponse::success(part.into()))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Part {} not found", id))),
        )),
    }
}

/// Add a part to the inventory
#[utoipa::path(
    post,
    path = "/api/v1/parts",
    tag = "Parts",
    request_body = CreatePartRequest,
    responses(
        (status = 201, description = "Part created", body = ApiResponse<PartResponse>),
        (status = 400, description = "Negative unit price"),
        (status = 422, description = "Validation failed")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_part(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreatePartRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PartResponse>>), (StatusCode, Json<ApiResponse<()>>)> {
    if req.unit_price < Decimal::ZERO {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Unit price cannot be negative")),
        ));
    }

    let now = Utc::now();
    let part = Part {
        id: 0, // assigned by the database
        name: req.name,
        sku: req.sku,
        description: req.description,
        quantity: req.quantity.unwrap_or(0),
        min_quantity: req.min_quantity.unwrap_or(0),
        unit_price: req.unit_price,
        supplier: req.supplier,
        created_at: now,
        updated_at: now,
    };

    let saved = state.repos.parts().save(part).await.map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(saved.into()))))
}

/// Update a part
///
/// Partial update; stock movements go through the adjust-stock endpoint.
#[utoipa::path(
    put,
    path = "/api/v1/parts/{id}",
    tag = "Parts",
    params(("id" = i32, Path, description = "Part ID")),
    request_body = UpdatePartRequest,
    responses(
        (status = 200, description = "Part updated", body = ApiResponse<PartResponse>),
        (status = 404, description = "Part not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_part(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(req): ValidatedJson<UpdatePartRequest>,
) -> Result<Json<ApiResponse<PartResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let Some(mut part) = state.repos.parts().find_by_id(id).await.map_err(error_response)?
    else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Part {} not found", id))),
        ));
    };

    if let Some(unit_price) = req.unit_price {
        if unit_price < Decimal::ZERO {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error("Unit price cannot be negative")),
            ));
        }
        part.unit_price = unit_price;
    }
    if let Some(name) = req.name {
        part.name = name;
    }
    if let Some(sku) = req.sku {
        part.sku = Some(sku);
    }
    if let Some(description) = req.description {
        part.description = Some(description);
    }
    if let Some(min_quantity) = req.min_quantity {
        part.min_quantity = min_quantity;
    }
    if let Some(supplier) = req.supplier {
        part.supplier = Some(supplier);
    }
    part.updated_at = Utc::now();

    state.repos.parts().update(part.clone()).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(part.into())))
}

/// Delete a part
#[utoipa::path(
    delete,
    path = "/api/v1/parts/{id}",
    tag = "Parts",
    params(("id" = i32, Path, description = "Part ID")),
    responses(
        (status = 200, description = "Part deleted"),
        (status = 404, description = "Part not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_part(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ApiResponse<()>>)> {
    state.repos.parts().delete(id).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success("Part deleted".to_string())))
}

/// Apply a stock movement
///
/// Positive `delta` for receipts, negative for consumption. Stock can
/// reach zero but never go negative.
#[utoipa::path(
    post,
    path = "/api/v1/parts/{id}/adjust-stock",
    tag = "Parts",
    params(("id" = i32, Path, description = "Part ID")),
    request_body = AdjustStockRequest,
    responses(
        (status = 200, description = "Stock adjusted", body = ApiResponse<PartResponse>),
        (status = 400, description = "Movement would make stock negative"),
        (status = 404, description = "Part not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn adjust_stock(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<AdjustStockRequest>,
) -> Result<Json<ApiResponse<PartResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let Some(mut part) = state.repos.parts().find_by_id(id).await.map_err(error_response)?
    else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Part {} not found", id))),
        ));
    };

    part.adjust_stock(req.delta).map_err(error_response)?;
    part.updated_at = Utc::now();

    state.repos.parts().update(part.clone()).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(part.into())))
}

/// List parts at or below their reorder threshold
#[utoipa::path(
    get,
    path = "/api/v1/parts/low-stock",
    tag = "Parts",
    responses(
        (status = 200, description = "Parts needing a reorder", body = ApiResponse<Vec<PartResponse>>)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_low_stock(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<PartResponse>>>, (StatusCode, Json<ApiResponse<()>>)> {
    let parts = state.repos.parts().find_all().await.map_err(error_response)?;
    let items: Vec<PartResponse> = parts
        .into_iter()
        .filter(Part::is_low_stock)
        .map(Into::into)
        .collect();
    Ok(Json(ApiResponse::success(items)))
}
