//! Quote REST API handlers
//!
//! Stored totals are never taken from the client; every create/update runs
//! the line items through the quote calculator before persisting.

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
use crate::api::handlers::service_orders::ServiceOrderResponse;
use crate::api::handlers::{error_response, AppState};
use crate::domain::quote::calculator::{self, LineItem};
use crate::domain::{OrderStatus, Quote, QuoteItem, QuoteItemKind, QuoteStatus, ServiceOrder};
use crate::shared::types::pagination;
use crate::shared::validations::validate_pagination;

/// A labor or part line on a quote
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuoteItemResponse {
    /// Unique line ID
    pub id: i32,
    /// `Labor` or `Part`
    pub kind: String,
    /// What the line covers
    pub description: String,
    /// Quantity (fractional allowed, e.g. 1.5 hours)
    pub quantity: Decimal,
    /// Price per unit
    pub unit_price: Decimal,
}

impl From<QuoteItem> for QuoteItemResponse {
    fn from(i: QuoteItem) -> Self {
        Self {
            id: i.id,
            kind: i.kind.to_string(),
            description: i.description,
            quantity: i.quantity,
            unit_price: i.unit_price,
        }
    }
}

/// A price estimate awaiting the customer's decision
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuoteResponse {
    /// Unique quote ID
    pub id: i32,
    /// Customer the quote was issued to
    pub customer_id: i32,
    /// Vehicle the quote refers to
    pub vehicle_id: Option<i32>,
    /// Summary of the proposed work
    pub description: Option<String>,
    /// `Pending`, `Approved`, `Rejected` or `Converted`
    pub status: String,
    /// Flat discount applied to the grand total
    pub discount: Decimal,
    /// Sum of the labor lines
    pub labor_total: Decimal,
    /// Sum of the part lines
    pub parts_total: Decimal,
    /// `labor_total + parts_total - discount`
    pub grand_total: Decimal,
    /// Expiry of the estimate
    pub valid_until: Option<DateTime<Utc>>,
    /// Line items
    pub items: Vec<QuoteItemResponse>,
    /// Creation date
    pub created_at: DateTime<Utc>,
    /// Last update date
    pub updated_at: DateTime<Utc>,
}

impl From<Quote> for QuoteResponse {
    fn from(q: Quote) -> Self {
        Self {
            id: q.id,
            customer_id: q.customer_id,
            vehicle_id: q.vehicle_id,
            description: q.description,
            status: q.status.to_string(),
            discount: q.discount,
            labor_total: q.labor_total,
            parts_total: q.parts_total,
            grand_total: q.grand_total,
            valid_until: q.valid_until,
            items: q.items.into_iter().map(Into::into).collect(),
            created_at: q.created_at,
            updated_at: q.updated_at,
        }
    }
}

/// One line of a quote create/update request
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct QuoteItemRequest {
    /// `Labor` or `Part`
    pub kind: String,
    /// What the line covers (1–200 characters)
    #[validate(length(min = 1, max = 200))]
    pub description: String,
    /// Quantity; must be positive
    pub quantity: Decimal,
    /// Price per unit; must not be negative
    pub unit_price: Decimal,
}

/// Request to create a quote
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateQuoteRequest {
    /// Customer the quote is issued to
    pub customer_id: i32,
    /// Vehicle the quote refers to
    pub vehicle_id: Option<i32>,
    /// Summary of the proposed work
    pub description: Option<String>,
    /// Flat discount; defaults to 0
    pub discount: Option<Decimal>,
    /// Expiry of the estimate
    pub valid_until: Option<DateTime<Utc>>,
    /// Line items; at least one is required
    #[validate(length(min = 1), nested)]
    pub items: Vec<QuoteItemRequest>,
}

/// Request to update a quote
///
/// Replaces the full line item set when `items` is present.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateQuoteRequest {
    /// New description
    pub description: Option<String>,
    /// New discount
    pub discount: Option<Decimal>,
    /// New expiry
    pub valid_until: Option<DateTime<Utc>>,
    /// Replacement line items
    #[validate(length(min = 1), nested)]
    pub items: Option<Vec<QuoteItemRequest>>,
}

/// Request to preview totals without persisting anything
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PreviewTotalsRequest {
    /// Line items to price
    #[validate(length(min = 1), nested)]
    pub items: Vec<QuoteItemRequest>,
    /// Flat discount; defaults to 0
    pub discount: Option<Decimal>,
}

/// Computed quote totals
#[derive(Debug, Serialize, ToSchema)]
pub struct TotalsResponse {
    /// Sum of the labor lines
    pub labor_total: Decimal,
    /// Sum of the part lines
    pub parts_total: Decimal,
    /// `labor_total + parts_total - discount`; may be negative when the
    /// discount exceeds the subtotal
    pub grand_total: Decimal,
}

fn parse_item_kind(s: &str) -> Result<QuoteItemKind, (StatusCode, Json<ApiResponse<()>>)> {
    match s {
        "Labor" => Ok(QuoteItemKind::Labor),
        "Part" => Ok(QuoteItemKind::Part),
        other => Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format!(
                "Unknown item kind '{}': expected 'Labor' or 'Part'",
                other
            ))),
        )),
    }
}

fn items_from_request(
    items: Vec<QuoteItemRequest>,
) -> Result<Vec<QuoteItem>, (StatusCode, Json<ApiResponse<()>>)> {
    items
        .into_iter()
        .map(|i| {
            Ok(QuoteItem {
                id: 0, // assigned by the database
                kind: parse_item_kind(&i.kind)?,
                description: i.description,
                quantity: i.quantity,
                unit_price: i.unit_price,
            })
        })
        .collect()
}

fn calculator_error(e: calculator::QuoteError) -> (StatusCode, Json<ApiResponse<()>>) {
    (StatusCode::BAD_REQUEST, Json(ApiResponse::error(e.to_string())))
}

/// List quotes
///
/// Supports a case-insensitive `search` over the quote description and
/// its line descriptions.
#[utoipa::path(
    get,
    path = "/api/v1/quotes",
    tag = "Quotes",
    params(ListParams),
    responses(
        (status = 200, description = "One page of quotes", body = ApiResponse<PaginatedResponse<QuoteResponse>>)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_quotes(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<QuoteResponse>>>, (StatusCode, Json<ApiResponse<()>>)>
{
    let (page, limit) = validate_pagination(params.page, params.limit);

    let mut quotes = state.repos.quotes().find_all().await.map_err(error_response)?;
    if let Some(term) = params.search.as_deref().filter(|t| !t.trim().is_empty()) {
        quotes.retain(|q| q.matches_search(term));
    }

    let items: Vec<QuoteResponse> = quotes.into_iter().map(Into::into).collect();
    let result = pagination::compute(&items, limit, page);
    Ok(Json(ApiResponse::success(PaginatedResponse::from_page(result, limit))))
}

/// Get a quote by ID, with its line items
#[utoipa::path(
    get,
    path = "/api/v1/quotes/{id}",
    tag = "Quotes",
    params(("id" = i32, Path, description = "Quote ID")),
    responses(
        (status = 200, description = "Quote details", body = ApiResponse<QuoteResponse>),
        (status = 404, description = "Quote not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_quote(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<QuoteResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.repos.quotes().find_by_id(id).await.map_err(error_response)? {
        Some(quote) => Ok(Json(ApiResponse::success(quote.into()))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Quote {} not found", id))),
        )),
    }
}

/// Create a quote
///
/// Totals are computed server-side from the submitted line items and
/// discount.
#[utoipa::path(
    post,
    path = "/api/v1/quotes",
    tag = "Quotes",
    request_body = CreateQuoteRequest,
    responses(
        (status = 201, description = "Quote created", body = ApiResponse<QuoteResponse>),
        (status = 400, description = "Invalid line items or discount"),
        (status = 404, description = "Customer not found"),
        (status = 422, description = "Validation failed")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_quote(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateQuoteRequest>,
) -> Result<(StatusCode, Json<ApiResponse<QuoteResponse>>), (StatusCode, Json<ApiResponse<()>>)> {
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
    let mut quote = Quote {
        id: 0, // assigned by the database
        customer_id: req.customer_id,
        vehicle_id: req.vehicle_id,
        description: req.description,
        status: QuoteStatus::Pending,
        discount: req.discount.unwrap_or(Decimal::ZERO),
        labor_total: Decimal::ZERO,
        parts_total: Decimal::ZERO,
        grand_total: Decimal::ZERO,
        valid_until: req.valid_until,
        items: items_from_request(req.items)?,
        created_at: now,
        updated_at: now,
    };
    quote.recompute_totals().map_err(calculator_error)?;

    let saved = state.repos.quotes().save(quote).await.map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(saved.into()))))
}

/// Update a quote
///
/// Only `Pending` quotes may be edited. When `items` is present the full
/// line set is replaced; totals are recomputed either way.
#[utoipa::path(
    put,
    path = "/api/v1/quotes/{id}",
    tag = "Quotes",
    params(("id" = i32, Path, description = "Quote ID")),
    request_body = UpdateQuoteRequest,
    responses(
        (status = 200, description = "Quote updated", body = ApiResponse<QuoteResponse>),
        (status = 400, description = "Quote is no longer editable"),
        (status = 404, description = "Quote not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_quote(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(req): ValidatedJson<UpdateQuoteRequest>,
) -> Result<Json<ApiResponse<QuoteResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let Some(existing) = state.repos.quotes().find_by_id(id).await.map_err(error_response)?
    else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Quote {} not found", id))),
        ));
    };

    if existing.status != QuoteStatus::Pending {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format!(
                "Quote {} is {} and can no longer be edited",
                id, existing.status
            ))),
        ));
    }

    let mut updated = existing;
    if let Some(description) = req.description {
        updated.description = Some(description);
    }
    if let Some(discount) = req.discount {
        updated.discount = discount;
    }
    if let Some(valid_until) = req.valid_until {
        updated.valid_until = Some(valid_until);
    }
    if let Some(items) = req.items {
        updated.items = items_from_request(items)?;
    }
    updated.updated_at = Utc::now();
    updated.recompute_totals().map_err(calculator_error)?;

    state.repos.quotes().update(updated).await.map_err(error_response)?;

    // Reload so replacement lines carry their database-assigned IDs
    let Some(saved) = state.repos.quotes().find_by_id(id).await.map_err(error_response)?
    else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Quote {} not found", id))),
        ));
    };
    Ok(Json(ApiResponse::success(saved.into())))
}

/// Delete a quote and its line items
#[utoipa::path(
    delete,
    path = "/api/v1/quotes/{id}",
    tag = "Quotes",
    params(("id" = i32, Path, description = "Quote ID")),
    responses(
        (status = 200, description = "Quote deleted"),
        (status = 404, description = "Quote not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_quote(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ApiResponse<()>>)> {
    state.repos.quotes().delete(id).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success("Quote deleted".to_string())))
}

/// Preview quote totals
///
/// Pure calculation; nothing is persisted. Use to show a running total
/// while a quote is being drafted.
#[utoipa::path(
    post,
    path = "/api/v1/quotes/preview-totals",
    tag = "Quotes",
    request_body = PreviewTotalsRequest,
    responses(
        (status = 200, description = "Computed totals", body = ApiResponse<TotalsResponse>),
        (status = 400, description = "Invalid line items or discount")
    ),
    security(("bearer_auth" = []))
)]
pub async fn preview_totals(
    ValidatedJson(req): ValidatedJson<PreviewTotalsRequest>,
) -> Result<Json<ApiResponse<TotalsResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let mut labor: Vec<LineItem> = Vec::new();
    let mut parts: Vec<LineItem> = Vec::new();
    for item in req.items {
        let kind = parse_item_kind(&item.kind)?;
        let line = LineItem::new(item.description, item.quantity, item.unit_price);
        match kind {
            QuoteItemKind::Labor => labor.push(line),
            QuoteItemKind::Part => parts.push(line),
        }
    }

    let totals = calculator::compute_totals(&labor, &parts, req.discount.unwrap_or(Decimal::ZERO))
        .map_err(calculator_error)?;

    Ok(Json(ApiResponse::success(TotalsResponse {
        labor_total: totals.labor_total,
        parts_total: totals.parts_total,
        grand_total: totals.grand_total,
    })))
}

/// Approve a pending quote
#[utoipa::path(
    post,
    path = "/api/v1/quotes/{id}/approve",
    tag = "Quotes",
    params(("id" = i32, Path, description = "Quote ID")),
    responses(
        (status = 200, description = "Quote approved", body = ApiResponse<QuoteResponse>),
        (status = 400, description = "Quote is not pending"),
        (status = 404, description = "Quote not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn approve_quote(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<QuoteResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let Some(mut quote) = state.repos.quotes().find_by_id(id).await.map_err(error_response)?
    else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Quote {} not found", id))),
        ));
    };

    quote.approve().map_err(error_response)?;
    quote.updated_at = Utc::now();
    state.repos.quotes().update(quote.clone()).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(quote.into())))
}

/// Reject a pending quote
#[utoipa::path(
    post,
    path = "/api/v1/quotes/{id}/reject",
    tag = "Quotes",
    params(("id" = i32, Path, description = "Quote ID")),
    responses(
        (status = 200, description = "Quote rejected", body = ApiResponse<QuoteResponse>),
        (status = 400, description = "Quote is not pending"),
        (status = 404, description = "Quote not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn reject_quote(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<QuoteResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let Some(mut quote) = state.repos.quotes().find_by_id(id).await.map_err(error_response)?
    else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Quote {} not found", id))),
        ));
    };

    quote.reject().map_err(error_response)?;
    quote.updated_at = Utc::now();
    state.repos.quotes().update(quote.clone()).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(quote.into())))
}

/// Convert an approved quote into a service order
///
/// Creates a new `Open` service order carrying the quote's description
/// and grand total, and marks the quote `Converted`.
#[utoipa::path(
    post,
    path = "/api/v1/quotes/{id}/convert",
    tag = "Quotes",
    params(("id" = i32, Path, description = "Quote ID")),
    responses(
        (status = 201, description = "Service order created from the quote", body = ApiResponse<ServiceOrderResponse>),
        (status = 400, description = "Quote is not approved"),
        (status = 404, description = "Quote not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn convert_quote(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<(StatusCode, Json<ApiResponse<ServiceOrderResponse>>), (StatusCode, Json<ApiResponse<()>>)>
{
    let Some(mut quote) = state.repos.quotes().find_by_id(id).await.map_err(error_response)?
    else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Quote {} not found", id))),
        ));
    };

    quote.mark_converted().map_err(error_response)?;

    let now = Utc::now();
    quote.updated_at = now;

    // The status flip goes to the database first: once the quote is durably
    // Converted a retry is rejected, so a failed order insert can never
    // leave two orders pointing at the same quote.
    state
        .repos
        .quotes()
        .update(quote.clone())
        .await
        .map_err(error_response)?;

    let order = ServiceOrder {
        id: 0, // assigned by the database
        customer_id: quote.customer_id,
        vehicle_id: quote.vehicle_id,
        quote_id: Some(quote.id),
        description: quote
            .description
            .clone()
            .unwrap_or_else(|| format!("Converted from quote #{}", quote.id)),
        status: OrderStatus::Open,
        total: quote.grand_total,
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

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use rust_decimal_macros::dec;

    use crate::domain::customer::CustomerRepository;
    use crate::domain::finance::FinanceRepository;
    use crate::domain::part::PartRepository;
    use crate::domain::quote::QuoteRepository;
    use crate::domain::service_order::ServiceOrderRepository;
    use crate::domain::user::UserRepository;
    use crate::domain::vehicle::VehicleRepository;
    use crate::domain::{DomainError, DomainResult, RepositoryProvider};

    #[derive(Default)]
    struct QuotesFake {
        store: Mutex<Vec<Quote>>,
    }

    impl QuotesFake {
        fn with(quote: Quote) -> Self {
            Self {
                store: Mutex::new(vec![quote]),
            }
        }

        fn get(&self, id: i32) -> Option<Quote> {
            self.store.lock().unwrap().iter().find(|q| q.id == id).cloned()
        }

        // Mimic the autoincrement the real repository gets from the database
        fn assign_item_ids(quote: &mut Quote) {
            for (n, item) in quote.items.iter_mut().enumerate() {
                if item.id == 0 {
                    item.id = 100 + n as i32;
                }
            }
        }
    }

    #[async_trait]
    impl QuoteRepository for QuotesFake {
        async fn find_by_id(&self, id: i32) -> DomainResult<Option<Quote>> {
            Ok(self.get(id))
        }

        async fn find_all(&self) -> DomainResult<Vec<Quote>> {
            Ok(self.store.lock().unwrap().clone())
        }

        async fn find_by_customer(&self, customer_id: i32) -> DomainResult<Vec<Quote>> {
            Ok(self
                .store
                .lock()
                .unwrap()
                .iter()
                .filter(|q| q.customer_id == customer_id)
                .cloned()
                .collect())
        }

        async fn save(&self, mut quote: Quote) -> DomainResult<Quote> {
            let mut store = self.store.lock().unwrap();
            quote.id = store.len() as i32 + 1;
            Self::assign_item_ids(&mut quote);
            store.push(quote.clone());
            Ok(quote)
        }

        async fn update(&self, mut quote: Quote) -> DomainResult<()> {
            Self::assign_item_ids(&mut quote);
            let mut store = self.store.lock().unwrap();
            let slot = store
                .iter_mut()
                .find(|q| q.id == quote.id)
                .ok_or_else(|| DomainError::not_found("Quote", "id", quote.id))?;
            *slot = quote;
            Ok(())
        }

        async fn delete(&self, id: i32) -> DomainResult<()> {
            self.store.lock().unwrap().retain(|q| q.id != id);
            Ok(())
        }
    }

    #[derive(Default)]
    struct OrdersFake {
        store: Mutex<Vec<ServiceOrder>>,
        fail_next_save: AtomicBool,
    }

    #[async_trait]
    impl ServiceOrderRepository for OrdersFake {
        async fn find_by_id(&self, id: i32) -> DomainResult<Option<ServiceOrder>> {
            Ok(self.store.lock().unwrap().iter().find(|o| o.id == id).cloned())
        }

        async fn find_all(&self) -> DomainResult<Vec<ServiceOrder>> {
            Ok(self.store.lock().unwrap().clone())
        }

        async fn find_by_customer(&self, customer_id: i32) -> DomainResult<Vec<ServiceOrder>> {
            Ok(self
                .store
                .lock()
                .unwrap()
                .iter()
                .filter(|o| o.customer_id == customer_id)
                .cloned()
                .collect())
        }

        async fn save(&self, mut order: ServiceOrder) -> DomainResult<ServiceOrder> {
            if self.fail_next_save.swap(false, Ordering::SeqCst) {
                return Err(DomainError::Validation(
                    "Database error: disk I/O error".into(),
                ));
            }
            let mut store = self.store.lock().unwrap();
            order.id = store.len() as i32 + 1;
            store.push(order.clone());
            Ok(order)
        }

        async fn update(&self, order: ServiceOrder) -> DomainResult<()> {
            let mut store = self.store.lock().unwrap();
            let slot = store
                .iter_mut()
                .find(|o| o.id == order.id)
                .ok_or_else(|| DomainError::not_found("ServiceOrder", "id", order.id))?;
            *slot = order;
            Ok(())
        }

        async fn delete(&self, id: i32) -> DomainResult<()> {
            self.store.lock().unwrap().retain(|o| o.id != id);
            Ok(())
        }
    }

    struct ReposFake {
        quotes: QuotesFake,
        orders: OrdersFake,
    }

    impl RepositoryProvider for ReposFake {
        fn quotes(&self) -> &dyn QuoteRepository {
            &self.quotes
        }

        fn service_orders(&self) -> &dyn ServiceOrderRepository {
            &self.orders
        }

        fn customers(&self) -> &dyn CustomerRepository {
            unimplemented!("not exercised here")
        }

        fn vehicles(&self) -> &dyn VehicleRepository {
            unimplemented!("not exercised here")
        }

        fn parts(&self) -> &dyn PartRepository {
            unimplemented!("not exercised here")
        }

        fn finance(&self) -> &dyn FinanceRepository {
            unimplemented!("not exercised here")
        }

        fn users(&self) -> &dyn UserRepository {
            unimplemented!("not exercised here")
        }
    }

    fn approved_quote() -> Quote {
        let mut quote = Quote {
            id: 1,
            customer_id: 10,
            vehicle_id: Some(5),
            description: Some("Full service".into()),
            status: QuoteStatus::Approved,
            discount: dec!(10),
            labor_total: Decimal::ZERO,
            parts_total: Decimal::ZERO,
            grand_total: Decimal::ZERO,
            valid_until: None,
            items: vec![QuoteItem {
                id: 1,
                kind: QuoteItemKind::Labor,
                description: "Full service".into(),
                quantity: dec!(2),
                unit_price: dec!(50),
            }],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        quote.recompute_totals().unwrap();
        quote
    }

    fn state_with(quotes: QuotesFake, orders: OrdersFake) -> (AppState, Arc<ReposFake>) {
        let repos = Arc::new(ReposFake { quotes, orders });
        let state = AppState {
            repos: repos.clone(),
        };
        (state, repos)
    }

    #[tokio::test]
    async fn convert_creates_an_order_carrying_the_quote_totals() {
        let quote = approved_quote();
        let grand_total = quote.grand_total;
        let (state, repos) = state_with(QuotesFake::with(quote), OrdersFake::default());

        let (status, Json(resp)) = convert_quote(State(state), Path(1)).await.unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let order = resp.data.unwrap();
        assert_eq!(order.quote_id, Some(1));
        assert_eq!(order.customer_id, 10);
        assert_eq!(order.total, grand_total);
        assert_eq!(repos.quotes.get(1).unwrap().status, QuoteStatus::Converted);
    }

    #[tokio::test]
    async fn failed_order_insert_cannot_lead_to_duplicate_orders() {
        let (state, repos) = state_with(QuotesFake::with(approved_quote()), OrdersFake::default());
        repos.orders.fail_next_save.store(true, Ordering::SeqCst);

        // First attempt: the status flip lands, then the order insert fails
        let result = convert_quote(State(state.clone()), Path(1)).await;
        assert!(result.is_err());
        assert_eq!(repos.quotes.get(1).unwrap().status, QuoteStatus::Converted);
        assert!(repos.orders.store.lock().unwrap().is_empty());

        // A retry is rejected instead of minting a second order
        let retry = convert_quote(State(state), Path(1)).await;
        assert!(retry.is_err());
        assert!(repos.orders.store.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn replaced_items_come_back_with_their_assigned_ids() {
        let mut quote = approved_quote();
        quote.status = QuoteStatus::Pending;
        let (state, _repos) = state_with(QuotesFake::with(quote), OrdersFake::default());

        let req = UpdateQuoteRequest {
            description: None,
            discount: None,
            valid_until: None,
            items: Some(vec![QuoteItemRequest {
                kind: "Part".into(),
                description: "Brake pads".into(),
                quantity: dec!(1),
                unit_price: dec!(80),
            }]),
        };

        let Json(resp) = update_quote(State(state), Path(1), ValidatedJson(req))
            .await
            .unwrap();
        let updated = resp.data.unwrap();
        assert_eq!(updated.items.len(), 1);
        assert!(updated.items.iter().all(|i| i.id != 0));
    }
}
