//! Accounts receivable/payable REST API handlers

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
use crate::domain::finance::{self, AccountEntry, EntryKind, EntryStatus};
use crate::shared::types::pagination;
use crate::shared::validations::validate_pagination;

/// One receivable or payable line in the books
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccountEntryResponse {
    /// Unique entry ID
    pub id: i32,
    /// `Receivable` (money owed to the workshop) or `Payable`
    pub kind: String,
    /// What the entry covers
    pub description: String,
    /// Customer or supplier the entry refers to
    pub counterparty: Option<String>,
    /// Amount due
    pub amount: Decimal,
    /// Payment deadline
    pub due_date: Option<DateTime<Utc>>,
    /// `Pending` or `Paid`
    pub status: String,
    /// `true` when pending past its due date
    pub is_overdue: bool,
    /// When the entry was settled
    pub paid_at: Option<DateTime<Utc>>,
    /// Creation date
    pub created_at: DateTime<Utc>,
    /// Last update date
    pub updated_at: DateTime<Utc>,
}

impl AccountEntryResponse {
    fn from_entry(e: AccountEntry, now: DateTime<Utc>) -> Self {
        let is_overdue = e.is_overdue(now);
        Self {
            id: e.id,
            kind: e.kind.to_string(),
            description: e.description,
            counterparty: e.counterparty,
            amount: e.amount,
            due_date: e.due_date,
            status: e.status.to_string(),
            is_overdue,
            paid_at: e.paid_at,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

/// Request to record an account entry
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEntryRequest {
    /// `Receivable` or `Payable`
    pub kind: String,
    /// What the entry covers (1–200 characters)
    #[validate(length(min = 1, max = 200))]
    pub description: String,
    /// Customer or supplier the entry refers to
    pub counterparty: Option<String>,
    /// Amount due; must be positive
    pub amount: Decimal,
    /// Payment deadline
    pub due_date: Option<DateTime<Utc>>,
}

/// Request to update an account entry (partial update)
///
/// Only pending entries may be edited.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEntryRequest {
    /// New description
    #[validate(length(min = 1, max = 200))]
    pub description: Option<String>,
    /// New counterparty
    pub counterparty: Option<String>,
    /// New amount; must be positive
    pub amount: Option<Decimal>,
    /// New payment deadline
    pub due_date: Option<DateTime<Utc>>,
}

/// Dashboard view over all open entries
#[derive(Debug, Serialize, ToSchema)]
pub struct FinanceSummaryResponse {
    /// Sum of pending receivable amounts
    pub receivable_open: Decimal,
    /// Sum of pending payable amounts
    pub payable_open: Decimal,
    /// Count of overdue receivables
    pub receivable_overdue: u64,
    /// Count of overdue payables
    pub payable_overdue: u64,
    /// `receivable_open - payable_open`
    pub balance: Decimal,
}

fn parse_entry_kind(s: &str) -> Result<EntryKind, (StatusCode, Json<ApiResponse<()>>)> {
    match s {
        "Receivable" => Ok(EntryKind::Receivable),
        "Payable" => Ok(EntryKind::Payable),
        other => Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format!(
                "Unknown entry kind '{}': expected 'Receivable' or 'Payable'",
                other
            ))),
        )),
    }
}

fn require_positive_amount(amount: Decimal) -> Result<(), (StatusCode, Json<ApiResponse<()>>)> {
    if amount <= Decimal::ZERO {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Amount must be positive")),
        ));
    }
    Ok(())
}

/// List account entries
///
/// Supports a case-insensitive `search` over description and counterparty.
#[utoipa::path(
    get,
    path = "/api/v1/finance/entries",
    tag = "Finance",
    params(ListParams),
    responses(
        (status = 200, description = "One page of entries", body = ApiResponse<PaginatedResponse<AccountEntryResponse>>)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_entries(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<
    Json<ApiResponse<PaginatedResponse<AccountEntryResponse>>>,
    (StatusCode, Json<ApiResponse<()>>),
> {
    let (page, limit) = validate_pagination(params.page, params.limit);

    let mut entries = state.repos.finance().find_all().await.map_err(error_response)?;
    if let Some(term) = params.search.as_deref().filter(|t| !t.trim().is_empty()) {
        entries.retain(|e| e.matches_search(term));
    }

    let now = Utc::now();
    let items: Vec<AccountEntryResponse> = entries
        .into_iter()
        .map(|e| AccountEntryResponse::from_entry(e, now))
        .collect();
    let result = pagination::compute(&items, limit, page);
    Ok(Json(ApiResponse::success(PaginatedResponse::from_page(result, limit))))
}

/// Get an account entry by ID
#[utoipa::path(
    get,
    path = "/api/v1/finance/entries/{id}",
    tag = "Finance",
    params(("id" = i32, Path, description = "Entry ID")),
    responses(
        (status = 200, description = "Entry details", body = ApiResponse<AccountEntryResponse>),
        (status = 404, description = "Entry not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_entry(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<AccountEntryResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.repos.finance().find_by_id(id).await.map_err(error_response)? {
        Some(entry) => Ok(Json(ApiResponse::success(AccountEntryResponse::from_entry(
            entry,
            Utc::now(),
        )))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Entry {} not found", id))),
        )),
    }
}

/// Record an account entry
#[utoipa::path(
    post,
    path = "/api/v1/finance/entries",
    tag = "Finance",
    request_body = CreateEntryRequest,
    responses(
        (status = 201, description = "Entry recorded", body = ApiResponse<AccountEntryResponse>),
        (status = 400, description = "Unknown kind or non-positive amount"),
        (status = 422, description = "Validation failed")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_entry(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateEntryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AccountEntryResponse>>), (StatusCode, Json<ApiResponse<()>>)>
{
    let kind = parse_entry_kind(&req.kind)?;
    require_positive_amount(req.amount)?;

    let now = Utc::now();
    let entry = AccountEntry {
        id: 0, // assigned by the database
        kind,
        description: req.description,
        counterparty: req.counterparty,
        amount: req.amount,
        due_date: req.due_date,
        status: EntryStatus::Pending,
        paid_at: None,
        created_at: now,
        updated_at: now,
    };

    let saved = state.repos.finance().save(entry).await.map_err(error_response)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(AccountEntryResponse::from_entry(saved, now))),
    ))
}

/// Update an account entry
///
/// Only pending entries may be edited.
#[utoipa::path(
    put,
    path = "/api/v1/finance/entries/{id}",
    tag = "Finance",
    params(("id" = i32, Path, description = "Entry ID")),
    request_body = UpdateEntryRequest,
    responses(
        (status = 200, description = "Entry updated", body = ApiResponse<AccountEntryResponse>),
        (status = 400, description = "Entry already paid"),
        (status = 404, description = "Entry not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_entry(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(req): ValidatedJson<UpdateEntryRequest>,
) -> Result<Json<ApiResponse<AccountEntryResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let Some(mut entry) = state.repos.finance().find_by_id(id).await.map_err(error_response)?
    else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Entry {} not found", id))),
        ));
    };

    if entry.status == EntryStatus::Paid {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format!(
                "Entry {} is already paid and can no longer be edited",
                id
            ))),
        ));
    }

    if let Some(amount) = req.amount {
        require_positive_amount(amount)?;
        entry.amount = amount;
    }
    if let Some(description) = req.description {
        entry.description = description;
    }
    if let Some(counterparty) = req.counterparty {
        entry.counterparty = Some(counterparty);
    }
    if let Some(due_date) = req.due_date {
        entry.due_date = Some(due_date);
    }
    entry.updated_at = Utc::now();

    state.repos.finance().update(entry.clone()).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(AccountEntryResponse::from_entry(
        entry,
        Utc::now(),
    ))))
}

/// Delete an account entry
#[utoipa::path(
    delete,
    path = "/api/v1/finance/entries/{id}",
    tag = "Finance",
    params(("id" = i32, Path, description = "Entry ID")),
    responses(
        (status = 200, description = "Entry deleted"),
        (status = 404, description = "Entry not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ApiResponse<()>>)> {
    state.repos.finance().delete(id).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success("Entry deleted".to_string())))
}

/// Settle an account entry
///
/// Marks the entry paid and records the settlement time. Settling twice
/// is rejected.
#[utoipa::path(
    post,
    path = "/api/v1/finance/entries/{id}/settle",
    tag = "Finance",
    params(("id" = i32, Path, description = "Entry ID")),
    responses(
        (status = 200, description = "Entry settled", body = ApiResponse<AccountEntryResponse>),
        (status = 400, description = "Entry already paid"),
        (status = 404, description = "Entry not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn settle_entry(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<AccountEntryResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let Some(mut entry) = state.repos.finance().find_by_id(id).await.map_err(error_response)?
    else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Entry {} not found", id))),
        ));
    };

    let now = Utc::now();
    entry.settle(now).map_err(error_response)?;
    entry.updated_at = now;

    state.repos.finance().update(entry.clone()).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(AccountEntryResponse::from_entry(entry, now))))
}

/// Financial summary for the dashboard
///
/// Open receivable/payable totals, overdue counts and the net balance.
#[utoipa::path(
    get,
    path = "/api/v1/finance/summary",
    tag = "Finance",
    responses(
        (status = 200, description = "Aggregated view over all open entries", body = ApiResponse<FinanceSummaryResponse>)
    ),
    security(("bearer_auth" = []))
)]
pub async fn finance_summary(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<FinanceSummaryResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let entries = state.repos.finance().find_all().await.map_err(error_response)?;
    let summary = finance::summarize(&entries, Utc::now());

    Ok(Json(ApiResponse::success(FinanceSummaryResponse {
        receivable_open: summary.receivable_open,
        payable_open: summary.payable_open,
        receivable_overdue: summary.receivable_overdue,
        payable_overdue: summary.payable_overdue,
        balance: summary.balance,
    })))
}
