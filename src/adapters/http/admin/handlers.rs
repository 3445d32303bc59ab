//! HTTP handlers for account administration.
//!
//! Role checks happen in the application handlers; these only translate.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::{
    AccountStatsQuery, BulkRenewCommand, RegisterAccountCommand, RenewAccountCommand,
    ToggleRestrictionCommand,
};
use crate::domain::foundation::{AccountId, Timestamp};

use super::dto::{
    AccountSummary, BulkRenewRequest, BulkRenewResponse, CreatedResponse, RegisterAccountRequest,
    RenewRequest, RestrictionRequest,
};

/// POST /api/admin/accounts
pub async fn register_account(
    State(state): State<AppState>,
    RequireAuth(actor): RequireAuth,
    Json(request): Json<RegisterAccountRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (account, password) = request.into_parts();
    let id = state
        .register_account
        .handle(RegisterAccountCommand {
            actor,
            account,
            password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// PUT /api/admin/accounts/:id/restriction
pub async fn set_restriction(
    State(state): State<AppState>,
    RequireAuth(actor): RequireAuth,
    Path(account_id): Path<AccountId>,
    Json(request): Json<RestrictionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let account = state
        .toggle_restriction
        .handle(ToggleRestrictionCommand {
            actor,
            account_id,
            restricted: request.restricted,
        })
        .await?;

    Ok(Json(AccountSummary::from_account(&account, &Timestamp::now())))
}

/// POST /api/admin/accounts/:id/renew
pub async fn renew_account(
    State(state): State<AppState>,
    RequireAuth(actor): RequireAuth,
    Path(account_id): Path<AccountId>,
    Json(request): Json<RenewRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let account = state
        .renew_account
        .handle(RenewAccountCommand {
            actor,
            account_id,
            months: request.months,
        })
        .await?;

    Ok(Json(AccountSummary::from_account(&account, &Timestamp::now())))
}

/// POST /api/admin/accounts/renew-bulk
pub async fn renew_bulk(
    State(state): State<AppState>,
    RequireAuth(actor): RequireAuth,
    Json(request): Json<BulkRenewRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .renew_account
        .handle_bulk(BulkRenewCommand {
            actor,
            items: request.updates.into_iter().map(Into::into).collect(),
        })
        .await?;

    Ok(Json(BulkRenewResponse::from(result)))
}

/// GET /api/admin/accounts/stats
pub async fn account_stats(
    State(state): State<AppState>,
    RequireAuth(actor): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let stats = state.account_stats.handle(AccountStatsQuery { actor }).await?;
    Ok(Json(stats))
}
