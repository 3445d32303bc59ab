//! HTTP handler for `POST /api/auth/login`.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Json, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::adapters::http::error::ErrorResponse;
use crate::adapters::http::state::AppState;
use crate::application::handlers::{LoginCommand, LoginError, LoginOutcome};
use crate::domain::account::DeviceContext;

use super::dto::{LoginForbidden, LoginRejection, LoginRequest, LoginResponse, INVALID_CREDENTIALS};

pub async fn login(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    Json(request): Json<LoginRequest>,
) -> Response {
    let device = device_context(&headers, connect_info.map(|ConnectInfo(addr)| addr));
    let cmd = LoginCommand {
        identifier: request.identifier,
        secret: request.secret,
        device,
    };

    match state.login.handle(cmd).await {
        Ok(LoginOutcome::Authorized(session)) => {
            (StatusCode::OK, Json(LoginResponse::from(session))).into_response()
        }
        Ok(LoginOutcome::Unauthorized) => invalid_credentials(),
        Ok(LoginOutcome::Forbidden { reason, message }) => (
            StatusCode::FORBIDDEN,
            Json(LoginForbidden {
                account_status: reason.as_str(),
                message,
            }),
        )
            .into_response(),
        // Already logged at error level; the client sees bad credentials.
        Err(LoginError::SubscriberRecordMissing(_)) => invalid_credentials(),
        Err(LoginError::Dependency(e)) => {
            tracing::error!(error = %e, "Login dependency unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::new(
                    "SERVICE_UNAVAILABLE",
                    "Login is temporarily unavailable",
                )),
            )
                .into_response()
        }
        Err(LoginError::Storage(e)) => {
            tracing::error!(error = %e, "Login storage failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("INTERNAL_ERROR", "Internal server error")),
            )
                .into_response()
        }
    }
}

fn invalid_credentials() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(LoginRejection {
            message: INVALID_CREDENTIALS,
        }),
    )
        .into_response()
}

/// Builds the device context from request metadata.
///
/// The first `X-Forwarded-For` hop wins over the socket peer address.
pub(crate) fn device_context(headers: &HeaderMap, peer: Option<SocketAddr>) -> DeviceContext {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let forwarded = headers
        .get("X-Forwarded-For")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(str::to_string);

    let client_ip = forwarded.or_else(|| peer.map(|addr| addr.ip().to_string()));
    DeviceContext::new(user_agent, client_ip)
}
