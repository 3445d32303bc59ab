//! HTTP handlers for premium purchase, direct activation and the payment webhook.

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::{
    ActivateDirectCommand, CreateOrderCommand, HandlePaymentWebhookCommand,
    HandlePaymentWebhookResult,
};
use crate::domain::foundation::{require_role, Role};
use crate::domain::premium::WebhookError;

use super::dto::{CreateOrderResponse, MessageResponse, SubscribeRequest};

pub const SIGNATURE_HEADER: &str = "X-Razorpay-Signature";

/// POST /api/premium/orders
pub async fn create_order(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    require_role(&user, &[Role::Subscriber], "create_premium_order").into_result()?;

    let result = state
        .create_order
        .handle(CreateOrderCommand {
            account_id: user.account_id,
        })
        .await?;

    Ok(Json(CreateOrderResponse::from(result)))
}

/// POST /api/premium/subscribe
pub async fn subscribe(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<SubscribeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require_role(&user, &[Role::Subscriber], "activate_premium").into_result()?;

    let result = state
        .activate_direct
        .handle(ActivateDirectCommand {
            account_id: user.account_id,
            utr: request.utr_number,
        })
        .await?;

    Ok(Json(MessageResponse {
        message: result.message.to_string(),
    }))
}

/// POST /api/webhook/razorpay
///
/// Anything but 200 makes the provider redeliver.
pub async fn payment_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let Some(signature) = headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok()) else {
        tracing::warn!(security_event = "webhook_signature_missing", "Webhook without signature header");
        return webhook_error(WebhookError::SignatureInvalid);
    };

    let cmd = HandlePaymentWebhookCommand {
        payload: body.to_vec(),
        signature: signature.to_string(),
    };

    match state.payment_webhook.handle(cmd).await {
        Ok(result) => {
            if let HandlePaymentWebhookResult::Activated {
                provider_order_id, ..
            } = &result
            {
                tracing::info!(provider_order_id = %provider_order_id, "Webhook settled order");
            }
            (StatusCode::OK, "ok").into_response()
        }
        Err(e) => webhook_error(e),
    }
}

fn webhook_error(err: WebhookError) -> Response {
    let status = err.status_code();
    if status.is_server_error() {
        tracing::error!(error = %err, retryable = err.is_retryable(), "Webhook processing failed");
    }
    (status, err.to_string()).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn webhook_errors_keep_their_status() {
        assert_eq!(
            webhook_error(WebhookError::SignatureInvalid).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            webhook_error(WebhookError::MissingField("payload.payment.entity.order_id")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            webhook_error(WebhookError::OrderNotFound("order_x".to_string())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
