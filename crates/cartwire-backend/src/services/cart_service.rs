use cartwire_bridge::{
    MessageFromBackend,
    cart::{ADD_FAILED_MESSAGE, ADDED_MESSAGE, CartItemRequest, CartSummary},
    notification::NotificationMessage,
};
use serde_json::Value;

use super::cookie_service::push_cookies;
use crate::api::{ApiError, ApiResponse, CartApi};

/// How the server answered an item creation request.
#[derive(Debug, PartialEq, Eq)]
enum AddItemOutcome {
    Added,
    Rejected(String),
}

fn interpret_add_item_response(response: ApiResponse) -> Result<AddItemOutcome, ApiError> {
    let body: Value = serde_json::from_str(&response.body)?;
    if response.is_success() {
        return Ok(AddItemOutcome::Added);
    }

    if body.is_null() {
        return Err(ApiError::UnexpectedPayload(format!(
            "null error body with status {}",
            response.status
        )));
    }

    let message = rejection_message(&body).unwrap_or_else(|| ADD_FAILED_MESSAGE.to_string());
    Ok(AddItemOutcome::Rejected(message))
}

/// Extracts a displayable `error` field. Empty, zero, `false` and structured
/// values fall back to the generic message.
fn rejection_message(body: &Value) -> Option<String> {
    match body.get("error")? {
        Value::String(message) if !message.is_empty() => Some(message.clone()),
        Value::Number(number) if number.as_f64() != Some(0.0) => Some(number.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// Handles an incoming item creation request (see
/// [`cartwire_bridge::MessageToBackend::AddItemRequest`]).
pub async fn handle_add_item_request<A: CartApi>(
    context: super::AppContextHandle<A>,
    item: CartItemRequest,
    csrf_token: Option<String>,
) {
    let result = context
        .state
        .api
        .create_item(&item, csrf_token.as_deref())
        .await;
    if result.is_ok() {
        push_cookies(&context).await;
    }

    match result.and_then(interpret_add_item_response) {
        Ok(AddItemOutcome::Added) => {
            log::info!("Added {item:?} to cart");
            tokio::spawn(handle_cart_summary_request(context.clone()));
            context
                .send_notification(NotificationMessage::success(ADDED_MESSAGE))
                .await;
        }
        Ok(AddItemOutcome::Rejected(message)) => {
            log::warn!("Cart API rejected {item:?}: {message}");
            context
                .send_notification(NotificationMessage::error(message))
                .await;
        }
        Err(err) => {
            log::error!("Error adding {item:?} to cart: {err}");
            context
                .send_notification(NotificationMessage::error(ADD_FAILED_MESSAGE))
                .await;
        }
    }
}

/// Handles an incoming cart summary request (see
/// [`cartwire_bridge::MessageToBackend::CartSummaryRequest`]). Failures are
/// only logged; the page keeps its current count.
pub async fn handle_cart_summary_request<A: CartApi>(context: super::AppContextHandle<A>) {
    let response = match context.state.api.fetch_cart().await {
        Ok(response) => response,
        Err(err) => {
            log::error!("Error updating cart count: {err}");
            return;
        }
    };
    push_cookies(&context).await;

    if !response.is_success() {
        log::warn!("Cart summary request failed with status {}", response.status);
        return;
    }

    match serde_json::from_str::<CartSummary>(&response.body) {
        Ok(summary) => {
            context
                .send(MessageFromBackend::CartSummaryResponse(summary))
                .await;
        }
        Err(err) => log::error!("Error updating cart count: {err}"),
    }
}
