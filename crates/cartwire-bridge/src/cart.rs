//! Payloads exchanged with the cart API.

use serde::{Deserialize, Serialize};

/// Notification shown once the cart API accepted an item.
pub const ADDED_MESSAGE: &str = "Product added to cart!";
/// Notification shown when adding an item failed without a server message.
pub const ADD_FAILED_MESSAGE: &str = "Error adding product to cart";

/// Body of an item creation request.
///
/// Built fresh for every click and never retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItemRequest {
    /// Product identifier taken from the control, `null` when the control
    /// has none.
    pub product: Option<String>,
    /// Variant identifier, serialized as `null` when absent.
    pub variant: Option<String>,
    /// Requested quantity. Not range-checked on the client.
    pub quantity: i128,
}

/// Summary of the cart, as returned by `GET /api/v1/cart/`.
///
/// Any other fields of the cart payload are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CartSummary {
    /// Total number of items in the cart.
    pub total_items: i64,
}
