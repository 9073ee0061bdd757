//! Backend service handlers for frontend-driven requests.
//!
//! This module groups async request handlers that operate on the shared
//! `AppContext`, talk to the cart API, and emit notifications or state
//! updates back to the frontend.

pub mod cart_service;
pub mod cookie_service;

/// Represents a type that is used in all handlers as an application context.
pub(crate) type AppContextHandle<A> = std::sync::Arc<crate::app::AppContext<A>>;

/// Builds a handler context over `api` and returns the frontend end of its
/// bridge.
#[cfg(test)]
pub(crate) fn test_context<A: crate::api::CartApi>(
    api: A,
) -> (
    AppContextHandle<A>,
    tokio::sync::mpsc::Receiver<cartwire_bridge::MessageFromBackend>,
) {
    let (tx, rx) = tokio::sync::mpsc::channel(16);
    let state = std::sync::Arc::new(crate::state::State { api });
    (std::sync::Arc::new(crate::app::AppContext { state, tx }), rx)
}
