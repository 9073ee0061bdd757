//! Application context and message dispatching utilities.
//!
//! The context contains the shared state and provides helpers for sending
//! responses and notifications back to the frontend bridge.

use std::sync::Arc;

use cartwire_bridge::{MessageFromBackend, MessageToBackend, notification::NotificationMessage};
use tokio::sync::mpsc::{Receiver, Sender};

use crate::api::CartApi;
use crate::services;
use crate::state::SharedState;

/// Shared application context passed to services and message handlers.
pub(crate) struct AppContext<A> {
    /// Runtime application state shared across services.
    pub state: SharedState<A>,
    /// Outbound channel to the frontend bridge.
    pub tx: Sender<MessageFromBackend>,
}

impl<A: CartApi> AppContext<A> {
    /// Read and dispatch messages from the frontend bridge until it closes.
    pub async fn consume_bridge_messages(self: &Arc<Self>, mut rx: Receiver<MessageToBackend>) {
        while let Some(message) = rx.recv().await {
            log::debug!("Got a frontend message: {message:?}");
            self.dispatch_message(message);
        }
        log::debug!("Frontend bridge closed");
    }

    /// Dispatches the received message from frontend down to individual
    /// service handlers. Requests run as independent tasks; cookie seeding is
    /// applied in message order.
    fn dispatch_message(self: &Arc<Self>, message: MessageToBackend) {
        match message {
            MessageToBackend::AddItemRequest { item, csrf_token } => {
                tokio::spawn(services::cart_service::handle_add_item_request(
                    self.clone(),
                    item,
                    csrf_token,
                ));
            }
            MessageToBackend::CartSummaryRequest => {
                tokio::spawn(services::cart_service::handle_cart_summary_request(
                    self.clone(),
                ));
            }
            MessageToBackend::SeedCookies(cookies) => {
                services::cookie_service::handle_seed_cookies(self, &cookies);
            }
        }
    }

    /// Send a message to the frontend bridge.
    pub async fn send(&self, message: MessageFromBackend) {
        if let Err(err) = self.tx.send(message).await {
            log::warn!("Frontend is gone, dropping message: {:?}", err.0);
        }
    }

    /// Send a notification message to the frontend bridge.
    pub async fn send_notification(&self, notification: NotificationMessage) {
        self.send(MessageFromBackend::NotificationMessage(notification))
            .await;
    }
}
