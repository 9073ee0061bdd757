//! Communication bridge between frontend and backend.
//!
//! This crate defines the types and protocols used to connect the page
//! frontend (document model, controls, notifications) with an asynchronous
//! backend that talks to the remote cart API.
//!
//! The design is deliberately lightweight and unidirectional:
//! - The frontend sends commands (e.g., add an item, refresh the cart
//!   summary, seed the cookie store).
//! - The backend pushes events (e.g., notifications, cart summaries,
//!   cookie store updates).
//!
//! Communication happens over bounded [`tokio::sync::mpsc`] channels wrapped
//! in [`BridgeChannels`], providing back-pressure, async compatibility, and
//! clean separation of concerns.

pub mod cart;
pub mod config;
pub mod notification;

use tokio::sync::mpsc::{self, Receiver, Sender};

/// Messages emitted by the backend to inform the frontend of state updates.
#[derive(Debug, Clone)]
pub enum MessageFromBackend {
    /// Generic message for all notifications in the application.
    NotificationMessage(notification::NotificationMessage),
    /// Fresh cart summary read from the cart API.
    CartSummaryResponse(cart::CartSummary),
    /// Current contents of the cookie store, in `document.cookie` form.
    CookiesChanged(String),
}

/// Commands issued by the frontend to control or query the backend.
#[derive(Debug, Clone)]
pub enum MessageToBackend {
    /// Request to create a cart item.
    AddItemRequest {
        /// Item payload sent as the request body.
        item: cart::CartItemRequest,
        /// CSRF token read from the page cookies, if present.
        csrf_token: Option<String>,
    },
    /// Request for the current cart summary.
    CartSummaryRequest,
    /// Cookies known to the page at load time, in `document.cookie` form.
    SeedCookies(String),
}

/// Paired `tokio::mpsc` channels for bidirectional communication between
/// frontend and backend.
pub struct BridgeChannels {
    /// Receiver used by the frontend to get messages from the backend.
    pub frontend_rx: Receiver<MessageFromBackend>,
    /// Sender used by the frontend to send commands to the backend.
    pub frontend_tx: Sender<MessageToBackend>,

    /// Receiver used by the backend to get commands from the frontend.
    pub backend_rx: Receiver<MessageToBackend>,
    /// Sender used by the backend to send events/responses to the frontend.
    pub backend_tx: Sender<MessageFromBackend>,
}

impl BridgeChannels {
    /// Creates a new pair of bridged channels with the given buffer capacity.
    pub fn new(buffer: usize) -> Self {
        let (to_backend_tx, to_backend_rx) = mpsc::channel(buffer);
        let (to_frontend_tx, to_frontend_rx) = mpsc::channel(buffer);
        Self {
            frontend_tx: to_backend_tx,
            frontend_rx: to_frontend_rx,
            backend_rx: to_backend_rx,
            backend_tx: to_frontend_tx,
        }
    }
}

impl Default for BridgeChannels {
    fn default() -> Self {
        Self::new(64)
    }
}
