//! Page frontend: the document model, the cart widget bound to it, and the
//! single-threaded event loop that feeds it user interactions, backend
//! messages and notification timers.

use std::future;

use cartwire_bridge::{MessageFromBackend, MessageToBackend, cart::CartItemRequest};
use tokio::{
    sync::mpsc,
    time::{self, Instant},
};

use crate::{input::UiEvent, widget::CartWidget};

pub mod cookies;
pub mod formatting;
pub mod input;
pub mod notifications;
pub mod page;
pub mod quantity;
pub mod widget;

#[derive(Debug, Clone)]
pub struct BackendBridge {
    pub to_backend: mpsc::Sender<MessageToBackend>,
}

impl BackendBridge {
    async fn send(&self, message: MessageToBackend) {
        if let Err(err) = self.to_backend.send(message).await {
            log::error!("Backend is gone, dropping request: {:?}", err.0);
        }
    }

    pub async fn add_item(&self, item: CartItemRequest, csrf_token: Option<String>) {
        self.send(MessageToBackend::AddItemRequest { item, csrf_token })
            .await;
    }

    pub async fn request_cart_summary(&self) {
        self.send(MessageToBackend::CartSummaryRequest).await;
    }

    pub async fn seed_cookies(&self, cookies: String) {
        self.send(MessageToBackend::SeedCookies(cookies)).await;
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => future::pending().await,
    }
}

fn print_page(widget: &CartWidget) {
    print!("{}", formatting::format_page(widget.page()));
}

/// Drives the widget until the user quits, their input ends, or the backend
/// goes away. Returns the widget so the final page can be inspected.
pub async fn event_loop(
    mut widget: CartWidget,
    mut rx: mpsc::Receiver<MessageFromBackend>,
    mut events: mpsc::Receiver<UiEvent>,
) -> CartWidget {
    let bound = widget.initialize().await;
    log::info!("Bound {bound} add to cart control(s)");
    print!(
        "{}",
        formatting::format_controls(&widget.page().document, widget.controls())
    );
    print_page(&widget);

    loop {
        let deadline = widget.next_deadline();
        tokio::select! {
            message = rx.recv() => {
                let Some(message) = message else {
                    log::error!("Backend bridge closed");
                    break;
                };
                log::debug!("Got a message from backend: {message:?}");
                if widget.apply(message, Instant::now()) {
                    print_page(&widget);
                }
            }
            event = events.recv() => match event {
                None | Some(UiEvent::Quit) => break,
                Some(UiEvent::Click(control)) => {
                    let shown = widget.page().notifications.banners().len();
                    widget.click(control).await;
                    if widget.page().notifications.banners().len() != shown {
                        print_page(&widget);
                    }
                }
                Some(UiEvent::SetQuantity(value)) => widget.set_quantity(value),
                Some(UiEvent::ShowPage) => print_page(&widget),
            },
            () = sleep_until(deadline) => {
                if widget.expire_notifications(Instant::now()) > 0 {
                    print_page(&widget);
                }
            }
        }
    }

    widget
}

/// Runs the page on the current thread until the user leaves it.
pub fn run(
    rx: mpsc::Receiver<MessageFromBackend>,
    tx: mpsc::Sender<MessageToBackend>,
    page: page::Page,
    events: mpsc::Receiver<UiEvent>,
) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let widget = CartWidget::new(page, BackendBridge { to_backend: tx });
    runtime.block_on(event_loop(widget, rx, events));

    Ok(())
}
