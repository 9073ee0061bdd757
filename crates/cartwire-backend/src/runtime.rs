//! Backend runtime setup and orchestration.
//!
//! This module wires together configuration, the cart API client, and the
//! message dispatch loop that listens to frontend bridge requests.

use std::{sync::Arc, thread};

use cartwire_bridge::{MessageFromBackend, MessageToBackend, config::Config};
use tokio::sync::mpsc::{Receiver, Sender};

use crate::api::{CartApi, HttpCartApi};
use crate::app::AppContext;
use crate::state::State;

/// Load configuration, build the HTTP client and start processing frontend
/// messages.
async fn setup_backend(rx: Receiver<MessageToBackend>, tx: Sender<MessageFromBackend>) {
    let config = match crate::config::load_config().await {
        Ok(config) => config,
        Err(err) => {
            log::error!("Failed to load config, using defaults: {err}");
            Config::default()
        }
    };

    let api = match HttpCartApi::new(&config.base_url) {
        Ok(api) => api,
        Err(err) => {
            log::error!("Cannot reach the cart API: {err}");
            return;
        }
    };

    log::info!("Cart API at {}", config.base_url);
    serve(api, rx, tx).await;
}

/// Process frontend bridge messages against the given cart API until the
/// bridge closes.
pub async fn serve<A: CartApi>(
    api: A,
    rx: Receiver<MessageToBackend>,
    tx: Sender<MessageFromBackend>,
) {
    let state = Arc::new(State { api });
    let context = Arc::new(AppContext { state, tx });
    context.consume_bridge_messages(rx).await;
}

/// Spawn the backend runtime and begin processing bridge messages.
pub fn run(rx: Receiver<MessageToBackend>, tx: Sender<MessageFromBackend>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                log::error!("Failed to build tokio runtime: {err}");
                return;
            }
        };
        runtime.block_on(setup_backend(rx, tx));
    });
}
