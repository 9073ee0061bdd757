use std::{
    io::{self, BufRead},
    thread,
};

use cartwire_frontend::{input::UiEvent, page::Page};
use tokio::sync::mpsc;

/// Forwards commands typed on stdin to the page until input ends.
fn read_commands(events: mpsc::Sender<UiEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    log::error!("Failed to read input: {err}");
                    break;
                }
            };

            match line.parse::<UiEvent>() {
                Ok(event) => {
                    let quit = event == UiEvent::Quit;
                    if events.blocking_send(event).is_err() || quit {
                        return;
                    }
                }
                Err(err) => eprintln!("{err}"),
            }
        }
        let _ = events.blocking_send(UiEvent::Quit);
    });
}

fn main() -> anyhow::Result<()> {
    simple_logger::SimpleLogger::new()
        .with_colors(true)
        .with_threads(true)
        .with_local_timestamps()
        .init()?;

    let page = match std::env::args_os().nth(1) {
        Some(path) => Page::load(path)?,
        None => Page::from_toml(cartwire_frontend::page::PRODUCT_PAGE_TEMPLATE)?,
    };

    let (events_tx, events_rx) = mpsc::channel(16);
    read_commands(events_tx);

    let channels = cartwire_bridge::BridgeChannels::default();
    cartwire_backend::run(channels.backend_rx, channels.backend_tx);
    cartwire_frontend::run(channels.frontend_rx, channels.frontend_tx, page, events_rx)
}
