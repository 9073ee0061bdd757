//! Scripted cart API for tests.
//!
//! Replays queued responses in order and records every request it was
//! asked to make. Clones share the same script, so a test can hand one
//! clone to the backend and inspect the other.

use std::{
    collections::VecDeque,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use cartwire_bridge::cart::CartItemRequest;
use reqwest::StatusCode;

use crate::api::{ApiError, ApiResponse, CartApi};

type Responses = Mutex<VecDeque<Result<ApiResponse, ApiError>>>;

#[derive(Debug, Default)]
struct Script {
    create_responses: Responses,
    fetch_responses: Responses,
    created: Mutex<Vec<(CartItemRequest, Option<String>)>>,
    fetch_calls: AtomicUsize,
    cookies: Mutex<Option<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct ScriptedApi(Arc<Script>);

impl ScriptedApi {
    /// Queues the answer to the next `create_item` call.
    pub fn push_create(&self, response: Result<ApiResponse, ApiError>) -> &Self {
        self.0.create_responses.lock().unwrap().push_back(response);
        self
    }

    /// Queues the answer to the next `fetch_cart` call.
    pub fn push_fetch(&self, response: Result<ApiResponse, ApiError>) -> &Self {
        self.0.fetch_responses.lock().unwrap().push_back(response);
        self
    }

    /// Every item creation request so far, with its CSRF token.
    pub fn created(&self) -> Vec<(CartItemRequest, Option<String>)> {
        self.0.created.lock().unwrap().clone()
    }

    pub fn fetch_calls(&self) -> usize {
        self.0.fetch_calls.load(Ordering::SeqCst)
    }
}

impl CartApi for ScriptedApi {
    async fn create_item(
        &self,
        item: &CartItemRequest,
        csrf_token: Option<&str>,
    ) -> Result<ApiResponse, ApiError> {
        self.0
            .created
            .lock()
            .unwrap()
            .push((item.clone(), csrf_token.map(str::to_string)));
        self.0
            .create_responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted create response")
    }

    async fn fetch_cart(&self) -> Result<ApiResponse, ApiError> {
        self.0.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.0
            .fetch_responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted fetch response")
    }

    fn add_cookies(&self, cookies: &str) {
        let mut current = self.0.cookies.lock().unwrap();
        *current = Some(match current.take() {
            Some(existing) => format!("{existing}; {cookies}"),
            None => cookies.to_string(),
        });
    }

    fn cookies(&self) -> Option<String> {
        self.0.cookies.lock().unwrap().clone()
    }
}

/// A completed exchange with the given status and body.
pub fn response(status: StatusCode, body: &str) -> ApiResponse {
    ApiResponse {
        status,
        body: body.to_string(),
    }
}

/// A genuine transport error, produced without touching the network.
pub async fn transport_error() -> ApiError {
    match reqwest::Client::new().get("http://").send().await {
        Err(err) => ApiError::Transport(err),
        Ok(_) => panic!("request to an empty host succeeded"),
    }
}
