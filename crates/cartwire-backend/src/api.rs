//! Cart API client.
//!
//! [`CartApi`] is the seam between the service handlers and the remote cart
//! API. Responses come back raw so the handlers decide what a status code or
//! body means; [`HttpCartApi`] is the reqwest-backed implementation used at
//! runtime.

use std::{future::Future, sync::Arc};

use cartwire_bridge::cart::CartItemRequest;
use reqwest::{
    StatusCode, Url,
    cookie::{CookieStore, Jar},
};

/// Path of the cart resource, relative to the storefront origin.
pub const CART_PATH: &str = "/api/v1/cart/";
/// Path of the cart items collection, relative to the storefront origin.
pub const CART_ITEMS_PATH: &str = "/api/v1/cart/items/";

/// Header carrying the CSRF token on state-changing requests.
const CSRF_HEADER: &str = "X-CSRFToken";

/// Errors raised while talking to the cart API or reading its payloads.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The configured base URL cannot be used to build endpoint URLs.
    #[error("invalid base url {url:?}: {reason}")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },
    /// The request could not be sent or the response body could not be read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The response body is not the JSON that was expected.
    #[error("malformed response body: {0}")]
    MalformedBody(#[from] serde_json::Error),
    /// The response body is valid JSON but carries no usable payload.
    #[error("unexpected response payload: {0}")]
    UnexpectedPayload(String),
}

/// A completed HTTP exchange: status plus the raw body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// Status reported by the server.
    pub status: StatusCode,
    /// Response body, unparsed.
    pub body: String,
}

impl ApiResponse {
    /// Whether the server reported a 2xx status.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Operations the widget needs from the cart API.
pub trait CartApi: Send + Sync + 'static {
    /// `POST /api/v1/cart/items/` with a JSON body and optional CSRF header.
    fn create_item(
        &self,
        item: &CartItemRequest,
        csrf_token: Option<&str>,
    ) -> impl Future<Output = Result<ApiResponse, ApiError>> + Send;

    /// `GET /api/v1/cart/`.
    fn fetch_cart(&self) -> impl Future<Output = Result<ApiResponse, ApiError>> + Send;

    /// Adds cookies given in `document.cookie` form to the cookie store.
    fn add_cookies(&self, cookies: &str);

    /// Current cookies for the storefront origin, in `document.cookie` form.
    fn cookies(&self) -> Option<String>;
}

/// Cart API client backed by a pooled [`reqwest::Client`] and a shared
/// cookie jar.
#[derive(Debug, Clone)]
pub struct HttpCartApi {
    client: reqwest::Client,
    jar: Arc<Jar>,
    base_url: Url,
    cart_url: Url,
    items_url: Url,
}

impl HttpCartApi {
    /// Builds a client for the storefront at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let invalid = |reason: String| ApiError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };

        let base = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(invalid("url cannot be a base".to_string()));
        }
        let cart_url = base.join(CART_PATH).map_err(|e| invalid(e.to_string()))?;
        let items_url = base
            .join(CART_ITEMS_PATH)
            .map_err(|e| invalid(e.to_string()))?;

        let jar = Arc::new(Jar::default());
        let client = reqwest::Client::builder()
            .cookie_provider(jar.clone())
            .build()?;

        Ok(Self {
            client,
            jar,
            base_url: base,
            cart_url,
            items_url,
        })
    }

    async fn read_response(response: reqwest::Response) -> Result<ApiResponse, ApiError> {
        let status = response.status();
        let body = response.text().await?;
        Ok(ApiResponse { status, body })
    }
}

impl CartApi for HttpCartApi {
    async fn create_item(
        &self,
        item: &CartItemRequest,
        csrf_token: Option<&str>,
    ) -> Result<ApiResponse, ApiError> {
        log::info!("POST {} {item:?}", self.items_url);

        let mut request = self.client.post(self.items_url.clone()).json(item);
        if let Some(token) = csrf_token {
            request = request.header(CSRF_HEADER, token);
        }

        let response = request.send().await?;
        Self::read_response(response).await
    }

    async fn fetch_cart(&self) -> Result<ApiResponse, ApiError> {
        log::info!("GET {}", self.cart_url);

        let response = self.client.get(self.cart_url.clone()).send().await?;
        Self::read_response(response).await
    }

    fn add_cookies(&self, cookies: &str) {
        for cookie in cookies.split(';').map(str::trim).filter(|c| !c.is_empty()) {
            self.jar.add_cookie_str(cookie, &self.base_url);
        }
    }

    fn cookies(&self) -> Option<String> {
        let header = self.jar.cookies(&self.base_url)?;
        header.to_str().ok().map(str::to_owned)
    }
}
