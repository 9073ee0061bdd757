use cartwire_bridge::MessageFromBackend;

use super::AppContextHandle;
use crate::api::CartApi;

/// Handles the page's initial cookies (see
/// [`cartwire_bridge::MessageToBackend::SeedCookies`]).
pub fn handle_seed_cookies<A: CartApi>(context: &AppContextHandle<A>, cookies: &str) {
    context.state.api.add_cookies(cookies);
}

/// Pushes the cookie store's current contents to the frontend after an HTTP
/// exchange, so cookies set by the server become visible to the page.
pub async fn push_cookies<A: CartApi>(context: &AppContextHandle<A>) {
    if let Some(cookies) = context.state.api.cookies() {
        context
            .send(MessageFromBackend::CookiesChanged(cookies))
            .await;
    }
}
