/// The core application state: the cart API client.
///
/// Immutable after startup. The cookie jar inside the API client locks
/// internally.
#[derive(Debug)]
pub struct State<A> {
    /// Client used for every cart API exchange.
    pub api: A,
}

/// Thread-safe shared reference to the application [`State`].
pub type SharedState<A> = std::sync::Arc<State<A>>;
