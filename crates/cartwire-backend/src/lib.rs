//! Backend runtime entry point and public API surface.
//!
//! This crate owns the backend lifecycle, routes bridge messages to services,
//! and talks to the remote cart API over HTTP.

mod api;
mod app;
mod config;
mod runtime;
mod services;
mod state;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use crate::api::{ApiError, ApiResponse, CartApi, HttpCartApi};
pub use crate::runtime::{run, serve};
