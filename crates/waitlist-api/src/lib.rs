//! JSON API for the waitlist.
//!
//! Exposes an axum [`Router`] backed by any
//! [`waitlist_core::store::WaitlistStore`]. TLS, tracing layers and other
//! transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", waitlist_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod join;
pub mod service;

use std::sync::Arc;

use axum::{Router, routing::get};
use waitlist_core::store::WaitlistStore;

pub use error::ApiError;
pub use service::WaitlistService;

/// Build the API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: WaitlistStore + 'static,
{
  let service = Arc::new(WaitlistService::new(store));
  Router::new()
    .route("/join", get(join::list::<S>).post(join::create::<S>))
    .route("/join/export", get(join::export::<S>))
    .with_state(service)
}

// ─── Integration tests ────────────────────────────────────────────────────────
