//! JSON display-state API.
//!
//! Thin handlers over the derivation layer: each endpoint fetches through
//! the cached clients, derives, and serializes. Upstream failures surface
//! as 503: the display degrades, the server never crashes.

mod dto;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
