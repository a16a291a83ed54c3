//! HTTP surface: one check endpoint plus drug-list, health, and the
//! static front page. The router is composable — `api_router()` returns
//! a `Router` that can be mounted on any axum server instance.

pub mod error;
pub mod page;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::{api_router, ApiContext};
