//! HTTP surface of the API Service.

pub mod handlers;
pub mod routes;

pub use handlers::{ApiError, AppState};
pub use routes::{ApiDoc, create_app, create_router};
