//! API layer - axum router over the planning services
//!
//! Handlers stay thin: they extract and validate the request, call one
//! service method and shape the JSON reply. Authentication and the admin
//! gate are route layers in [`routes`].

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use routes::create_router;
pub use state::AppState;
