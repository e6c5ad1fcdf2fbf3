//! HTTP surface of the proxy.
//!
//! Endpoints:
//! - `GET /` greeting
//! - `GET /auth/callback`, `GET /auth/status`, `POST /auth/logout`
//! - `GET /issues`, `POST /issues` (session required)

pub mod auth;
pub mod error;
pub mod issues;
pub mod server;
pub mod session;

pub use error::ApiError;
pub use server::{AppState, HttpServerConfig, TrackerHttpServer};
pub use session::{CookieSettings, CurrentSession};
