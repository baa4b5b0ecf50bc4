//! API layer - HTTP entry points.

pub mod auth;
pub mod cors;
pub mod error;
pub mod extract;
pub mod http;

pub use auth::{require_auth, Auth, AuthenticatedUser};
pub use cors::CorsPolicy;
pub use error::ApiError;
