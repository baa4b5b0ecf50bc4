//! Cross-origin policy for browser clients.

use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(12 * 60 * 60);

/// Origins allowed to call the API with credentials.
#[derive(Debug, Clone, Default)]
pub struct CorsPolicy {
    origins: Vec<String>,
    host_suffixes: Vec<String>,
}

impl CorsPolicy {
    pub fn new(origins: Vec<String>, host_suffixes: Vec<String>) -> Self {
        Self {
            origins,
            host_suffixes,
        }
    }

    /// Exact origin match, or an origin whose host ends with a configured suffix.
    pub fn allows(&self, origin: &str) -> bool {
        if self.origins.iter().any(|allowed| allowed == origin) {
            return true;
        }
        let Some(host) = origin_host(origin) else {
            return false;
        };
        self.host_suffixes
            .iter()
            .any(|suffix| host.ends_with(suffix.as_str()))
    }

    pub fn into_layer(self) -> CorsLayer {
        CorsLayer::new()
            .allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _| {
                origin.to_str().is_ok_and(|o| self.allows(o))
            }))
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([
                header::ORIGIN,
                header::CONTENT_TYPE,
                header::AUTHORIZATION,
                header::ACCEPT,
            ])
            .expose_headers([header::CONTENT_LENGTH])
            .allow_credentials(true)
            .max_age(PREFLIGHT_MAX_AGE)
    }
}

// `https://app.example.com:8443` -> `app.example.com`
fn origin_host(origin: &str) -> Option<&str> {
    let (_, rest) = origin.split_once("://")?;
    let authority = rest.split('/').next()?;
    let host = authority.rsplit_once(':').map_or(authority, |(host, _)| host);
    (!host.is_empty()).then_some(host)
}
