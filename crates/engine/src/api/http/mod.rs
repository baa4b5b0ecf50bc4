//! HTTP routes.

use std::sync::Arc;

use axum::{middleware, routing::get, Json, Router};
use lorekeeper_domain::CampaignId;
use serde::Deserialize;
use serde_json::{json, Value};

use super::auth::require_auth;
use super::error::ApiError;
use crate::app::App;

mod assistant_routes;
mod campaign_routes;
mod character_routes;
mod lore_entry_routes;
mod relationship_routes;

#[cfg(test)]
mod tests;

/// Create all HTTP routes, mounted under `/api`.
pub fn routes(app: Arc<App>) -> Router {
    let protected = Router::new()
        .merge(campaign_routes::routes())
        .merge(character_routes::routes())
        .merge(relationship_routes::routes())
        .merge(lore_entry_routes::routes())
        .merge(assistant_routes::routes())
        .route_layer(middleware::from_fn_with_state(app.clone(), require_auth));

    let api = Router::new().route("/health", get(health)).merge(protected);

    Router::new().nest("/api", api).with_state(app)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// `?campaign_id=` scoping for child entity lists.
#[derive(Debug, Deserialize)]
struct CampaignScope {
    campaign_id: Option<CampaignId>,
}

impl CampaignScope {
    fn require(self) -> Result<CampaignId, ApiError> {
        self.campaign_id.ok_or_else(|| {
            ApiError::BadRequest("campaign_id query parameter is required".to_string())
        })
    }
}
