//! Relationships are listed per campaign and addressed by id only for
//! mutation; there is no single-relationship read.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use lorekeeper_domain::{Relationship, RelationshipId, RelationshipPatch};

use super::CampaignScope;
use crate::api::auth::Auth;
use crate::api::error::ApiError;
use crate::api::extract::{ApiJson, ApiPath, ApiQuery};
use crate::app::App;
use crate::use_cases::management::CreateRelationshipInput;

pub(super) fn routes() -> Router<Arc<App>> {
    Router::new()
        .route(
            "/relationships",
            get(list_relationships).post(create_relationship),
        )
        .route(
            "/relationships/{id}",
            put(update_relationship).delete(delete_relationship),
        )
}

async fn list_relationships(
    State(app): State<Arc<App>>,
    Auth(user): Auth,
    ApiQuery(scope): ApiQuery<CampaignScope>,
) -> Result<Json<Vec<Relationship>>, ApiError> {
    let relationships = app
        .use_cases
        .management
        .relationship
        .list(user.user_id, scope.require()?)
        .await?;
    Ok(Json(relationships))
}

async fn create_relationship(
    State(app): State<Arc<App>>,
    Auth(user): Auth,
    ApiJson(input): ApiJson<CreateRelationshipInput>,
) -> Result<(StatusCode, Json<Relationship>), ApiError> {
    let relationship = app
        .use_cases
        .management
        .relationship
        .create(user.user_id, input)
        .await?;
    Ok((StatusCode::CREATED, Json(relationship)))
}

async fn update_relationship(
    State(app): State<Arc<App>>,
    Auth(user): Auth,
    ApiPath(id): ApiPath<RelationshipId>,
    ApiJson(patch): ApiJson<RelationshipPatch>,
) -> Result<Json<Relationship>, ApiError> {
    let relationship = app
        .use_cases
        .management
        .relationship
        .update(user.user_id, id, patch)
        .await?;
    Ok(Json(relationship))
}

async fn delete_relationship(
    State(app): State<Arc<App>>,
    Auth(user): Auth,
    ApiPath(id): ApiPath<RelationshipId>,
) -> Result<StatusCode, ApiError> {
    app.use_cases
        .management
        .relationship
        .delete(user.user_id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
