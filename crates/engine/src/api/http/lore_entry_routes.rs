use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use lorekeeper_domain::{LoreEntry, LoreEntryId, LoreEntryPatch};

use super::CampaignScope;
use crate::api::auth::Auth;
use crate::api::error::ApiError;
use crate::api::extract::{ApiJson, ApiPath, ApiQuery};
use crate::app::App;
use crate::use_cases::management::CreateLoreEntryInput;

pub(super) fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/lore-entries", get(list_lore_entries).post(create_lore_entry))
        .route(
            "/lore-entries/{id}",
            get(get_lore_entry)
                .put(update_lore_entry)
                .delete(delete_lore_entry),
        )
}

async fn list_lore_entries(
    State(app): State<Arc<App>>,
    Auth(user): Auth,
    ApiQuery(scope): ApiQuery<CampaignScope>,
) -> Result<Json<Vec<LoreEntry>>, ApiError> {
    let entries = app
        .use_cases
        .management
        .lore_entry
        .list(user.user_id, scope.require()?)
        .await?;
    Ok(Json(entries))
}

async fn get_lore_entry(
    State(app): State<Arc<App>>,
    Auth(user): Auth,
    ApiPath(id): ApiPath<LoreEntryId>,
) -> Result<Json<LoreEntry>, ApiError> {
    let entry = app
        .use_cases
        .management
        .lore_entry
        .get(user.user_id, id)
        .await?;
    Ok(Json(entry))
}

async fn create_lore_entry(
    State(app): State<Arc<App>>,
    Auth(user): Auth,
    ApiJson(input): ApiJson<CreateLoreEntryInput>,
) -> Result<(StatusCode, Json<LoreEntry>), ApiError> {
    let entry = app
        .use_cases
        .management
        .lore_entry
        .create(user.user_id, input)
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn update_lore_entry(
    State(app): State<Arc<App>>,
    Auth(user): Auth,
    ApiPath(id): ApiPath<LoreEntryId>,
    ApiJson(patch): ApiJson<LoreEntryPatch>,
) -> Result<Json<LoreEntry>, ApiError> {
    let entry = app
        .use_cases
        .management
        .lore_entry
        .update(user.user_id, id, patch)
        .await?;
    Ok(Json(entry))
}

async fn delete_lore_entry(
    State(app): State<Arc<App>>,
    Auth(user): Auth,
    ApiPath(id): ApiPath<LoreEntryId>,
) -> Result<StatusCode, ApiError> {
    app.use_cases
        .management
        .lore_entry
        .delete(user.user_id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
