use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use lorekeeper_domain::{Character, CharacterId, CharacterPatch};

use super::CampaignScope;
use crate::api::auth::Auth;
use crate::api::error::ApiError;
use crate::api::extract::{ApiJson, ApiPath, ApiQuery};
use crate::app::App;
use crate::use_cases::management::CreateCharacterInput;

pub(super) fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/characters", get(list_characters).post(create_character))
        .route(
            "/characters/{id}",
            get(get_character)
                .put(update_character)
                .delete(delete_character),
        )
}

async fn list_characters(
    State(app): State<Arc<App>>,
    Auth(user): Auth,
    ApiQuery(scope): ApiQuery<CampaignScope>,
) -> Result<Json<Vec<Character>>, ApiError> {
    let characters = app
        .use_cases
        .management
        .character
        .list(user.user_id, scope.require()?)
        .await?;
    Ok(Json(characters))
}

async fn get_character(
    State(app): State<Arc<App>>,
    Auth(user): Auth,
    ApiPath(id): ApiPath<CharacterId>,
) -> Result<Json<Character>, ApiError> {
    let character = app
        .use_cases
        .management
        .character
        .get(user.user_id, id)
        .await?;
    Ok(Json(character))
}

async fn create_character(
    State(app): State<Arc<App>>,
    Auth(user): Auth,
    ApiJson(input): ApiJson<CreateCharacterInput>,
) -> Result<(StatusCode, Json<Character>), ApiError> {
    let character = app
        .use_cases
        .management
        .character
        .create(user.user_id, input)
        .await?;
    Ok((StatusCode::CREATED, Json(character)))
}

async fn update_character(
    State(app): State<Arc<App>>,
    Auth(user): Auth,
    ApiPath(id): ApiPath<CharacterId>,
    ApiJson(patch): ApiJson<CharacterPatch>,
) -> Result<Json<Character>, ApiError> {
    let character = app
        .use_cases
        .management
        .character
        .update(user.user_id, id, patch)
        .await?;
    Ok(Json(character))
}

async fn delete_character(
    State(app): State<Arc<App>>,
    Auth(user): Auth,
    ApiPath(id): ApiPath<CharacterId>,
) -> Result<StatusCode, ApiError> {
    app.use_cases
        .management
        .character
        .delete(user.user_id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
