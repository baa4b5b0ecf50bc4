use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use lorekeeper_domain::{Campaign, CampaignId, CampaignPatch};

use crate::api::auth::Auth;
use crate::api::error::ApiError;
use crate::api::extract::{ApiJson, ApiPath};
use crate::app::App;
use crate::use_cases::management::CreateCampaignInput;

pub(super) fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/campaigns", get(list_campaigns).post(create_campaign))
        .route(
            "/campaigns/{id}",
            get(get_campaign).put(update_campaign).delete(delete_campaign),
        )
}

async fn list_campaigns(
    State(app): State<Arc<App>>,
    Auth(user): Auth,
) -> Result<Json<Vec<Campaign>>, ApiError> {
    let campaigns = app
        .use_cases
        .management
        .campaign
        .list(user.user_id)
        .await?;
    Ok(Json(campaigns))
}

async fn get_campaign(
    State(app): State<Arc<App>>,
    Auth(user): Auth,
    ApiPath(id): ApiPath<CampaignId>,
) -> Result<Json<Campaign>, ApiError> {
    let campaign = app
        .use_cases
        .management
        .campaign
        .get(user.user_id, id)
        .await?;
    Ok(Json(campaign))
}

async fn create_campaign(
    State(app): State<Arc<App>>,
    Auth(user): Auth,
    ApiJson(input): ApiJson<CreateCampaignInput>,
) -> Result<(StatusCode, Json<Campaign>), ApiError> {
    let campaign = app
        .use_cases
        .management
        .campaign
        .create(user.user_id, input)
        .await?;
    Ok((StatusCode::CREATED, Json(campaign)))
}

async fn update_campaign(
    State(app): State<Arc<App>>,
    Auth(user): Auth,
    ApiPath(id): ApiPath<CampaignId>,
    ApiJson(patch): ApiJson<CampaignPatch>,
) -> Result<Json<Campaign>, ApiError> {
    let campaign = app
        .use_cases
        .management
        .campaign
        .update(user.user_id, id, patch)
        .await?;
    Ok(Json(campaign))
}

async fn delete_campaign(
    State(app): State<Arc<App>>,
    Auth(user): Auth,
    ApiPath(id): ApiPath<CampaignId>,
) -> Result<StatusCode, ApiError> {
    app.use_cases
        .management
        .campaign
        .delete(user.user_id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
