use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};

use crate::api::auth::Auth;
use crate::api::error::ApiError;
use crate::api::extract::ApiJson;
use crate::app::App;
use crate::use_cases::ai::{ConsistencyCheckInput, ConsistencyVerdict, DeepDiveInput, DeepDiveResult};

pub(super) fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/ai/deep-dive", post(deep_dive))
        .route("/ai/consistency-check", post(consistency_check))
}

async fn deep_dive(
    State(app): State<Arc<App>>,
    Auth(user): Auth,
    ApiJson(input): ApiJson<DeepDiveInput>,
) -> Result<Json<DeepDiveResult>, ApiError> {
    let result = app
        .use_cases
        .ai
        .assistant
        .deep_dive(user.user_id, input)
        .await?;
    Ok(Json(result))
}

async fn consistency_check(
    State(app): State<Arc<App>>,
    Auth(user): Auth,
    ApiJson(input): ApiJson<ConsistencyCheckInput>,
) -> Result<Json<ConsistencyVerdict>, ApiError> {
    let verdict = app
        .use_cases
        .ai
        .assistant
        .check_consistency(user.user_id, input)
        .await?;
    Ok(Json(verdict))
}
