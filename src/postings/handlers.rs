use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    error::ApiError,
    postings::{dto::CreatePostingRequest, repo::Posting},
    state::AppState,
};

pub fn posting_routes() -> Router<AppState> {
    Router::new()
        .route("/postings", post(create_posting).get(list_postings))
        .route("/postings/:id", get(get_posting))
}

#[instrument(skip(state, payload))]
pub async fn create_posting(
    State(state): State<AppState>,
    Json(payload): Json<CreatePostingRequest>,
) -> Result<(StatusCode, Json<Posting>), ApiError> {
    let posting = Posting::create(
        &state.db,
        &payload.title,
        &payload.profession,
        &payload.specification,
        &payload.pay,
        payload.owner_id,
    )
    .await?;

    info!(posting_id = %posting.id, owner_id = %posting.owner_id, "posting created");
    Ok((StatusCode::CREATED, Json(posting)))
}

#[instrument(skip(state))]
pub async fn list_postings(
    State(state): State<AppState>,
) -> Result<Json<Vec<Posting>>, ApiError> {
    let postings = Posting::list(&state.db).await?;
    Ok(Json(postings))
}

#[instrument(skip(state))]
pub async fn get_posting(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Posting>, ApiError> {
    let posting = Posting::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Posting"))?;
    Ok(Json(posting))
}
