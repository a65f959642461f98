use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    applications::{
        dto::{
            ApplicantEntry, ApplicationSummary, ApplyRequest, MessageResponse, PostingApplicants,
            StatusUpdateRequest,
        },
        repo::Application,
        status::ApplicationStatus,
    },
    error::ApiError,
    postings::repo::Posting,
    state::AppState,
};

pub fn applicant_routes() -> Router<AppState> {
    Router::new()
        .route("/apply", post(apply))
        .route("/my-applications/:user_id", get(my_applications))
}

pub fn owner_routes() -> Router<AppState> {
    Router::new()
        .route("/my-postings/:owner_id", get(my_postings_with_applicants))
        .route("/applications/:id/status", put(set_status))
}

/// Validation order is fixed for deterministic errors: posting existence,
/// then self-application, then the duplicate check. The duplicate check is
/// the conditional insert itself, so two racing applies cannot both land.
#[instrument(skip(state, payload))]
pub async fn apply(
    State(state): State<AppState>,
    Json(payload): Json<ApplyRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let posting = Posting::find_by_id(&state.db, payload.posting_id)
        .await?
        .ok_or(ApiError::NotFound("Posting"))?;

    if posting.owner_id == payload.applicant_id {
        warn!(posting_id = %posting.id, "self-application rejected");
        return Err(ApiError::InvalidOperation(
            "You cannot apply to your own posting".into(),
        ));
    }

    let application =
        Application::insert_pending(&state.db, payload.posting_id, payload.applicant_id)
            .await?
            .ok_or(ApiError::Conflict("You have already applied to this posting"))?;

    info!(
        application_id = %application.id,
        posting_id = %payload.posting_id,
        applicant_id = %payload.applicant_id,
        "application submitted"
    );
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Application submitted".into(),
        }),
    ))
}

#[instrument(skip(state))]
pub async fn my_applications(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<ApplicationSummary>>, ApiError> {
    let rows = Application::list_for_applicant(&state.db, user_id).await?;
    let summaries = rows.into_iter().map(ApplicationSummary::from).collect();
    Ok(Json(summaries))
}

#[instrument(skip(state))]
pub async fn my_postings_with_applicants(
    State(state): State<AppState>,
    Path(owner_id): Path<Uuid>,
) -> Result<Json<Vec<PostingApplicants>>, ApiError> {
    let postings = Posting::list_by_owner(&state.db, owner_id).await?;

    let mut results = Vec::with_capacity(postings.len());
    for posting in postings {
        let applicants = Application::list_applicants_for_posting(&state.db, posting.id)
            .await?
            .into_iter()
            .map(ApplicantEntry::from)
            .collect();
        results.push(PostingApplicants {
            posting_id: posting.id,
            title: posting.title,
            applicants,
        });
    }
    Ok(Json(results))
}

/// Overwrites the status. No caller-is-owner check: the trust boundary of
/// the source system was never stated, see DESIGN.md.
#[instrument(skip(state, payload))]
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<StatusUpdateRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let status: ApplicationStatus = payload
        .status
        .parse()
        .map_err(|e: crate::applications::status::UnknownStatus| {
            warn!(application_id = %id, status = %payload.status, "unrecognized status");
            ApiError::InvalidOperation(e.to_string())
        })?;

    if !Application::set_status(&state.db, id, status).await? {
        return Err(ApiError::NotFound("Application"));
    }

    info!(application_id = %id, %status, "application status changed");
    Ok(Json(MessageResponse {
        message: format!("Application marked as {}", status),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_response_serializes_as_expected() {
        let json = serde_json::to_string(&MessageResponse {
            message: "Application marked as accepted".into(),
        })
        .unwrap();
        assert_eq!(json, r#"{"message":"Application marked as accepted"}"#);
    }

    #[test]
    fn apply_request_deserializes_snake_case_ids() {
        let req: ApplyRequest = serde_json::from_str(
            r#"{"posting_id":"7f9c24e5-2f02-4c4e-8db0-9a2f63e3c1aa",
                "applicant_id":"0d4e1f66-3a7a-4f7e-9b11-55f0a8d1a001"}"#,
        )
        .unwrap();
        assert_ne!(req.posting_id, req.applicant_id);
    }
}
