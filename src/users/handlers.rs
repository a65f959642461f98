use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    error::ApiError,
    state::AppState,
    users::{
        dto::{LoginRequest, ProfileFields, ProfilePatch, RegisterRequest},
        password::{hash_password, verify_password},
        repo::User,
    },
};

pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/users", post(register))
        .route("/users/:id", get(get_user).delete(delete_user))
}

pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/profile/:id", put(replace_profile).patch(patch_profile))
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::InvalidOperation("Invalid email".into()));
    }
    if payload.password.len() < 8 {
        warn!("password too short");
        return Err(ApiError::InvalidOperation("Password too short".into()));
    }

    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::Conflict("Email already registered"));
    }

    let hash = hash_password(&payload.password)?;
    let user = User::create(
        &state.db,
        &payload.name,
        &payload.surname,
        &payload.email,
        &hash,
    )
    .await?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((StatusCode::CREATED, Json(user)))
}

/// No token or session is issued; the caller gets the user record back.
/// Unknown email and wrong password are indistinguishable on the outside.
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<User>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    let user = match User::find_by_email(&state.db, &payload.email).await? {
        Some(u) => u,
        None => {
            warn!(email = %payload.email, "login unknown email");
            return Err(ApiError::Unauthorized);
        }
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(email = %payload.email, user_id = %user.id, "login invalid password");
        return Err(ApiError::Unauthorized);
    }

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(user))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, ApiError> {
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("User"))?;
    Ok(Json(user))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !User::delete(&state.db, id).await? {
        return Err(ApiError::NotFound("User"));
    }
    info!(user_id = %id, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT: every profile field takes the value from the body, omitted fields
/// included (they become null).
#[instrument(skip(state, payload))]
pub async fn replace_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProfileFields>,
) -> Result<Json<User>, ApiError> {
    let user = User::write_profile(&state.db, id, &payload)
        .await?
        .ok_or(ApiError::NotFound("User"))?;
    Ok(Json(user))
}

/// PATCH: only fields present in the body are overwritten.
#[instrument(skip(state, payload))]
pub async fn patch_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProfilePatch>,
) -> Result<Json<User>, ApiError> {
    let current = User::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("User"))?;
    let merged = payload.merge_into(current.profile());
    let user = User::write_profile(&state.db, id, &merged)
        .await?
        .ok_or(ApiError::NotFound("User"))?;
    Ok(Json(user))
}
