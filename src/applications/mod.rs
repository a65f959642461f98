mod dto;
pub mod handlers;
pub mod repo;
pub mod status;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::applicant_routes())
        .merge(handlers::owner_routes())
}
