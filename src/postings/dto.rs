use serde::Deserialize;
use uuid::Uuid;

/// Request body for creating a posting. `pay` is free text on purpose: the
/// source system never validated currency or units.
#[derive(Debug, Deserialize)]
pub struct CreatePostingRequest {
    pub title: String,
    pub profession: String,
    pub specification: String,
    pub pay: String,
    pub owner_id: Uuid,
}
