use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Posting {
    pub id: Uuid,
    pub title: String,
    pub profession: String,
    pub specification: String,
    pub pay: String,
    pub owner_id: Uuid,
    /// Snapshot of the owner's photo at creation time. Not refreshed when the
    /// owner later changes their photo, and empty when the owner id never
    /// resolved.
    pub owner_photo: Option<String>,
    pub created_at: OffsetDateTime,
}

const POSTING_COLUMNS: &str =
    "id, title, profession, specification, pay, owner_id, owner_photo, created_at";

impl Posting {
    /// Insert a posting, snapshotting the owner's current photo. An owner id
    /// that resolves to nothing leaves the snapshot null and the insert still
    /// goes through.
    pub async fn create(
        db: &PgPool,
        title: &str,
        profession: &str,
        specification: &str,
        pay: &str,
        owner_id: Uuid,
    ) -> anyhow::Result<Posting> {
        let owner_photo: Option<String> =
            sqlx::query_scalar("SELECT photo FROM users WHERE id = $1")
                .bind(owner_id)
                .fetch_optional(db)
                .await?
                .flatten();

        let posting = sqlx::query_as::<_, Posting>(&format!(
            r#"
            INSERT INTO postings (title, profession, specification, pay, owner_id, owner_photo)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {POSTING_COLUMNS}
            "#
        ))
        .bind(title)
        .bind(profession)
        .bind(specification)
        .bind(pay)
        .bind(owner_id)
        .bind(owner_photo)
        .fetch_one(db)
        .await?;
        Ok(posting)
    }

    pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Posting>> {
        let rows = sqlx::query_as::<_, Posting>(&format!(
            "SELECT {POSTING_COLUMNS} FROM postings ORDER BY created_at ASC"
        ))
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Posting>> {
        let posting = sqlx::query_as::<_, Posting>(&format!(
            "SELECT {POSTING_COLUMNS} FROM postings WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(posting)
    }

    pub async fn list_by_owner(db: &PgPool, owner_id: Uuid) -> anyhow::Result<Vec<Posting>> {
        let rows = sqlx::query_as::<_, Posting>(&format!(
            "SELECT {POSTING_COLUMNS} FROM postings WHERE owner_id = $1 ORDER BY created_at ASC"
        ))
        .bind(owner_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}
