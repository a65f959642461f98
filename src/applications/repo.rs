use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::applications::status::ApplicationStatus;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub id: Uuid,
    pub posting_id: Uuid,
    pub applicant_id: Uuid,
    pub status: String,
    pub created_at: OffsetDateTime,
}

/// One of the applicant's own applications, joined through its posting to the
/// posting owner. The owner columns come from a LEFT JOIN and stay null when
/// the owner record no longer resolves.
#[derive(Debug, Clone, FromRow)]
pub struct OwnApplicationRow {
    pub id: Uuid,
    pub status: String,
    pub posting_title: String,
    pub owner_email: Option<String>,
    pub owner_name: Option<String>,
    pub owner_surname: Option<String>,
}

/// One applicant against a posting, joined to their user record. Applicants
/// whose user record is gone never produce a row (inner join).
#[derive(Debug, Clone, FromRow)]
pub struct ApplicantRow {
    pub application_id: Uuid,
    pub name: String,
    pub surname: String,
    pub profession: Option<String>,
    pub email: String,
    pub photo: Option<String>,
    pub status: String,
}

impl Application {
    /// Conditional insert against the compound unique index on
    /// (posting_id, applicant_id). Returns None when the pair already
    /// applied, including when two applies race.
    pub async fn insert_pending(
        db: &PgPool,
        posting_id: Uuid,
        applicant_id: Uuid,
    ) -> anyhow::Result<Option<Application>> {
        let application = sqlx::query_as::<_, Application>(
            r#"
            INSERT INTO applications (posting_id, applicant_id, status)
            VALUES ($1, $2, 'pending')
            ON CONFLICT (posting_id, applicant_id) DO NOTHING
            RETURNING id, posting_id, applicant_id, status, created_at
            "#,
        )
        .bind(posting_id)
        .bind(applicant_id)
        .fetch_optional(db)
        .await?;
        Ok(application)
    }

    /// Overwrite the status. Returns false when the application is missing.
    pub async fn set_status(
        db: &PgPool,
        id: Uuid,
        status: ApplicationStatus,
    ) -> anyhow::Result<bool> {
        let updated: Option<Uuid> =
            sqlx::query_scalar("UPDATE applications SET status = $2 WHERE id = $1 RETURNING id")
                .bind(id)
                .bind(status.as_str())
                .fetch_optional(db)
                .await?;
        Ok(updated.is_some())
    }

    /// Everything the given user has applied to. Applications whose posting
    /// no longer exists drop out of the result.
    pub async fn list_for_applicant(
        db: &PgPool,
        applicant_id: Uuid,
    ) -> anyhow::Result<Vec<OwnApplicationRow>> {
        let rows = sqlx::query_as::<_, OwnApplicationRow>(
            r#"
            SELECT a.id, a.status,
                   p.title AS posting_title,
                   u.email AS owner_email,
                   u.name AS owner_name,
                   u.surname AS owner_surname
            FROM applications a
            JOIN postings p ON p.id = a.posting_id
            LEFT JOIN users u ON u.id = p.owner_id
            WHERE a.applicant_id = $1
            ORDER BY a.created_at ASC
            "#,
        )
        .bind(applicant_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Every applicant against the given posting, with their user details.
    pub async fn list_applicants_for_posting(
        db: &PgPool,
        posting_id: Uuid,
    ) -> anyhow::Result<Vec<ApplicantRow>> {
        let rows = sqlx::query_as::<_, ApplicantRow>(
            r#"
            SELECT a.id AS application_id,
                   u.name, u.surname, u.profession, u.email, u.photo,
                   a.status
            FROM applications a
            JOIN users u ON u.id = a.applicant_id
            WHERE a.posting_id = $1
            ORDER BY a.created_at ASC
            "#,
        )
        .bind(posting_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}
