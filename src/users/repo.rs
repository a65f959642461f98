use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::users::dto::ProfileFields;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub surname: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub occupation: Option<String>,
    pub profession: Option<String>,
    pub skills: Option<String>,
    pub address: Option<String>,
    pub bio: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub photo: Option<String>,
    pub created_at: OffsetDateTime,
}

const USER_COLUMNS: &str = "id, name, surname, email, password_hash, occupation, profession, \
                            skills, address, bio, latitude, longitude, photo, created_at";

impl User {
    /// Snapshot of the mutable profile fields, used as the base for PATCH merges.
    pub fn profile(&self) -> ProfileFields {
        ProfileFields {
            occupation: self.occupation.clone(),
            profession: self.profession.clone(),
            skills: self.skills.clone(),
            address: self.address.clone(),
            bio: self.bio.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            photo: self.photo.clone(),
        }
    }

    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a new user with hashed password. Profile fields start empty.
    pub async fn create(
        db: &PgPool,
        name: &str,
        surname: &str,
        email: &str,
        password_hash: &str,
    ) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (name, surname, email, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(name)
        .bind(surname)
        .bind(email)
        .bind(password_hash)
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    /// Hard delete. Postings and applications referencing the user are left
    /// in place; dangling ids are handled at read time.
    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Overwrite every profile column with the given values. PUT passes the
    /// request body straight through; PATCH merges into the stored profile
    /// first. Returns None when the user does not exist.
    pub async fn write_profile(
        db: &PgPool,
        id: Uuid,
        fields: &ProfileFields,
    ) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET occupation = $2, profession = $3, skills = $4, address = $5,
                bio = $6, latitude = $7, longitude = $8, photo = $9
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&fields.occupation)
        .bind(&fields.profession)
        .bind(&fields.skills)
        .bind(&fields.address)
        .bind(&fields.bio)
        .bind(fields.latitude)
        .bind(fields.longitude)
        .bind(&fields.photo)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Ana".into(),
            surname: "Lopez".into(),
            email: "ana@example.com".into(),
            password_hash: "$argon2id$v=19$secret".into(),
            occupation: Some("freelancer".into()),
            profession: Some("plumber".into()),
            skills: None,
            address: None,
            bio: None,
            latitude: Some(-33.45),
            longitude: Some(-70.66),
            photo: Some("photos/ana.jpg".into()),
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn password_hash_never_serialized() {
        let json = serde_json::to_string(&sample_user()).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("argon2"));
        assert!(json.contains("ana@example.com"));
    }

    #[test]
    fn profile_snapshot_carries_all_mutable_fields() {
        let user = sample_user();
        let profile = user.profile();
        assert_eq!(profile.occupation.as_deref(), Some("freelancer"));
        assert_eq!(profile.profession.as_deref(), Some("plumber"));
        assert_eq!(profile.latitude, Some(-33.45));
        assert_eq!(profile.photo.as_deref(), Some("photos/ana.jpg"));
        assert!(profile.skills.is_none());
    }
}
