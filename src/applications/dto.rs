use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::applications::{
    repo::{ApplicantRow, OwnApplicationRow},
    status::ApplicationStatus,
};

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub posting_id: Uuid,
    pub applicant_id: Uuid,
}

/// Body for PUT /applications/:id/status. Kept as a plain string so an
/// unrecognized value surfaces as our own 400 instead of a deserializer
/// rejection.
#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// What an applicant sees about their own application. The contact fields
/// are the privacy gate: populated only once the owner accepted, and only
/// when the owner record still resolves.
#[derive(Debug, Serialize)]
pub struct ApplicationSummary {
    pub id: Uuid,
    pub posting_title: String,
    pub status: String,
    pub contact_email: Option<String>,
    pub contact_name: Option<String>,
}

impl From<OwnApplicationRow> for ApplicationSummary {
    fn from(row: OwnApplicationRow) -> Self {
        let accepted = row
            .status
            .parse::<ApplicationStatus>()
            .map(ApplicationStatus::reveals_contact)
            .unwrap_or(false);

        let (contact_email, contact_name) = match (&row.owner_name, &row.owner_surname) {
            (Some(name), Some(surname)) if accepted => (
                row.owner_email.clone(),
                Some(format!("{} {}", name, surname)),
            ),
            _ => (None, None),
        };

        Self {
            id: row.id,
            posting_title: row.posting_title,
            status: row.status,
            contact_email,
            contact_name,
        }
    }
}

/// What a posting owner sees about one applicant.
#[derive(Debug, Serialize)]
pub struct ApplicantEntry {
    pub application_id: Uuid,
    pub name: String,
    pub profession: Option<String>,
    pub email: String,
    pub photo: Option<String>,
    pub status: String,
}

impl From<ApplicantRow> for ApplicantEntry {
    fn from(row: ApplicantRow) -> Self {
        Self {
            application_id: row.application_id,
            name: format!("{} {}", row.name, row.surname),
            profession: row.profession,
            email: row.email,
            photo: row.photo,
            status: row.status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PostingApplicants {
    pub posting_id: Uuid,
    pub title: String,
    pub applicants: Vec<ApplicantEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: &str, owner: bool) -> OwnApplicationRow {
        OwnApplicationRow {
            id: Uuid::new_v4(),
            status: status.into(),
            posting_title: "Plumber needed".into(),
            owner_email: owner.then(|| "owner@example.com".to_string()),
            owner_name: owner.then(|| "Ana".to_string()),
            owner_surname: owner.then(|| "Lopez".to_string()),
        }
    }

    #[test]
    fn pending_application_hides_contact() {
        let summary = ApplicationSummary::from(row("pending", true));
        assert_eq!(summary.status, "pending");
        assert!(summary.contact_email.is_none());
        assert!(summary.contact_name.is_none());
    }

    #[test]
    fn rejected_application_hides_contact() {
        let summary = ApplicationSummary::from(row("rejected", true));
        assert!(summary.contact_email.is_none());
        assert!(summary.contact_name.is_none());
    }

    #[test]
    fn accepted_application_reveals_owner_contact() {
        let summary = ApplicationSummary::from(row("accepted", true));
        assert_eq!(summary.contact_email.as_deref(), Some("owner@example.com"));
        assert_eq!(summary.contact_name.as_deref(), Some("Ana Lopez"));
    }

    #[test]
    fn accepted_with_dangling_owner_stays_null() {
        let summary = ApplicationSummary::from(row("accepted", false));
        assert!(summary.contact_email.is_none());
        assert!(summary.contact_name.is_none());
    }

    #[test]
    fn null_contacts_serialize_as_json_null() {
        let json = serde_json::to_value(ApplicationSummary::from(row("pending", true))).unwrap();
        assert_eq!(json["contact_email"], serde_json::Value::Null);
        assert_eq!(json["contact_name"], serde_json::Value::Null);
        assert_eq!(json["posting_title"], "Plumber needed");
    }

    #[test]
    fn applicant_entry_renders_full_name() {
        let entry = ApplicantEntry::from(ApplicantRow {
            application_id: Uuid::new_v4(),
            name: "Bruno".into(),
            surname: "Diaz".into(),
            profession: Some("electrician".into()),
            email: "bruno@example.com".into(),
            photo: None,
            status: "pending".into(),
        });
        assert_eq!(entry.name, "Bruno Diaz");
        assert_eq!(entry.email, "bruno@example.com");
        assert!(entry.photo.is_none());
    }
}
