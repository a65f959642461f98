use serde::{Deserialize, Deserializer};

/// Request body for registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// PUT body: full-replace semantics. A field omitted from the request
/// deserializes to None and nulls out the stored value.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileFields {
    pub occupation: Option<String>,
    pub profession: Option<String>,
    pub skills: Option<String>,
    pub address: Option<String>,
    pub bio: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub photo: Option<String>,
}

/// PATCH body: partial-update semantics. The outer Option tracks whether the
/// field appeared in the JSON at all, so `"skills": null` clears the field
/// while leaving `skills` out retains the stored value.
#[derive(Debug, Default, Deserialize)]
pub struct ProfilePatch {
    #[serde(default, deserialize_with = "double_option")]
    pub occupation: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub profession: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub skills: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub bio: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub latitude: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub longitude: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub photo: Option<Option<String>>,
}

fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

impl ProfilePatch {
    /// Merge this patch over the stored profile: present fields (including
    /// explicit nulls) win, absent fields keep their stored value.
    pub fn merge_into(self, current: ProfileFields) -> ProfileFields {
        ProfileFields {
            occupation: self.occupation.unwrap_or(current.occupation),
            profession: self.profession.unwrap_or(current.profession),
            skills: self.skills.unwrap_or(current.skills),
            address: self.address.unwrap_or(current.address),
            bio: self.bio.unwrap_or(current.bio),
            latitude: self.latitude.unwrap_or(current.latitude),
            longitude: self.longitude.unwrap_or(current.longitude),
            photo: self.photo.unwrap_or(current.photo),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored_profile() -> ProfileFields {
        ProfileFields {
            occupation: Some("freelancer".into()),
            profession: Some("electrician".into()),
            skills: Some("wiring, soldering".into()),
            address: Some("12 Main St".into()),
            bio: None,
            latitude: Some(-33.45),
            longitude: Some(-70.66),
            photo: Some("photos/me.jpg".into()),
        }
    }

    #[test]
    fn patch_distinguishes_absent_from_null() {
        let patch: ProfilePatch =
            serde_json::from_str(r#"{"profession": "chef", "skills": null}"#).unwrap();
        assert_eq!(patch.profession, Some(Some("chef".into())));
        assert_eq!(patch.skills, Some(None));
        assert_eq!(patch.occupation, None);
    }

    #[test]
    fn patch_retains_absent_fields_and_clears_explicit_nulls() {
        let patch: ProfilePatch =
            serde_json::from_str(r#"{"profession": "chef", "skills": null}"#).unwrap();
        let merged = patch.merge_into(stored_profile());
        assert_eq!(merged.profession.as_deref(), Some("chef"));
        assert_eq!(merged.skills, None);
        // Everything absent from the patch survives.
        assert_eq!(merged.occupation.as_deref(), Some("freelancer"));
        assert_eq!(merged.latitude, Some(-33.45));
        assert_eq!(merged.longitude, Some(-70.66));
        assert_eq!(merged.photo.as_deref(), Some("photos/me.jpg"));
    }

    #[test]
    fn replace_nulls_every_omitted_field() {
        let fields: ProfileFields = serde_json::from_str(r#"{"profession": "chef"}"#).unwrap();
        assert_eq!(fields.profession.as_deref(), Some("chef"));
        assert!(fields.occupation.is_none());
        assert!(fields.skills.is_none());
        assert!(fields.latitude.is_none());
        assert!(fields.photo.is_none());
    }

    #[test]
    fn empty_patch_is_a_no_op() {
        let patch: ProfilePatch = serde_json::from_str("{}").unwrap();
        let merged = patch.merge_into(stored_profile());
        assert_eq!(merged.skills.as_deref(), Some("wiring, soldering"));
        assert_eq!(merged.address.as_deref(), Some("12 Main St"));
    }
}
