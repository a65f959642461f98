use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed set of application states. The source system stored free-form
/// strings; anything outside this set is now rejected at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

#[derive(Debug, Error)]
#[error("Unrecognized status: {0}")]
pub struct UnknownStatus(pub String);

impl ApplicationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    /// The privacy gate: the posting owner's contact details are disclosed
    /// to the applicant only once they are accepted.
    pub fn reveals_contact(self) -> bool {
        matches!(self, ApplicationStatus::Accepted)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ApplicationStatus::Pending),
            "accepted" => Ok(ApplicationStatus::Accepted),
            "rejected" => Ok(ApplicationStatus::Rejected),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_closed_set() {
        assert_eq!(
            "pending".parse::<ApplicationStatus>().unwrap(),
            ApplicationStatus::Pending
        );
        assert_eq!(
            "accepted".parse::<ApplicationStatus>().unwrap(),
            ApplicationStatus::Accepted
        );
        assert_eq!(
            "rejected".parse::<ApplicationStatus>().unwrap(),
            ApplicationStatus::Rejected
        );
    }

    #[test]
    fn rejects_anything_else() {
        assert!("approved".parse::<ApplicationStatus>().is_err());
        assert!("Pending".parse::<ApplicationStatus>().is_err());
        assert!("".parse::<ApplicationStatus>().is_err());
    }

    #[test]
    fn display_matches_stored_representation() {
        for s in [
            ApplicationStatus::Pending,
            ApplicationStatus::Accepted,
            ApplicationStatus::Rejected,
        ] {
            assert_eq!(s.to_string(), s.as_str());
            assert_eq!(s.as_str().parse::<ApplicationStatus>().unwrap(), s);
        }
    }

    #[test]
    fn only_accepted_reveals_contact() {
        assert!(!ApplicationStatus::Pending.reveals_contact());
        assert!(ApplicationStatus::Accepted.reveals_contact());
        assert!(!ApplicationStatus::Rejected.reveals_contact());
    }
}
