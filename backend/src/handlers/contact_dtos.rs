use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

pub const MAX_EMAIL_LEN: usize = 254;
pub const MAX_NAME_LEN: usize = 100;
pub const MAX_COMPANY_LEN: usize = 100;
pub const MIN_MESSAGE_LEN: usize = 10;
pub const MAX_MESSAGE_LEN: usize = 5000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Name must be between 1 and 100 characters")]
    NameLength,
    #[error("Company must be at most 100 characters")]
    CompanyLength,
    #[error("Message must be between 10 and 5000 characters")]
    MessageLength,
}

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub company: Option<String>,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct NewsletterRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub success: bool,
    pub id: Uuid,
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.len() > MAX_EMAIL_LEN || !EMAIL_RE.is_match(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

impl ContactRequest {
    /// Trims every field and drops an empty company.
    pub fn normalized(self) -> Self {
        ContactRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            company: self
                .company
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            message: self.message.trim().to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let name_len = self.name.trim().chars().count();
        if name_len == 0 || name_len > MAX_NAME_LEN {
            return Err(ValidationError::NameLength);
        }
        validate_email(&self.email)?;
        if let Some(company) = &self.company {
            if company.trim().chars().count() > MAX_COMPANY_LEN {
                return Err(ValidationError::CompanyLength);
            }
        }
        let message_len = self.message.trim().chars().count();
        if !(MIN_MESSAGE_LEN..=MAX_MESSAGE_LEN).contains(&message_len) {
            return Err(ValidationError::MessageLength);
        }
        Ok(())
    }
}

impl NewsletterRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_email(&self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str, message: &str) -> ContactRequest {
        ContactRequest {
            name: name.to_string(),
            email: email.to_string(),
            company: None,
            message: message.to_string(),
        }
    }

    #[test]
    fn accepts_a_normal_enquiry() {
        assert_eq!(
            request("Grace", "grace@navy.mil", "Can you build us a website?").validate(),
            Ok(())
        );
    }

    #[test]
    fn rejects_bad_emails() {
        for email in ["", "grace", "grace@", "grace@navy", "gr ace@navy.mil"] {
            assert_eq!(
                request("Grace", email, "Can you build us a website?").validate(),
                Err(ValidationError::InvalidEmail),
                "{email}"
            );
        }
        let long = format!("{}@example.com", "a".repeat(250));
        assert_eq!(validate_email(&long), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn message_length_boundaries() {
        assert_eq!(
            request("Grace", "grace@navy.mil", &"x".repeat(9)).validate(),
            Err(ValidationError::MessageLength)
        );
        assert_eq!(request("Grace", "grace@navy.mil", &"x".repeat(10)).validate(), Ok(()));
        assert_eq!(request("Grace", "grace@navy.mil", &"x".repeat(5000)).validate(), Ok(()));
        assert_eq!(
            request("Grace", "grace@navy.mil", &"x".repeat(5001)).validate(),
            Err(ValidationError::MessageLength)
        );
    }

    #[test]
    fn name_and_company_limits() {
        assert_eq!(
            request("   ", "grace@navy.mil", "Can you build us a website?").validate(),
            Err(ValidationError::NameLength)
        );
        let mut req = request("Grace", "grace@navy.mil", "Can you build us a website?");
        req.company = Some("c".repeat(101));
        assert_eq!(req.validate(), Err(ValidationError::CompanyLength));
    }

    #[test]
    fn normalized_drops_blank_company() {
        let mut req = request("  Grace ", " grace@navy.mil ", "  Can you build us a website?  ");
        req.company = Some("   ".to_string());
        let req = req.normalized();
        assert_eq!(req.name, "Grace");
        assert_eq!(req.email, "grace@navy.mil");
        assert_eq!(req.company, None);
        assert_eq!(req.message, "Can you build us a website?");
    }
}
