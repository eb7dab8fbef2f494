//! Client-side checks mirroring the server's intake rules, so most mistakes
//! are caught before a request is made.

use serde::Serialize;

pub const MAX_EMAIL_LEN: usize = 254;
pub const MAX_NAME_LEN: usize = 100;
pub const MAX_COMPANY_LEN: usize = 100;
pub const MIN_MESSAGE_LEN: usize = 10;
pub const MAX_MESSAGE_LEN: usize = 5000;

/// `local@domain.tld` with no whitespace and a single `@`.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.len() > MAX_EMAIL_LEN || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub message: String,
}

impl ContactForm {
    /// Trimmed copy with an empty company dropped, as sent to the server.
    pub fn normalized(&self) -> Self {
        ContactForm {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            company: self
                .company
                .as_ref()
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            message: self.message.trim().to_string(),
        }
    }
}

/// First problem with the form, worded the way the server words it.
pub fn validate_contact(form: &ContactForm) -> Result<(), &'static str> {
    let name_len = form.name.trim().chars().count();
    if name_len == 0 || name_len > MAX_NAME_LEN {
        return Err("Name must be between 1 and 100 characters");
    }
    if !is_valid_email(&form.email) {
        return Err("Please enter a valid email address");
    }
    if let Some(company) = &form.company {
        if company.trim().chars().count() > MAX_COMPANY_LEN {
            return Err("Company must be at most 100 characters");
        }
    }
    let message_len = form.message.trim().chars().count();
    if !(MIN_MESSAGE_LEN..=MAX_MESSAGE_LEN).contains(&message_len) {
        return Err("Message must be between 10 and 5000 characters");
    }
    Ok(())
}
