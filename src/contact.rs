//! Contact form state. A valid message is handed to the visitor's mail
//! client through a `mailto:` link; nothing is sent from the page itself.

use thiserror::Error;
use url::form_urlencoded::byte_serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Message,
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ContactIssue {
    #[error("Please enter your name.")]
    MissingName,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Please write a message.")]
    MissingMessage,
}

impl ContactIssue {
    pub fn field(self) -> ContactField {
        match self {
            Self::MissingName => ContactField::Name,
            Self::InvalidEmail => ContactField::Email,
            Self::MissingMessage => ContactField::Message,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactDraft {
    pub fn set(&mut self, field: ContactField, value: String) {
        match field {
            ContactField::Name => self.name = value,
            ContactField::Email => self.email = value,
            ContactField::Message => self.message = value,
        }
    }

    pub fn validate(&self) -> Result<(), Vec<ContactIssue>> {
        let mut issues = Vec::new();

        if self.name.trim().is_empty() {
            issues.push(ContactIssue::MissingName);
        }
        if !looks_like_email(self.email.trim()) {
            issues.push(ContactIssue::InvalidEmail);
        }
        if self.message.trim().is_empty() {
            issues.push(ContactIssue::MissingMessage);
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }

    pub fn mailto_href(&self, recipient: &str) -> Result<String, Vec<ContactIssue>> {
        self.validate()?;

        let subject = format!("Portfolio contact from {}", self.name.trim());
        let body = format!(
            "{}\n\n{} <{}>",
            self.message.trim(),
            self.name.trim(),
            self.email.trim()
        );

        Ok(format!(
            "mailto:{recipient}?subject={}&body={}",
            encode_component(&subject),
            encode_component(&body)
        ))
    }
}

// Mail clients do not decode `+` as a space, so spaces go out as `%20`.
// A literal `+` is already `%2B` at this point.
fn encode_component(value: &str) -> String {
    byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}
