use derive_more::{AsRef, Display};

#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Name(String);

impl Name {
    pub fn new(name: &str) -> Result<Self, NameError> {
        let trimmed_name = name.trim();

        if trimmed_name.is_empty() {
            return Err(NameError::Empty);
        }

        let len = trimmed_name.len();

        if len > 64 {
            return Err(NameError::TooLong(len));
        }

        Ok(Name(trimmed_name.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum NameError {
    #[error("Name must not be empty")]
    Empty,
    #[error("Name must be 64 characters or fewer ({0} > 64)")]
    TooLong(usize),
}

#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn new(email: &str) -> Result<Self, EmailAddressError> {
        let trimmed_email = email.trim();

        if trimmed_email.is_empty() {
            return Err(EmailAddressError::Empty);
        }

        let Some((local, host)) = trimmed_email.split_once('@') else {
            return Err(EmailAddressError::MissingAtSign);
        };

        if local.is_empty() || host.is_empty() {
            return Err(EmailAddressError::MissingPart);
        }

        Ok(EmailAddress(trimmed_email.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum EmailAddressError {
    #[error("Email address must not be empty")]
    Empty,
    #[error("Email address must contain an @ sign")]
    MissingAtSign,
    #[error("Email address must have text before and after the @ sign")]
    MissingPart,
}
