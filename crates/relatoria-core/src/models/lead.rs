use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::CoreError;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

/// A beta sign-up, validated and trimmed. Duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewLead {
    pub name: String,
    pub email: String,
}

impl NewLead {
    pub fn parse(name: Option<&str>, email: Option<&str>) -> Result<Self, CoreError> {
        let name = name.map(str::trim).filter(|s| !s.is_empty());
        let email = email.map(str::trim).filter(|s| !s.is_empty());

        let (Some(name), Some(email)) = (name, email) else {
            return Err(CoreError::MissingField("name and email"));
        };

        if !is_valid_email(email) {
            return Err(CoreError::InvalidEmail);
        }

        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
        })
    }
}

/// `local@domain.tld` shape check: no whitespace, one `@`, a dot in the domain.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}
