//! Contact details from the order form.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// Who placed the order and where it goes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactDetails {
    /// Customer name.
    pub name: String,
    /// Phone number, free-form.
    pub phone: String,
    /// Delivery address, free-form.
    pub address: String,
    /// Optional note for the kitchen or courier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

impl ContactDetails {
    /// Create contact details without comments.
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            address: address.into(),
            comments: None,
        }
    }

    /// Attach a comment; blank input clears it.
    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        let comments = comments.into();
        self.comments = if comments.trim().is_empty() {
            None
        } else {
            Some(comments)
        };
        self
    }

    /// The comment, if it has any non-blank content.
    pub fn comments(&self) -> Option<&str> {
        self.comments
            .as_deref()
            .filter(|c| !c.trim().is_empty())
    }

    /// Presence check of the required fields.
    ///
    /// Only checks that name, phone and address are not blank; their
    /// content is not validated.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let required = [
            ("name", &self.name),
            ("phone", &self.phone),
            ("address", &self.address),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(CommerceError::MissingField(field));
            }
        }
        Ok(())
    }

    /// Check if all required fields are filled in.
    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }
}
