//! Post categories.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CategoryId, Violations};

/// Message recorded when another category already uses the name.
pub const CATEGORY_NAME_TAKEN: &str = "Name has already been taken";

/// Editable fields of a category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFields {
    /// Unique display name.
    pub name: String,
    /// Optional free text.
    pub description: Option<String>,
}

impl CategoryFields {
    /// Name must be present. Uniqueness is checked by the service.
    #[must_use]
    pub fn violations(&self) -> Violations {
        let mut violations = Violations::new();
        violations.require_present("Name", &self.name);
        violations
    }
}

/// Permitted category fields submitted by a client.
///
/// `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryChanges {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement description.
    pub description: Option<Option<String>>,
}

impl CategoryChanges {
    /// Overlay the submitted fields onto `fields`.
    #[must_use]
    pub fn apply(self, mut fields: CategoryFields) -> CategoryFields {
        if let Some(name) = self.name {
            fields.name = name;
        }
        if let Some(description) = self.description {
            fields.description = description;
        }
        fields
    }
}

/// Stored category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Storage-assigned identifier.
    pub id: CategoryId,
    /// Editable fields.
    #[serde(flatten)]
    pub fields: CategoryFields,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}
