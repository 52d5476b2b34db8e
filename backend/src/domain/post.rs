//! Blog posts.
//!
//! A post has a required title, a body of at least
//! [`POST_BODY_MIN_CHARS`] characters and an optional category. The category
//! reference is checked by the posts service because it needs storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CategoryId, PostId, Violations};

/// Minimum body length, counted in characters.
pub const POST_BODY_MIN_CHARS: usize = 10;

/// Message recorded when `category_id` does not resolve.
pub const CATEGORY_MUST_EXIST: &str = "Category must exist";

/// Editable fields of a post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostFields {
    /// Headline.
    pub title: String,
    /// Article text.
    pub body: String,
    /// Optional category reference.
    pub category_id: Option<CategoryId>,
}

impl PostFields {
    /// Check the rules that need no storage lookup.
    ///
    /// A blank body reports only the blank message.
    #[must_use]
    pub fn violations(&self) -> Violations {
        let mut violations = Violations::new();
        violations.require_present("Title", &self.title);
        if violations.require_present("Body", &self.body) {
            violations.require_min_chars("Body", &self.body, POST_BODY_MIN_CHARS);
        }
        violations
    }
}

/// Permitted post fields submitted by a client.
///
/// `None` leaves a field unchanged. For `category_id`, `Some(None)` clears
/// the category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement body.
    pub body: Option<String>,
    /// Replacement category reference.
    pub category_id: Option<Option<CategoryId>>,
}

impl PostChanges {
    /// Overlay the submitted fields onto `fields`.
    #[must_use]
    pub fn apply(self, mut fields: PostFields) -> PostFields {
        if let Some(title) = self.title {
            fields.title = title;
        }
        if let Some(body) = self.body {
            fields.body = body;
        }
        if let Some(category_id) = self.category_id {
            fields.category_id = category_id;
        }
        fields
    }
}

/// Stored post.
///
/// Serialises flat: `{id, title, body, category_id, created_at, updated_at}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Storage-assigned identifier.
    pub id: PostId,
    /// Editable fields.
    #[serde(flatten)]
    pub fields: PostFields,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}
