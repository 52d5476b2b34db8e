//! Comments attached to posts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CommentId, Post, PostId, Violations};

/// Editable fields of a comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentFields {
    /// Comment text.
    pub body: String,
}

impl CommentFields {
    /// Body must be present.
    #[must_use]
    pub fn violations(&self) -> Violations {
        let mut violations = Violations::new();
        violations.require_present("Body", &self.body);
        violations
    }
}

/// Permitted comment fields submitted by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentChanges {
    /// Replacement body.
    pub body: Option<String>,
}

impl CommentChanges {
    /// Overlay the submitted fields onto `fields`.
    #[must_use]
    pub fn apply(self, mut fields: CommentFields) -> CommentFields {
        if let Some(body) = self.body {
            fields.body = body;
        }
        fields
    }
}

/// Stored comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Storage-assigned identifier.
    pub id: CommentId,
    /// Parent post.
    pub post_id: PostId,
    /// Editable fields.
    #[serde(flatten)]
    pub fields: CommentFields,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// Comment together with its parent post, as returned by the global listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentWithPost {
    /// The comment itself.
    #[serde(flatten)]
    pub comment: Comment,
    /// Parent post.
    pub post: Post,
}
