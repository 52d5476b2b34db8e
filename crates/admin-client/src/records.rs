//! Wire records returned by the blog API and the forms that edit them.
//!
//! These mirror the JSON contract rather than the backend's domain types so
//! the client never links the server's storage stack.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account as returned by login, registration and `/me`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    /// Storage-assigned identifier.
    pub id: i64,
    /// Normalised email address.
    pub email: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// Stored blog post.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Post {
    /// Storage-assigned identifier.
    pub id: i64,
    /// Headline.
    pub title: String,
    /// Content.
    pub body: String,
    /// Optional category reference.
    pub category_id: Option<i64>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// Stored comment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Comment {
    /// Storage-assigned identifier.
    pub id: i64,
    /// Parent post.
    pub post_id: i64,
    /// Content.
    pub body: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// Comment with its parent post, as returned by `GET /api/comments`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommentWithPost {
    /// The comment itself.
    #[serde(flatten)]
    pub comment: Comment,
    /// Its parent post.
    pub post: Post,
}

/// Stored category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    /// Storage-assigned identifier.
    pub id: i64,
    /// Unique name.
    pub name: String,
    /// Optional free text.
    pub description: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// Editable post fields. `category_id: None` is sent as `null` and clears
/// the category on update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PostForm {
    /// Headline.
    pub title: String,
    /// Content; at least ten characters.
    pub body: String,
    /// Selected category, if any.
    pub category_id: Option<i64>,
}

/// Editable comment fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommentForm {
    /// Content.
    pub body: String,
}

/// Editable category fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryForm {
    /// Unique name.
    pub name: String,
    /// Optional free text; `None` clears it on update.
    pub description: Option<String>,
}

/// A record the admin UI can load into a form.
pub trait Editable {
    /// Form mirroring the record's editable fields.
    type Form: Clone + Default + PartialEq + Send + Sync;

    /// Storage identifier.
    fn id(&self) -> i64;

    /// Copy the editable fields into a fresh form.
    fn to_form(&self) -> Self::Form;
}

impl Editable for Post {
    type Form = PostForm;

    fn id(&self) -> i64 {
        self.id
    }

    fn to_form(&self) -> PostForm {
        PostForm {
            title: self.title.clone(),
            body: self.body.clone(),
            category_id: self.category_id,
        }
    }
}

impl Editable for Comment {
    type Form = CommentForm;

    fn id(&self) -> i64 {
        self.id
    }

    fn to_form(&self) -> CommentForm {
        CommentForm {
            body: self.body.clone(),
        }
    }
}

impl Editable for Category {
    type Form = CategoryForm;

    fn id(&self) -> i64 {
        self.id
    }

    fn to_form(&self) -> CategoryForm {
        CategoryForm {
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn decodes_comment_with_embedded_post() {
        let at = "2026-03-14T09:30:00Z";
        let value = json!({
            "id": 3,
            "post_id": 1,
            "body": "Nice",
            "created_at": at,
            "updated_at": at,
            "post": {
                "id": 1,
                "title": "Hello",
                "body": "A body of some length",
                "category_id": null,
                "created_at": at,
                "updated_at": at,
            },
        });

        let decoded: CommentWithPost = serde_json::from_value(value).expect("decode");
        assert_eq!(decoded.comment.id, 3);
        assert_eq!(decoded.post.title, "Hello");
        assert_eq!(decoded.post.category_id, None);
    }

    #[rstest]
    fn post_form_sends_null_category() {
        let form = PostForm {
            title: "T".to_owned(),
            body: "B".to_owned(),
            category_id: None,
        };
        assert_eq!(
            serde_json::to_value(&form).expect("encode"),
            json!({ "title": "T", "body": "B", "category_id": null })
        );
    }
}
