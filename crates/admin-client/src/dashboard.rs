//! Dashboard counters derived from fetched collections.

use serde::Serialize;

use crate::records::{Category, CommentWithPost, Post};

/// Totals shown on the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    /// Number of posts.
    pub posts: usize,
    /// Number of comments across all posts.
    pub comments: usize,
    /// Number of categories.
    pub categories: usize,
    /// Posts without a category.
    pub uncategorised_posts: usize,
}

impl DashboardSummary {
    /// Count the given collections.
    ///
    /// # Examples
    /// ```
    /// use admin_client::DashboardSummary;
    ///
    /// let summary = DashboardSummary::from_collections(&[], &[], &[]);
    /// assert_eq!(summary, DashboardSummary::default());
    /// ```
    #[must_use]
    pub fn from_collections(
        posts: &[Post],
        comments: &[CommentWithPost],
        categories: &[Category],
    ) -> Self {
        Self {
            posts: posts.len(),
            comments: comments.len(),
            categories: categories.len(),
            uncategorised_posts: posts.iter().filter(|post| post.category_id.is_none()).count(),
        }
    }
}
