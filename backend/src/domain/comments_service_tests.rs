//! Tests for the comment service.

use std::sync::Arc;

use rstest::rstest;

use super::*;
use crate::domain::ports::{MockCommentRepository, MockPostRepository};
use crate::domain::{ErrorCode, Post, PostFields};
use crate::test_support::{fixture_clock, fixture_timestamp};

fn post(id: i64) -> Post {
    Post {
        id: PostId::new(id),
        fields: PostFields {
            title: "Parent".to_owned(),
            body: "Parent body text".to_owned(),
            category_id: None,
        },
        created_at: fixture_timestamp(),
        updated_at: fixture_timestamp(),
    }
}

fn comment(id: i64, post_id: i64, body: &str) -> Comment {
    Comment {
        id: CommentId::new(id),
        post_id: PostId::new(post_id),
        fields: CommentFields {
            body: body.to_owned(),
        },
        created_at: fixture_timestamp(),
        updated_at: fixture_timestamp(),
    }
}

fn posts_with(id: i64) -> MockPostRepository {
    let mut posts = MockPostRepository::new();
    posts
        .expect_find_by_id()
        .returning(move |requested| Ok((requested == PostId::new(id)).then(|| post(id))));
    posts
}

fn service(
    comments: MockCommentRepository,
    posts: MockPostRepository,
) -> CommentsService<MockCommentRepository, MockPostRepository> {
    CommentsService::new(Arc::new(comments), Arc::new(posts), fixture_clock())
}

#[rstest]
#[tokio::test]
async fn create_under_unknown_post_is_not_found() {
    let mut comments = MockCommentRepository::new();
    comments.expect_insert().times(0);

    let error = service(comments, posts_with(1))
        .create_comment(
            PostId::new(2),
            CommentChanges {
                body: Some("Nice".to_owned()),
            },
        )
        .await
        .expect_err("unknown post");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "Couldn't find Post with 'id'=2");
}

#[rstest]
#[tokio::test]
async fn create_rejects_blank_body() {
    let mut comments = MockCommentRepository::new();
    comments.expect_insert().times(0);

    let error = service(comments, posts_with(1))
        .create_comment(PostId::new(1), CommentChanges { body: Some(" ".to_owned()) })
        .await
        .expect_err("blank body");

    assert_eq!(error.errors(), ["Body can't be blank"]);
}

#[rstest]
#[tokio::test]
async fn create_stores_comment_under_post() {
    let mut comments = MockCommentRepository::new();
    comments
        .expect_insert()
        .withf(|post_id, fields, _| *post_id == PostId::new(1) && fields.body == "Nice")
        .return_once(|post_id, fields, _| Ok(comment(10, post_id.get(), &fields.body)));

    let created = service(comments, posts_with(1))
        .create_comment(
            PostId::new(1),
            CommentChanges {
                body: Some("Nice".to_owned()),
            },
        )
        .await
        .expect("comment created");

    assert_eq!(created.post_id, PostId::new(1));
}

#[rstest]
#[tokio::test]
async fn comment_of_another_post_is_not_found() {
    let mut comments = MockCommentRepository::new();
    comments.expect_find_for_post().return_once(|_, _| Ok(None));

    let error = service(comments, posts_with(1))
        .get_comment(PostId::new(1), CommentId::new(77))
        .await
        .expect_err("comment belongs elsewhere");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "Couldn't find Comment with 'id'=77");
}

#[rstest]
#[tokio::test]
async fn update_keeps_body_when_absent() {
    let mut comments = MockCommentRepository::new();
    comments
        .expect_find_for_post()
        .return_once(|post_id, id| Ok(Some(comment(id.get(), post_id.get(), "Original"))));
    comments
        .expect_update()
        .withf(|_, _, fields, _| fields.body == "Original")
        .return_once(|post_id, id, fields, _| {
            Ok(Some(comment(id.get(), post_id.get(), &fields.body)))
        });

    let updated = service(comments, posts_with(3))
        .update_comment(PostId::new(3), CommentId::new(4), CommentChanges::default())
        .await
        .expect("comment updated");

    assert_eq!(updated.fields.body, "Original");
}

#[rstest]
#[tokio::test]
async fn delete_of_missing_comment_is_not_found() {
    let mut comments = MockCommentRepository::new();
    comments.expect_delete().return_once(|_, _| Ok(false));

    let error = service(comments, posts_with(1))
        .delete_comment(PostId::new(1), CommentId::new(5))
        .await
        .expect_err("nothing deleted");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn listing_for_deleted_post_is_empty() {
    let mut comments = MockCommentRepository::new();
    comments
        .expect_list_for_post()
        .withf(|post_id| *post_id == PostId::new(9))
        .return_once(|_| Ok(Vec::new()));
    let mut posts = MockPostRepository::new();
    posts.expect_find_by_id().times(0);

    let listed = service(comments, posts)
        .list_comments(PostId::new(9))
        .await
        .expect("listing succeeds");

    assert!(listed.is_empty());
}

#[rstest]
#[tokio::test]
async fn global_listing_includes_parent_posts() {
    let mut comments = MockCommentRepository::new();
    comments.expect_list_with_posts().return_once(|| {
        Ok(vec![CommentWithPost {
            comment: comment(1, 2, "First"),
            post: post(2),
        }])
    });

    let listed = service(comments, MockPostRepository::new())
        .list_all_comments()
        .await
        .expect("comments listed");

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].post.id, PostId::new(2));
}
