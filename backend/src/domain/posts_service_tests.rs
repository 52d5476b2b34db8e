//! Tests for the post service.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    CategoryRepositoryError, MockCategoryRepository, MockPostRepository,
};
use crate::domain::{Category, CategoryFields, CategoryId, ErrorCode};
use crate::test_support::{fixture_clock, fixture_timestamp};

fn stored_post(id: i64, fields: PostFields) -> Post {
    Post {
        id: PostId::new(id),
        fields,
        created_at: fixture_timestamp(),
        updated_at: fixture_timestamp(),
    }
}

fn valid_fields() -> PostFields {
    PostFields {
        title: "Hello".to_owned(),
        body: "A body long enough".to_owned(),
        category_id: None,
    }
}

fn category(id: i64) -> Category {
    Category {
        id: CategoryId::new(id),
        fields: CategoryFields {
            name: "Rust".to_owned(),
            description: None,
        },
        created_at: fixture_timestamp(),
        updated_at: fixture_timestamp(),
    }
}

#[fixture]
fn categories() -> MockCategoryRepository {
    MockCategoryRepository::new()
}

fn service(
    posts: MockPostRepository,
    categories: MockCategoryRepository,
) -> PostsService<MockPostRepository, MockCategoryRepository> {
    PostsService::new(Arc::new(posts), Arc::new(categories), fixture_clock())
}

#[rstest]
#[tokio::test]
async fn create_persists_permitted_fields(categories: MockCategoryRepository) {
    let mut posts = MockPostRepository::new();
    posts
        .expect_insert()
        .withf(|fields, at| *fields == valid_fields() && *at == fixture_timestamp())
        .times(1)
        .return_once(|fields, _| Ok(stored_post(1, fields.clone())));

    let post = service(posts, categories)
        .create_post(PostChanges {
            title: Some("Hello".to_owned()),
            body: Some("A body long enough".to_owned()),
            category_id: None,
        })
        .await
        .expect("post created");

    assert_eq!(post.id, PostId::new(1));
    assert_eq!(post.fields.title, "Hello");
}

#[rstest]
#[tokio::test]
async fn create_reports_all_violations_without_writing(categories: MockCategoryRepository) {
    let mut posts = MockPostRepository::new();
    posts.expect_insert().times(0);

    let error = service(posts, categories)
        .create_post(PostChanges::default())
        .await
        .expect_err("blank post rejected");

    assert_eq!(error.code(), ErrorCode::ValidationFailed);
    assert_eq!(error.errors(), ["Title can't be blank", "Body can't be blank"]);
}

#[rstest]
#[tokio::test]
async fn unknown_category_is_a_validation_failure() {
    let mut categories = MockCategoryRepository::new();
    categories
        .expect_find_by_id()
        .return_once(|_| Ok(None));
    let mut posts = MockPostRepository::new();
    posts.expect_insert().times(0);

    let error = service(posts, categories)
        .create_post(PostChanges {
            title: Some("Hello".to_owned()),
            body: Some("short".to_owned()),
            category_id: Some(Some(CategoryId::new(99))),
        })
        .await
        .expect_err("missing category rejected");

    assert_eq!(
        error.errors(),
        [
            "Body is too short (minimum is 10 characters)",
            "Category must exist"
        ]
    );
}

#[rstest]
#[tokio::test]
async fn existing_category_is_accepted() {
    let mut categories = MockCategoryRepository::new();
    categories
        .expect_find_by_id()
        .withf(|id| *id == CategoryId::new(4))
        .return_once(|_| Ok(Some(category(4))));
    let mut posts = MockPostRepository::new();
    posts
        .expect_insert()
        .return_once(|fields, _| Ok(stored_post(2, fields.clone())));

    let post = service(posts, categories)
        .create_post(PostChanges {
            title: Some("Hello".to_owned()),
            body: Some("A body long enough".to_owned()),
            category_id: Some(Some(CategoryId::new(4))),
        })
        .await
        .expect("post created");

    assert_eq!(post.fields.category_id, Some(CategoryId::new(4)));
}

#[rstest]
#[tokio::test]
async fn update_merges_changes_over_stored_fields(categories: MockCategoryRepository) {
    let mut posts = MockPostRepository::new();
    posts
        .expect_find_by_id()
        .return_once(|_| Ok(Some(stored_post(5, valid_fields()))));
    posts
        .expect_update()
        .withf(|id, fields, _| {
            *id == PostId::new(5) && fields.title == "Renamed" && fields.body == "A body long enough"
        })
        .return_once(|id, fields, _| Ok(Some(stored_post(id.get(), fields.clone()))));

    let post = service(posts, categories)
        .update_post(
            PostId::new(5),
            PostChanges {
                title: Some("Renamed".to_owned()),
                ..PostChanges::default()
            },
        )
        .await
        .expect("post updated");

    assert_eq!(post.fields.title, "Renamed");
}

#[rstest]
#[tokio::test]
async fn update_of_missing_post_is_not_found(categories: MockCategoryRepository) {
    let mut posts = MockPostRepository::new();
    posts.expect_find_by_id().return_once(|_| Ok(None));
    posts.expect_update().times(0);

    let error = service(posts, categories)
        .update_post(PostId::new(8), PostChanges::default())
        .await
        .expect_err("missing post");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "Couldn't find Post with 'id'=8");
}

#[rstest]
#[case(true, None)]
#[case(false, Some(ErrorCode::NotFound))]
#[tokio::test]
async fn delete_reports_missing_posts(
    categories: MockCategoryRepository,
    #[case] deleted: bool,
    #[case] expected: Option<ErrorCode>,
) {
    let mut posts = MockPostRepository::new();
    posts.expect_delete().return_once(move |_| Ok(deleted));

    let result = service(posts, categories).delete_post(PostId::new(1)).await;

    assert_eq!(result.err().map(|err| err.code()), expected);
}

#[rstest]
#[case::create(None)]
#[case::update(Some(PostId::new(1)))]
#[tokio::test]
async fn category_deleted_before_the_write_is_a_validation_failure(#[case] target: Option<PostId>) {
    let mut categories = MockCategoryRepository::new();
    categories
        .expect_find_by_id()
        .return_once(|_| Ok(Some(category(4))));
    let mut posts = MockPostRepository::new();
    posts
        .expect_find_by_id()
        .return_once(|id| Ok(Some(stored_post(id.get(), valid_fields()))));
    posts
        .expect_insert()
        .return_once(|_, _| Err(PostRepositoryError::missing_category()));
    posts
        .expect_update()
        .return_once(|_, _, _| Err(PostRepositoryError::missing_category()));
    let service = service(posts, categories);
    let changes = PostChanges {
        category_id: Some(Some(CategoryId::new(4))),
        ..PostChanges::default()
    };

    let error = match target {
        Some(id) => service.update_post(id, changes).await,
        None => {
            service
                .create_post(PostChanges {
                    title: Some("Hello".to_owned()),
                    body: Some("A body long enough".to_owned()),
                    ..changes
                })
                .await
        }
    }
    .expect_err("category vanished mid-flight");

    assert_eq!(error.code(), ErrorCode::ValidationFailed);
    assert_eq!(error.errors(), ["Category must exist"]);
}

#[rstest]
#[tokio::test]
async fn connection_errors_map_to_service_unavailable(categories: MockCategoryRepository) {
    let mut posts = MockPostRepository::new();
    posts
        .expect_list()
        .return_once(|| Err(PostRepositoryError::connection("refused")));

    let error = service(posts, categories)
        .list_posts()
        .await
        .expect_err("connection failure");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn category_query_errors_map_to_internal() {
    let mut categories = MockCategoryRepository::new();
    categories
        .expect_find_by_id()
        .return_once(|_| Err(CategoryRepositoryError::query("syntax")));
    let posts = MockPostRepository::new();

    let error = service(posts, categories)
        .create_post(PostChanges {
            category_id: Some(Some(CategoryId::new(1))),
            ..PostChanges::default()
        })
        .await
        .expect_err("query failure");

    assert_eq!(error.code(), ErrorCode::InternalError);
}
