//! Tests for the category service.

use std::sync::Arc;

use rstest::rstest;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::MockCategoryRepository;
use crate::test_support::{fixture_clock, fixture_timestamp};

fn category(id: i64, name: &str) -> Category {
    Category {
        id: CategoryId::new(id),
        fields: CategoryFields {
            name: name.to_owned(),
            description: Some("About things".to_owned()),
        },
        created_at: fixture_timestamp(),
        updated_at: fixture_timestamp(),
    }
}

fn service(repo: MockCategoryRepository) -> CategoriesService<MockCategoryRepository> {
    CategoriesService::new(Arc::new(repo), fixture_clock())
}

fn named(name: &str) -> CategoryChanges {
    CategoryChanges {
        name: Some(name.to_owned()),
        description: None,
    }
}

#[rstest]
#[tokio::test]
async fn create_rejects_taken_name() {
    let mut repo = MockCategoryRepository::new();
    repo.expect_find_by_name()
        .return_once(|name| Ok(Some(category(1, name))));
    repo.expect_insert().times(0);

    let error = service(repo)
        .create_category(named("Rust"))
        .await
        .expect_err("duplicate name");

    assert_eq!(error.errors(), ["Name has already been taken"]);
}

#[rstest]
#[tokio::test]
async fn blank_name_skips_uniqueness_lookup() {
    let mut repo = MockCategoryRepository::new();
    repo.expect_find_by_name().times(0);

    let error = service(repo)
        .create_category(CategoryChanges::default())
        .await
        .expect_err("blank name");

    assert_eq!(error.errors(), ["Name can't be blank"]);
}

#[rstest]
#[tokio::test]
async fn update_may_keep_its_own_name() {
    let mut repo = MockCategoryRepository::new();
    repo.expect_find_by_id()
        .return_once(|id| Ok(Some(category(id.get(), "Rust"))));
    repo.expect_find_by_name()
        .return_once(|name| Ok(Some(category(3, name))));
    repo.expect_update()
        .withf(|_, fields, _| fields.description.is_none())
        .return_once(|id, fields, _| {
            Ok(Some(Category {
                fields: fields.clone(),
                ..category(id.get(), "Rust")
            }))
        });

    let updated = service(repo)
        .update_category(
            CategoryId::new(3),
            CategoryChanges {
                name: Some("Rust".to_owned()),
                description: Some(None),
            },
        )
        .await
        .expect("own name allowed");

    assert_eq!(updated.fields.description, None);
}

#[rstest]
#[tokio::test]
async fn racing_duplicate_maps_to_validation_message() {
    let mut repo = MockCategoryRepository::new();
    repo.expect_find_by_name().return_once(|_| Ok(None));
    repo.expect_insert()
        .return_once(|fields, _| Err(CategoryRepositoryError::duplicate_name(fields.name.clone())));

    let error = service(repo)
        .create_category(named("Rust"))
        .await
        .expect_err("unique index rejected write");

    assert_eq!(error.code(), ErrorCode::ValidationFailed);
    assert_eq!(error.errors(), ["Name has already been taken"]);
}

#[rstest]
#[case(Ok(true), None)]
#[case(Ok(false), Some(ErrorCode::NotFound))]
#[case(Err(CategoryRepositoryError::connection("down")), Some(ErrorCode::ServiceUnavailable))]
#[tokio::test]
async fn delete_outcomes(
    #[case] outcome: Result<bool, CategoryRepositoryError>,
    #[case] expected: Option<ErrorCode>,
) {
    let mut repo = MockCategoryRepository::new();
    repo.expect_delete().return_once(move |_| outcome);

    let result = service(repo).delete_category(CategoryId::new(1)).await;

    assert_eq!(result.err().map(|err| err.code()), expected);
}
