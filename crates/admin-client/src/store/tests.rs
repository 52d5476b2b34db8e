//! Tests for the resource store over an in-process fake resource.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use blog_backend::test_support::{FixtureClock, fixture_timestamp};
use rstest::{fixture, rstest};

use super::*;
use crate::banner::BannerPhase;
use crate::error::DEFAULT_ERROR_MESSAGE;
use crate::records::{Category, CategoryForm};

#[derive(Default)]
struct FakeState {
    records: Vec<Category>,
    next_id: i64,
    calls: Vec<String>,
    reject_writes: Option<ClientError>,
    fail_lists: bool,
}

#[derive(Clone, Default)]
struct FakeCategories(Arc<Mutex<FakeState>>);

impl FakeCategories {
    fn with_records(names: &[&str]) -> Self {
        let fake = Self::default();
        {
            let mut state = fake.0.lock().expect("state lock");
            for name in names {
                state.next_id += 1;
                let id = state.next_id;
                state.records.push(category(id, name));
            }
        }
        fake
    }

    fn reject_writes(&self, error: ClientError) {
        self.0.lock().expect("state lock").reject_writes = Some(error);
    }

    fn fail_lists(&self) {
        self.0.lock().expect("state lock").fail_lists = true;
    }

    fn calls(&self) -> Vec<String> {
        self.0.lock().expect("state lock").calls.clone()
    }
}

fn category(id: i64, name: &str) -> Category {
    Category {
        id,
        name: name.to_owned(),
        description: None,
        created_at: fixture_timestamp(),
        updated_at: fixture_timestamp(),
    }
}

fn validation_error() -> ClientError {
    ClientError::api(
        422,
        br#"{"code":"validation_failed","error":"Validation failed","errors":["Name can't be blank"]}"#,
    )
}

#[async_trait]
impl Resource for FakeCategories {
    type Record = Category;

    async fn list(&self) -> Result<Vec<Category>, ClientError> {
        let mut state = self.0.lock().expect("state lock");
        state.calls.push("list".to_owned());
        if state.fail_lists {
            return Err(ClientError::Transport {
                message: "connection reset".to_owned(),
            });
        }
        Ok(state.records.clone())
    }

    async fn create(&self, form: &CategoryForm) -> Result<Category, ClientError> {
        let mut state = self.0.lock().expect("state lock");
        state.calls.push(format!("create {}", form.name));
        if let Some(error) = state.reject_writes.clone() {
            return Err(error);
        }
        state.next_id += 1;
        let record = category(state.next_id, &form.name);
        state.records.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: i64, form: &CategoryForm) -> Result<Category, ClientError> {
        let mut state = self.0.lock().expect("state lock");
        state.calls.push(format!("update {id} {}", form.name));
        if let Some(error) = state.reject_writes.clone() {
            return Err(error);
        }
        let record = state
            .records
            .iter_mut()
            .find(|record| record.id == id)
            .expect("record exists");
        record.name.clone_from(&form.name);
        Ok(record.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), ClientError> {
        let mut state = self.0.lock().expect("state lock");
        state.calls.push(format!("delete {id}"));
        if let Some(error) = state.reject_writes.clone() {
            return Err(error);
        }
        state.records.retain(|record| record.id != id);
        Ok(())
    }
}

#[fixture]
fn clock() -> Arc<FixtureClock> {
    Arc::new(FixtureClock::default())
}

fn store_over(fake: &FakeCategories, clock: &Arc<FixtureClock>) -> ResourceStore<FakeCategories> {
    ResourceStore::new(fake.clone(), Arc::clone(clock) as Arc<dyn Clock>)
}

fn names(store: &ResourceStore<FakeCategories>) -> Vec<&str> {
    store.items().iter().map(|item| item.name.as_str()).collect()
}

#[rstest]
#[tokio::test]
async fn refresh_replaces_items(clock: Arc<FixtureClock>) {
    let fake = FakeCategories::with_records(&["Rust", "Go"]);
    let mut store = store_over(&fake, &clock);

    store.refresh().await.expect("refresh");

    assert_eq!(names(&store), ["Rust", "Go"]);
}

#[rstest]
#[tokio::test]
async fn submit_creates_when_not_editing(clock: Arc<FixtureClock>) {
    let fake = FakeCategories::default();
    let mut store = store_over(&fake, &clock);
    store.form_mut().name = "Rust".to_owned();

    let created = store.submit().await.expect("create");

    assert_eq!(created.name, "Rust");
    assert_eq!(fake.calls(), ["create Rust", "list"]);
    assert_eq!(store.form(), &CategoryForm::default());
    assert_eq!(names(&store), ["Rust"]);
}

#[rstest]
#[tokio::test]
async fn submit_updates_the_record_being_edited(clock: Arc<FixtureClock>) {
    let fake = FakeCategories::with_records(&["Rust"]);
    let mut store = store_over(&fake, &clock);
    store.refresh().await.expect("refresh");
    let record = store.items().first().cloned().expect("one record");

    store.begin_edit(&record);
    assert_eq!(store.editing(), Some(record.id));
    assert_eq!(store.form().name, "Rust");
    store.form_mut().name = "Rustacean".to_owned();
    store.submit().await.expect("update");

    assert_eq!(fake.calls(), ["list", "update 1 Rustacean", "list"]);
    assert_eq!(store.editing(), None);
    assert_eq!(names(&store), ["Rustacean"]);
}

#[rstest]
#[tokio::test]
async fn failed_submit_keeps_form_and_still_refetches(clock: Arc<FixtureClock>) {
    let fake = FakeCategories::with_records(&["Rust"]);
    fake.reject_writes(validation_error());
    let mut store = store_over(&fake, &clock);
    store.form_mut().name = "   ".to_owned();

    let error = store.submit().await.expect_err("rejected");

    assert_eq!(error.status(), Some(422));
    assert_eq!(store.form().name, "   ");
    assert_eq!(store.banner().phase(), BannerPhase::Visible);
    assert_eq!(store.banner().messages(), ["Name can't be blank"]);
    assert_eq!(fake.calls(), ["create    ", "list"]);
    assert_eq!(names(&store), ["Rust"]);
}

#[rstest]
#[tokio::test]
async fn transport_failures_show_the_default_message(clock: Arc<FixtureClock>) {
    let fake = FakeCategories::default();
    fake.reject_writes(ClientError::Transport {
        message: "connection refused".to_owned(),
    });
    let mut store = store_over(&fake, &clock);

    store.submit().await.expect_err("rejected");

    assert_eq!(store.banner().messages(), [DEFAULT_ERROR_MESSAGE]);
}

#[rstest]
#[tokio::test]
async fn next_submit_clears_previous_errors(clock: Arc<FixtureClock>) {
    let fake = FakeCategories::default();
    fake.reject_writes(validation_error());
    let mut store = store_over(&fake, &clock);
    store.submit().await.expect_err("rejected");

    fake.0.lock().expect("state lock").reject_writes = None;
    store.form_mut().name = "Rust".to_owned();
    store.submit().await.expect("create");

    assert_eq!(store.banner().phase(), BannerPhase::Cleared);
}

#[rstest]
#[tokio::test]
async fn refetch_failure_after_success_is_shown(clock: Arc<FixtureClock>) {
    let fake = FakeCategories::default();
    fake.fail_lists();
    let mut store = store_over(&fake, &clock);
    store.form_mut().name = "Rust".to_owned();

    store.submit().await.expect("create still succeeds");

    assert_eq!(store.banner().messages(), [DEFAULT_ERROR_MESSAGE]);
}

#[rstest]
#[tokio::test]
async fn deleting_the_edited_record_resets_the_form(clock: Arc<FixtureClock>) {
    let fake = FakeCategories::with_records(&["Rust", "Go"]);
    let mut store = store_over(&fake, &clock);
    store.refresh().await.expect("refresh");
    let rust = store.items().first().cloned().expect("record");
    store.begin_edit(&rust);

    store.delete(rust.id).await.expect("delete");

    assert_eq!(store.editing(), None);
    assert_eq!(store.form(), &CategoryForm::default());
    assert_eq!(names(&store), ["Go"]);
}

#[rstest]
#[tokio::test]
async fn deleting_another_record_keeps_the_form(clock: Arc<FixtureClock>) {
    let fake = FakeCategories::with_records(&["Rust", "Go"]);
    let mut store = store_over(&fake, &clock);
    store.refresh().await.expect("refresh");
    let rust = store.items().first().cloned().expect("record");
    store.begin_edit(&rust);

    store.delete(2).await.expect("delete");

    assert_eq!(store.editing(), Some(rust.id));
    assert_eq!(store.form().name, "Rust");
}

#[rstest]
#[tokio::test]
async fn failed_delete_keeps_the_form(clock: Arc<FixtureClock>) {
    let fake = FakeCategories::with_records(&["Rust"]);
    let mut store = store_over(&fake, &clock);
    store.refresh().await.expect("refresh");
    let rust = store.items().first().cloned().expect("record");
    store.begin_edit(&rust);
    fake.reject_writes(ClientError::api(
        401,
        br#"{"code":"unauthorized","error":"Login required"}"#,
    ));

    store.delete(rust.id).await.expect_err("rejected");

    assert_eq!(store.editing(), Some(rust.id));
    assert_eq!(store.banner().messages(), ["Login required"]);
    assert_eq!(names(&store), ["Rust"]);
}

#[rstest]
fn cancel_edit_returns_to_create_mode(clock: Arc<FixtureClock>) {
    let fake = FakeCategories::default();
    let mut store = store_over(&fake, &clock);
    store.begin_edit(&category(7, "Rust"));

    store.cancel_edit();

    assert_eq!(store.editing(), None);
    assert_eq!(store.form(), &CategoryForm::default());
}
