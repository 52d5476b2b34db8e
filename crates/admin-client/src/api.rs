//! Reqwest-backed client for the blog API.
//!
//! [`BlogApi`] owns transport details only: URL building, JSON envelopes,
//! the session cookie store and mapping failures onto [`ClientError`].
//! Clones share one connection pool and one cookie store, so every resource
//! handle built from the same client rides the same login session.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::dashboard::DashboardSummary;
use crate::error::ClientError;
use crate::records::{
    Category, CategoryForm, Comment, CommentForm, CommentWithPost, Post, PostForm, User,
};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct UserBody<'a> {
    user: Credentials<'a>,
}

#[derive(Serialize)]
struct PostBody<'a> {
    post: &'a PostForm,
}

#[derive(Serialize)]
struct CommentBody<'a> {
    comment: &'a CommentForm,
}

#[derive(Serialize)]
struct CategoryBody<'a> {
    category: &'a CategoryForm,
}

#[derive(Deserialize)]
struct UserEnvelope {
    user: User,
}

/// Typed client for every `/api` endpoint.
#[derive(Clone)]
pub struct BlogApi {
    client: Client,
    base: Url,
}

impl BlogApi {
    /// Client for the service at `base_url`, e.g. `http://localhost:3000`.
    ///
    /// # Errors
    /// Returns [`ClientError::InvalidUrl`] for an unusable URL and
    /// [`ClientError::Transport`] when the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Client with an explicit per-request timeout.
    ///
    /// # Errors
    /// As for [`BlogApi::new`].
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let mut base = Url::parse(base_url).map_err(|err| ClientError::InvalidUrl {
            message: err.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl {
                message: format!("{base_url} cannot be a base URL"),
            });
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()
            .map_err(map_transport_error)?;
        Ok(Self { client, base })
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        self.base
            .join(path)
            .map_err(|err| ClientError::InvalidUrl {
                message: err.to_string(),
            })
    }

    async fn send(&self, request: RequestBuilder) -> Result<(StatusCode, Vec<u8>), ClientError> {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?.to_vec();
        if status.is_success() {
            Ok((status, body))
        } else {
            let error = ClientError::api(status.as_u16(), &body);
            warn!(status = status.as_u16(), error = %error, "request rejected");
            Err(error)
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let (_, body) = self.send(request).await?;
        serde_json::from_slice(&body).map_err(|err| ClientError::Decode {
            message: err.to_string(),
        })
    }

    async fn discard(&self, request: RequestBuilder) -> Result<(), ClientError> {
        self.send(request).await.map(|_| ())
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        debug!(path, "GET");
        self.fetch(self.client.get(self.url(path)?)).await
    }

    async fn post<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        debug!(path, "POST");
        self.fetch(self.client.post(self.url(path)?).json(body)).await
    }

    async fn put<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        debug!(path, "PUT");
        self.fetch(self.client.put(self.url(path)?).json(body)).await
    }

    async fn delete(&self, path: &str) -> Result<(), ClientError> {
        debug!(path, "DELETE");
        self.discard(self.client.delete(self.url(path)?)).await
    }

    /// `POST /api/login`; on success the session cookie is stored.
    ///
    /// # Errors
    /// [`ClientError::Api`] with status 401 for any credential failure.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ClientError> {
        self.post::<_, UserEnvelope>("api/login", &Credentials { email, password })
            .await
            .map(|envelope| envelope.user)
    }

    /// `POST /api/logout`.
    ///
    /// # Errors
    /// Transport failures only; logout always succeeds server-side.
    pub async fn logout(&self) -> Result<(), ClientError> {
        debug!("POST api/logout");
        self.discard(self.client.post(self.url("api/logout")?)).await
    }

    /// `GET /api/me`.
    ///
    /// # Errors
    /// [`ClientError::Api`] with status 401 when no session is active.
    pub async fn current_user(&self) -> Result<User, ClientError> {
        self.get::<UserEnvelope>("api/me")
            .await
            .map(|envelope| envelope.user)
    }

    /// `POST /api/users`.
    ///
    /// # Errors
    /// [`ClientError::Api`] with status 422 and the validation list.
    pub async fn register(&self, email: &str, password: &str) -> Result<User, ClientError> {
        let body = UserBody {
            user: Credentials { email, password },
        };
        self.post::<_, UserEnvelope>("api/users", &body)
            .await
            .map(|envelope| envelope.user)
    }

    /// `GET /api/posts`.
    ///
    /// # Errors
    /// Any [`ClientError`].
    pub async fn list_posts(&self) -> Result<Vec<Post>, ClientError> {
        self.get("api/posts").await
    }

    /// `GET /api/posts/{id}`.
    ///
    /// # Errors
    /// [`ClientError::Api`] with status 404 for unknown ids.
    pub async fn get_post(&self, id: i64) -> Result<Post, ClientError> {
        self.get(&format!("api/posts/{id}")).await
    }

    /// `POST /api/posts`.
    ///
    /// # Errors
    /// [`ClientError::Api`] with status 401 or 422.
    pub async fn create_post(&self, form: &PostForm) -> Result<Post, ClientError> {
        self.post("api/posts", &PostBody { post: form }).await
    }

    /// `PUT /api/posts/{id}`.
    ///
    /// # Errors
    /// [`ClientError::Api`] with status 401, 404 or 422.
    pub async fn update_post(&self, id: i64, form: &PostForm) -> Result<Post, ClientError> {
        self.put(&format!("api/posts/{id}"), &PostBody { post: form })
            .await
    }

    /// `DELETE /api/posts/{id}`; comments go with it.
    ///
    /// # Errors
    /// [`ClientError::Api`] with status 401 or 404.
    pub async fn delete_post(&self, id: i64) -> Result<(), ClientError> {
        self.delete(&format!("api/posts/{id}")).await
    }

    /// `GET /api/comments`, each with its parent post.
    ///
    /// # Errors
    /// Any [`ClientError`].
    pub async fn list_all_comments(&self) -> Result<Vec<CommentWithPost>, ClientError> {
        self.get("api/comments").await
    }

    /// `GET /api/posts/{post_id}/comments`; empty for a deleted post.
    ///
    /// # Errors
    /// Any [`ClientError`].
    pub async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>, ClientError> {
        self.get(&format!("api/posts/{post_id}/comments")).await
    }

    /// `POST /api/posts/{post_id}/comments`.
    ///
    /// # Errors
    /// [`ClientError::Api`] with status 401, 404 or 422.
    pub async fn create_comment(
        &self,
        post_id: i64,
        form: &CommentForm,
    ) -> Result<Comment, ClientError> {
        self.post(
            &format!("api/posts/{post_id}/comments"),
            &CommentBody { comment: form },
        )
        .await
    }

    /// `PUT /api/posts/{post_id}/comments/{id}`.
    ///
    /// # Errors
    /// [`ClientError::Api`] with status 401, 404 or 422.
    pub async fn update_comment(
        &self,
        post_id: i64,
        id: i64,
        form: &CommentForm,
    ) -> Result<Comment, ClientError> {
        self.put(
            &format!("api/posts/{post_id}/comments/{id}"),
            &CommentBody { comment: form },
        )
        .await
    }

    /// `DELETE /api/posts/{post_id}/comments/{id}`.
    ///
    /// # Errors
    /// [`ClientError::Api`] with status 401 or 404.
    pub async fn delete_comment(&self, post_id: i64, id: i64) -> Result<(), ClientError> {
        self.delete(&format!("api/posts/{post_id}/comments/{id}"))
            .await
    }

    /// `GET /api/categories`.
    ///
    /// # Errors
    /// Any [`ClientError`].
    pub async fn list_categories(&self) -> Result<Vec<Category>, ClientError> {
        self.get("api/categories").await
    }

    /// `GET /api/categories/{id}`.
    ///
    /// # Errors
    /// [`ClientError::Api`] with status 404 for unknown ids.
    pub async fn get_category(&self, id: i64) -> Result<Category, ClientError> {
        self.get(&format!("api/categories/{id}")).await
    }

    /// `POST /api/categories`.
    ///
    /// # Errors
    /// [`ClientError::Api`] with status 401 or 422.
    pub async fn create_category(&self, form: &CategoryForm) -> Result<Category, ClientError> {
        self.post("api/categories", &CategoryBody { category: form })
            .await
    }

    /// `PUT /api/categories/{id}`.
    ///
    /// # Errors
    /// [`ClientError::Api`] with status 401, 404 or 422.
    pub async fn update_category(
        &self,
        id: i64,
        form: &CategoryForm,
    ) -> Result<Category, ClientError> {
        self.put(
            &format!("api/categories/{id}"),
            &CategoryBody { category: form },
        )
        .await
    }

    /// `DELETE /api/categories/{id}`; its posts lose the reference.
    ///
    /// # Errors
    /// [`ClientError::Api`] with status 401 or 404.
    pub async fn delete_category(&self, id: i64) -> Result<(), ClientError> {
        self.delete(&format!("api/categories/{id}")).await
    }

    /// Fetch every collection and count it.
    ///
    /// # Errors
    /// The first failing fetch.
    pub async fn dashboard_summary(&self) -> Result<DashboardSummary, ClientError> {
        let posts = self.list_posts().await?;
        let comments = self.list_all_comments().await?;
        let categories = self.list_categories().await?;
        Ok(DashboardSummary::from_collections(
            &posts,
            &comments,
            &categories,
        ))
    }
}

fn map_transport_error(error: reqwest::Error) -> ClientError {
    ClientError::Transport {
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("http://localhost:3000", "http://localhost:3000/api/posts")]
    #[case("http://localhost:3000/", "http://localhost:3000/api/posts")]
    #[case("https://example.com/blog", "https://example.com/blog/api/posts")]
    fn joins_paths_under_the_base(#[case] base: &str, #[case] expected: &str) {
        let api = BlogApi::new(base).expect("client builds");
        assert_eq!(api.url("api/posts").expect("join").as_str(), expected);
    }

    #[rstest]
    #[case("not a url")]
    #[case("mailto:admin@example.com")]
    fn rejects_unusable_base_urls(#[case] base: &str) {
        assert!(matches!(
            BlogApi::new(base),
            Err(ClientError::InvalidUrl { .. })
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn unreachable_servers_surface_transport_errors() {
        let api = BlogApi::with_timeout("http://127.0.0.1:1", Duration::from_secs(2))
            .expect("client builds");
        let error = api.list_posts().await.expect_err("nothing listens on port 1");
        assert!(matches!(error, ClientError::Transport { .. }));
    }
}
