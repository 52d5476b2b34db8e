//! Category handlers.
//!
//! ```text
//! GET    /api/categories
//! POST   /api/categories       {"category":{"name":"Rust","description":null}}
//! GET    /api/categories/{id}
//! PUT    /api/categories/{id}
//! PATCH  /api/categories/{id}
//! DELETE /api/categories/{id}  posts keep existing with no category
//! ```

use actix_web::{HttpResponse, delete, get, post, route, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{Category, CategoryChanges, CategoryId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{CategorySchema, ErrorSchema};
use crate::inbound::http::session::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::double_option;

/// Permitted category fields.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CategoryPayload {
    pub name: Option<String>,
    /// `null` clears the description; omit the key to keep it.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
}

/// Request body wrapping [`CategoryPayload`] under `category`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CategoryRequest {
    pub category: CategoryPayload,
}

impl From<CategoryRequest> for CategoryChanges {
    fn from(value: CategoryRequest) -> Self {
        let CategoryPayload { name, description } = value.category;
        Self { name, description }
    }
}

/// List every category.
#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "All categories", body = [CategorySchema]),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "listCategories",
    security([])
)]
#[get("/categories")]
pub async fn list_categories(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<Category>>> {
    Ok(web::Json(state.categories_query.list_categories().await?))
}

/// Fetch one category.
#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(("id" = i64, Path, description = "Category id")),
    responses(
        (status = 200, description = "The category", body = CategorySchema),
        (status = 404, description = "No such category", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "getCategory",
    security([])
)]
#[get("/categories/{id}")]
pub async fn get_category(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Category>> {
    let id = CategoryId::new(path.into_inner());
    Ok(web::Json(state.categories_query.get_category(id).await?))
}

/// Create a category. Names are unique.
#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Created category", body = CategorySchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 422, description = "Validation failed", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "createCategory"
)]
#[post("/categories")]
pub async fn create_category(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    payload: web::Json<CategoryRequest>,
) -> ApiResult<HttpResponse> {
    let category = state
        .categories_command
        .create_category(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(category))
}

/// Update the fields present in the body.
#[utoipa::path(
    method(put, patch),
    path = "/api/categories/{id}",
    params(("id" = i64, Path, description = "Category id")),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Updated category", body = CategorySchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "No such category", body = ErrorSchema),
        (status = 422, description = "Validation failed", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "updateCategory"
)]
#[route("/categories/{id}", method = "PUT", method = "PATCH")]
pub async fn update_category(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<CategoryRequest>,
) -> ApiResult<web::Json<Category>> {
    let id = CategoryId::new(path.into_inner());
    let category = state
        .categories_command
        .update_category(id, payload.into_inner().into())
        .await?;
    Ok(web::Json(category))
}

/// Delete a category; its posts lose their category.
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(("id" = i64, Path, description = "Category id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "No such category", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "deleteCategory"
)]
#[delete("/categories/{id}")]
pub async fn delete_category(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .categories_command
        .delete_category(CategoryId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "categories_tests.rs"]
mod tests;
