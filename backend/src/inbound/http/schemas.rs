//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their wire shape and register under the domain
//! type's name, so handlers can reference them in `#[utoipa::path]`.

#![expect(
    dead_code,
    reason = "schema wrappers exist only for OpenAPI generation via utoipa"
)]

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request body is malformed or lacks its wrapper key.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Wrong credentials or no session.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The identifier does not resolve to a record.
    #[schema(rename = "not_found")]
    NotFound,
    /// Validation rules failed; see `errors`.
    #[schema(rename = "validation_failed")]
    ValidationFailed,
    /// The database is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "validation_failed")]
    code: ErrorCodeSchema,
    /// Human-readable summary.
    #[schema(example = "Validation failed")]
    error: String,
    /// Ordered validation messages; present for `validation_failed` only.
    #[schema(example = json!(["Title can't be blank"]))]
    errors: Option<Vec<String>>,
    /// Correlation identifier, echoed in the `trace-id` header.
    #[schema(rename = "traceId", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
pub struct UserSchema {
    #[schema(example = 1)]
    id: i64,
    #[schema(example = "ada@example.com")]
    email: String,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}

/// OpenAPI schema for [`crate::domain::Category`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Category)]
pub struct CategorySchema {
    #[schema(example = 1)]
    id: i64,
    #[schema(example = "Rust")]
    name: String,
    description: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}

/// OpenAPI schema for [`crate::domain::Post`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Post)]
pub struct PostSchema {
    #[schema(example = 1)]
    id: i64,
    #[schema(example = "Hello")]
    title: String,
    /// At least ten characters.
    body: String,
    category_id: Option<i64>,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}

/// OpenAPI schema for [`crate::domain::Comment`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Comment)]
pub struct CommentSchema {
    #[schema(example = 1)]
    id: i64,
    post_id: i64,
    body: String,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}

/// OpenAPI schema for [`crate::domain::CommentWithPost`].
#[derive(ToSchema)]
#[schema(as = crate::domain::CommentWithPost)]
pub struct CommentWithPostSchema {
    id: i64,
    post_id: i64,
    body: String,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
    /// The parent post.
    post: PostSchema,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[rstest]
    fn error_code_schema_lists_every_code() {
        let schema_json = schema_to_json::<ErrorCodeSchema>();
        for code in [
            "invalid_request",
            "unauthorized",
            "not_found",
            "validation_failed",
            "service_unavailable",
            "internal_error",
        ] {
            assert!(schema_json.contains(code), "missing {code}");
        }
    }

    #[rstest]
    fn error_schema_matches_wire_names() {
        let schema_json = schema_to_json::<ErrorSchema>();
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
        assert!(schema_json.contains("\"error\""));
        assert!(schema_json.contains("\"errors\""));
        assert!(schema_json.contains("\"traceId\""));
    }

    #[rstest]
    #[case(PostSchema::name(), "crate.domain.Post")]
    #[case(CommentSchema::name(), "crate.domain.Comment")]
    #[case(CategorySchema::name(), "crate.domain.Category")]
    #[case(UserSchema::name(), "crate.domain.User")]
    fn schemas_register_under_domain_names(
        #[case] name: std::borrow::Cow<'static, str>,
        #[case] expected: &str,
    ) {
        assert_eq!(name, expected);
    }

    #[rstest]
    fn user_schema_has_no_password() {
        assert!(!schema_to_json::<UserSchema>().contains("password"));
    }
}
