//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api` endpoint, the health probes, the request
//! bodies and the domain schema wrappers from
//! [`crate::inbound::http::schemas`], plus the session cookie security
//! scheme. Swagger UI serves it in debug builds and the `openapi-dump`
//! binary prints it for external tooling.

use crate::inbound::http::categories::{CategoryPayload, CategoryRequest};
use crate::inbound::http::comments::{CommentPayload, CommentRequest};
use crate::inbound::http::posts::{PostPayload, PostRequest};
use crate::inbound::http::schemas::{
    CategorySchema, CommentSchema, CommentWithPostSchema, ErrorCodeSchema, ErrorSchema,
    PostSchema, UserSchema,
};
use crate::inbound::http::session_config::SESSION_COOKIE_NAME;
use crate::inbound::http::users::{
    LoginRequest, LoginResponse, RegistrationPayload, RegistrationRequest, UserEnvelope,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                SESSION_COOKIE_NAME,
                "Session cookie issued by POST /api/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Blog backend API",
        description = "Posts, comments and categories with session-cookie login.",
        license(name = "ISC", url = "https://opensource.org/license/isc-license-txt")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::register,
        crate::inbound::http::posts::list_posts,
        crate::inbound::http::posts::get_post,
        crate::inbound::http::posts::create_post,
        crate::inbound::http::posts::update_post,
        crate::inbound::http::posts::delete_post,
        crate::inbound::http::comments::list_all_comments,
        crate::inbound::http::comments::list_comments,
        crate::inbound::http::comments::get_comment,
        crate::inbound::http::comments::create_comment,
        crate::inbound::http::comments::update_comment,
        crate::inbound::http::comments::delete_comment,
        crate::inbound::http::categories::list_categories,
        crate::inbound::http::categories::get_category,
        crate::inbound::http::categories::create_category,
        crate::inbound::http::categories::update_category,
        crate::inbound::http::categories::delete_category,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        UserSchema,
        PostSchema,
        CommentSchema,
        CommentWithPostSchema,
        CategorySchema,
        LoginRequest,
        LoginResponse,
        RegistrationPayload,
        RegistrationRequest,
        UserEnvelope,
        PostPayload,
        PostRequest,
        CommentPayload,
        CommentRequest,
        CategoryPayload,
        CategoryRequest,
    )),
    tags(
        (name = "session", description = "Login, logout and the current user"),
        (name = "users", description = "Account registration"),
        (name = "posts", description = "Blog posts"),
        (name = "comments", description = "Comments scoped to a post"),
        (name = "categories", description = "Post categories"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI registration and schema field structure.

    use super::*;
    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";
    const POST_SCHEMA_NAME: &str = "crate.domain.Post";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case(ERROR_SCHEMA_NAME, "error")]
    #[case(ERROR_SCHEMA_NAME, "traceId")]
    #[case(POST_SCHEMA_NAME, "category_id")]
    #[case("crate.domain.CommentWithPost", "post")]
    fn schemas_expose_wire_fields(#[case] name: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(name).expect("schema registered");
        assert_object_schema_has_field(schema, field);
    }

    #[rstest]
    #[case("/api/login")]
    #[case("/api/posts/{id}")]
    #[case("/api/posts/{post_id}/comments/{id}")]
    #[case("/api/comments")]
    #[case("/api/categories")]
    #[case("/health/ready")]
    fn paths_are_registered(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn update_routes_document_put_and_patch() {
        let doc = ApiDoc::openapi();
        let item = doc.paths.paths.get("/api/posts/{id}").expect("post item");
        assert!(item.put.is_some());
        assert!(item.patch.is_some());
    }

    #[rstest]
    fn session_cookie_scheme_uses_cookie_name() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_string(&doc).expect("serialise document");
        assert!(json.contains("\"SessionCookie\""));
        assert!(json.contains(SESSION_COOKIE_NAME));
    }
}
