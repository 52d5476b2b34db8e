//! Account and session handlers.
//!
//! ```text
//! POST /api/login  {"email":"ada@example.com","password":"..."}
//! POST /api/logout
//! GET  /api/me
//! POST /api/users  {"user":{"email":"ada@example.com","password":"..."}}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode, LOGIN_REQUIRED, LoginCredentials, Registration, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Message sent with a successful login.
pub const LOGGED_IN_MESSAGE: &str = "Logged in successfully";

/// Login request body for `POST /api/login`.
///
/// Missing fields are treated as blank and rejected like wrong credentials.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Successful login payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    #[schema(value_type = UserSchema)]
    pub user: User,
}

/// Registration payload fields.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct RegistrationPayload {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for `POST /api/users`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RegistrationRequest {
    pub user: RegistrationPayload,
}

/// Single user wrapped under the `user` key.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserEnvelope {
    #[schema(value_type = UserSchema)]
    pub user: User,
}

/// Authenticate by email and password and establish a session.
///
/// Every failure, blank input included, answers with the same
/// `401 Invalid credentials`.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Malformed body", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["session"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let LoginRequest { email, password } = payload.into_inner();
    let Ok(credentials) = LoginCredentials::try_from_parts(&email, &password) else {
        return Err(state.login.reject_malformed(&password).await);
    };
    let user = state.login.authenticate(&credentials).await?;
    session.persist_user(user.id)?;
    info!(user_id = %user.id, "user logged in");
    Ok(web::Json(LoginResponse {
        message: LOGGED_IN_MESSAGE.to_owned(),
        user,
    }))
}

/// End the current session. Succeeds whether or not one exists.
#[utoipa::path(
    post,
    path = "/api/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["session"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}

/// Return the user behind the session cookie.
///
/// A session pointing at an account that no longer exists is purged and
/// treated as absent.
#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "Current user", body = UserEnvelope),
        (status = 401, description = "No session", body = ErrorSchema)
    ),
    tags = ["session"],
    operation_id = "currentUser"
)]
#[get("/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserEnvelope>> {
    let user_id = session.require_user_id()?;
    match state.users_query.get_user(user_id).await {
        Ok(user) => Ok(web::Json(UserEnvelope { user })),
        Err(error) if error.code() == ErrorCode::NotFound => {
            session.purge();
            Err(Error::unauthorized(LOGIN_REQUIRED))
        }
        Err(error) => Err(error),
    }
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = RegistrationRequest,
    responses(
        (status = 201, description = "Account created", body = UserEnvelope),
        (status = 400, description = "Malformed body", body = ErrorSchema),
        (status = 422, description = "Validation failed", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "registerUser",
    security([])
)]
#[post("/users")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegistrationRequest>,
) -> ApiResult<HttpResponse> {
    let RegistrationPayload { email, password } = payload.into_inner().user;
    let user = state
        .users_command
        .register(Registration::new(email, password))
        .await?;
    info!(user_id = %user.id, "user registered");
    Ok(HttpResponse::Created().json(UserEnvelope { user }))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
