//! Account API handlers.
//!
//! ```text
//! POST /api/v1/users/signup {"contactHandle":"a@x.com","displayName":"Ada","secret":"pw123"}
//! POST /api/v1/users/login  {"contactHandle":"a@x.com","secret":"pw123"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::domain::ports::AccountError;
use crate::domain::{Error, LoginCredentials, Registration};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Body returned on success.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Welcome, Ada!")]
    pub message: String,
}

impl MessageResponse {
    fn new(message: impl Into<String>) -> web::Json<Self> {
        web::Json(Self {
            message: message.into(),
        })
    }
}

/// Registration request body for `POST /api/v1/users/signup`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[schema(example = "a@x.com")]
    pub contact_handle: String,
    #[schema(example = "Ada")]
    pub display_name: String,
    #[schema(example = "pw123")]
    pub secret: String,
}

impl From<SignupRequest> for Registration {
    fn from(value: SignupRequest) -> Self {
        Registration::new(value.contact_handle, value.display_name, value.secret)
    }
}

/// Login request body for `POST /api/v1/users/login`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "a@x.com")]
    pub contact_handle: String,
    #[schema(example = "pw123")]
    pub secret: String,
}

impl From<LoginRequest> for LoginCredentials {
    fn from(value: LoginRequest) -> Self {
        LoginCredentials::new(value.contact_handle, value.secret)
    }
}

fn map_signup_error(err: AccountError) -> Error {
    match err {
        AccountError::DuplicateAccount => Error::duplicate_account(
            "Registration failed: an account with this contact handle already exists",
        ),
        AccountError::Unexpected { message } => {
            error!(%message, "registration failed");
            Error::internal("Registration failed: an unexpected error occurred")
        }
        other @ (AccountError::NotFound | AccountError::InvalidCredential) => {
            warn!(error = %other, "login failure kind returned from registration");
            Error::internal("Registration failed: an unexpected error occurred")
        }
    }
}

fn map_login_error(err: AccountError) -> Error {
    match err {
        AccountError::NotFound => {
            Error::unauthorized("Login failed: no account is registered for this contact handle")
        }
        AccountError::InvalidCredential => {
            Error::unauthorized("Login failed: the secret is incorrect")
        }
        AccountError::Unexpected { message } => {
            error!(%message, "login failed");
            Error::internal("Login failed: an unexpected error occurred")
        }
        AccountError::DuplicateAccount => {
            warn!("registration failure kind returned from login");
            Error::internal("Login failed: an unexpected error occurred")
        }
    }
}

/// Register a new account.
///
/// A duplicate contact handle is reported as a server error with the
/// `duplicate_account` code.
#[utoipa::path(
    post,
    path = "/api/v1/users/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Account created", body = MessageResponse),
        (status = 400, description = "Malformed request body", body = Error),
        (status = 500, description = "Duplicate contact handle or internal failure", body = Error)
    ),
    tags = ["users"],
    operation_id = "signup",
    security([])
)]
#[post("/users/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let registration = Registration::from(payload.into_inner());
    state
        .accounts
        .register(&registration)
        .await
        .map_err(map_signup_error)?;
    Ok(MessageResponse::new("Registration completed."))
}

/// Verify credentials and greet the user.
#[utoipa::path(
    post,
    path = "/api/v1/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = MessageResponse),
        (status = 400, description = "Malformed request body", body = Error),
        (status = 401, description = "Unknown contact handle or wrong secret", body = Error),
        (status = 500, description = "Internal failure", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/users/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let credentials = LoginCredentials::from(payload.into_inner());
    let user = state
        .accounts
        .login(&credentials)
        .await
        .map_err(map_login_error)?;
    Ok(MessageResponse::new(format!(
        "Welcome, {}!",
        user.display_name()
    )))
}
