use crate::auth::application::use_cases::{RegisterUserError, RegisterUserInput};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

/// Request body for user registration
#[derive(Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
}

#[derive(Serialize)]
pub struct RegisterUserResponse {
    message: String,
    user: RegisteredUser,
}

#[derive(Serialize)]
pub struct RegisteredUser {
    id: String,
    username: String,
    email: String,
    full_name: String,
}

fn map_register_user_error(err: RegisterUserError, req: &RegisterUserRequest) -> HttpResponse {
    let (code, msg) = match &err {
        RegisterUserError::InvalidUsername(msg) => ("INVALID_USERNAME", msg),
        RegisterUserError::InvalidEmail(msg) => ("INVALID_EMAIL", msg),
        RegisterUserError::InvalidPassword(msg) => ("INVALID_PASSWORD", msg),
        RegisterUserError::InvalidFullName(msg) => ("INVALID_FULL_NAME", msg),

        RegisterUserError::UserAlreadyExists => {
            warn!(
                username = %req.username,
                email = %req.email,
                "User already exists"
            );
            return ApiResponse::conflict("USER_ALREADY_EXISTS", "User already exists");
        }

        RegisterUserError::HashingFailed(_) | RegisterUserError::RepositoryError(_) => {
            error!(
                username = %req.username,
                email = %req.email,
                error = %err,
                "User registration failed"
            );
            return ApiResponse::internal_error();
        }
    };

    warn!(
        username = %req.username,
        email = %req.email,
        error = %err,
        "Invalid registration input"
    );
    ApiResponse::bad_request(code, msg)
}

/// Register a new user
///
/// Creates an unverified account. The verification email is sent in the
/// background, so a 201 does not mean the mail was delivered.
#[post("/api/auth/register")]
pub async fn register_user_handler(
    req: web::Json<RegisterUserRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    info!(
        username = %req.username,
        email = %req.email,
        "User registration attempt"
    );

    let input = RegisterUserInput {
        username: req.username.clone(),
        email: req.email.clone(),
        password: req.password.clone(),
        full_name: req.full_name.clone(),
    };

    match data.register_user_use_case.execute(input).await {
        Ok(output) => ApiResponse::created(RegisterUserResponse {
            message: output.message,
            user: RegisteredUser {
                id: output.user_id.to_string(),
                username: output.username,
                email: output.email,
                full_name: output.full_name,
            },
        }),
        Err(e) => map_register_user_error(e, &req),
    }
}
