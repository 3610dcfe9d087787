use super::TokenQuery;
use crate::auth::application::use_cases::ConfirmEmailError;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{get, web, HttpResponse, Responder};
use serde::Serialize;
use tracing::{error, info, warn};

#[derive(Serialize)]
pub struct ConfirmRegistrationResponse {
    message: String,
}

fn map_confirm_email_error(err: ConfirmEmailError) -> HttpResponse {
    match err {
        ConfirmEmailError::TokenInvalid => {
            ApiResponse::bad_request("TOKEN_INVALID", "Invalid verification token")
        }
        ConfirmEmailError::TokenExpired => ApiResponse::bad_request(
            "TOKEN_EXPIRED",
            "Verification token has expired. Request a new one.",
        ),
        ConfirmEmailError::AlreadyVerified => {
            ApiResponse::conflict("ALREADY_VERIFIED", "Email already verified")
        }
        ConfirmEmailError::UserNotFound => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        ConfirmEmailError::DatabaseError(e) => {
            error!(error = %e, "Registration confirmation failed");
            ApiResponse::internal_error()
        }
    }
}

/// Confirm a registration
///
/// Target of the link in the verification email.
#[get("/api/auth/registration-confirmation")]
pub async fn confirm_registration_handler(
    query: web::Query<TokenQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.confirm_email_use_case.execute(&query.token).await {
        Ok(()) => {
            info!("Registration confirmed");
            ApiResponse::success(ConfirmRegistrationResponse {
                message: "Email verified successfully".to_string(),
            })
        }
        Err(e) => {
            warn!(error = %e, "Registration confirmation rejected");
            map_confirm_email_error(e)
        }
    }
}
