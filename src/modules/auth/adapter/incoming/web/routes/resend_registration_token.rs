use super::TokenQuery;
use crate::auth::application::use_cases::ResendEmailVerificationError;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{get, web, HttpResponse, Responder};
use serde::Serialize;
use tracing::{error, info, warn};

#[derive(Serialize)]
pub struct ResendRegistrationTokenResponse {
    message: String,
    email: String,
}

fn map_resend_error(err: ResendEmailVerificationError) -> HttpResponse {
    match err {
        ResendEmailVerificationError::TokenInvalid => {
            ApiResponse::bad_request("TOKEN_INVALID", "Invalid verification token")
        }
        ResendEmailVerificationError::AlreadyVerified => {
            ApiResponse::conflict("ALREADY_VERIFIED", "Email already verified")
        }
        ResendEmailVerificationError::UserNotFound => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        ResendEmailVerificationError::DatabaseError(e) => {
            error!(error = %e, "Resending verification email failed");
            ApiResponse::internal_error()
        }
    }
}

/// Resend the verification email
///
/// Takes the token from an earlier (possibly expired) link, extends its
/// validity and mails the same link again.
#[get("/api/auth/resend-registration-token")]
pub async fn resend_registration_token_handler(
    query: web::Query<TokenQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .resend_email_verification_use_case
        .execute(&query.token)
        .await
    {
        Ok(output) => {
            info!(email = %output.email, "Verification email re-queued");
            ApiResponse::success(ResendRegistrationTokenResponse {
                message: output.message,
                email: output.email,
            })
        }
        Err(e) => {
            warn!(error = %e, "Resend verification rejected");
            map_resend_error(e)
        }
    }
}
