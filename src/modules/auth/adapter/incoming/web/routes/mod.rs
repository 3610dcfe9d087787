mod confirm_registration;
mod register_user;
mod resend_registration_token;

pub use confirm_registration::confirm_registration_handler;
pub use register_user::register_user_handler;
pub use resend_registration_token::resend_registration_token_handler;

use serde::{Deserialize, Serialize};

/// `?token=...` carried by the links in verification emails.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenQuery {
    pub token: String,
}
