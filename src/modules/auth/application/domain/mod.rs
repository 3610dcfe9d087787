pub mod entities;
pub mod redirect_url;

pub use entities::{EmailVerificationToken, TokenStatus, User};
pub use redirect_url::RedirectUrl;
