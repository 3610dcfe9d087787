use crate::auth::application::domain::{EmailVerificationToken, RedirectUrl, User};

/// Published once a new account has been stored.
#[derive(Debug, Clone)]
pub struct OnUserRegistrationCompleteEvent {
    pub user: User,
    pub redirect_url: RedirectUrl,
}

impl OnUserRegistrationCompleteEvent {
    pub fn new(user: User, redirect_url: RedirectUrl) -> Self {
        Self { user, redirect_url }
    }
}

/// Published when a user asks for their verification link again. Carries the
/// already-stored token so the listener resends it instead of minting one.
#[derive(Debug, Clone)]
pub struct OnRegenerateEmailVerificationEvent {
    pub user: User,
    pub redirect_url: RedirectUrl,
    pub token: EmailVerificationToken,
}

impl OnRegenerateEmailVerificationEvent {
    pub fn new(user: User, redirect_url: RedirectUrl, token: EmailVerificationToken) -> Self {
        Self {
            user,
            redirect_url,
            token,
        }
    }
}
