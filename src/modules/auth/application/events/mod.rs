pub mod publisher;
pub mod registration_events;

pub use publisher::{ApplicationEventPublisher, ApplicationListener};
pub use registration_events::{OnRegenerateEmailVerificationEvent, OnUserRegistrationCompleteEvent};
