pub mod config;
pub mod health;
pub mod modules;
pub mod shared;
pub use modules::auth;
pub use modules::email;

use crate::auth::adapter::outgoing::{
    Argon2Hasher, EmailVerificationTokenRepositoryPostgres, UserRepositoryPostgres,
};
use crate::auth::application::domain::RedirectUrl;
use crate::auth::application::events::{
    ApplicationEventPublisher, OnRegenerateEmailVerificationEvent, OnUserRegistrationCompleteEvent,
};
use crate::auth::application::listeners::{
    OnRegenerateEmailVerificationListener, OnUserRegistrationCompleteListener,
};
use crate::auth::application::services::{
    EmailVerificationTokenManager, EmailVerificationTokenService,
};
use crate::auth::application::use_cases::{
    ConfirmEmailUseCase, IConfirmEmailUseCase, IRegisterUserUseCase,
    IResendEmailVerificationUseCase, RegisterUserUseCase, ResendEmailVerificationUseCase,
};
use crate::config::{AppConfig, MailTransport};
use crate::email::adapter::outgoing::{LogEmailSender, SmtpEmailSender};
use crate::email::application::ports::incoming::MailService;
use crate::email::application::ports::outgoing::EmailSender;
use crate::email::application::services::{VerificationMailer, VerificationTemplate};
use crate::shared::api::{custom_json_config, custom_query_config};

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use sea_orm::{ConnectOptions, Database};
use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(test)]
mod tests;

pub const CONFIRMATION_PATH: &str = "/api/auth/registration-confirmation";

#[derive(Clone)]
pub struct AppState {
    pub register_user_use_case: Arc<dyn IRegisterUserUseCase + Send + Sync>,
    pub confirm_email_use_case: Arc<dyn IConfirmEmailUseCase + Send + Sync>,
    pub resend_email_verification_use_case: Arc<dyn IResendEmailVerificationUseCase + Send + Sync>,
}

#[cfg(not(tarpaulin_include))]
fn build_email_sender(config: &AppConfig) -> anyhow::Result<Arc<dyn EmailSender + Send + Sync>> {
    let sender: Arc<dyn EmailSender + Send + Sync> = match &config.mail_transport {
        MailTransport::Smtp {
            server,
            username,
            password,
        } => {
            info!(smtp_server = %server, "Using SMTP relay for outgoing mail");
            Arc::new(SmtpEmailSender::new(
                server,
                username,
                password,
                config.email_from.clone(),
            )?)
        }
        MailTransport::Local { host, port } => {
            info!(smtp_host = %host, smtp_port = port, "Using local SMTP for outgoing mail");
            Arc::new(SmtpEmailSender::new_local(
                host,
                *port,
                config.email_from.clone(),
            ))
        }
        MailTransport::Log => {
            tracing::warn!("MAIL_TRANSPORT=log: verification emails are logged, not delivered");
            Arc::new(LogEmailSender::new())
        }
    };

    Ok(sender)
}

#[cfg(not(tarpaulin_include))]
async fn load_template(config: &AppConfig) -> anyhow::Result<VerificationTemplate> {
    match &config.email_verification_template {
        Some(path) => {
            let source = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read email template {}", path.display()))?;
            info!(template = %path.display(), "Loaded verification email template");
            Ok(VerificationTemplate::from_source(&source)?)
        }
        None => Ok(VerificationTemplate::builtin()?),
    }
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting application...");

    config::load_env_files();
    let config = AppConfig::from_env()?;

    // Database connection
    let mut opt = ConnectOptions::new(config.database_url.clone());
    opt.max_connections(50)
        .min_connections(10)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let conn = Database::connect(opt)
        .await
        .context("Failed to connect to database")?;
    let db_arc = Arc::new(conn);

    // Mail
    let mail_service: Arc<dyn MailService + Send + Sync> = Arc::new(VerificationMailer::new(
        build_email_sender(&config)?,
        load_template(&config).await?,
        config.email_verification_subject.clone(),
        config.email_verification_expiry_hours,
    ));

    // Tokens
    let token_service: Arc<dyn EmailVerificationTokenService + Send + Sync> =
        Arc::new(EmailVerificationTokenManager::new(
            EmailVerificationTokenRepositoryPostgres::new(Arc::clone(&db_arc)),
            chrono::Duration::try_hours(config.email_verification_expiry_hours)
                .context("EMAIL_VERIFICATION_EXPIRY_HOURS is out of range")?,
        ));

    // Listeners
    let registration_publisher = ApplicationEventPublisher::<OnUserRegistrationCompleteEvent>::new()
        .with_listener(Arc::new(OnUserRegistrationCompleteListener::new(
            Arc::clone(&token_service),
            Arc::clone(&mail_service),
        )));
    let regenerate_publisher = ApplicationEventPublisher::<OnRegenerateEmailVerificationEvent>::new()
        .with_listener(Arc::new(OnRegenerateEmailVerificationListener::new(
            Arc::clone(&mail_service),
        )));

    let confirmation_url = RedirectUrl::from_base(&config.public_url, CONFIRMATION_PATH)
        .with_context(|| format!("APP_PUBLIC_URL '{}' is not a valid URL", config.public_url))?;
    info!(confirmation_url = %confirmation_url, "Verification links configured");

    // Use cases
    let user_repo = UserRepositoryPostgres::new(Arc::clone(&db_arc));
    let password_hasher = Argon2Hasher::with_params(
        config.argon2.memory_kib,
        config.argon2.iterations,
        config.argon2.parallelism,
    )?;

    let register_user_use_case = RegisterUserUseCase::new(
        user_repo.clone(),
        Arc::new(password_hasher),
        registration_publisher,
        confirmation_url.clone(),
    );
    let confirm_email_use_case =
        ConfirmEmailUseCase::new(user_repo.clone(), Arc::clone(&token_service));
    let resend_email_verification_use_case = ResendEmailVerificationUseCase::new(
        user_repo,
        token_service,
        regenerate_publisher,
        confirmation_url,
    );

    let state = AppState {
        register_user_use_case: Arc::new(register_user_use_case),
        confirm_email_use_case: Arc::new(confirm_email_use_case),
        resend_email_verification_use_case: Arc::new(resend_email_verification_use_case),
    };

    let db_for_server = Arc::clone(&db_arc);

    info!(server_url = %config.server_url, "Server listening");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&db_for_server)))
            .app_data(custom_json_config())
            .app_data(custom_query_config())
            .configure(init_routes)
    })
    .bind(&config.server_url)?
    .run()
    .await?;

    Ok(())
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Auth
    cfg.service(crate::auth::adapter::incoming::web::routes::register_user_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::confirm_registration_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::resend_registration_token_handler);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e:#}");
    }
}
