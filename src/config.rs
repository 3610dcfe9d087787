use lettre::message::Mailbox;
use std::path::PathBuf;

const DEFAULT_SERVER_URL: &str = "127.0.0.1:8080";
const DEFAULT_EXPIRY_HOURS: i64 = 24;
const MAX_EXPIRY_HOURS: i64 = 24 * 365;
const DEFAULT_EMAIL_FROM: &str = "no-reply@localhost";
const DEFAULT_SUBJECT: &str = "Email Verification";
const DEFAULT_SMTP_HOST: &str = "localhost";
const DEFAULT_SMTP_PORT: u16 = 1025;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// How verification mails leave the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailTransport {
    /// Authenticated relay (production).
    Smtp {
        server: String,
        username: String,
        password: String,
    },
    /// Plain SMTP without TLS, e.g. Mailpit.
    Local { host: String, port: u16 },
    /// Logged and kept in memory, never delivered.
    Log,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argon2Config {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for Argon2Config {
    fn default() -> Self {
        // Budget VPS friendly: 4MB memory, 3 iterations, 1 thread
        Self {
            memory_kib: 4 * 1024,
            iterations: 3,
            parallelism: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub server_url: String,
    pub database_url: String,
    pub public_url: String,
    pub email_verification_expiry_hours: i64,
    pub mail_transport: MailTransport,
    pub email_from: Mailbox,
    pub email_verification_subject: String,
    pub email_verification_template: Option<PathBuf>,
    pub argon2: Argon2Config,
}

impl AppConfig {
    /// Reads the process environment. Call after the `.env` files are loaded.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &'static str| var(name).ok_or(ConfigError::Missing(name));

        let server_url = var("SERVER_URL").unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
        let database_url = required("DATABASE_URL")?;
        let public_url = var("APP_PUBLIC_URL")
            .unwrap_or_else(|| format!("http://{}", server_url))
            .trim_end_matches('/')
            .to_string();

        let email_verification_expiry_hours = parse_or(
            "EMAIL_VERIFICATION_EXPIRY_HOURS",
            var("EMAIL_VERIFICATION_EXPIRY_HOURS"),
            DEFAULT_EXPIRY_HOURS,
        )?;
        if !(1..=MAX_EXPIRY_HOURS).contains(&email_verification_expiry_hours) {
            return Err(ConfigError::Invalid {
                name: "EMAIL_VERIFICATION_EXPIRY_HOURS",
                value: email_verification_expiry_hours.to_string(),
            });
        }

        let mail_transport = match var("MAIL_TRANSPORT")
            .map(|v| v.to_lowercase())
            .as_deref()
        {
            None | Some("log") => MailTransport::Log,
            Some("local") => MailTransport::Local {
                host: var("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
                port: parse_or("SMTP_PORT", var("SMTP_PORT"), DEFAULT_SMTP_PORT)?,
            },
            Some("smtp") => MailTransport::Smtp {
                server: required("SMTP_SERVER")?,
                username: required("SMTP_USERNAME")?,
                password: required("SMTP_PASSWORD")?,
            },
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "MAIL_TRANSPORT",
                    value: other.to_string(),
                })
            }
        };

        let email_from = var("EMAIL_FROM").unwrap_or_else(|| DEFAULT_EMAIL_FROM.to_string());
        let email_from = email_from
            .parse::<Mailbox>()
            .map_err(|_| ConfigError::Invalid {
                name: "EMAIL_FROM",
                value: email_from.clone(),
            })?;

        let defaults = Argon2Config::default();
        let argon2 = Argon2Config {
            memory_kib: parse_or(
                "ARGON2_MEMORY_KIB",
                var("ARGON2_MEMORY_KIB"),
                defaults.memory_kib,
            )?,
            iterations: parse_or(
                "ARGON2_ITERATIONS",
                var("ARGON2_ITERATIONS"),
                defaults.iterations,
            )?,
            parallelism: parse_or(
                "ARGON2_PARALLELISM",
                var("ARGON2_PARALLELISM"),
                defaults.parallelism,
            )?,
        };

        Ok(Self {
            server_url,
            database_url,
            public_url,
            email_verification_expiry_hours,
            mail_transport,
            email_from,
            email_verification_subject: var("EMAIL_VERIFICATION_SUBJECT")
                .unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
            email_verification_template: var("EMAIL_VERIFICATION_TEMPLATE").map(PathBuf::from),
            argon2,
        })
    }

    #[cfg(test)]
    fn from_map(vars: &std::collections::HashMap<&str, &str>) -> Result<Self, ConfigError> {
        Self::from_lookup(|name| vars.get(name).map(|v| v.to_string()))
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

/// Loads `.env.{RUST_ENV}` and falls back to `.env`.
pub fn load_env_files() {
    let env = std::env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());

    let env_file = format!(".env.{}", env);
    if dotenvy::from_filename(&env_file).is_err() {
        dotenvy::dotenv().ok();
    }
}
