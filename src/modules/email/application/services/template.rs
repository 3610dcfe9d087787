use tera::{Context, Tera};

use crate::email::application::ports::incoming::MailError;

const VERIFICATION_TEMPLATE_NAME: &str = "verification_email.html";

const VERIFICATION_TEMPLATE: &str = r#"<p>Hi,</p>
<p>Thanks for signing up! Please confirm that this is your email address.</p>
<p>
    <a href="{{ confirmation_url }}" style="
        display: inline-block;
        padding: 10px 20px;
        background-color: #007BFF;
        color: white;
        text-decoration: none;
        border-radius: 5px;
    ">Verify Your Email</a>
</p>
<p>If the button does not work, paste this link into your browser:<br>{{ confirmation_url }}</p>
<p><strong>Note:</strong> This link is valid for {{ expiry_hours }} hours.</p>
"#;

/// Verification mail body rendered with tera.
///
/// The template is registered under an `.html` name so every value is
/// autoescaped. A variable missing from the context fails the render.
#[derive(Debug, Clone)]
pub struct VerificationTemplate {
    tera: Tera,
}

impl VerificationTemplate {
    pub fn builtin() -> Result<Self, MailError> {
        Self::from_source(VERIFICATION_TEMPLATE)
    }

    pub fn from_source(source: &str) -> Result<Self, MailError> {
        let mut tera = Tera::default();
        tera.add_raw_template(VERIFICATION_TEMPLATE_NAME, source)
            .map_err(|e| MailError::Template(format!("Failed to add verification template: {}", e)))?;

        Ok(Self { tera })
    }

    pub fn render(&self, confirmation_url: &str, expiry_hours: i64) -> Result<String, MailError> {
        let mut context = Context::new();
        context.insert("confirmation_url", confirmation_url);
        context.insert("expiry_hours", &expiry_hours);

        self.tera
            .render(VERIFICATION_TEMPLATE_NAME, &context)
            .map_err(|e| {
                MailError::Template(format!("Failed to render verification template: {:?}", e))
            })
    }
}
