use std::fmt;
use url::Url;

/// Absolute URL a verification link points at, before the token is attached.
///
/// `query_param` appends (it never replaces an existing parameter) and
/// percent-encodes the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectUrl {
    url: Url,
}

impl RedirectUrl {
    pub fn parse(value: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            url: Url::parse(value)?,
        })
    }

    /// Joins `path` under `base` without dropping a path prefix already on
    /// the base (`https://host/app` + `/confirm` -> `https://host/app/confirm`).
    pub fn from_base(base: &str, path: &str) -> Result<Self, url::ParseError> {
        let joined = format!(
            "{}/{}",
            base.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Self::parse(&joined)
    }

    pub fn query_param(mut self, name: &str, value: &str) -> Self {
        self.url.query_pairs_mut().append_pair(name, value);
        self
    }

    pub fn to_uri_string(&self) -> String {
        self.url.to_string()
    }
}

impl fmt::Display for RedirectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}
