//! Cross-origin policy
//!
//! Origins are matched exactly, except entries of the form
//! `https://*.example.com`, which match any subdomain of `example.com` over
//! the same scheme.

use axum::http::HeaderValue;
use axum::http::request::Parts;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Origins allowed when none are configured
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://localhost:8000",
    "http://127.0.0.1:8000",
    "https://editor.wix.com",
    "https://*.wixsite.com",
];

#[derive(Debug, Clone, PartialEq, Eq)]
enum OriginPattern {
    Exact(String),
    Subdomain { scheme: String, suffix: String },
}

impl OriginPattern {
    fn parse(raw: &str) -> Self {
        let raw = raw.trim().trim_end_matches('/');
        match raw.split_once("://*.") {
            Some((scheme, domain)) if !domain.is_empty() => OriginPattern::Subdomain {
                scheme: format!("{scheme}://"),
                suffix: format!(".{domain}"),
            },
            _ => OriginPattern::Exact(raw.to_string()),
        }
    }

    fn matches(&self, origin: &str) -> bool {
        match self {
            OriginPattern::Exact(allowed) => allowed == origin,
            OriginPattern::Subdomain { scheme, suffix } => origin
                .strip_prefix(scheme.as_str())
                .and_then(|host| host.strip_suffix(suffix.as_str()))
                .is_some_and(|sub| !sub.is_empty() && !sub.contains('/')),
        }
    }
}

/// Parsed list of allowed origins
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginPolicy {
    patterns: Vec<OriginPattern>,
}

impl OriginPolicy {
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = origins
            .into_iter()
            .filter(|o| !o.as_ref().trim().is_empty())
            .map(|o| OriginPattern::parse(o.as_ref()))
            .collect();
        Self { patterns }
    }

    /// Parse a comma separated origin list, falling back to the defaults
    pub fn from_list(list: Option<&str>) -> Self {
        match list {
            Some(list) if !list.trim().is_empty() => Self::new(list.split(',')),
            _ => Self::new(DEFAULT_ALLOWED_ORIGINS),
        }
    }

    pub fn is_allowed(&self, origin: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(origin))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Build the tower-http layer enforcing this policy
    ///
    /// Methods and headers are mirrored from the preflight request, and
    /// credentials are allowed.
    pub fn layer(&self) -> CorsLayer {
        let policy = self.clone();
        CorsLayer::new()
            .allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _parts: &Parts| {
                origin.to_str().is_ok_and(|o| policy.is_allowed(o))
            }))
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(true)
    }
}

impl Default for OriginPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_ORIGINS)
    }
}
