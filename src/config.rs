//! Backend address configuration
//!
//! The base URL is read from the environment once per process and never changes
//! afterwards.

use once_cell::sync::Lazy;

/// Environment variable selecting the backend base URL
pub const API_URL_ENV: &str = "GHL_API_URL";

/// Backend used when nothing is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

static BASE_URL: Lazy<String> = Lazy::new(|| {
    let configured = std::env::var(API_URL_ENV).ok();
    let url = resolve_base_url(configured.as_deref());
    tracing::debug!("Resolved backend base URL: {}", url);
    url
});

/// Pick the configured URL, or the default when it is absent or empty.
pub fn resolve_base_url(configured: Option<&str>) -> String {
    match configured {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => DEFAULT_BASE_URL.to_string(),
    }
}

/// Base URL for this process
pub fn base_url() -> &'static str {
    &BASE_URL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_uses_default() {
        assert_eq!(resolve_base_url(None), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_empty_uses_default() {
        assert_eq!(resolve_base_url(Some("")), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_configured_is_kept_verbatim() {
        assert_eq!(
            resolve_base_url(Some("https://api.example.com/")),
            "https://api.example.com/"
        );
    }
}
