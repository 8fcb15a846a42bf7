//! Redirect-target resolution for the login and registration flows.
//!
//! The `redirect` query parameter is untrusted. It is reduced to a relative
//! path first, then mapped through a closed table of application origins, so
//! the final navigation target never points at a host taken from user input.

use url::Url;

/// Path used whenever the redirect parameter is absent, blank or malformed.
pub const DEFAULT_REDIRECT: &str = "/dashboard";

/// Closed table of trusted application origins, keyed by the first path
/// segment of the normalized redirect. Exactly one origin is the fallback.
#[derive(Debug, Clone)]
pub struct AppDomainTable {
    eutype: String,
    eucloud: String,
    dashboard: String,
    default_origin: String,
}

impl AppDomainTable {
    #[must_use]
    pub fn new(eutype: &str, eucloud: &str, dashboard: &str, default_origin: &str) -> Self {
        Self {
            eutype: trim_origin(eutype),
            eucloud: trim_origin(eucloud),
            dashboard: trim_origin(dashboard),
            default_origin: trim_origin(default_origin),
        }
    }

    /// Origin for a normalized path, selected by its first non-empty segment.
    /// Unknown segments map to the fallback origin.
    #[must_use]
    pub fn base_for(&self, path: &str) -> &str {
        match path.split('/').find(|segment| !segment.is_empty()) {
            Some("eutype") => &self.eutype,
            Some("eucloud") => &self.eucloud,
            Some("dashboard") => &self.dashboard,
            _ => &self.default_origin,
        }
    }
}

fn trim_origin(origin: &str) -> String {
    origin.trim_end_matches('/').to_string()
}

/// Normalize an untrusted redirect value to a relative path starting with `/`.
///
/// Absolute URLs keep only path and query; anything that fails to parse, is
/// blank or contains control characters falls back to [`DEFAULT_REDIRECT`].
#[must_use]
pub fn normalize(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return DEFAULT_REDIRECT.to_string();
    };

    let trimmed = raw.trim();

    if trimmed.is_empty() || trimmed.chars().any(char::is_control) {
        return DEFAULT_REDIRECT.to_string();
    }

    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        return match Url::parse(trimmed) {
            Ok(url) => match url.query() {
                Some(query) => format!("{}?{query}", url.path()),
                None => url.path().to_string(),
            },
            Err(_) => DEFAULT_REDIRECT.to_string(),
        };
    }

    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Final absolute URL for a raw redirect value: trusted origin plus
/// normalized path.
#[must_use]
pub fn resolve(table: &AppDomainTable, raw: Option<&str>) -> String {
    let path = normalize(raw);

    format!("{}{path}", table.base_for(&path))
}
