pub mod health;
pub use self::health::health;

pub mod user_register;
pub use self::user_register::register;

pub mod user_login;
pub use self::user_login::login;

// common functions for the handlers
use axum::http::{
    header::{LOCATION, SET_COOKIE},
    HeaderMap, HeaderValue, StatusCode,
};
use regex::Regex;
use serde::Deserialize;
use utoipa::IntoParams;

/// Optional `redirect` query parameter shared by the login and registration
/// endpoints.
#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RedirectQuery {
    /// Untrusted redirect target, normalized and mapped before use
    pub redirect: Option<String>,
}

pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").map_or(false, |re| re.is_match(email))
}

pub fn valid_username(username: &str) -> bool {
    username.trim().chars().count() >= 3
}

/// First password rule the candidate violates, if any
pub fn password_issue(password: &str) -> Option<&'static str> {
    if password.chars().count() < 8 {
        return Some("Password must be at least 8 characters");
    }

    if !Regex::new(r"[A-Z]").map_or(false, |re| re.is_match(password)) {
        return Some("Password must contain at least one uppercase letter");
    }

    if !Regex::new(r#"[!@#$%^&*()_+\-=\[\]{};':"\\|,.<>/?]"#).map_or(false, |re| re.is_match(password))
    {
        return Some("Password must contain at least one special character");
    }

    if !Regex::new(r"[0-9]").map_or(false, |re| re.is_match(password)) {
        return Some("Password must contain at least one digit");
    }

    None
}

/// Redirect response carrying the backend's session cookies to the browser.
/// Called at most once per successful authentication.
pub(crate) fn see_other(target: &str, cookies: &[String]) -> (StatusCode, HeaderMap) {
    let mut headers = HeaderMap::new();

    if let Ok(value) = HeaderValue::from_str(target) {
        headers.insert(LOCATION, value);
    }

    for cookie in cookies {
        if let Ok(value) = HeaderValue::from_str(cookie) {
            headers.append(SET_COOKIE, value);
        }
    }

    (StatusCode::SEE_OTHER, headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email() {
        assert!(valid_email("jane@example.com"));
        assert!(valid_email("jane.doe@example.co"));
        assert!(!valid_email("jane@example"));
        assert!(!valid_email("jane example.com"));
        assert!(!valid_email(""));
    }

    #[test]
    fn test_valid_username() {
        assert!(valid_username("jan"));
        assert!(valid_username("janedoe"));
        assert!(!valid_username("jo"));
        assert!(!valid_username("  j  "));
    }

    #[test]
    fn test_password_issue_per_rule() {
        assert_eq!(
            password_issue("Ab1!"),
            Some("Password must be at least 8 characters")
        );
        assert_eq!(
            password_issue("lowercase1!"),
            Some("Password must contain at least one uppercase letter")
        );
        assert_eq!(
            password_issue("Nospecial1"),
            Some("Password must contain at least one special character")
        );
        assert_eq!(
            password_issue("Nodigits!!"),
            Some("Password must contain at least one digit")
        );
        assert_eq!(password_issue("Valid-pass1"), None);
    }

    #[test]
    fn test_see_other_sets_location_and_cookies() {
        let cookies = vec!["sso=abc; Path=/; HttpOnly".to_string()];
        let (status, headers) = see_other("http://apps.tld:30091/dashboard", &cookies);

        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(
            headers.get(LOCATION).and_then(|v| v.to_str().ok()),
            Some("http://apps.tld:30091/dashboard")
        );
        assert_eq!(
            headers.get(SET_COOKIE).and_then(|v| v.to_str().ok()),
            Some("sso=abc; Path=/; HttpOnly")
        );
    }
}
