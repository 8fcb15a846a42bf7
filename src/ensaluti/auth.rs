//! Client for the external authentication backend.
//!
//! Credentials are forwarded as JSON together with the normalized redirect as
//! a query parameter, so backend and portal agree on the canonical target.
//! Transport errors surface as `Err`; everything the backend answers becomes
//! an [`AuthOutcome`].

use crate::ensaluti::APP_USER_AGENT;
use anyhow::Result;
use reqwest::{header::SET_COOKIE, Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

#[derive(Debug, Clone)]
pub struct AuthClient {
    client: Client,
    base_url: String,
}

/// Outcome of one authentication attempt.
///
/// Cookies carry the backend's `Set-Cookie` values so the portal can forward
/// the SSO session to the browser along with the redirect.
#[derive(Debug)]
pub enum AuthOutcome {
    Success { cookies: Vec<String> },
    Failure { status: StatusCode, reason: String },
}

#[derive(Serialize, Debug)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Serialize, Debug)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

impl AuthClient {
    /// # Errors
    /// Return error if the underlying HTTP client cannot be built
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder().user_agent(APP_USER_AGENT).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// # Errors
    /// Return error if the backend cannot be reached
    #[instrument(skip_all)]
    pub async fn login(&self, redirect: &str, payload: &LoginRequest<'_>) -> Result<AuthOutcome> {
        self.submit("/login", redirect, payload).await
    }

    /// # Errors
    /// Return error if the backend cannot be reached
    #[instrument(skip_all)]
    pub async fn register(
        &self,
        redirect: &str,
        payload: &RegisterRequest<'_>,
    ) -> Result<AuthOutcome> {
        self.submit("/register", redirect, payload).await
    }

    async fn submit<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        redirect: &str,
        payload: &T,
    ) -> Result<AuthOutcome> {
        let url = Url::parse_with_params(
            &format!("{}{endpoint}", self.base_url),
            [("redirect", redirect)],
        )?;

        debug!("Submitting credentials to {}", url);

        let response = self.client.post(url).json(payload).send().await?;

        let status = response.status();

        let cookies = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok().map(str::to_string))
            .collect();

        let body = if status.is_success() {
            // a successful answer must be JSON
            response.json::<Value>().await?
        } else {
            // bare or empty error bodies are tolerated
            response.json::<Value>().await.unwrap_or(Value::Null)
        };

        Ok(outcome(status, &body, cookies))
    }
}

// failure is a non-2xx status or an explicit success:false
fn outcome(status: StatusCode, body: &Value, cookies: Vec<String>) -> AuthOutcome {
    if status.is_success() && body["success"].as_bool() != Some(false) {
        return AuthOutcome::Success { cookies };
    }

    let status = if status.is_success() {
        StatusCode::UNAUTHORIZED
    } else {
        status
    };

    AuthOutcome::Failure {
        status,
        reason: failure_reason(body),
    }
}

// prefer detail, fallback message, fallback generic text
fn failure_reason(body: &Value) -> String {
    body["detail"]
        .as_str()
        .or_else(|| body["message"].as_str())
        .unwrap_or("Authentication failed")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn outcome_fails_on_explicit_success_false() {
        let result = outcome(StatusCode::OK, &json!({"success": true}), vec![]);
        assert!(matches!(result, AuthOutcome::Success { .. }));

        // a 2xx without the flag counts as accepted
        let result = outcome(StatusCode::OK, &json!({}), vec![]);
        assert!(matches!(result, AuthOutcome::Success { .. }));

        let result = outcome(StatusCode::OK, &json!({"success": false}), vec![]);
        let AuthOutcome::Failure { status, .. } = result else {
            panic!("expected failure");
        };
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn outcome_keeps_backend_status_on_errors() {
        let result = outcome(
            StatusCode::CONFLICT,
            &json!({"detail": "User already exists"}),
            vec![],
        );
        let AuthOutcome::Failure { status, reason } = result else {
            panic!("expected failure");
        };
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(reason, "User already exists");
    }

    #[test]
    fn outcome_treats_success_flag_on_errors_as_failure() {
        let result = outcome(
            StatusCode::INTERNAL_SERVER_ERROR,
            &json!({"success": true}),
            vec![],
        );
        assert!(matches!(result, AuthOutcome::Failure { .. }));
    }

    #[test]
    fn outcome_carries_cookies_on_success() {
        let cookies = vec!["sso=abc; Path=/; HttpOnly".to_string()];
        let result = outcome(StatusCode::OK, &json!({"success": true}), cookies);
        let AuthOutcome::Success { cookies } = result else {
            panic!("expected success");
        };
        assert_eq!(cookies, ["sso=abc; Path=/; HttpOnly"]);
    }

    #[test]
    fn failure_reason_prefers_detail_over_message() {
        assert_eq!(
            failure_reason(&json!({"detail": "Invalid credentials", "message": "nope"})),
            "Invalid credentials"
        );
        assert_eq!(failure_reason(&json!({"message": "nope"})), "nope");
        assert_eq!(failure_reason(&Value::Null), "Authentication failed");
    }

    #[test]
    fn new_trims_trailing_slash() -> Result<()> {
        let client = AuthClient::new("http://auth.tld:30500/api/auth/")?;
        assert_eq!(client.base_url, "http://auth.tld:30500/api/auth");
        Ok(())
    }
}
