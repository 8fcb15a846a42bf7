use crate::{
    cli::globals::GlobalArgs,
    ensaluti::{
        auth::{AuthClient, AuthOutcome, LoginRequest},
        handlers::{see_other, valid_email, RedirectQuery},
        redirect::{normalize, resolve},
    },
};
use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, instrument};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct UserLogin {
    email: String,
    password: String,
}

#[utoipa::path(
    post,
    path= "/login",
    params(RedirectQuery),
    request_body = UserLogin,
    responses (
        (status = 303, description = "Login successful, Location points at the resolved application URL"),
        (status = 400, description = "Missing or invalid payload"),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Authentication backend unreachable"),
    ),
    tag= "login"
)]
// axum handler for login
#[instrument(skip_all)]
pub async fn login(
    auth: Extension<Arc<AuthClient>>,
    globals: Extension<GlobalArgs>,
    query: Query<RedirectQuery>,
    payload: Option<Json<UserLogin>>,
) -> Response {
    let user: UserLogin = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    debug!("login attempt: {}", user.email);

    if !valid_email(&user.email) {
        error!("Invalid email");

        return (StatusCode::BAD_REQUEST, "Invalid email".to_string()).into_response();
    }

    if user.password.is_empty() {
        return (StatusCode::BAD_REQUEST, "Missing password".to_string()).into_response();
    }

    // backend and portal agree on the canonical target
    let path = normalize(query.redirect.as_deref());

    let request = LoginRequest {
        email: &user.email,
        password: &user.password,
    };

    match auth.login(&path, &request).await {
        Ok(AuthOutcome::Success { cookies }) => {
            let target = resolve(&globals.domains, query.redirect.as_deref());

            debug!("Login successful, redirecting to {}", target);

            see_other(&target, &cookies).into_response()
        }

        Ok(AuthOutcome::Failure { status, reason }) => {
            debug!("Login rejected: {}", reason);

            (status, reason).into_response()
        }

        Err(e) => {
            error!("Error reaching authentication backend: {:?}", e);

            (
                StatusCode::BAD_GATEWAY,
                "Authentication service unavailable".to_string(),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_login_deserializes_credentials() -> anyhow::Result<()> {
        let user: UserLogin =
            serde_json::from_value(serde_json::json!({"email": "jane@example.com", "password": "s3cret"}))?;
        assert_eq!(user.email, "jane@example.com");
        assert_eq!(user.password, "s3cret");
        Ok(())
    }
}
