use crate::{
    cli::globals::GlobalArgs,
    ensaluti::{
        auth::{AuthClient, AuthOutcome, RegisterRequest},
        handlers::{password_issue, see_other, valid_email, valid_username, RedirectQuery},
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
pub struct UserRegister {
    username: String,
    email: String,
    password: String,
    confirm_password: Option<String>,
}

#[utoipa::path(
    post,
    path= "/register",
    params(RedirectQuery),
    request_body = UserRegister,
    responses (
        (status = 303, description = "Registration successful, Location points at the resolved application URL"),
        (status = 400, description = "Missing or invalid payload"),
        (status = 409, description = "User with the specified username or email already exists"),
        (status = 502, description = "Authentication backend unreachable"),
    ),
    tag= "register"
)]
// axum handler for register
#[instrument(skip_all)]
pub async fn register(
    auth: Extension<Arc<AuthClient>>,
    globals: Extension<GlobalArgs>,
    query: Query<RedirectQuery>,
    payload: Option<Json<UserRegister>>,
) -> Response {
    let user: UserRegister = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    debug!("registration attempt: {}", user.email);

    if !valid_username(&user.username) {
        return (
            StatusCode::BAD_REQUEST,
            "Username must be at least 3 characters".to_string(),
        )
            .into_response();
    }

    if !valid_email(&user.email) {
        error!("Invalid email");

        return (StatusCode::BAD_REQUEST, "Invalid email".to_string()).into_response();
    }

    if let Some(confirm) = &user.confirm_password {
        if *confirm != user.password {
            return (
                StatusCode::BAD_REQUEST,
                "Passwords do not match".to_string(),
            )
                .into_response();
        }
    }

    if let Some(issue) = password_issue(&user.password) {
        return (StatusCode::BAD_REQUEST, issue.to_string()).into_response();
    }

    let path = normalize(query.redirect.as_deref());

    let request = RegisterRequest {
        username: &user.username,
        email: &user.email,
        password: &user.password,
    };

    match auth.register(&path, &request).await {
        Ok(AuthOutcome::Success { cookies }) => {
            let target = resolve(&globals.domains, query.redirect.as_deref());

            debug!("Registration successful, redirecting to {}", target);

            see_other(&target, &cookies).into_response()
        }

        Ok(AuthOutcome::Failure { status, reason }) => {
            debug!("Registration rejected: {}", reason);

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
