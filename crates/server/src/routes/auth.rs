//! Auth route handlers: signup, signin, logout, profile.

use axum::{Json, extract::State};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use clementine_core::Role;

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::middleware::auth::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::models::user::User;
use crate::response::ApiResponse;
use crate::services::AuthService;
use crate::state::AppState;

/// Signup request body.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    /// Defaults to a regular user. Requesting `admin` succeeds at most
    /// once system-wide.
    #[serde(default)]
    pub role: Role,
}

/// Signin request body.
#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

/// Register a new user and establish a session.
#[instrument(skip(state, session, body), fields(email = %body.email))]
pub async fn signup(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<SignupRequest>,
) -> Result<Json<ApiResponse<User>>> {
    let auth = AuthService::new(state.pool());
    let user = auth.register(&body.email, &body.password, body.role).await?;

    login_session(&session, &user).await?;

    tracing::info!(user_id = %user.id, "user registered");
    Ok(ApiResponse::ok_with_message(
        user,
        "User registered successfully",
    ))
}

/// Login with email and password.
#[instrument(skip(state, session, body), fields(email = %body.email))]
pub async fn signin(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<SigninRequest>,
) -> Result<Json<ApiResponse<User>>> {
    if body.email.is_empty() || body.password.is_empty() {
        return Err(AppError::Validation(
            "email and password are required".to_owned(),
        ));
    }

    let auth = AuthService::new(state.pool());
    let user = auth.login(&body.email, &body.password).await?;

    login_session(&session, &user).await?;

    Ok(ApiResponse::ok_with_message(
        user,
        "You have successfully logged in",
    ))
}

/// End the current session.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Json<ApiResponse<()>>> {
    clear_current_user(&session)
        .await
        .map_err(|e| AppError::Internal(format!("failed to clear session: {e}")))?;

    Ok(ApiResponse::ok_with_message((), "Logged out"))
}

/// The current user's profile.
#[instrument(skip(state, current), fields(user_id = %current.id))]
pub async fn profile(
    RequireAuth(current): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<User>>> {
    let auth = AuthService::new(state.pool());
    let user = auth.get_user(current.id).await?;

    Ok(ApiResponse::ok(user))
}

/// Store the identity in the session after signup/signin.
async fn login_session(session: &Session, user: &User) -> Result<()> {
    let current = CurrentUser {
        id: user.id,
        email: user.email.clone(),
        role: user.role,
    };
    set_current_user(session, &current)
        .await
        .map_err(|e| AppError::Internal(format!("failed to persist session: {e}")))
}
