//! Account endpoints — registration, login, current user

use axum::{Extension, Json, extract::State};
use shared::error::AppError;
use shared::models::{LoginRequest, LoginResponse, RegisterRequest, Role, User};

use crate::auth::{Identity, jwt};
use crate::db;
use crate::state::AppState;

type ApiResult<T> = Result<Json<T>, AppError>;

/// POST /api/register
pub async fn register(
    State(state): State<AppState>,
    Json(data): Json<RegisterRequest>,
) -> ApiResult<LoginResponse> {
    if data.email.trim().is_empty() || !data.email.contains('@') {
        return Err(AppError::validation("a valid email address is required"));
    }
    if data.password.len() < 8 {
        return Err(AppError::validation(
            "password must be at least 8 characters",
        ));
    }
    if data.display_name.trim().is_empty() {
        return Err(AppError::validation("display name is required"));
    }

    // Self-registration always creates a Public member
    let user = db::users::create(
        &state.pool,
        data.email.trim(),
        &data.password,
        data.display_name.trim(),
        Role::Public,
    )
    .await?;

    let token = jwt::create_token(user.id, user.role, &state.jwt_secret)?;
    Ok(Json(LoginResponse { token, user }))
}

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    Json(data): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let user = db::users::verify_credentials(&state.pool, data.email.trim(), &data.password)
        .await?;
    let token = jwt::create_token(user.id, user.role, &state.jwt_secret)?;
    Ok(Json(LoginResponse { token, user }))
}

/// GET /api/me
pub async fn me(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<User> {
    let user = db::users::get(&state.pool, identity.user_id).await?;
    Ok(Json(user))
}
