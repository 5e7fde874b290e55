//! Axum middleware for token auth and role gates

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared::error::{AppError, ErrorCode};

use super::{Identity, jwt};
use crate::state::AppState;

/// Extract and verify the bearer token, inserting an [`Identity`] extension
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::not_authenticated().into_response())?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::not_authenticated().into_response())?;

    let claims = jwt::decode_token(token, &state.jwt_secret)
        .map_err(|e| e.into_response())?;

    request.extensions_mut().insert(Identity {
        user_id: claims.sub,
        role: claims.role,
    });

    Ok(next.run(request).await)
}

/// Reject callers without the Staff (or Admin) role; runs after [`auth_middleware`]
pub async fn require_staff(request: Request, next: Next) -> Result<Response, Response> {
    require_role(&request, |identity| identity.role.is_staff(), ErrorCode::StaffRequired)?;
    Ok(next.run(request).await)
}

/// Reject callers without the Admin role; runs after [`auth_middleware`]
pub async fn require_admin(request: Request, next: Next) -> Result<Response, Response> {
    require_role(&request, |identity| identity.role.is_admin(), ErrorCode::AdminRequired)?;
    Ok(next.run(request).await)
}

fn require_role(
    request: &Request,
    allowed: impl Fn(&Identity) -> bool,
    code: ErrorCode,
) -> Result<(), Response> {
    let identity = request
        .extensions()
        .get::<Identity>()
        .ok_or_else(|| AppError::not_authenticated().into_response())?;
    if allowed(identity) {
        Ok(())
    } else {
        Err(AppError::new(code).into_response())
    }
}
