//! Authentication and authorization
//!
//! Bearer-token auth: a login issues a signed JWT carrying the user id and
//! role, middleware verifies it and inserts an [`Identity`] extension, and
//! role gates sit on top of that for staff/admin routes.

pub mod jwt;
pub mod middleware;
pub mod password;

use shared::models::Role;

/// Authenticated caller extracted from a verified token
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: i64,
    pub role: Role,
}
