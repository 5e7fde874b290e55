//! Order endpoints — member checkout plus the staff pickup desk
//!
//! Placing an order:
//! 1. Run the checkout transaction (stock, pricing, claim code, cart clear)
//! 2. Fire-and-forget the confirmation email
//! 3. Publish a pickup alert to staff consoles
//!
//! Steps 2 and 3 happen after commit and never fail the request.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::Deserialize;
use shared::error::{ApiResponse, AppError};
use shared::models::{CompletedPickup, Order, OrderReceipt, OrderWithItems};

use crate::auth::Identity;
use crate::db;
use crate::live::PickupEvent;
use crate::orders;
use crate::state::AppState;

type ApiResult<T> = Result<Json<T>, AppError>;

/// POST /api/orders
pub async fn place(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<OrderReceipt> {
    let receipt = orders::place_order(&state.pool, identity.user_id).await?;

    // Confirmation email: delivery failure is logged, never surfaced
    match db::users::get(&state.pool, identity.user_id).await {
        Ok(user) => {
            let mailer = state.mailer.clone();
            let email_receipt = receipt.clone();
            tokio::spawn(async move {
                if let Err(e) = mailer
                    .send_order_confirmation(&user.email, &user.display_name, &email_receipt)
                    .await
                {
                    tracing::warn!(
                        order_id = email_receipt.order_id,
                        "Order confirmation email failed: {e}"
                    );
                }
            });
        }
        Err(e) => {
            tracing::warn!(order_id = receipt.order_id, "Could not load user for email: {e}");
        }
    }

    state.pickup_hub.publish(PickupEvent {
        order_id: receipt.order_id,
        claim_code: receipt.claim_code.clone(),
        total_amount: receipt.total_amount,
        item_count: receipt.item_count,
    });

    Ok(Json(receipt))
}

/// GET /api/orders
pub async fn mine(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Vec<OrderWithItems>> {
    let orders = orders::orders_by_user(&state.pool, identity.user_id).await?;
    Ok(Json(orders))
}

/// POST /api/orders/{id}/cancel
pub async fn cancel(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(order_id): Path<i64>,
) -> ApiResult<ApiResponse<()>> {
    orders::cancel_order(
        &state.pool,
        order_id,
        identity.user_id,
        identity.role.is_staff(),
    )
    .await?;
    Ok(Json(ApiResponse::ok()))
}

// ── Staff pickup desk ──

/// GET /api/staff/orders/pending
pub async fn pending(State(state): State<AppState>) -> ApiResult<Vec<Order>> {
    let orders = orders::pending_orders(&state.pool).await?;
    Ok(Json(orders))
}

/// GET /api/staff/orders/claim/{code}
pub async fn by_claim_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> ApiResult<OrderWithItems> {
    let order = orders::order_by_claim_code(&state.pool, &code).await?;
    Ok(Json(order))
}

#[derive(Debug, Deserialize)]
pub struct CompleteOrder {
    pub claim_code: String,
}

/// POST /api/staff/orders/complete
pub async fn complete(
    State(state): State<AppState>,
    Json(data): Json<CompleteOrder>,
) -> ApiResult<CompletedPickup> {
    let pickup = orders::complete_order(&state.pool, &data.claim_code).await?;
    Ok(Json(pickup))
}
