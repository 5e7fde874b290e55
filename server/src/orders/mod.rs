//! Order lifecycle service
//!
//! Orders move Pending → Completed | Cancelled; both end states are terminal.
//! Every state-changing operation here runs as one `BEGIN IMMEDIATE`
//! transaction: stock movement, order/item rows, and the status transition
//! commit or roll back together, and concurrent writers serialize on the
//! write lock so stock checks always see committed state.
//!
//! Stock is reserved at placement time (decremented immediately), completion
//! leaves stock untouched, and cancellation restores it.

pub mod claim;

use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::models::{
    Book, CompletedPickup, Order, OrderItem, OrderReceipt, OrderStatus, OrderWithItems,
};
use shared::util::now_millis;
use sqlx::SqlitePool;

use crate::db;
use crate::error::ServiceResult;
use crate::pricing;

const ORDER_COLUMNS: &str =
    "id, user_id, status, claim_code, total_amount, discount_applied, order_date, completed_at";

const ITEM_COLUMNS: &str = "id, order_id, book_id, title, quantity, unit_price, discount";

/// Cart line joined with its book, loaded inside the placement transaction
#[derive(Debug, sqlx::FromRow)]
struct CheckoutRow {
    #[sqlx(flatten)]
    book: Book,
    quantity: i64,
}

/// Place an order from the user's current cart.
///
/// Re-validates stock at commit time (not at add-to-cart time), snapshots
/// current effective prices into order items, applies the discount policy,
/// assigns a unique claim code, decrements stock, and clears the cart — all
/// in one transaction. Insufficient stock on any line rejects the whole
/// order; no partial fulfilment.
pub async fn place_order(pool: &SqlitePool, user_id: i64) -> ServiceResult<OrderReceipt> {
    let now = now_millis();
    let mut tx = db::begin_immediate(pool).await?;

    let lines: Vec<CheckoutRow> = sqlx::query_as(
        r#"
        SELECT b.id, b.title, b.author, b.genre, b.isbn, b.description, b.price,
               b.stock, b.on_sale, b.discount_percentage, b.discount_start,
               b.discount_end, b.created_at, b.updated_at,
               c.quantity
        FROM cart_entries c
        JOIN books b ON b.id = c.book_id
        WHERE c.user_id = ?1
        ORDER BY c.added_at, b.id
        "#,
    )
    .bind(user_id)
    .fetch_all(&mut *tx)
    .await?;

    if lines.is_empty() {
        return Err(ErrorCode::EmptyCart.into());
    }

    let completed_orders: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM orders WHERE user_id = ?1 AND status = ?2",
    )
    .bind(user_id)
    .bind(OrderStatus::Completed)
    .fetch_one(&mut *tx)
    .await?;

    // Price snapshot: current effective prices, never cart-add-time prices
    let unit_prices: Vec<Decimal> = lines
        .iter()
        .map(|l| pricing::to_decimal(l.book.effective_price(now)))
        .collect();
    let line_subtotals: Vec<Decimal> = lines
        .iter()
        .zip(&unit_prices)
        .map(|(l, price)| *price * Decimal::from(l.quantity))
        .collect();
    let subtotal: Decimal = line_subtotals.iter().sum();
    let total_units: i64 = lines.iter().map(|l| l.quantity).sum();

    let fraction = pricing::compute_discount(total_units, completed_orders);
    let discount_total = pricing::round_money(subtotal * fraction);
    let total = subtotal - discount_total;
    let item_discounts = pricing::allocate_discount(&line_subtotals, discount_total);

    // Reserve stock line by line; the conditional UPDATE is the stock check.
    for line in &lines {
        let updated = sqlx::query(
            "UPDATE books SET stock = stock - ?1, updated_at = ?2
             WHERE id = ?3 AND stock >= ?1",
        )
        .bind(line.quantity)
        .bind(now)
        .bind(line.book.id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::new(ErrorCode::InsufficientStock)
                .with_detail("book_id", line.book.id)
                .with_detail("title", line.book.title.clone())
                .into());
        }
    }

    let claim_code = claim::assign_unique_code(&mut tx).await?;

    let order_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO orders (user_id, status, claim_code, total_amount, discount_applied, order_date)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        RETURNING id
        "#,
    )
    .bind(user_id)
    .bind(OrderStatus::Pending)
    .bind(&claim_code)
    .bind(pricing::to_f64(total))
    .bind(pricing::to_f64(discount_total))
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    for ((line, unit_price), discount) in lines.iter().zip(&unit_prices).zip(&item_discounts) {
        sqlx::query(
            r#"
            INSERT INTO order_items (order_id, book_id, title, quantity, unit_price, discount)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(order_id)
        .bind(line.book.id)
        .bind(&line.book.title)
        .bind(line.quantity)
        .bind(pricing::to_f64(*unit_price))
        .bind(pricing::to_f64(*discount))
        .execute(&mut *tx)
        .await?;
    }

    sqlx::query("DELETE FROM cart_entries WHERE user_id = ?1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(
        order_id,
        user_id,
        claim_code = %claim_code,
        total = pricing::to_f64(total),
        "Order placed"
    );

    Ok(OrderReceipt {
        order_id,
        claim_code,
        total_amount: pricing::to_f64(total),
        discount_applied: pricing::to_f64(discount_total),
        item_count: total_units,
    })
}

/// Complete a pending order by claim code (staff pickup desk).
///
/// No stock change — the units were reserved at placement. Returns the owner
/// and the order lines for the receipt/notification.
pub async fn complete_order(pool: &SqlitePool, claim_code: &str) -> ServiceResult<CompletedPickup> {
    let mut tx = db::begin_immediate(pool).await?;

    // '=' on TEXT uses the BINARY collation: claim codes are case-sensitive
    let order: Option<Order> = sqlx::query_as(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE claim_code = ?1"
    ))
    .bind(claim_code)
    .fetch_optional(&mut *tx)
    .await?;

    let order = order.ok_or(ErrorCode::ClaimCodeNotFound)?;
    require_pending(&order)?;

    let now = now_millis();
    sqlx::query("UPDATE orders SET status = ?1, completed_at = ?2 WHERE id = ?3")
        .bind(OrderStatus::Completed)
        .bind(now)
        .bind(order.id)
        .execute(&mut *tx)
        .await?;

    let items: Vec<OrderItem> = sqlx::query_as(&format!(
        "SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id = ?1 ORDER BY id"
    ))
    .bind(order.id)
    .fetch_all(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(order_id = order.id, user_id = order.user_id, "Order completed");

    Ok(CompletedPickup {
        order_id: order.id,
        user_id: order.user_id,
        items,
    })
}

/// Cancel a pending order, restoring the reserved stock.
///
/// Allowed for the order's owner, or for staff acting on any order. Terminal
/// orders cannot be cancelled; exactly one terminal transition ever wins.
pub async fn cancel_order(
    pool: &SqlitePool,
    order_id: i64,
    caller_id: i64,
    caller_is_staff: bool,
) -> ServiceResult<()> {
    let mut tx = db::begin_immediate(pool).await?;

    let order: Option<Order> = sqlx::query_as(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?1"
    ))
    .bind(order_id)
    .fetch_optional(&mut *tx)
    .await?;

    let order = order.ok_or(ErrorCode::OrderNotFound)?;
    if order.user_id != caller_id && !caller_is_staff {
        return Err(AppError::forbidden("cannot cancel another user's order").into());
    }
    require_pending(&order)?;

    let now = now_millis();
    sqlx::query("UPDATE orders SET status = ?1, completed_at = ?2 WHERE id = ?3")
        .bind(OrderStatus::Cancelled)
        .bind(now)
        .bind(order.id)
        .execute(&mut *tx)
        .await?;

    // Restore every reserved unit
    sqlx::query(
        r#"
        UPDATE books SET
            stock = stock + (
                SELECT quantity FROM order_items
                WHERE order_id = ?1 AND book_id = books.id
            ),
            updated_at = ?2
        WHERE id IN (SELECT book_id FROM order_items WHERE order_id = ?1)
        "#,
    )
    .bind(order.id)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(order_id = order.id, user_id = order.user_id, "Order cancelled");
    Ok(())
}

fn require_pending(order: &Order) -> Result<(), AppError> {
    match order.status {
        OrderStatus::Pending => Ok(()),
        OrderStatus::Completed => Err(AppError::new(ErrorCode::OrderAlreadyCompleted)),
        OrderStatus::Cancelled => Err(AppError::new(ErrorCode::OrderAlreadyCancelled)),
    }
}

// ── Read-only projections ──

/// All pending orders, oldest first (staff order queue)
pub async fn pending_orders(pool: &SqlitePool) -> ServiceResult<Vec<Order>> {
    let orders: Vec<Order> = sqlx::query_as(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE status = ?1 ORDER BY order_date, id"
    ))
    .bind(OrderStatus::Pending)
    .fetch_all(pool)
    .await?;
    Ok(orders)
}

/// A user's orders with their lines, newest first
pub async fn orders_by_user(pool: &SqlitePool, user_id: i64) -> ServiceResult<Vec<OrderWithItems>> {
    let orders: Vec<Order> = sqlx::query_as(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = ?1 ORDER BY order_date DESC, id DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let mut result = Vec::with_capacity(orders.len());
    for order in orders {
        let items: Vec<OrderItem> = sqlx::query_as(&format!(
            "SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id = ?1 ORDER BY id"
        ))
        .bind(order.id)
        .fetch_all(pool)
        .await?;
        result.push(OrderWithItems { order, items });
    }
    Ok(result)
}

/// Look up an order (with lines) by claim code, staff view
pub async fn order_by_claim_code(pool: &SqlitePool, claim_code: &str) -> ServiceResult<OrderWithItems> {
    let order: Option<Order> = sqlx::query_as(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE claim_code = ?1"
    ))
    .bind(claim_code)
    .fetch_optional(pool)
    .await?;
    let order = order.ok_or(ErrorCode::ClaimCodeNotFound)?;

    let items: Vec<OrderItem> = sqlx::query_as(&format!(
        "SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id = ?1 ORDER BY id"
    ))
    .bind(order.id)
    .fetch_all(pool)
    .await?;

    Ok(OrderWithItems { order, items })
}

/// Number of completed orders for a user (feeds the loyalty discount)
pub async fn successful_order_count(pool: &SqlitePool, user_id: i64) -> ServiceResult<i64> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM orders WHERE user_id = ?1 AND status = ?2",
    )
    .bind(user_id)
    .bind(OrderStatus::Completed)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// Whether the user has a completed order containing the book.
///
/// Gates review creation; eligibility is never revoked once earned.
pub async fn check_eligibility(pool: &SqlitePool, user_id: i64, book_id: i64) -> ServiceResult<bool> {
    let eligible: i64 = sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM order_items oi
            JOIN orders o ON o.id = oi.order_id
            WHERE o.user_id = ?1 AND oi.book_id = ?2 AND o.status = ?3
        )
        "#,
    )
    .bind(user_id)
    .bind(book_id)
    .bind(OrderStatus::Completed)
    .fetch_one(pool)
    .await?;
    Ok(eligible != 0)
}
