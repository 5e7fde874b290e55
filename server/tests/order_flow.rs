//! End-to-end order lifecycle tests against a real SQLite database
//!
//! Covers the checkout transaction (pricing, stock reservation, claim codes,
//! cart clearing), the terminal state machine, and the review eligibility
//! gate. Each test gets its own file-backed database in a temp directory.

use bookstore_server::{db, orders, pricing};
use shared::error::ErrorCode;
use shared::models::{Book, BookCreate, OrderStatus, ReviewCreate, Role, User};
use sqlx::SqlitePool;
use tempfile::TempDir;

async fn test_pool() -> (SqlitePool, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bookstore.db");
    let pool = db::connect(path.to_str().unwrap()).await.unwrap();
    (pool, dir)
}

async fn member(pool: &SqlitePool, email: &str) -> User {
    db::users::create(pool, email, "hunter2hunter2", "Test Member", Role::Public)
        .await
        .unwrap()
}

async fn book(pool: &SqlitePool, title: &str, price: f64, stock: i64) -> Book {
    db::books::create(
        pool,
        &BookCreate {
            title: title.to_string(),
            author: "Author".to_string(),
            genre: "Fiction".to_string(),
            isbn: format!("isbn-{title}-{price}-{stock}"),
            description: None,
            price,
            stock,
            on_sale: false,
            discount_percentage: None,
            discount_start: None,
            discount_end: None,
        },
    )
    .await
    .unwrap()
}

async fn stock_of(pool: &SqlitePool, book_id: i64) -> i64 {
    db::books::get(pool, book_id).await.unwrap().stock
}

#[tokio::test]
async fn bulk_discount_applies_at_five_units() {
    let (pool, _dir) = test_pool().await;
    let user = member(&pool, "alice@example.com").await;
    let a = book(&pool, "Book A", 20.0, 10).await;
    let b = book(&pool, "Book B", 15.0, 10).await;

    db::cart::add_item(&pool, user.id, a.id, 3).await.unwrap();
    db::cart::add_item(&pool, user.id, b.id, 2).await.unwrap();

    let receipt = orders::place_order(&pool, user.id).await.unwrap();

    // 3×20 + 2×15 = 90, five units triggers the 5% bulk discount
    assert_eq!(receipt.discount_applied, 4.50);
    assert_eq!(receipt.total_amount, 85.50);
    assert_eq!(receipt.item_count, 5);

    // Stock reserved at placement, cart cleared
    assert_eq!(stock_of(&pool, a.id).await, 7);
    assert_eq!(stock_of(&pool, b.id).await, 8);
    assert!(db::cart::get_cart(&pool, user.id).await.unwrap().is_empty());

    // Per-item discount shares sum to the order discount
    let placed = orders::order_by_claim_code(&pool, &receipt.claim_code)
        .await
        .unwrap();
    let share_sum: f64 = placed.items.iter().map(|i| i.discount).sum();
    assert!((share_sum - 4.50).abs() < 1e-9);
}

#[tokio::test]
async fn four_units_get_no_discount() {
    let (pool, _dir) = test_pool().await;
    let user = member(&pool, "bob@example.com").await;
    let a = book(&pool, "Book A", 10.0, 10).await;

    db::cart::add_item(&pool, user.id, a.id, 4).await.unwrap();
    let receipt = orders::place_order(&pool, user.id).await.unwrap();

    assert_eq!(receipt.discount_applied, 0.0);
    assert_eq!(receipt.total_amount, 40.0);
}

#[tokio::test]
async fn loyalty_discount_stacks_after_ten_completed_orders() {
    let (pool, _dir) = test_pool().await;
    let user = member(&pool, "carol@example.com").await;
    let a = book(&pool, "Book A", 10.0, 1000).await;

    // Eleven completed orders earn the 10% loyalty tier (strictly more than ten)
    for _ in 0..11 {
        db::cart::add_item(&pool, user.id, a.id, 1).await.unwrap();
        let receipt = orders::place_order(&pool, user.id).await.unwrap();
        orders::complete_order(&pool, &receipt.claim_code)
            .await
            .unwrap();
    }
    assert_eq!(orders::successful_order_count(&pool, user.id).await.unwrap(), 11);

    // Five units: 5% bulk + 10% loyalty = 15% off 50.00
    db::cart::add_item(&pool, user.id, a.id, 5).await.unwrap();
    let receipt = orders::place_order(&pool, user.id).await.unwrap();
    assert_eq!(receipt.discount_applied, 7.50);
    assert_eq!(receipt.total_amount, 42.50);
}

#[tokio::test]
async fn cancelled_orders_do_not_count_toward_loyalty() {
    let (pool, _dir) = test_pool().await;
    let user = member(&pool, "dave@example.com").await;
    let a = book(&pool, "Book A", 10.0, 1000).await;

    for _ in 0..12 {
        db::cart::add_item(&pool, user.id, a.id, 1).await.unwrap();
        let receipt = orders::place_order(&pool, user.id).await.unwrap();
        orders::cancel_order(&pool, receipt.order_id, user.id, false)
            .await
            .unwrap();
    }

    assert_eq!(orders::successful_order_count(&pool, user.id).await.unwrap(), 0);

    db::cart::add_item(&pool, user.id, a.id, 1).await.unwrap();
    let receipt = orders::place_order(&pool, user.id).await.unwrap();
    assert_eq!(receipt.discount_applied, 0.0);
}

#[tokio::test]
async fn empty_cart_cannot_be_placed() {
    let (pool, _dir) = test_pool().await;
    let user = member(&pool, "erin@example.com").await;

    let err = orders::place_order(&pool, user.id).await.unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::EmptyCart));
}

#[tokio::test]
async fn insufficient_stock_rolls_back_the_whole_order() {
    let (pool, _dir) = test_pool().await;
    let user = member(&pool, "frank@example.com").await;
    let plenty = book(&pool, "Plenty", 10.0, 100).await;
    let scarce = book(&pool, "Scarce", 10.0, 1).await;

    db::cart::add_item(&pool, user.id, plenty.id, 2).await.unwrap();
    db::cart::add_item(&pool, user.id, scarce.id, 1).await.unwrap();

    // Someone else takes the last copy before checkout
    let other = member(&pool, "other@example.com").await;
    db::cart::add_item(&pool, other.id, scarce.id, 1).await.unwrap();
    orders::place_order(&pool, other.id).await.unwrap();

    let err = orders::place_order(&pool, user.id).await.unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::InsufficientStock));

    // Nothing moved: no partial fulfilment, cart intact
    assert_eq!(stock_of(&pool, plenty.id).await, 100);
    assert_eq!(stock_of(&pool, scarce.id).await, 0);
    assert_eq!(db::cart::get_cart(&pool, user.id).await.unwrap().len(), 2);
    assert!(orders::orders_by_user(&pool, user.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn concurrent_checkouts_for_the_last_copy() {
    let (pool, _dir) = test_pool().await;
    let a = member(&pool, "racer-a@example.com").await;
    let b = member(&pool, "racer-b@example.com").await;
    let last = book(&pool, "Last Copy", 25.0, 1).await;

    db::cart::add_item(&pool, a.id, last.id, 1).await.unwrap();
    db::cart::add_item(&pool, b.id, last.id, 1).await.unwrap();

    let (ra, rb) = tokio::join!(
        orders::place_order(&pool, a.id),
        orders::place_order(&pool, b.id),
    );

    // Exactly one checkout wins
    let failures: Vec<_> = [&ra, &rb].into_iter().filter(|r| r.is_err()).collect();
    assert_eq!(failures.len(), 1);
    let err = if ra.is_err() { ra.unwrap_err() } else { rb.unwrap_err() };
    assert_eq!(err.code(), Some(ErrorCode::InsufficientStock));
    assert_eq!(stock_of(&pool, last.id).await, 0);
}

#[tokio::test]
async fn completion_is_keyed_by_claim_code() {
    let (pool, _dir) = test_pool().await;
    let user = member(&pool, "grace@example.com").await;
    let a = book(&pool, "Book A", 20.0, 5).await;

    db::cart::add_item(&pool, user.id, a.id, 2).await.unwrap();
    let receipt = orders::place_order(&pool, user.id).await.unwrap();
    assert_eq!(receipt.claim_code.len(), 8);

    let err = orders::complete_order(&pool, "WRONGC0D").await.unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::ClaimCodeNotFound));

    let pickup = orders::complete_order(&pool, &receipt.claim_code)
        .await
        .unwrap();
    assert_eq!(pickup.order_id, receipt.order_id);
    assert_eq!(pickup.user_id, user.id);
    assert_eq!(pickup.items.len(), 1);

    // Completion hands over reserved units; stock stays where placement left it
    assert_eq!(stock_of(&pool, a.id).await, 3);
}

#[tokio::test]
async fn terminal_states_are_exclusive() {
    let (pool, _dir) = test_pool().await;
    let user = member(&pool, "heidi@example.com").await;
    let a = book(&pool, "Book A", 20.0, 5).await;

    // Completed orders cannot be cancelled
    db::cart::add_item(&pool, user.id, a.id, 1).await.unwrap();
    let receipt = orders::place_order(&pool, user.id).await.unwrap();
    orders::complete_order(&pool, &receipt.claim_code).await.unwrap();
    let err = orders::cancel_order(&pool, receipt.order_id, user.id, false)
        .await
        .unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::OrderAlreadyCompleted));

    // Cancelled orders cannot be picked up
    db::cart::add_item(&pool, user.id, a.id, 1).await.unwrap();
    let receipt = orders::place_order(&pool, user.id).await.unwrap();
    orders::cancel_order(&pool, receipt.order_id, user.id, false)
        .await
        .unwrap();
    let err = orders::complete_order(&pool, &receipt.claim_code)
        .await
        .unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::OrderAlreadyCancelled));
}

#[tokio::test]
async fn cancelling_restores_reserved_stock() {
    let (pool, _dir) = test_pool().await;
    let user = member(&pool, "ivan@example.com").await;
    let a = book(&pool, "Book A", 20.0, 5).await;
    let b = book(&pool, "Book B", 10.0, 5).await;

    db::cart::add_item(&pool, user.id, a.id, 3).await.unwrap();
    db::cart::add_item(&pool, user.id, b.id, 2).await.unwrap();
    let receipt = orders::place_order(&pool, user.id).await.unwrap();
    assert_eq!(stock_of(&pool, a.id).await, 2);
    assert_eq!(stock_of(&pool, b.id).await, 3);

    orders::cancel_order(&pool, receipt.order_id, user.id, false)
        .await
        .unwrap();
    assert_eq!(stock_of(&pool, a.id).await, 5);
    assert_eq!(stock_of(&pool, b.id).await, 5);

    let history = orders::orders_by_user(&pool, user.id).await.unwrap();
    assert_eq!(history[0].order.status, OrderStatus::Cancelled);
}

#[tokio::test]
async fn only_the_owner_or_staff_can_cancel() {
    let (pool, _dir) = test_pool().await;
    let owner = member(&pool, "owner@example.com").await;
    let stranger = member(&pool, "stranger@example.com").await;
    let a = book(&pool, "Book A", 20.0, 5).await;

    db::cart::add_item(&pool, owner.id, a.id, 1).await.unwrap();
    let receipt = orders::place_order(&pool, owner.id).await.unwrap();

    let err = orders::cancel_order(&pool, receipt.order_id, stranger.id, false)
        .await
        .unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::PermissionDenied));

    // Staff may cancel on the customer's behalf
    orders::cancel_order(&pool, receipt.order_id, stranger.id, true)
        .await
        .unwrap();
}

#[tokio::test]
async fn claim_codes_are_unique_across_history() {
    let (pool, _dir) = test_pool().await;
    let user = member(&pool, "judy@example.com").await;
    let a = book(&pool, "Book A", 5.0, 1000).await;

    let mut codes = std::collections::HashSet::new();
    for _ in 0..50 {
        db::cart::add_item(&pool, user.id, a.id, 1).await.unwrap();
        let receipt = orders::place_order(&pool, user.id).await.unwrap();
        assert!(codes.insert(receipt.claim_code.clone()), "duplicate claim code");
        orders::complete_order(&pool, &receipt.claim_code).await.unwrap();
    }
}

#[tokio::test]
async fn snapshot_prices_survive_later_catalog_edits() {
    let (pool, _dir) = test_pool().await;
    let user = member(&pool, "kate@example.com").await;
    let a = book(&pool, "Book A", 20.0, 10).await;

    db::cart::add_item(&pool, user.id, a.id, 1).await.unwrap();
    let receipt = orders::place_order(&pool, user.id).await.unwrap();

    // Reprice the book after placement
    db::books::update(
        &pool,
        a.id,
        &shared::models::BookUpdate {
            price: Some(99.0),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let placed = orders::order_by_claim_code(&pool, &receipt.claim_code)
        .await
        .unwrap();
    assert_eq!(placed.items[0].unit_price, 20.0);
    assert_eq!(placed.order.total_amount, 20.0);
}

#[tokio::test]
async fn sale_price_is_captured_at_checkout() {
    let (pool, _dir) = test_pool().await;
    let user = member(&pool, "liam@example.com").await;
    let now = shared::util::now_millis();

    let a = db::books::create(
        &pool,
        &BookCreate {
            title: "On Sale".to_string(),
            author: "Author".to_string(),
            genre: "Fiction".to_string(),
            isbn: "isbn-on-sale".to_string(),
            description: None,
            price: 40.0,
            stock: 10,
            on_sale: true,
            discount_percentage: Some(25.0),
            discount_start: Some(now - 1_000),
            discount_end: Some(now + 60_000),
        },
    )
    .await
    .unwrap();

    db::cart::add_item(&pool, user.id, a.id, 1).await.unwrap();
    let receipt = orders::place_order(&pool, user.id).await.unwrap();
    assert_eq!(receipt.total_amount, 30.0);
}

#[tokio::test]
async fn review_eligibility_requires_a_completed_order() {
    let (pool, _dir) = test_pool().await;
    let user = member(&pool, "mia@example.com").await;
    let a = book(&pool, "Book A", 20.0, 5).await;

    let review = ReviewCreate {
        comment: "Loved it".to_string(),
        rating: Some(5),
    };

    // No order yet
    let err = db::reviews::create(&pool, user.id, a.id, &review)
        .await
        .unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::ReviewNotEligible));

    // A pending order is not enough
    db::cart::add_item(&pool, user.id, a.id, 1).await.unwrap();
    let receipt = orders::place_order(&pool, user.id).await.unwrap();
    let err = db::reviews::create(&pool, user.id, a.id, &review)
        .await
        .unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::ReviewNotEligible));

    // Pickup unlocks reviewing
    orders::complete_order(&pool, &receipt.claim_code).await.unwrap();
    let created = db::reviews::create(&pool, user.id, a.id, &review)
        .await
        .unwrap();
    assert_eq!(created.rating, Some(5));

    let listed = db::reviews::list_by_book(&pool, a.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].display_name, "Test Member");
}

#[tokio::test]
async fn discount_rounding_matches_the_money_policy() {
    let (pool, _dir) = test_pool().await;
    let user = member(&pool, "nina@example.com").await;
    let a = book(&pool, "Odd Price", 6.66, 100).await;

    db::cart::add_item(&pool, user.id, a.id, 5).await.unwrap();
    let receipt = orders::place_order(&pool, user.id).await.unwrap();

    // 5 × 6.66 = 33.30; 5% = 1.665, rounds half away from zero to 1.67
    assert_eq!(receipt.discount_applied, 1.67);
    assert_eq!(
        pricing::to_decimal(receipt.total_amount) + pricing::to_decimal(receipt.discount_applied),
        pricing::to_decimal(33.30)
    );
}
