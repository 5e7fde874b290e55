//! Book model

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// Book entity
///
/// `discount_percentage` / `discount_start` / `discount_end` are only meaningful
/// when `on_sale` is true and the current time falls inside the window; use
/// [`Book::effective_price`] rather than reading `price` directly at checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub isbn: String,
    pub description: Option<String>,
    /// Price in currency unit
    pub price: f64,
    pub stock: i64,
    pub on_sale: bool,
    /// Sale discount percentage (0-100)
    pub discount_percentage: Option<f64>,
    /// Sale window start (Unix millis)
    pub discount_start: Option<i64>,
    /// Sale window end (Unix millis)
    pub discount_end: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Book {
    /// Whether the book's sale discount is active at `now`
    pub fn sale_active(&self, now: i64) -> bool {
        self.on_sale
            && self.discount_percentage.is_some()
            && self.discount_start.is_some_and(|s| s <= now)
            && self.discount_end.is_some_and(|e| now <= e)
    }

    /// Unit price at `now`, honouring an active sale window, rounded to 2 dp
    pub fn effective_price(&self, now: i64) -> f64 {
        let price = Decimal::from_f64(self.price).unwrap_or_default();
        let effective = if self.sale_active(now) {
            let pct = Decimal::from_f64(self.discount_percentage.unwrap_or(0.0))
                .unwrap_or_default();
            price * (Decimal::ONE_HUNDRED - pct) / Decimal::ONE_HUNDRED
        } else {
            price
        };
        effective
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .to_f64()
            .unwrap_or(self.price)
    }
}

/// Payload for creating a book
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookCreate {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub isbn: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i64,
    #[serde(default)]
    pub on_sale: bool,
    pub discount_percentage: Option<f64>,
    pub discount_start: Option<i64>,
    pub discount_end: Option<i64>,
}

/// Payload for updating a book (None fields are left unchanged)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub on_sale: Option<bool>,
    pub discount_percentage: Option<f64>,
    pub discount_start: Option<i64>,
    pub discount_end: Option<i64>,
}

/// Catalog listing filters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookQuery {
    /// Free-text search over title/author
    pub q: Option<String>,
    pub genre: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_book() -> Book {
        Book {
            id: 1,
            title: "Test".into(),
            author: "Author".into(),
            genre: "Fiction".into(),
            isbn: "978-0000000000".into(),
            description: None,
            price: 20.0,
            stock: 10,
            on_sale: false,
            discount_percentage: None,
            discount_start: None,
            discount_end: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn effective_price_without_sale() {
        assert_eq!(base_book().effective_price(1_000), 20.0);
    }

    #[test]
    fn effective_price_inside_window() {
        let mut book = base_book();
        book.on_sale = true;
        book.discount_percentage = Some(25.0);
        book.discount_start = Some(100);
        book.discount_end = Some(200);
        assert_eq!(book.effective_price(150), 15.0);
    }

    #[test]
    fn sale_fields_ignored_outside_window() {
        let mut book = base_book();
        book.on_sale = true;
        book.discount_percentage = Some(25.0);
        book.discount_start = Some(100);
        book.discount_end = Some(200);
        assert_eq!(book.effective_price(201), 20.0);
    }

    #[test]
    fn sale_fields_ignored_when_not_on_sale() {
        let mut book = base_book();
        book.discount_percentage = Some(50.0);
        book.discount_start = Some(0);
        book.discount_end = Some(i64::MAX);
        assert_eq!(book.effective_price(1), 20.0);
    }
}
