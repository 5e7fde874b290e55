//! Order pricing: discount policy and money helpers
//!
//! All monetary arithmetic is done with `Decimal` and converted to `f64` only
//! at the storage/serialization edge. The discount policy is a pure function
//! of the cart size and the buyer's completed-order count; recomputing with
//! the same inputs always yields the same fraction.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Cart size (total units) at which the bulk discount applies
pub const BULK_ITEM_THRESHOLD: i64 = 5;

/// Completed-order count above which the loyalty discount applies
/// (strictly greater than)
pub const LOYALTY_ORDER_THRESHOLD: i64 = 10;

/// Convert f64 to Decimal for precise arithmetic
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64, rounded to currency precision
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or(0.0)
}

/// Round to currency precision (2 dp, midpoint away from zero)
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Compute the order-level discount fraction.
///
/// - 5% when the cart holds `BULK_ITEM_THRESHOLD` or more units
/// - a further, stackable 10% once the buyer has more than
///   `LOYALTY_ORDER_THRESHOLD` completed orders
///
/// The fractions are additive (both conditions met = 15% off the subtotal).
pub fn compute_discount(cart_item_count: i64, completed_order_count: i64) -> Decimal {
    let mut fraction = Decimal::ZERO;
    if cart_item_count >= BULK_ITEM_THRESHOLD {
        fraction += Decimal::new(5, 2); // 0.05
    }
    if completed_order_count > LOYALTY_ORDER_THRESHOLD {
        fraction += Decimal::new(10, 2); // 0.10
    }
    fraction
}

/// Split an order-level discount across items in proportion to their
/// subtotals, rounded to currency precision.
///
/// The remainder after rounding is assigned to the last item so the shares
/// always sum exactly to `total_discount`. Purely for display; the order
/// total is computed from the un-split discount.
pub fn allocate_discount(item_subtotals: &[Decimal], total_discount: Decimal) -> Vec<Decimal> {
    if item_subtotals.is_empty() || total_discount.is_zero() {
        return vec![Decimal::ZERO; item_subtotals.len()];
    }

    let order_subtotal: Decimal = item_subtotals.iter().sum();
    if order_subtotal.is_zero() {
        let mut shares = vec![Decimal::ZERO; item_subtotals.len()];
        if let Some(last) = shares.last_mut() {
            *last = round_money(total_discount);
        }
        return shares;
    }

    let mut shares = Vec::with_capacity(item_subtotals.len());
    let mut allocated = Decimal::ZERO;
    for (idx, subtotal) in item_subtotals.iter().enumerate() {
        let share = if idx + 1 == item_subtotals.len() {
            // Last item absorbs the rounding remainder
            round_money(total_discount - allocated)
        } else {
            round_money(subtotal / order_subtotal * total_discount)
        };
        allocated += share;
        shares.push(share);
    }
    shares
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    #[test]
    fn bulk_discount_at_threshold() {
        assert_eq!(compute_discount(5, 0), dec("0.05"));
    }

    #[test]
    fn no_discount_below_threshold() {
        assert_eq!(compute_discount(4, 0), Decimal::ZERO);
    }

    #[test]
    fn discounts_stack() {
        assert_eq!(compute_discount(5, 11), dec("0.15"));
    }

    #[test]
    fn loyalty_boundary_is_strictly_greater() {
        assert_eq!(compute_discount(1, 10), Decimal::ZERO);
        assert_eq!(compute_discount(1, 11), dec("0.10"));
    }

    #[test]
    fn discount_is_deterministic() {
        let a = compute_discount(7, 12);
        let b = compute_discount(7, 12);
        assert_eq!(a, b);
    }

    #[test]
    fn allocation_sums_exactly() {
        // 1/3 splits would not round cleanly without the remainder rule
        let subtotals = vec![dec("10.00"), dec("10.00"), dec("10.00")];
        let shares = allocate_discount(&subtotals, dec("1.00"));
        assert_eq!(shares.iter().sum::<Decimal>(), dec("1.00"));
        assert_eq!(shares[0], dec("0.33"));
        assert_eq!(shares[1], dec("0.33"));
        assert_eq!(shares[2], dec("0.34"));
    }

    #[test]
    fn allocation_is_proportional() {
        let subtotals = vec![dec("60.00"), dec("30.00")];
        let shares = allocate_discount(&subtotals, dec("4.50"));
        assert_eq!(shares[0], dec("3.00"));
        assert_eq!(shares[1], dec("1.50"));
    }

    #[test]
    fn zero_discount_allocates_zeros() {
        let subtotals = vec![dec("60.00"), dec("30.00")];
        let shares = allocate_discount(&subtotals, Decimal::ZERO);
        assert!(shares.iter().all(|s| s.is_zero()));
    }

    #[test]
    fn worked_example_from_storefront_copy() {
        // 3 x $20 + 2 x $15 -> 5 units, 5% off $90 = $4.50
        let subtotal = dec("60.00") + dec("30.00");
        let fraction = compute_discount(5, 0);
        let discount = round_money(subtotal * fraction);
        assert_eq!(discount, dec("4.50"));
        assert_eq!(subtotal - discount, dec("85.50"));
    }
}
