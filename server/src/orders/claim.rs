//! Claim-code generation
//!
//! Claim codes are short, human-presentable, and unique across the full order
//! history (cancelled orders keep their codes, so codes are never reused).
//! Uniqueness is probed inside the placement write transaction — the write
//! lock is already held, so the probe cannot race — and the UNIQUE constraint
//! on `orders.claim_code` is the ultimate safety net.

use rand::Rng;
use shared::error::AppError;
use sqlx::{Sqlite, Transaction};

use crate::error::ServiceResult;

/// Code alphabet: uppercase alphanumerics minus the ambiguous 0/O/1/I
const ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Claim code length (32^8 ≈ 1.1e12 combinations)
pub const CODE_LENGTH: usize = 8;

const MAX_ATTEMPTS: usize = 16;

/// Generate a random candidate code
pub fn generate_code() -> String {
    let mut rng = rand::thread_rng();
    (0..CODE_LENGTH)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Produce a code not yet present in the order history, regenerating on
/// collision. Must be called inside the placement write transaction.
pub async fn assign_unique_code(tx: &mut Transaction<'_, Sqlite>) -> ServiceResult<String> {
    for _ in 0..MAX_ATTEMPTS {
        let code = generate_code();
        let taken: Option<i64> =
            sqlx::query_scalar("SELECT 1 FROM orders WHERE claim_code = ?1")
                .bind(&code)
                .fetch_optional(&mut **tx)
                .await?;
        if taken.is_none() {
            return Ok(code);
        }
    }
    // 16 straight collisions in a 1.1e12 space means something is broken
    Err(AppError::internal("claim code space exhausted").into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_have_expected_shape() {
        for _ in 0..100 {
            let code = generate_code();
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(code.bytes().all(|b| ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn codes_avoid_ambiguous_characters() {
        for _ in 0..100 {
            let code = generate_code();
            assert!(!code.contains(['0', 'O', '1', 'I']));
        }
    }
}
