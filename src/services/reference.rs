//! Transaction reference generator.
//!
//! References are the externally visible transaction identifiers:
//! `TXN` + epoch milliseconds + a zero-padded 6-digit tie-breaker drawn
//! from a process-wide sequence with a random starting point.
//!
//! Within one process two calls can never collide: the same millisecond
//! yields distinct sequence values, and a different millisecond yields a
//! distinct prefix. Across processes the `transactions.reference` unique
//! constraint is authoritative; the ledger append retries once with a
//! fresh value on collision.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use rand::Rng;

fn sequence() -> &'static AtomicU64 {
    static SEQUENCE: OnceLock<AtomicU64> = OnceLock::new();
    // Random start so two freshly booted processes don't walk the same
    // suffixes in lockstep.
    SEQUENCE.get_or_init(|| AtomicU64::new(rand::rng().random::<u32>() as u64))
}

/// Produce the next reference.
pub fn next() -> String {
    let millis = Utc::now().timestamp_millis();
    let tie_breaker = sequence().fetch_add(1, Ordering::Relaxed) % 1_000_000;
    format!("TXN{millis}{tie_breaker:06}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn reference_has_expected_shape() {
        let reference = next();
        assert!(reference.starts_with("TXN"));
        let digits = &reference[3..];
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
        // 13 millisecond digits + 6 tie-breaker digits
        assert_eq!(digits.len(), 19);
    }

    #[test]
    fn references_are_unique_under_load() {
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            assert!(seen.insert(next()), "reference collision");
        }
    }

    #[test]
    fn tie_breaker_is_zero_padded() {
        let reference = next();
        // The suffix keeps a fixed width so references sort stably within
        // a millisecond.
        assert_eq!(reference.len(), 22);
    }
}
