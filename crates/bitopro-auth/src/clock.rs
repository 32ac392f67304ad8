//! Nonce clock abstraction
//!
//! The default signing body embeds a wall-clock nonce in milliseconds.
//! The clock is an explicit dependency so tests can sign deterministically;
//! production callers should stick with [`SystemClock`], which the exchange
//! expects to move forward between requests.

use std::time::{SystemTime, UNIX_EPOCH};

/// Source of millisecond nonces
pub trait Clock: Send + Sync {
    /// Current time in milliseconds since the Unix epoch
    fn now_millis(&self) -> u64;
}

/// Wall-clock time, the production nonce source
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_millis() as u64
    }
}

/// Fixed clock for reproducible signing in tests
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now_millis(&self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_plausible() {
        // 2020-01-01 in milliseconds
        assert!(SystemClock.now_millis() > 1_577_836_800_000);
    }

    #[test]
    fn test_fixed_clock_is_fixed() {
        let clock = FixedClock(1000);
        assert_eq!(clock.now_millis(), clock.now_millis());
        assert_eq!(clock.now_millis(), 1000);
    }
}
