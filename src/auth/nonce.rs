//! Nonce generation for Indodax API authentication.
//!
//! Every private call carries a `nonce` parameter that must be strictly
//! greater than the one used on the previous call with the same API key.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Trait for providing nonces for authenticated requests.
///
/// The nonce must be strictly increasing for each request. A provider must
/// not be shared between clients that use different API keys, and two
/// independent providers must not be used with the same key.
pub trait NonceProvider: Send + Sync {
    /// Generate the next nonce value.
    ///
    /// This value must be greater than any previously returned value.
    fn next_nonce(&self) -> u64;
}

/// Microseconds since the UNIX epoch, bumped to stay strictly increasing.
///
/// If the wall clock stalls or steps backwards the provider keeps counting
/// up from the last value it handed out.
#[derive(Debug, Default)]
pub struct IncreasingNonce {
    last_nonce: AtomicU64,
}

impl IncreasingNonce {
    /// Create a new increasing nonce provider.
    pub fn new() -> Self {
        Self {
            last_nonce: AtomicU64::new(0),
        }
    }

    /// Create a provider that never returns a value at or below `floor`.
    ///
    /// Useful when the exchange has already seen a larger nonce for the key.
    /// Nonces saturate at `u64::MAX`, so a floor at the maximum keeps
    /// returning `u64::MAX` and the exchange will reject the calls.
    pub fn with_floor(floor: u64) -> Self {
        Self {
            last_nonce: AtomicU64::new(floor),
        }
    }

    fn current_time_micros() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_micros() as u64
    }
}

impl NonceProvider for IncreasingNonce {
    fn next_nonce(&self) -> u64 {
        let now = Self::current_time_micros();
        let previous = self
            .last_nonce
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last.saturating_add(1)))
            })
            .unwrap_or_else(|last| last);
        now.max(previous.saturating_add(1))
    }
}
