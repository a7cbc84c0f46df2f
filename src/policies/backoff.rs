//! # Backoff policy for reconnect attempts.
//!
//! [`BackoffPolicy`] controls how retry delays grow after repeated failures
//! of the same class. The delay for attempt `n` (1-based) is
//! `base × (n − 1)²`: zero on the first retry, then rapidly increasing
//! spacing tuned around observed rate-limit reset windows rather than a
//! generic exponential curve.
//!
//! Two parameterizations exist, selected by [`FailureClass`]:
//! - **rate limited** (429): `base = 60 s`, unbounded attempts — every 429
//!   received extends the window during which rate limiting stays in effect,
//!   so the caller keeps retrying until a non-rate-limited outcome occurs;
//! - **transient HTTP** (other transport failures, including not-found):
//!   `base = 5 s`, capped at 7 attempts, after which the failure surfaces
//!   out of the policy layer.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use firetap::BackoffPolicy;
//!
//! let policy = BackoffPolicy::transient_http();
//!
//! // First retry waits nothing.
//! assert_eq!(policy.delay(1), Duration::ZERO);
//!
//! // Attempt 4 — 5 × (4 − 1)² = 45 s.
//! assert_eq!(policy.delay(4), Duration::from_secs(45));
//!
//! // The eighth consecutive failure exhausts the policy.
//! assert!(policy.is_exhausted(8));
//! ```

use std::time::Duration;

use crate::error::FailureClass;

/// Quadratic retry backoff policy.
#[derive(Clone, Copy, Debug)]
pub struct BackoffPolicy {
    /// Base wait multiplied by the squared retry index.
    pub base: Duration,
    /// Attempt ceiling; `None` retries indefinitely.
    pub max_attempts: Option<u32>,
}

impl BackoffPolicy {
    /// Policy for 429 responses: 60 s base, no retry ceiling.
    #[must_use]
    pub fn rate_limited() -> Self {
        Self {
            base: Duration::from_secs(60),
            max_attempts: None,
        }
    }

    /// Policy for other transport failures: 5 s base, at most 7 attempts.
    #[must_use]
    pub fn transient_http() -> Self {
        Self {
            base: Duration::from_secs(5),
            max_attempts: Some(7),
        }
    }

    /// Selects the policy for a failure class.
    ///
    /// Returns `None` for classes with no policy-level wait; those failures
    /// are handled directly by the supervisor loop.
    pub fn for_class(class: FailureClass) -> Option<Self> {
        match class {
            FailureClass::RateLimited => Some(Self::rate_limited()),
            FailureClass::TransientHttp => Some(Self::transient_http()),
            _ => None,
        }
    }

    /// Computes the delay for the given attempt number (1-based).
    ///
    /// `delay(n) = base × (n − 1)²`; attempt 0 is treated as the first
    /// attempt. The squared index saturates instead of overflowing, so very
    /// large attempt numbers clamp to the largest representable delay.
    pub fn delay(&self, attempt: u32) -> Duration {
        let n = u64::from(attempt.saturating_sub(1));
        let squared = n.saturating_mul(n).min(u64::from(u32::MAX)) as u32;
        self.base.saturating_mul(squared)
    }

    /// True once `attempt` has passed the ceiling (never for unbounded
    /// policies).
    pub fn is_exhausted(&self, attempt: u32) -> bool {
        self.max_attempts.is_some_and(|max| attempt > max)
    }
}
