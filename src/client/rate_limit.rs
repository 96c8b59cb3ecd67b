//! Token-bucket gate in front of every outbound request.

use std::fmt;
use std::num::NonZeroU32;

use governor::{DefaultDirectRateLimiter, Quota};
use tracing::debug;

/// Requests per second allowed by [`RateLimiter::default`].
pub const DEFAULT_REQUESTS_PER_SECOND: NonZeroU32 = match NonZeroU32::new(10) {
    Some(rate) => rate,
    None => unreachable!(),
};

/// A token bucket bounding the request rate of every client it is shared with.
///
/// Capacity and refill rate are both `requests_per_second`, so a fresh
/// limiter lets a burst of that many requests through and then one request
/// every `1 / requests_per_second` seconds.
///
/// One limiter is normally created per process and handed to the client
/// wrapped in an [`Arc`](std::sync::Arc); tests build their own so they do not
/// share budget.
pub struct RateLimiter {
    inner: DefaultDirectRateLimiter,
    requests_per_second: NonZeroU32,
}

impl RateLimiter {
    /// A limiter allowing `requests_per_second` requests per second with a
    /// burst of the same size.
    pub fn new(requests_per_second: NonZeroU32) -> Self {
        let quota = Quota::per_second(requests_per_second).allow_burst(requests_per_second);
        Self {
            inner: DefaultDirectRateLimiter::direct(quota),
            requests_per_second,
        }
    }

    /// The configured requests-per-second ceiling, which is also the burst size.
    pub fn requests_per_second(&self) -> NonZeroU32 {
        self.requests_per_second
    }

    /// Take a token without waiting. Returns `false` if the bucket is empty.
    pub fn try_acquire(&self) -> bool {
        self.inner.check().is_ok()
    }

    /// Take a token, waiting for the bucket to refill if it is empty.
    ///
    /// Dropping the returned future abandons the wait without consuming a
    /// token.
    pub async fn acquire(&self) {
        if self.try_acquire() {
            return;
        }
        debug!(
            requests_per_second = self.requests_per_second.get(),
            "Rate limit reached, waiting for a token"
        );
        self.inner.until_ready().await;
    }
}

impl fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RateLimiter")
            .field("requests_per_second", &self.requests_per_second)
            .finish_non_exhaustive()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_REQUESTS_PER_SECOND)
    }
}
