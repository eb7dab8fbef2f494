use governor::clock::{Clock, DefaultClock};
use governor::middleware::NoOpMiddleware;
use governor::state::keyed::DashMapStateStore;
use governor::{Quota, RateLimiter};
use std::net::{IpAddr, Ipv4Addr};
use std::num::NonZeroU32;
use std::sync::Arc;

type KeyedLimiter<C> =
    RateLimiter<IpAddr, DashMapStateStore<IpAddr>, C, NoOpMiddleware<<C as Clock>::Instant>>;

/// Per-client quota for form submissions. Clients without a known address share one bucket.
pub struct SubmissionRateLimiter<C: Clock = DefaultClock> {
    limiter: Arc<KeyedLimiter<C>>,
}

impl<C: Clock> Clone for SubmissionRateLimiter<C> {
    fn clone(&self) -> Self {
        SubmissionRateLimiter {
            limiter: self.limiter.clone(),
        }
    }
}

impl SubmissionRateLimiter {
    pub fn per_minute(max_burst: NonZeroU32) -> Self {
        SubmissionRateLimiter {
            limiter: Arc::new(RateLimiter::keyed(Quota::per_minute(max_burst))),
        }
    }
}

impl<C: Clock> SubmissionRateLimiter<C> {
    pub fn with_clock(max_burst: NonZeroU32, clock: &C) -> Self {
        SubmissionRateLimiter {
            limiter: Arc::new(RateLimiter::dashmap_with_clock(Quota::per_minute(max_burst), clock)),
        }
    }

    pub fn check(&self, ip: Option<IpAddr>) -> bool {
        let key = ip.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        self.limiter.check_key(&key).is_ok()
    }

    /// Drops buckets that have fully refilled, so idle clients stop taking memory.
    pub fn prune(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    pub fn tracked_clients(&self) -> usize {
        self.limiter.len()
    }
}
