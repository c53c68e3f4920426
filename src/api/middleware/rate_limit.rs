//! Rate limiting middleware using a token bucket.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::GlobalKeyExtractor,
};

/// Creates the process-wide rate limiter.
///
/// A single bucket is shared by all clients: the limit protects the
/// backing stores, not individual callers, so no per-IP keying. Requests
/// exceeding the limit receive `429 Too Many Requests`.
///
/// # Arguments
///
/// - `per_second` - sustained refill rate
/// - `burst` - bucket capacity
pub fn layer(
    per_second: u64,
    burst: u32,
) -> GovernorLayer<GlobalKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(GlobalKeyExtractor)
            .per_second(per_second)
            .burst_size(burst)
            .finish()
            .unwrap(),
    );

    GovernorLayer::new(governor_conf)
}
