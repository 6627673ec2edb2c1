//! Retry and backoff for remote fetches.
//!
//! The policy is shared by every remote source; classification of concrete
//! errors into [`ErrorKind`] lives next to the transport (see
//! [`classify_http_status`] and [`classify_curl_error`]).

mod classify;
mod policy;

pub use classify::{classify_curl_error, classify_http_status};
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};

/// Runs `op` until it succeeds or the policy gives up, sleeping between
/// attempts. `classify` maps each failure to an [`ErrorKind`].
pub fn run_with_retry<T, E, F, C>(policy: &RetryPolicy, classify: C, mut op: F) -> Result<T, E>
where
    F: FnMut() -> Result<T, E>,
    C: Fn(&E) -> ErrorKind,
    E: std::fmt::Display,
{
    let mut attempt = 1u32;
    loop {
        let err = match op() {
            Ok(v) => return Ok(v),
            Err(e) => e,
        };
        match policy.decide(attempt, classify(&err)) {
            RetryDecision::NoRetry => return Err(err),
            RetryDecision::RetryAfter(delay) => {
                tracing::warn!(attempt, ?delay, "attempt failed, retrying: {}", err);
                std::thread::sleep(delay);
                attempt += 1;
            }
        }
    }
}
