//! Pure failure-classification predicates.
//! One canonical retry predicate is used at every call site so "timeout" and
//! "network" are never conflated differently in different places.

use crate::errors::AppError;

/// Connection failure, DNS failure or a transport-level drop. A non-success
/// transfer status counts as network-shaped for retry purposes.
pub fn is_network_error(e: &AppError) -> bool {
    matches!(e, AppError::Network(_) | AppError::TransferFailed { .. })
}

/// Deadline exceeded. Retryable like a network error but kept distinct for
/// diagnostics.
pub fn is_timeout_error(e: &AppError) -> bool {
    matches!(e, AppError::Timeout(_))
}

/// Authorization rejection or OS permission denial. Retrying cannot change
/// the outcome.
pub fn is_permission_error(e: &AppError) -> bool {
    matches!(e, AppError::Permission(_) | AppError::Unauthenticated)
}

/// The retry predicate handed to RetryEngine by every caller in this crate.
pub fn is_transient_failure(e: &AppError) -> bool {
    (is_network_error(e) || is_timeout_error(e)) && !is_permission_error(e)
}
