//! Registration errors.

use thiserror::Error;

use crate::metric::MetricKind;

/// Errors raised by registry registration entry points.
///
/// None of these conditions is transient: each one indicates a bug in the
/// calling code (metric names are static literals, and call sites are expected
/// to agree on each name's kind), so there is nothing to retry or recover.
/// The fallible [`Registry`](crate::Registry) methods return them so that the
/// composition root decides how to halt; the crate-level convenience functions
/// on the default registry escalate them to a panic.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The name does not match the naming grammar.
    #[error("invalid metric name {name:?}: {reason}")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// Why the validator rejected it.
        reason: String,
    },

    /// `new_counter`/`new_gauge` was called twice with the same name.
    #[error("metric {name:?} is already registered")]
    DuplicateName {
        /// The name registered twice.
        name: String,
    },

    /// The name is registered under a different metric kind.
    #[error("metric {name:?} is not a {expected}, it is registered as a {found}")]
    KindMismatch {
        /// The contested name.
        name: String,
        /// The kind the caller asked for.
        expected: MetricKind,
        /// The kind actually stored under the name.
        found: MetricKind,
    },
}
