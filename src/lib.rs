//! # Registro - Named Atomic Metrics with a Concurrency-Safe Registry
//!
//! A Rust library providing a process-wide registry of numeric metrics keyed
//! by human-readable names, plus a line-oriented text serialization compatible
//! with the Prometheus exposition convention. Any part of a running process
//! can record measurements under a stable name and later export every
//! registered measurement as text.
//!
//! ## Design
//!
//! The library is built from two components:
//!
//! 1. **[`Counter`]**: a lock-free, atomically mutable 64-bit unsigned value.
//!    Increment, decrement, signed add, absolute set, and read are each a
//!    single atomic instruction on one machine word; wraparound is defined
//!    behavior, which is what lets a counter double as a gauge. The atomic is
//!    cache-line padded ([`crossbeam_utils::CachePadded`]) so hot counters
//!    never share a line.
//!
//! 2. **[`Registry`]**: a name-keyed store of metric instances. A single brief
//!    mutex guards a hash map (uniqueness, O(1) lookup) and an insertion-order
//!    list (deterministic exposition order), always updated together. Once a
//!    caller holds a counter handle, updates never touch the registry lock:
//!    high-frequency counting never contends with the rare act of registering
//!    a new metric.
//!
//! Metric names are either bare identifiers (`requests_total`) or carry a
//! Prometheus-style label set (`requests_total{method="GET"}`). Each distinct
//! label combination is simply a distinct registered name. Names are validated
//! on first registration; a malformed or duplicated name is a bug in the
//! calling code and is reported as a [`RegistryError`] (the default-registry
//! convenience functions escalate it to a panic).
//!
//! ## Quick Start
//!
//! ```rust
//! use registro::Registry;
//!
//! let registry = Registry::new();
//!
//! // Register up front when you can...
//! let requests = registry.new_counter("http_requests_total").unwrap();
//! requests.inc();
//!
//! // ...or lazily from wherever the measurement happens.
//! let errors = registry
//!     .get_or_create_counter(r#"http_errors_total{kind="timeout"}"#)
//!     .unwrap();
//! errors.add(3);
//!
//! // Export everything in registration order.
//! let mut out = Vec::new();
//! registry.write_prometheus(&mut out).unwrap();
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "http_requests_total 1\nhttp_errors_total{kind=\"timeout\"} 3\n"
//! );
//! ```
//!
//! Most applications use the process-wide default registry through the
//! crate-level functions instead of threading a `Registry` around:
//!
//! ```rust
//! let pages = registro::get_or_create_counter("pages_served_total");
//! pages.inc();
//! ```
//!
//! ## Thread Safety
//!
//! Counters are `Send + Sync` and shared via `Arc`; concurrent updates from
//! any number of threads sum modulo 2^64 regardless of interleaving.
//! Concurrent `get_or_create_counter` calls with the same name always resolve
//! to one shared instance. "This name exists" is a globally consistent fact,
//! linearized by the registry lock.
//!
//! ## Metric Kinds
//!
//! | Type | Description | Use Case |
//! |------|-------------|----------|
//! | [`Counter`] | Atomic unsigned counter, usable as a gauge | Request totals, error counts, queue sizes |
//! | [`Gauge`] | Callback evaluated at exposition time | Uptimes, cache sizes, values owned elsewhere |
//!
//! ## Observers
//!
//! The Prometheus text exposition is built in
//! ([`Registry::write_prometheus`]). Additional output formats are gated
//! behind feature flags:
//!
//! | Feature | Module | Description |
//! |---------|--------|-------------|
//! | `serde` | [`snapshot`] | Serializable point-in-time registry captures |
//! | `json` | [`observers::json`] | Serialize a registry to JSON |
//! | `table` | [`observers::table`] | Pretty-print a registry as an ASCII table |
//! | `full` | All of the above | |

pub mod counter;
pub mod error;
pub mod gauge;
pub mod metric;
pub mod observers;
pub mod registry;
pub mod validate;

#[cfg(feature = "serde")]
pub mod snapshot;

pub use counter::Counter;
pub use error::RegistryError;
pub use gauge::Gauge;
pub use metric::{Metric, MetricKind};
pub use registry::{
    default_registry, get_or_create_counter, get_or_create_gauge, new_counter, new_gauge,
    write_prometheus, NamedMetric, Registry,
};
