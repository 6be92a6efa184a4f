//! Atomic 64-bit counter, the workhorse metric of this crate.
//!
//! This module provides [`Counter`], a lock-free unsigned counter backed by a
//! single `AtomicU64`. All mutating operations use wrapping arithmetic, so a
//! counter can also serve as a bidirectional gauge through [`Counter::dec`],
//! [`Counter::add`] with negative deltas, and [`Counter::set`].

use std::fmt::Debug;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_utils::CachePadded;

/// A thread-safe unsigned 64-bit counter.
///
/// `Counter` holds one atomic word, padded to its own cache line so that two
/// hot counters registered next to each other never contend through false
/// sharing. Every operation is a single atomic instruction; there is no lock
/// anywhere on the counter path.
///
/// Arithmetic wraps modulo 2^64. Decrementing a zero-valued counter yields
/// `u64::MAX`, matching unsigned machine arithmetic. Wraparound is part of the
/// contract, not an error condition, which is what lets the same type act as a
/// gauge.
///
/// # Examples
///
/// Basic usage:
///
/// ```rust
/// use registro::Counter;
///
/// let counter = Counter::new();
/// counter.inc();
/// counter.add(4);
/// assert_eq!(counter.get(), 5);
/// ```
///
/// Multi-threaded usage:
///
/// ```rust
/// use registro::Counter;
/// use std::sync::Arc;
/// use std::thread;
///
/// let counter = Arc::new(Counter::new());
/// let mut handles = vec![];
///
/// for _ in 0..4 {
///     let c = Arc::clone(&counter);
///     handles.push(thread::spawn(move || {
///         for _ in 0..1000 {
///             c.inc();
///         }
///     }));
/// }
///
/// for h in handles {
///     h.join().unwrap();
/// }
///
/// assert_eq!(counter.get(), 4000);
/// ```
pub struct Counter {
    value: CachePadded<AtomicU64>,
}

impl Counter {
    /// Creates a new counter with value zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use registro::Counter;
    ///
    /// let counter = Counter::new();
    /// assert_eq!(counter.get(), 0);
    /// ```
    pub const fn new() -> Self {
        Counter {
            value: CachePadded::new(AtomicU64::new(0)),
        }
    }

    /// Atomically increments the counter by one.
    #[inline]
    pub fn inc(&self) {
        self.value.fetch_add(1, Ordering::Relaxed);
    }

    /// Atomically decrements the counter by one.
    ///
    /// Decrementing a counter holding zero wraps around to `u64::MAX`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use registro::Counter;
    ///
    /// let counter = Counter::new();
    /// counter.dec();
    /// assert_eq!(counter.get(), u64::MAX);
    /// ```
    #[inline]
    pub fn dec(&self) {
        self.value.fetch_sub(1, Ordering::Relaxed);
    }

    /// Atomically adds a signed delta to the counter.
    ///
    /// The delta is reinterpreted as its two's-complement bit pattern, so a
    /// negative delta subtracts with the same wraparound rules as
    /// [`dec`](Counter::dec).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use registro::Counter;
    ///
    /// let counter = Counter::new();
    /// counter.add(10);
    /// counter.add(-3);
    /// assert_eq!(counter.get(), 7);
    /// ```
    #[inline]
    pub fn add(&self, delta: i64) {
        self.value.fetch_add(delta as u64, Ordering::Relaxed);
    }

    /// Atomically overwrites the counter with an absolute value.
    ///
    /// This is how a `Counter` doubles as a gauge: the new value is stored
    /// regardless of what the counter held before.
    #[inline]
    pub fn set(&self, value: u64) {
        self.value.store(value, Ordering::Relaxed);
    }

    /// Atomically reads the current value.
    #[inline]
    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }

    /// Writes this counter as one exposition line, `"<prefix> <value>\n"`.
    ///
    /// The value is read with [`get`](Counter::get) at the moment of the call.
    /// When several metrics are serialized in sequence a concurrent writer may
    /// change the counter between lines; exposition is a best-effort snapshot,
    /// not a transaction.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use registro::Counter;
    ///
    /// let counter = Counter::new();
    /// counter.set(42);
    ///
    /// let mut buf = Vec::new();
    /// counter.marshal_to("requests_total", &mut buf).unwrap();
    /// assert_eq!(buf, b"requests_total 42\n");
    /// ```
    pub fn marshal_to<W: Write>(&self, prefix: &str, w: &mut W) -> io::Result<()> {
        writeln!(w, "{} {}", prefix, self.get())
    }
}

impl Default for Counter {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Counter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Counter").field(&self.get()).finish()
    }
}
