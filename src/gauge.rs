//! Callback-backed gauge metric.

use std::fmt::Debug;
use std::io::{self, Write};

/// A gauge whose value is produced by a user-supplied callback.
///
/// Unlike [`Counter`](crate::Counter), a `Gauge` holds no state of its own:
/// every read invokes the callback and reports whatever it returns. This fits
/// measurements that already live somewhere else in the process, such as queue
/// depths, cache sizes, or uptimes.
///
/// The callback must be `Send + Sync` since gauges are read from whichever
/// thread drives exposition. It should return quickly; it is invoked while
/// serializing the registry.
///
/// # Examples
///
/// ```rust
/// use registro::Gauge;
///
/// let gauge = Gauge::new(|| 3.5);
/// assert_eq!(gauge.get(), 3.5);
/// ```
pub struct Gauge {
    f: Box<dyn Fn() -> f64 + Send + Sync>,
}

impl Gauge {
    /// Creates a gauge reading its value from `f`.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> f64 + Send + Sync + 'static,
    {
        Gauge { f: Box::new(f) }
    }

    /// Invokes the callback and returns its result.
    #[inline]
    pub fn get(&self) -> f64 {
        (self.f)()
    }

    /// Writes this gauge as one exposition line, `"<prefix> <value>\n"`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use registro::Gauge;
    ///
    /// let gauge = Gauge::new(|| 1.5);
    ///
    /// let mut buf = Vec::new();
    /// gauge.marshal_to("queue_fill_ratio", &mut buf).unwrap();
    /// assert_eq!(buf, b"queue_fill_ratio 1.5\n");
    /// ```
    pub fn marshal_to<W: Write>(&self, prefix: &str, w: &mut W) -> io::Result<()> {
        writeln!(w, "{} {}", prefix, self.get())
    }
}

impl Debug for Gauge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Gauge").field(&self.get()).finish()
    }
}
