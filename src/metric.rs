//! The closed set of metric kinds a registry can host.

use std::fmt::{self, Display};
use std::io::{self, Write};
use std::sync::Arc;

use crate::counter::Counter;
use crate::gauge::Gauge;

/// Any metric that can be registered under a name.
///
/// The variant set is closed on purpose: consumers of a registry must know how
/// to interpret and serialize every value they can encounter, so new metric
/// kinds are added here rather than through open-ended dynamic dispatch. The
/// typed accessors ([`as_counter`](Metric::as_counter),
/// [`as_gauge`](Metric::as_gauge)) are the variant-match operations the
/// registry uses to detect a name registered under a different kind.
#[derive(Debug, Clone)]
pub enum Metric {
    /// An atomically mutable unsigned counter.
    Counter(Arc<Counter>),
    /// A callback-backed gauge.
    Gauge(Arc<Gauge>),
}

/// Discriminant of a [`Metric`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    /// The [`Metric::Counter`] variant.
    Counter,
    /// The [`Metric::Gauge`] variant.
    Gauge,
}

impl Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricKind::Counter => write!(f, "counter"),
            MetricKind::Gauge => write!(f, "gauge"),
        }
    }
}

impl Metric {
    /// Returns the kind of this metric.
    pub fn kind(&self) -> MetricKind {
        match self {
            Metric::Counter(_) => MetricKind::Counter,
            Metric::Gauge(_) => MetricKind::Gauge,
        }
    }

    /// Returns the underlying counter, or `None` for any other kind.
    pub fn as_counter(&self) -> Option<Arc<Counter>> {
        match self {
            Metric::Counter(counter) => Some(Arc::clone(counter)),
            _ => None,
        }
    }

    /// Returns the underlying gauge, or `None` for any other kind.
    pub fn as_gauge(&self) -> Option<Arc<Gauge>> {
        match self {
            Metric::Gauge(gauge) => Some(Arc::clone(gauge)),
            _ => None,
        }
    }

    /// Writes this metric as one exposition line with the given prefix.
    pub fn marshal_to<W: Write>(&self, prefix: &str, w: &mut W) -> io::Result<()> {
        match self {
            Metric::Counter(counter) => counter.marshal_to(prefix, w),
            Metric::Gauge(gauge) => gauge.marshal_to(prefix, w),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        let counter = Metric::Counter(Arc::new(Counter::new()));
        let gauge = Metric::Gauge(Arc::new(Gauge::new(|| 0.0)));

        assert_eq!(counter.kind(), MetricKind::Counter);
        assert_eq!(gauge.kind(), MetricKind::Gauge);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(MetricKind::Counter.to_string(), "counter");
        assert_eq!(MetricKind::Gauge.to_string(), "gauge");
    }

    #[test]
    fn test_as_counter() {
        let inner = Arc::new(Counter::new());
        inner.set(5);

        let metric = Metric::Counter(Arc::clone(&inner));
        let counter = metric.as_counter().unwrap();
        assert_eq!(counter.get(), 5);

        let gauge = Metric::Gauge(Arc::new(Gauge::new(|| 0.0)));
        assert!(gauge.as_counter().is_none());
    }

    #[test]
    fn test_as_gauge() {
        let metric = Metric::Gauge(Arc::new(Gauge::new(|| 9.0)));
        assert_eq!(metric.as_gauge().unwrap().get(), 9.0);

        let counter = Metric::Counter(Arc::new(Counter::new()));
        assert!(counter.as_gauge().is_none());
    }

    #[test]
    fn test_as_counter_shares_instance() {
        let metric = Metric::Counter(Arc::new(Counter::new()));
        let a = metric.as_counter().unwrap();
        let b = metric.as_counter().unwrap();

        a.set(123);
        assert_eq!(b.get(), 123);
    }

    #[test]
    fn test_marshal_to_dispatch() {
        let counter = Metric::Counter(Arc::new(Counter::new()));
        let gauge = Metric::Gauge(Arc::new(Gauge::new(|| 2.5)));

        let mut buf = Vec::new();
        counter.marshal_to("c", &mut buf).unwrap();
        gauge.marshal_to("g", &mut buf).unwrap();
        assert_eq!(buf, b"c 0\ng 2.5\n");
    }
}
