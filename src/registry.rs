//! Name-keyed metric registry.
//!
//! A [`Registry`] maps validated metric names to live metric instances and
//! remembers first-registration order for deterministic exposition. Most
//! applications use the process-wide instance behind [`default_registry`] and
//! the crate-level convenience functions; tests and embedded uses construct
//! their own `Registry` so state never leaks between them.
//!
//! Counter mutation is deliberately decoupled from registration: once a caller
//! holds an `Arc<Counter>`, its atomic updates never touch the registry lock.

use std::collections::HashMap;
use std::fmt::Debug;
use std::io::{self, Write};
use std::sync::{Arc, LazyLock};

use parking_lot::Mutex;

use crate::counter::Counter;
use crate::error::RegistryError;
use crate::gauge::Gauge;
use crate::metric::{Metric, MetricKind};
use crate::validate::{validate_metric_name, NameValidator};

/// A metric together with the name it is registered under.
#[derive(Debug)]
pub struct NamedMetric {
    name: String,
    metric: Metric,
}

impl NamedMetric {
    /// Returns the registered name, labels included.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the metric stored under the name.
    pub fn metric(&self) -> &Metric {
        &self.metric
    }

    /// Writes this entry as one exposition line, `"<name> <value>\n"`.
    pub fn marshal_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        self.metric.marshal_to(&self.name, w)
    }
}

/// The map and the order vector are only ever mutated together, under the
/// one registry lock.
#[derive(Default)]
struct Inner {
    by_name: HashMap<String, Arc<NamedMetric>>,
    in_order: Vec<Arc<NamedMetric>>,
}

/// A concurrency-safe registry of named metrics.
///
/// Names are unique for the registry's lifetime; there is no deregistration.
/// Each name is bound to exactly one metric instance, and every caller asking
/// for the same name gets a handle to that same instance.
///
/// # Examples
///
/// ```rust
/// use registro::Registry;
///
/// let registry = Registry::new();
///
/// let requests = registry.new_counter("requests_total").unwrap();
/// requests.inc();
///
/// // Any later lookup resolves to the same counter.
/// let again = registry.get_or_create_counter("requests_total").unwrap();
/// again.inc();
/// assert_eq!(requests.get(), 2);
///
/// let mut out = Vec::new();
/// registry.write_prometheus(&mut out).unwrap();
/// assert_eq!(out, b"requests_total 2\n");
/// ```
pub struct Registry {
    inner: Mutex<Inner>,
    validate: NameValidator,
}

impl Registry {
    /// Creates an empty registry using the default naming grammar.
    pub fn new() -> Self {
        Self::with_validator(validate_metric_name)
    }

    /// Creates an empty registry with a custom name validator.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use registro::Registry;
    ///
    /// // Accept anything non-empty.
    /// fn lax(name: &str) -> Result<(), String> {
    ///     if name.is_empty() {
    ///         Err("empty name".to_string())
    ///     } else {
    ///         Ok(())
    ///     }
    /// }
    ///
    /// let registry = Registry::with_validator(lax);
    /// assert!(registry.new_counter("anything goes").is_ok());
    /// ```
    pub fn with_validator(validate: NameValidator) -> Self {
        Registry {
            inner: Mutex::new(Inner::default()),
            validate,
        }
    }

    /// Registers a fresh counter under `name` and returns it.
    ///
    /// Call this at most once per distinct name, typically during process
    /// initialization. A second registration of the same name is reported as
    /// [`RegistryError::DuplicateName`]: two call sites silently sharing one
    /// counter would corrupt each site's semantics.
    ///
    /// # Errors
    ///
    /// [`RegistryError::InvalidName`] if `name` fails the naming grammar,
    /// [`RegistryError::DuplicateName`] if `name` is already registered.
    pub fn new_counter(&self, name: &str) -> Result<Arc<Counter>, RegistryError> {
        let counter = Arc::new(Counter::new());
        self.register(name, Metric::Counter(Arc::clone(&counter)))?;
        Ok(counter)
    }

    /// Registers a fresh gauge under `name`, reading its value from `f`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`new_counter`](Registry::new_counter).
    pub fn new_gauge<F>(&self, name: &str, f: F) -> Result<Arc<Gauge>, RegistryError>
    where
        F: Fn() -> f64 + Send + Sync + 'static,
    {
        let gauge = Arc::new(Gauge::new(f));
        self.register(name, Metric::Gauge(Arc::clone(&gauge)))?;
        Ok(gauge)
    }

    /// Returns the counter registered under `name`, creating it on first use.
    ///
    /// Concurrent first use from any number of threads resolves to a single
    /// instance: callers race to insert, the loser discards its locally built
    /// counter and adopts the winner's. The found path skips validation, so
    /// steady-state lookups cost one short critical section and a hash probe.
    ///
    /// Prefer [`new_counter`](Registry::new_counter) when registration can
    /// happen up front; holding the returned `Arc` avoids the lookup entirely.
    ///
    /// # Errors
    ///
    /// [`RegistryError::InvalidName`] if `name` is new and fails the naming
    /// grammar, [`RegistryError::KindMismatch`] if `name` is registered under
    /// a different metric kind.
    pub fn get_or_create_counter(&self, name: &str) -> Result<Arc<Counter>, RegistryError> {
        let entry = self.get_or_insert(name, || Metric::Counter(Arc::new(Counter::new())))?;
        entry
            .metric
            .as_counter()
            .ok_or_else(|| RegistryError::KindMismatch {
                name: name.to_string(),
                expected: MetricKind::Counter,
                found: entry.metric.kind(),
            })
    }

    /// Returns the gauge registered under `name`, creating it on first use.
    ///
    /// `f` is only consulted when the gauge does not exist yet; a later caller
    /// with a different callback gets the instance created first.
    ///
    /// # Errors
    ///
    /// Same conditions as [`get_or_create_counter`](Registry::get_or_create_counter),
    /// with the kinds reversed.
    pub fn get_or_create_gauge<F>(&self, name: &str, f: F) -> Result<Arc<Gauge>, RegistryError>
    where
        F: Fn() -> f64 + Send + Sync + 'static,
    {
        let entry = self.get_or_insert(name, || Metric::Gauge(Arc::new(Gauge::new(f))))?;
        entry
            .metric
            .as_gauge()
            .ok_or_else(|| RegistryError::KindMismatch {
                name: name.to_string(),
                expected: MetricKind::Gauge,
                found: entry.metric.kind(),
            })
    }

    /// Unconditional insert used by `new_counter`/`new_gauge`.
    fn register(&self, name: &str, metric: Metric) -> Result<(), RegistryError> {
        self.check_name(name)?;
        let entry = Arc::new(NamedMetric {
            name: name.to_string(),
            metric,
        });

        let mut inner = self.inner.lock();
        if inner.by_name.contains_key(name) {
            return Err(RegistryError::DuplicateName {
                name: name.to_string(),
            });
        }
        inner.by_name.insert(name.to_string(), Arc::clone(&entry));
        inner.in_order.push(entry);
        Ok(())
    }

    /// Double-checked lookup-or-insert shared by the `get_or_create_*`
    /// entry points.
    fn get_or_insert(
        &self,
        name: &str,
        build: impl FnOnce() -> Metric,
    ) -> Result<Arc<NamedMetric>, RegistryError> {
        // Fast path: the name is known. Validation is skipped, it already
        // passed when the name was first inserted.
        if let Some(entry) = self.inner.lock().by_name.get(name) {
            return Ok(Arc::clone(entry));
        }

        // Slow path: first use of this name. Validate and build the candidate
        // outside the lock, then re-check under the lock for a concurrent
        // caller that got there first.
        self.check_name(name)?;
        let fresh = Arc::new(NamedMetric {
            name: name.to_string(),
            metric: build(),
        });

        let mut inner = self.inner.lock();
        Ok(match inner.by_name.get(name) {
            Some(winner) => Arc::clone(winner),
            None => {
                inner.by_name.insert(name.to_string(), Arc::clone(&fresh));
                inner.in_order.push(Arc::clone(&fresh));
                fresh
            }
        })
    }

    fn check_name(&self, name: &str) -> Result<(), RegistryError> {
        (self.validate)(name).map_err(|reason| RegistryError::InvalidName {
            name: name.to_string(),
            reason,
        })
    }

    /// Returns all registered names in first-registration order.
    pub fn metric_names(&self) -> Vec<String> {
        self.inner
            .lock()
            .in_order
            .iter()
            .map(|entry| entry.name.clone())
            .collect()
    }

    /// Returns all entries in first-registration order.
    pub fn entries(&self) -> Vec<Arc<NamedMetric>> {
        self.inner.lock().in_order.clone()
    }

    /// Returns the number of registered metrics.
    pub fn len(&self) -> usize {
        self.inner.lock().in_order.len()
    }

    /// Returns `true` if nothing has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Writes every registered metric to `w`, one line each, in
    /// first-registration order.
    ///
    /// The entry list is snapshotted under the lock and the lock released
    /// before any byte is written, so a slow sink never blocks registration.
    /// Values are read per line; the output is a best-effort snapshot.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use registro::Registry;
    ///
    /// let registry = Registry::new();
    /// registry.new_counter("a").unwrap().set(1);
    /// registry.new_counter("b").unwrap().set(2);
    ///
    /// let mut out = Vec::new();
    /// registry.write_prometheus(&mut out).unwrap();
    /// assert_eq!(out, b"a 1\nb 2\n");
    /// ```
    pub fn write_prometheus<W: Write>(&self, w: &mut W) -> io::Result<()> {
        for entry in self.entries() {
            entry.marshal_to(w)?;
        }
        Ok(())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("metrics", &self.metric_names())
            .finish()
    }
}

static DEFAULT: LazyLock<Registry> = LazyLock::new(Registry::new);

/// Returns the process-wide default registry.
///
/// Initialized on first access and alive for the rest of the process. The
/// crate-level [`new_counter`], [`get_or_create_counter`], [`new_gauge`],
/// [`get_or_create_gauge`], and [`write_prometheus`] operate on it.
pub fn default_registry() -> &'static Registry {
    &DEFAULT
}

/// Registers a counter in the default registry.
///
/// # Panics
///
/// Panics on an invalid or duplicate name. Both indicate a bug at the call
/// site, not a runtime condition; use
/// [`Registry::new_counter`] on an owned registry to handle the error
/// yourself.
pub fn new_counter(name: &str) -> Arc<Counter> {
    match default_registry().new_counter(name) {
        Ok(counter) => counter,
        Err(err) => panic!("BUG: {err}"),
    }
}

/// Returns a counter from the default registry, creating it on first use.
///
/// # Panics
///
/// Panics when `name` is invalid or registered under a different kind.
pub fn get_or_create_counter(name: &str) -> Arc<Counter> {
    match default_registry().get_or_create_counter(name) {
        Ok(counter) => counter,
        Err(err) => panic!("BUG: {err}"),
    }
}

/// Registers a gauge in the default registry.
///
/// # Panics
///
/// Panics on an invalid or duplicate name.
pub fn new_gauge<F>(name: &str, f: F) -> Arc<Gauge>
where
    F: Fn() -> f64 + Send + Sync + 'static,
{
    match default_registry().new_gauge(name, f) {
        Ok(gauge) => gauge,
        Err(err) => panic!("BUG: {err}"),
    }
}

/// Returns a gauge from the default registry, creating it on first use.
///
/// # Panics
///
/// Panics when `name` is invalid or registered under a different kind.
pub fn get_or_create_gauge<F>(name: &str, f: F) -> Arc<Gauge>
where
    F: Fn() -> f64 + Send + Sync + 'static,
{
    match default_registry().get_or_create_gauge(name, f) {
        Ok(gauge) => gauge,
        Err(err) => panic!("BUG: {err}"),
    }
}

/// Writes every metric in the default registry to `w`.
pub fn write_prometheus<W: Write>(w: &mut W) -> io::Result<()> {
    default_registry().write_prometheus(w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_new_counter() {
        let registry = Registry::new();
        let counter = registry.new_counter("requests_total").unwrap();
        counter.inc();
        assert_eq!(counter.get(), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_new_counter_duplicate() {
        let registry = Registry::new();
        registry.new_counter("a").unwrap();

        let err = registry.new_counter("a").unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateName { name } if name == "a"));
    }

    #[test]
    fn test_new_counter_invalid_name() {
        let registry = Registry::new();
        let err = registry.new_counter("bad name!").unwrap_err();
        assert!(matches!(err, RegistryError::InvalidName { name, .. } if name == "bad name!"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_get_or_create_counter_creates_once() {
        let registry = Registry::new();

        let first = registry.get_or_create_counter("foo").unwrap();
        let second = registry.get_or_create_counter("foo").unwrap();

        first.set(41);
        second.inc();
        assert_eq!(first.get(), 42);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_get_or_create_counter_sees_new_counter_registration() {
        let registry = Registry::new();

        let registered = registry.new_counter("shared").unwrap();
        let fetched = registry.get_or_create_counter("shared").unwrap();

        registered.add(7);
        assert_eq!(fetched.get(), 7);
    }

    #[test]
    fn test_get_or_create_counter_invalid_name() {
        let registry = Registry::new();
        let err = registry.get_or_create_counter("bad name!").unwrap_err();
        assert!(matches!(err, RegistryError::InvalidName { .. }));
    }

    #[test]
    fn test_get_or_create_counter_kind_mismatch() {
        let registry = Registry::new();
        registry.new_gauge("valid_name", || 1.0).unwrap();

        let err = registry.get_or_create_counter("valid_name").unwrap_err();
        match err {
            RegistryError::KindMismatch {
                name,
                expected,
                found,
            } => {
                assert_eq!(name, "valid_name");
                assert_eq!(expected, MetricKind::Counter);
                assert_eq!(found, MetricKind::Gauge);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_get_or_create_gauge_kind_mismatch() {
        let registry = Registry::new();
        registry.new_counter("hits").unwrap();

        let err = registry.get_or_create_gauge("hits", || 0.0).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::KindMismatch {
                expected: MetricKind::Gauge,
                found: MetricKind::Counter,
                ..
            }
        ));
    }

    #[test]
    fn test_get_or_create_gauge_keeps_first_callback() {
        let registry = Registry::new();

        let first = registry.get_or_create_gauge("g", || 1.0).unwrap();
        let second = registry.get_or_create_gauge("g", || 2.0).unwrap();

        assert_eq!(first.get(), 1.0);
        assert_eq!(second.get(), 1.0);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let registry = Registry::new();
        registry.new_counter("a").unwrap();
        registry.new_counter("b").unwrap();
        registry.new_counter("c").unwrap();

        assert_eq!(registry.metric_names(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_insertion_order_mixed_entry_points() {
        let registry = Registry::new();
        registry.new_counter("first").unwrap();
        registry.get_or_create_counter("second").unwrap();
        registry.new_gauge("third", || 0.0).unwrap();
        // Lookup of an existing name must not reorder anything.
        registry.get_or_create_counter("first").unwrap();

        assert_eq!(registry.metric_names(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_labeled_names_are_distinct_metrics() {
        let registry = Registry::new();
        let get = registry
            .new_counter(r#"requests_total{method="GET"}"#)
            .unwrap();
        let post = registry
            .new_counter(r#"requests_total{method="POST"}"#)
            .unwrap();

        get.add(2);
        post.add(3);
        assert_eq!(get.get(), 2);
        assert_eq!(post.get(), 3);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_write_prometheus() {
        let registry = Registry::new();
        registry.new_counter("requests_total").unwrap().set(1234);
        registry
            .new_counter(r#"errors_total{kind="io"}"#)
            .unwrap()
            .set(3);
        registry.new_gauge("queue_depth", || 7.0).unwrap();

        let mut out = Vec::new();
        registry.write_prometheus(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "requests_total 1234\nerrors_total{kind=\"io\"} 3\nqueue_depth 7\n"
        );
    }

    #[test]
    fn test_write_prometheus_empty_registry() {
        let registry = Registry::new();
        let mut out = Vec::new();
        registry.write_prometheus(&mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_custom_validator() {
        fn reject_all(_: &str) -> Result<(), String> {
            Err("nope".to_string())
        }

        let registry = Registry::with_validator(reject_all);
        let err = registry.new_counter("foo").unwrap_err();
        assert!(matches!(err, RegistryError::InvalidName { reason, .. } if reason == "nope"));
    }

    #[test]
    fn test_concurrent_get_or_create_single_instance() {
        let registry = Arc::new(Registry::new());
        let mut handles = vec![];

        for _ in 0..8 {
            let registry = Arc::clone(&registry);
            handles.push(thread::spawn(move || {
                registry.get_or_create_counter("racy_total").unwrap()
            }));
        }

        let counters: Vec<Arc<Counter>> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();

        // All callers must hold the same instance: a write through one
        // handle is visible through every other.
        counters[0].set(99);
        for counter in &counters {
            assert_eq!(counter.get(), 99);
        }
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_concurrent_increments_sum_up() {
        let registry = Arc::new(Registry::new());
        let mut handles = vec![];

        for _ in 0..8 {
            let registry = Arc::clone(&registry);
            handles.push(thread::spawn(move || {
                let counter = registry.get_or_create_counter("sum_total").unwrap();
                for _ in 0..10_000 {
                    counter.inc();
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let counter = registry.get_or_create_counter("sum_total").unwrap();
        assert_eq!(counter.get(), 80_000);
    }

    #[test]
    fn test_concurrent_registration_of_distinct_names() {
        let registry = Arc::new(Registry::new());
        let mut handles = vec![];

        for i in 0..8 {
            let registry = Arc::clone(&registry);
            handles.push(thread::spawn(move || {
                registry.new_counter(&format!("worker_{i}_total")).unwrap();
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.len(), 8);
        let mut names = registry.metric_names();
        names.sort();
        let expected: Vec<String> = (0..8).map(|i| format!("worker_{i}_total")).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_debug_lists_names() {
        let registry = Registry::new();
        registry.new_counter("a").unwrap();
        let repr = format!("{registry:?}");
        assert!(repr.contains("Registry"));
        assert!(repr.contains("\"a\""));
    }

    #[test]
    fn test_default_registry_is_shared() {
        // Unique names: the default registry is process-wide state shared
        // with every other test in this binary.
        let counter = get_or_create_counter("default_registry_test_total");
        counter.set(5);

        let again = get_or_create_counter("default_registry_test_total");
        assert_eq!(again.get(), 5);

        assert!(default_registry()
            .metric_names()
            .contains(&"default_registry_test_total".to_string()));
    }

    #[test]
    #[should_panic(expected = "invalid metric name")]
    fn test_default_registry_panics_on_invalid_name() {
        get_or_create_counter("bad name for the default registry!");
    }
}
