//! Registers a handful of metrics, hammers them from several threads, and
//! dumps the registry in Prometheus text format.
//!
//! Run with: `cargo run --example expose`

use std::io;
use std::thread;
use std::time::Instant;

fn main() -> io::Result<()> {
    let started = Instant::now();

    let requests = registro::new_counter(r#"http_requests_total{method="GET"}"#);
    let errors = registro::new_counter(r#"http_errors_total{kind="timeout"}"#);
    registro::new_gauge("uptime_seconds", move || started.elapsed().as_secs_f64());

    let mut handles = vec![];
    for _ in 0..4 {
        let requests = requests.clone();
        let errors = errors.clone();
        handles.push(thread::spawn(move || {
            for i in 0..10_000u64 {
                requests.inc();
                if i % 1000 == 0 {
                    errors.inc();
                }
            }
        }));
    }
    for handle in handles {
        handle.join().expect("worker thread panicked");
    }

    // In-flight counters created where the measurement happens.
    registro::get_or_create_counter("scrapes_total").inc();

    registro::write_prometheus(&mut io::stdout().lock())
}
