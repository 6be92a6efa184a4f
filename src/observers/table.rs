//! Table observer for pretty-printing a registry.
//!
//! This module provides [`TableObserver`], which renders every metric in a
//! [`Registry`] as a formatted ASCII table using the `tabled` crate.
//!
//! # Feature Flag
//!
//! This module requires the `table` feature:
//!
//! ```toml
//! [dependencies]
//! registro = { version = "0.2", features = ["table"] }
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use registro::observers::table::{TableObserver, TableStyle};
//! use registro::Registry;
//!
//! let registry = Registry::new();
//! registry.new_counter("requests_total").unwrap().set(1000);
//! registry.new_counter("errors_total").unwrap().set(5);
//!
//! let observer = TableObserver::new().with_style(TableStyle::Rounded);
//! println!("{}", observer.render(&registry));
//! // ╭────────────────┬─────────┬───────╮
//! // │ Name           │ Kind    │ Value │
//! // ├────────────────┼─────────┼───────┤
//! // │ requests_total │ counter │ 1000  │
//! // │ errors_total   │ counter │ 5     │
//! // ╰────────────────┴─────────┴───────╯
//! ```

use tabled::{builder::Builder, settings::Style};

use crate::metric::Metric;
use crate::registry::Registry;

/// Available table styles for rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableStyle {
    /// ASCII table with simple characters: +, -, |
    Ascii,
    /// Modern rounded corners (default)
    #[default]
    Rounded,
    /// GitHub-flavored Markdown table
    Markdown,
    /// No borders, just spacing
    Blank,
}

/// An observer that renders a registry as a name/kind/value table.
///
/// Rows appear in first-registration order, the same order
/// [`Registry::write_prometheus`] uses.
#[derive(Debug, Clone, Copy)]
pub struct TableObserver {
    style: TableStyle,
    show_header: bool,
}

impl Default for TableObserver {
    fn default() -> Self {
        Self {
            style: TableStyle::default(),
            show_header: true,
        }
    }
}

impl TableObserver {
    /// Creates a new table observer with the default (rounded) style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the table style, returning `self` for method chaining.
    pub fn with_style(mut self, style: TableStyle) -> Self {
        self.style = style;
        self
    }

    /// Shows or hides the header row.
    pub fn show_header(mut self, enabled: bool) -> Self {
        self.show_header = enabled;
        self
    }

    /// Renders the registry as a table string.
    pub fn render(&self, registry: &Registry) -> String {
        let mut builder = Builder::default();

        if self.show_header {
            builder.push_record(["Name", "Kind", "Value"]);
        }

        for entry in registry.entries() {
            let value = match entry.metric() {
                Metric::Counter(counter) => counter.get().to_string(),
                Metric::Gauge(gauge) => gauge.get().to_string(),
            };
            builder.push_record([
                entry.name().to_string(),
                entry.metric().kind().to_string(),
                value,
            ]);
        }

        let mut table = builder.build();
        match self.style {
            TableStyle::Ascii => table.with(Style::ascii()),
            TableStyle::Rounded => table.with(Style::rounded()),
            TableStyle::Markdown => table.with(Style::markdown()),
            TableStyle::Blank => table.with(Style::blank()),
        };
        table.to_string()
    }
}
