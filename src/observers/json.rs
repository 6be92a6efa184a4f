//! JSON observer for serializing a registry.
//!
//! This module provides [`JsonObserver`], which renders every metric in a
//! [`Registry`] as a JSON document via serde.
//!
//! # Feature Flag
//!
//! This module requires the `json` feature:
//!
//! ```toml
//! [dependencies]
//! registro = { version = "0.2", features = ["json"] }
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use registro::observers::json::JsonObserver;
//! use registro::Registry;
//!
//! let registry = Registry::new();
//! registry.new_counter("requests_total").unwrap().set(1000);
//!
//! let json = JsonObserver::new().to_json(&registry)?;
//! // {"metrics":[{"name":"requests_total","value":1000}]}
//! ```

use crate::observers::Result;
use crate::registry::Registry;
use crate::snapshot::RegistrySnapshot;

/// An observer that serializes a registry to JSON.
///
/// Rendering captures a [`RegistrySnapshot`] and serializes it, so the output
/// lists metrics in first-registration order, the same order
/// [`Registry::write_prometheus`] uses.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonObserver {
    pretty: bool,
}

impl JsonObserver {
    /// Creates a new JSON observer producing compact output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables pretty-printing.
    pub fn pretty(mut self, enabled: bool) -> Self {
        self.pretty = enabled;
        self
    }

    /// Serializes the registry to a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self, registry: &Registry) -> Result<String> {
        let snapshot = RegistrySnapshot::capture(registry);
        let json = if self.pretty {
            serde_json::to_string_pretty(&snapshot)?
        } else {
            serde_json::to_string(&snapshot)?
        };
        Ok(json)
    }

    /// Serializes the registry to a JSON byte vector.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_bytes(&self, registry: &Registry) -> Result<Vec<u8>> {
        Ok(self.to_json(registry)?.into_bytes())
    }
}
