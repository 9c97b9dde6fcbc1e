//! Engine configuration as a read-only string-property bag.
//!
//! Selectivity specifications, platform tuning knobs, and UDF hints are all
//! plain string properties; typed layers (e.g. the cost crate's spec parser)
//! interpret them. The bag must not change during a run.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const ENV_PREFIX: &str = "CROSSFLOW_";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Configuration {
    properties: BTreeMap<String, String>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a property; `None` means the key was never set.
    pub fn optional_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Builder-style `set` for test and host wiring.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Create a config from environment variables, falling back to an empty bag.
    ///
    /// Every variable `CROSSFLOW_FOO_BAR=v` becomes the property
    /// `foo.bar = v`.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        for (key, value) in std::env::vars() {
            if let Some(suffix) = key.strip_prefix(ENV_PREFIX) {
                if suffix.is_empty() {
                    continue;
                }
                let prop = suffix.to_ascii_lowercase().replace('_', ".");
                cfg.set(prop, value);
            }
        }
        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_lookup() {
        let cfg = Configuration::new().with_property("my.operator.selectivity", "{}");
        assert_eq!(cfg.optional_str("my.operator.selectivity"), Some("{}"));
        assert_eq!(cfg.optional_str("unset"), None);
    }

    #[test]
    fn env_keys_are_lowercased_and_dotted() {
        std::env::set_var("CROSSFLOW_TEST_ONLY_KEY", "42");
        let cfg = Configuration::from_env();
        assert_eq!(cfg.optional_str("test.only.key"), Some("42"));
        std::env::remove_var("CROSSFLOW_TEST_ONLY_KEY");
    }
}
