//! Predicate descriptors and user-defined-function selectivity lookup.

use crossflow_core::config::Configuration;

use crate::error::EstimateError;
use crate::interval::ProbInterval;
use crate::spec;

/// Describes a user-defined predicate well enough to look up its
/// selectivity. `selectivity_key` is an explicit option; an absent key
/// means nobody ever measured or configured this predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredicateDescriptor {
    pub name: String,
    pub selectivity_key: Option<String>,
}

impl PredicateDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            selectivity_key: None,
        }
    }

    pub fn with_selectivity_key(mut self, key: impl Into<String>) -> Self {
        self.selectivity_key = Some(key.into());
        self
    }
}

/// Supplies selectivity intervals for user-defined predicates.
pub trait UdfSelectivityProvider {
    /// `Ok(None)` means no selectivity is known; callers fall back to their
    /// operator-specific baseline.
    fn provide_for(
        &self,
        config: &Configuration,
        descriptor: &PredicateDescriptor,
    ) -> Result<Option<ProbInterval>, EstimateError>;
}

/// Default provider: resolves the descriptor's key against the
/// configuration's selectivity specifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpecBackedProvider;

impl UdfSelectivityProvider for SpecBackedProvider {
    fn provide_for(
        &self,
        config: &Configuration,
        descriptor: &PredicateDescriptor,
    ) -> Result<Option<ProbInterval>, EstimateError> {
        match &descriptor.selectivity_key {
            Some(key) => spec::from_configuration(key, config),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyless_descriptors_yield_nothing() {
        let provider = SpecBackedProvider;
        let descriptor = PredicateDescriptor::new("is_unique");
        let got = provider
            .provide_for(&Configuration::new(), &descriptor)
            .unwrap();
        assert!(got.is_none());
    }

    #[test]
    fn keyed_descriptors_resolve_through_the_config() {
        let provider = SpecBackedProvider;
        let config = Configuration::new()
            .with_property("udf.sel", r#"{"p":0.8,"lower":0.1,"upper":0.2,"coeff":0}"#);
        let descriptor = PredicateDescriptor::new("is_unique").with_selectivity_key("udf.sel");
        let interval = provider.provide_for(&config, &descriptor).unwrap().unwrap();
        assert_eq!(interval.upper(), 0.2);
    }
}
