//! Selectivity specifications persisted in configuration values.
//!
//! A specification is a JSON record
//! `{"type": "juel", "p": .., "lower": .., "upper": .., "coeff": ..}`.
//! `type` defaults to `"juel"` (the expression-language marker the records
//! historically carried); every other type is rejected. `coeff` defaults to
//! `0`, i.e. plain multiplicative selectivity.

use serde::Deserialize;
use tracing::warn;

use crossflow_core::config::Configuration;

use crate::error::EstimateError;
use crate::interval::ProbInterval;

const SPEC_TYPE_JUEL: &str = "juel";

#[derive(Debug, Deserialize)]
struct RawSpec {
    #[serde(rename = "type", default = "default_spec_type")]
    ty: String,
    p: f64,
    lower: f64,
    upper: f64,
    #[serde(default)]
    coeff: f64,
}

fn default_spec_type() -> String {
    SPEC_TYPE_JUEL.to_string()
}

/// Configuration keys may carry a dash-separated variant suffix
/// (`"my.op.selectivity-2"`); lookups use the part before the first dash.
fn base_key(config_key: &str) -> &str {
    config_key.split('-').next().unwrap_or(config_key)
}

/// Parse a specification string into a [`ProbInterval`] tagged with the
/// key it was loaded under.
pub fn from_specification(
    config_key: &str,
    specification: &str,
) -> Result<ProbInterval, EstimateError> {
    let raw: RawSpec =
        serde_json::from_str(specification).map_err(|source| EstimateError::InvalidSpecification {
            spec: specification.to_string(),
            source,
        })?;
    if !raw.ty.eq_ignore_ascii_case(SPEC_TYPE_JUEL) {
        return Err(EstimateError::UnknownSpecificationType(raw.ty));
    }
    Ok(ProbInterval::builder(raw.lower, raw.upper, raw.p)
        .key(base_key(config_key))
        .coeff(raw.coeff)
        .build())
}

/// Load the specification stored under `config_key`.
///
/// A missing key is a soft miss: it is logged at warn level and `None` is
/// returned so the caller can fall back to a default. Malformed or
/// unknown-typed specifications are hard errors.
pub fn from_configuration(
    config_key: &str,
    config: &Configuration,
) -> Result<Option<ProbInterval>, EstimateError> {
    let key = base_key(config_key);
    match config.optional_str(key) {
        Some(specification) => from_specification(key, specification).map(Some),
        None => {
            warn!(key, "no selectivity specification associated with key");
            Ok(None)
        }
    }
}

/// Cache for loaded selectivity intervals.
///
/// The loading path consults the cache, but the default implementation
/// never hits, so behavior is identical to an uncached lookup. Kept as a
/// hook for hosts that re-request the same estimators many times.
pub trait SpecCache {
    fn lookup(&self, key: &str) -> Option<ProbInterval>;
    fn store(&self, key: &str, interval: &ProbInterval);
}

/// The always-miss cache.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSpecCache;

impl SpecCache for NoopSpecCache {
    fn lookup(&self, _key: &str) -> Option<ProbInterval> {
        None
    }

    fn store(&self, _key: &str, _interval: &ProbInterval) {}
}

/// [`from_configuration`] with a cache consulted first and populated on load.
pub fn from_configuration_cached(
    config_key: &str,
    config: &Configuration,
    cache: &dyn SpecCache,
) -> Result<Option<ProbInterval>, EstimateError> {
    let key = base_key(config_key);
    if let Some(hit) = cache.lookup(key) {
        return Ok(Some(hit));
    }
    let loaded = from_configuration(key, config)?;
    if let Some(interval) = &loaded {
        cache.store(key, interval);
    }
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_record() {
        let spec = r#"{"type":"juel","p":0.9,"lower":0.3,"upper":0.5,"coeff":0}"#;
        let interval = from_specification("my.op.selectivity", spec).unwrap();
        assert_eq!(interval.lower(), 0.3);
        assert_eq!(interval.upper(), 0.5);
        assert_eq!(interval.correctness(), 0.9);
        assert_eq!(interval.coeff(), 0.0);
        assert_eq!(interval.key(), Some("my.op.selectivity"));
    }

    #[test]
    fn type_and_coeff_are_optional() {
        let interval =
            from_specification("k", r#"{"p":0.5,"lower":1.0,"upper":2.0}"#).unwrap();
        assert_eq!(interval.coeff(), 0.0);
    }

    #[test]
    fn rejects_unknown_types() {
        let err = from_specification("k", r#"{"type":"mvel","p":0.5,"lower":1,"upper":2}"#)
            .unwrap_err();
        assert!(matches!(err, EstimateError::UnknownSpecificationType(t) if t == "mvel"));
    }

    #[test]
    fn wraps_malformed_content() {
        let err = from_specification("k", "not json").unwrap_err();
        assert!(matches!(err, EstimateError::InvalidSpecification { .. }));
    }

    #[test]
    fn variant_suffixes_resolve_to_the_base_key() {
        let config = Configuration::new()
            .with_property("k", r#"{"p":0.5,"lower":1.0,"upper":2.0,"coeff":0}"#);
        let interval = from_configuration("k-2", &config).unwrap().unwrap();
        assert_eq!(interval.key(), Some("k"));
    }

    #[test]
    fn missing_key_is_a_soft_miss() {
        let config = Configuration::new();
        assert!(from_configuration("unset", &config).unwrap().is_none());
    }
}
