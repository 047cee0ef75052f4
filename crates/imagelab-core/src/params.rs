//! Parameter schema and parameter values.
//!
//! Each method declares an ordered list of [`ParameterSpec`]s. The UI shell
//! uses them to build its controls, and the engine uses them to normalize a
//! [`ParameterSet`] before running a transform.
//!
//! ## Normalization
//!
//! Normalization never fails:
//! 1. A missing or non-finite value becomes the declared default
//! 2. Integer parameters are rounded to the nearest whole number
//! 3. The value is clamped into `[min, max]` (or only `>= min` for open-ended specs)
//!
//! Strict validation ([`ParameterSpec::validate`]) is available for callers
//! that want to reject bad input instead.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::TransformError;

/// Numeric type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    Integer,
    Real,
}

/// Declaration of a single tunable parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSpec {
    /// Key used in a [`ParameterSet`].
    pub name: &'static str,
    /// Human-readable label for the control.
    pub label: &'static str,
    pub kind: ParamKind,
    /// Inclusive lower bound.
    pub min: f64,
    /// Inclusive upper bound of the control.
    pub max: f64,
    pub default: f64,
    pub step: f64,
    /// When false, `max` only bounds the UI control and the engine accepts
    /// any value `>= min`.
    pub bounded: bool,
}

impl ParameterSpec {
    /// Integer parameter with a step of 1.
    pub const fn integer(
        name: &'static str,
        label: &'static str,
        min: f64,
        max: f64,
        default: f64,
    ) -> Self {
        Self {
            name,
            label,
            kind: ParamKind::Integer,
            min,
            max,
            default,
            step: 1.0,
            bounded: true,
        }
    }

    /// Real-valued parameter.
    pub const fn real(
        name: &'static str,
        label: &'static str,
        min: f64,
        max: f64,
        default: f64,
        step: f64,
    ) -> Self {
        Self {
            name,
            label,
            kind: ParamKind::Real,
            min,
            max,
            default,
            step,
            bounded: true,
        }
    }

    /// Remove the upper bound from engine-side clamping.
    pub const fn open_ended(mut self) -> Self {
        self.bounded = false;
        self
    }

    /// Normalize a raw value into the declared domain.
    pub fn normalize(&self, value: Option<f64>) -> f64 {
        let value = match value {
            Some(v) if v.is_finite() => v,
            _ => self.default,
        };
        let value = match self.kind {
            ParamKind::Integer => value.round(),
            ParamKind::Real => value,
        };
        if self.bounded {
            value.clamp(self.min, self.max)
        } else {
            value.max(self.min)
        }
    }

    /// Check a value without modifying it.
    ///
    /// Integer parameters must be whole numbers.
    pub fn validate(&self, value: f64) -> Result<f64, TransformError> {
        let reject = |reason: String| TransformError::InvalidParameter {
            name: self.name.to_string(),
            value,
            reason,
        };
        if !value.is_finite() {
            return Err(reject("not a finite number".to_string()));
        }
        if self.kind == ParamKind::Integer && value.fract() != 0.0 {
            return Err(reject("expected an integer".to_string()));
        }
        if value < self.min {
            return Err(reject(format!("below minimum {}", self.min)));
        }
        if self.bounded && value > self.max {
            return Err(reject(format!("above maximum {}", self.max)));
        }
        Ok(value)
    }
}

/// Current values for the active method's parameters.
///
/// Serialized as a plain `{ name: value }` map so a UI shell can send it as JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet {
    values: BTreeMap<String, f64>,
}

impl ParameterSet {
    /// Create an empty parameter set (every parameter falls back to its default).
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameter set holding each spec's default value.
    pub fn from_specs(specs: &[ParameterSpec]) -> Self {
        let values = specs
            .iter()
            .map(|spec| (spec.name.to_string(), spec.default))
            .collect();
        Self { values }
    }

    /// Builder-style insert.
    pub fn with(mut self, name: &str, value: f64) -> Self {
        self.set(name, value);
        self
    }

    /// Insert or replace a value without validation.
    pub fn set(&mut self, name: &str, value: f64) {
        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Normalized value for `spec`, see the module docs.
    pub fn resolve(&self, spec: &ParameterSpec) -> f64 {
        spec.normalize(self.get(spec.name))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
