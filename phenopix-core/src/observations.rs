//! Measurement store for analysis outputs.
//!
//! Analyses record named observations per sample: a trait name, the method
//! that produced it, a unit scale, and the value itself. The store keeps
//! insertion order per sample so exported results read in analysis order.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A recorded measurement value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ObservationValue {
    /// Scalar floating-point value. NaN encodes "undefined".
    Float(f64),
    /// Scalar integer value.
    Int(i64),
    /// Text value.
    Text(String),
    /// List of floating-point values (histograms, spectra).
    FloatList(Vec<f64>),
}

/// A single recorded observation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Observation {
    /// Human-readable trait name.
    #[cfg_attr(feature = "serde", serde(rename = "trait"))]
    pub trait_name: String,
    /// Fully qualified name of the producing method.
    pub method: String,
    /// Unit or scale of the value.
    pub scale: String,
    /// The measured value.
    pub value: ObservationValue,
    /// Axis labels or unit label accompanying the value.
    pub label: ObservationValue,
}

/// Per-sample observation store.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Observations {
    samples: BTreeMap<String, Vec<(String, Observation)>>,
}

impl Observations {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an observation for a sample, replacing any previous
    /// observation of the same variable.
    pub fn add_observation(
        &mut self,
        sample: &str,
        variable: &str,
        observation: Observation,
    ) {
        let entries = self.samples.entry(sample.to_string()).or_default();
        if let Some(existing) = entries.iter_mut().find(|(var, _)| var == variable) {
            existing.1 = observation;
        } else {
            entries.push((variable.to_string(), observation));
        }
    }

    /// Look up an observation by sample and variable.
    #[must_use]
    pub fn get(&self, sample: &str, variable: &str) -> Option<&Observation> {
        self.samples
            .get(sample)?
            .iter()
            .find(|(var, _)| var == variable)
            .map(|(_, obs)| obs)
    }

    /// Sample names present in the store.
    pub fn samples(&self) -> impl Iterator<Item = &str> {
        self.samples.keys().map(String::as_str)
    }

    /// Observations recorded for a sample, in insertion order.
    #[must_use]
    pub fn sample_observations(&self, sample: &str) -> &[(String, Observation)] {
        self.samples.get(sample).map_or(&[], Vec::as_slice)
    }

    /// Total number of recorded observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.values().map(Vec::len).sum()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(value: ObservationValue) -> Observation {
        Observation {
            trait_name: "test trait".into(),
            method: "phenopix.test".into(),
            scale: "none".into(),
            value,
            label: ObservationValue::Text("none".into()),
        }
    }

    #[test]
    fn test_add_and_get() {
        let mut store = Observations::new();
        store.add_observation("plant1", "area", obs(ObservationValue::Float(42.0)));
        assert_eq!(store.len(), 1);
        let got = store.get("plant1", "area").unwrap();
        assert_eq!(got.value, ObservationValue::Float(42.0));
        assert!(store.get("plant1", "height").is_none());
        assert!(store.get("plant2", "area").is_none());
    }

    #[test]
    fn test_same_variable_replaces() {
        let mut store = Observations::new();
        store.add_observation("s", "v", obs(ObservationValue::Int(1)));
        store.add_observation("s", "v", obs(ObservationValue::Int(2)));
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get("s", "v").unwrap().value,
            ObservationValue::Int(2)
        );
    }

    #[test]
    fn test_insertion_order_kept_per_sample() {
        let mut store = Observations::new();
        store.add_observation("s", "b", obs(ObservationValue::Int(1)));
        store.add_observation("s", "a", obs(ObservationValue::Int(2)));
        let vars: Vec<&str> = store
            .sample_observations("s")
            .iter()
            .map(|(v, _)| v.as_str())
            .collect();
        assert_eq!(vars, vec!["b", "a"]);
    }
}
