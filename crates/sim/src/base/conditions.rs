use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default temperature of the neutral baseline environment.
pub const DEFAULT_TEMPERATURE: f64 = 37.0;

/// Default nutrient level of the neutral baseline environment.
pub const DEFAULT_NUTRIENT_LEVEL: f64 = 1.0;

/// Environmental snapshot shared by all individuals in a generation.
///
/// `Conditions` is a plain value: the engine owns one instance and lends it
/// out by shared reference during the expression phase. Arbitrary extra
/// factors can be attached through the extension map, which is ordered so
/// that iteration is reproducible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conditions {
    /// Concentration of the external transcription factor
    pub tf_concentration: f64,
    /// Ambient temperature
    pub temperature: f64,
    /// Nutrient availability
    pub nutrient_level: f64,
    /// Open-ended additional factors
    #[serde(default)]
    pub extra: BTreeMap<String, f64>,
}

impl Conditions {
    /// Create conditions with explicit core factors and no extensions.
    pub fn new(tf_concentration: f64, temperature: f64, nutrient_level: f64) -> Self {
        Self {
            tf_concentration,
            temperature,
            nutrient_level,
            extra: BTreeMap::new(),
        }
    }

    /// Return a copy with the transcription-factor concentration replaced.
    pub fn with_tf_concentration(mut self, tf_concentration: f64) -> Self {
        self.tf_concentration = tf_concentration;
        self
    }

    /// Return a copy with the temperature replaced.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Return a copy with the nutrient level replaced.
    pub fn with_nutrient_level(mut self, nutrient_level: f64) -> Self {
        self.nutrient_level = nutrient_level;
        self
    }

    /// Return a copy with an extension factor set.
    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Look up an extension factor.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.extra.get(key).copied()
    }
}

impl Default for Conditions {
    fn default() -> Self {
        Self::new(0.0, DEFAULT_TEMPERATURE, DEFAULT_NUTRIENT_LEVEL)
    }
}
