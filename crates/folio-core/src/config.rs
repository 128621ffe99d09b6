//! Indicator tuning.
//!
//! [`IndicatorConfig::default`] carries the values in [`crate::constants`].
//! Hosts may override individual fields with string key/value pairs (the web
//! front-end reads them from `data-indicator-*` attributes).

use crate::constants::*;
use crate::error::ConfigError;
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub struct IndicatorConfig {
    pub damping: f32,
    pub excitation: f32,
    pub velocity_decay: f32,
    pub noise_floor: f32,
    pub rest_amplitude: f32,
    pub rest_velocity: f32,
    pub max_sample_delta: f32,
    pub label_quiet: Duration,
    pub ambient_window: Duration,
    pub settle_duration: Duration,
    pub entrance: bool,
    pub ambient_count: usize,
    pub seed: u64,
    pub route: String,
    pub caption: String,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            damping: DAMPING,
            excitation: EXCITATION,
            velocity_decay: VELOCITY_DECAY,
            noise_floor: NOISE_FLOOR,
            rest_amplitude: REST_AMPLITUDE,
            rest_velocity: REST_VELOCITY,
            max_sample_delta: MAX_SAMPLE_DELTA,
            label_quiet: LABEL_QUIET,
            ambient_window: AMBIENT_WINDOW,
            settle_duration: SETTLE_DURATION,
            entrance: true,
            ambient_count: AMBIENT_COUNT,
            seed: AMBIENT_SEED,
            route: DEFAULT_ROUTE.to_string(),
            caption: DEFAULT_CAPTION.to_string(),
        }
    }
}

impl IndicatorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("damping", self.damping),
            ("excitation", self.excitation),
            ("velocity_decay", self.velocity_decay),
            ("noise_floor", self.noise_floor),
            ("rest_amplitude", self.rest_amplitude),
            ("rest_velocity", self.rest_velocity),
            ("max_sample_delta", self.max_sample_delta),
        ];
        for (field, v) in finite {
            if !v.is_finite() {
                return Err(ConfigError::OutOfRange {
                    field,
                    reason: "must be finite",
                });
            }
        }
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(ConfigError::OutOfRange {
                field: "damping",
                reason: "must lie strictly between 0 and 1",
            });
        }
        if self.excitation <= 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "excitation",
                reason: "must be positive",
            });
        }
        // Velocity may not outlive amplitude, otherwise the decay after the
        // peak is no longer monotonic.
        if self.velocity_decay < 0.0 || self.velocity_decay > self.damping {
            return Err(ConfigError::OutOfRange {
                field: "velocity_decay",
                reason: "must lie in [0, damping]",
            });
        }
        if self.noise_floor <= 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "noise_floor",
                reason: "must be positive",
            });
        }
        if self.rest_amplitude <= 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "rest_amplitude",
                reason: "must be positive",
            });
        }
        if self.rest_velocity < 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "rest_velocity",
                reason: "must not be negative",
            });
        }
        if self.max_sample_delta < self.noise_floor {
            return Err(ConfigError::OutOfRange {
                field: "max_sample_delta",
                reason: "must not be below the noise floor",
            });
        }
        for (field, d) in [
            ("label_quiet", self.label_quiet),
            ("ambient_window", self.ambient_window),
            ("settle_duration", self.settle_duration),
        ] {
            if d.is_zero() {
                return Err(ConfigError::OutOfRange {
                    field,
                    reason: "must be a non-zero duration",
                });
            }
        }
        if self.ambient_count > MAX_AMBIENT_ELEMENTS {
            return Err(ConfigError::OutOfRange {
                field: "ambient_count",
                reason: "exceeds the ambient pool limit",
            });
        }
        if self.route.trim().is_empty() {
            return Err(ConfigError::OutOfRange {
                field: "route",
                reason: "must not be empty",
            });
        }
        Ok(())
    }

    /// Apply `key=value` overrides on top of `self` and validate the result.
    pub fn with_overrides<K, V, I>(mut self, overrides: I) -> Result<Self, ConfigError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in overrides {
            self.set(key.as_ref(), value.as_ref())?;
        }
        self.validate()?;
        Ok(self)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match key {
            "damping" => self.damping = parse(key, value)?,
            "excitation" => self.excitation = parse(key, value)?,
            "velocity-decay" => self.velocity_decay = parse(key, value)?,
            "noise-floor" => self.noise_floor = parse(key, value)?,
            "rest-amplitude" => self.rest_amplitude = parse(key, value)?,
            "rest-velocity" => self.rest_velocity = parse(key, value)?,
            "max-sample-delta" => self.max_sample_delta = parse(key, value)?,
            "label-quiet-ms" => self.label_quiet = Duration::from_millis(parse(key, value)?),
            "ambient-window-ms" => self.ambient_window = Duration::from_millis(parse(key, value)?),
            "settle-ms" => self.settle_duration = Duration::from_millis(parse(key, value)?),
            "entrance" => self.entrance = parse(key, value)?,
            "ambient-count" => self.ambient_count = parse(key, value)?,
            "seed" => self.seed = parse(key, value)?,
            "route" => self.route = value.to_string(),
            "caption" => self.caption = value.to_string(),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}

fn parse<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}
