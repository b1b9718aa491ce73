//! Simulation parameters and startup validation.
//!
//! All numeric constants are supplied once at startup and stay immutable for
//! the lifetime of a run. [`Params::validate`] is the fail-fast gate: no
//! simulation state is constructed from an invalid configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Which observation vector the sensor model builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensorMode {
    /// Nearest food plus proprioception (energy, speed, heading, wall distance).
    Basic,
    /// Adds nearest opposite-role agent, vision-cone rays, and action memory.
    Vision,
}

/// Per-role physical constants. Fixed for an agent's whole lifetime.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RoleParams {
    /// Collision radius.
    pub radius: f32,
    /// Speed cap applied to the throttle output.
    pub max_speed: f32,
    /// Energy cap; also the energy every fresh agent starts with.
    pub max_energy: f32,
}

/// Simulation parameters that control world, agents, food, and evolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Params {
    /// World rectangle width.
    pub world_width: f32,
    /// World rectangle height.
    pub world_height: f32,
    /// Prey physical constants.
    pub prey: RoleParams,
    /// Predator physical constants.
    pub predator: RoleParams,
    /// Prey population size, preserved by every turnover.
    pub prey_count: usize,
    /// Predator population size. Zero selects the single-role variant.
    pub predator_count: usize,
    /// Energy drained from every living agent each tick, unconditionally.
    pub energy_decay: f32,
    /// Food collision radius.
    pub food_radius: f32,
    /// Energy gained by eating one food item (and by a predator per capture).
    pub food_energy: f32,
    /// Live food quota the environment maintains after every update.
    pub food_count: usize,
    /// Fitness awarded to a predator per prey capture. Larger than the
    /// per-food reward of 1.
    pub capture_bonus: f32,
    /// Observation vector variant.
    pub sensor_mode: SensorMode,
    /// Full width of the forward vision cone in radians (vision variant).
    pub vision_angle: f32,
    /// Maximum ray sensing distance (vision variant).
    pub vision_range: f32,
    /// Number of rays fanned across the cone, both edges included.
    pub ray_count: usize,
    /// Capacity of the per-agent action memory ring (vision variant).
    pub memory_size: usize,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            world_width: 800.0,
            world_height: 600.0,
            prey: RoleParams {
                radius: 10.0,
                max_speed: 3.0,
                max_energy: 100.0,
            },
            predator: RoleParams {
                radius: 12.0,
                max_speed: 3.5,
                max_energy: 100.0,
            },
            prey_count: 50,
            predator_count: 5,
            energy_decay: 0.1,
            food_radius: 5.0,
            food_energy: 50.0,
            food_count: 20,
            capture_bonus: 5.0,
            sensor_mode: SensorMode::Vision,
            vision_angle: std::f32::consts::FRAC_PI_2,
            vision_range: 120.0,
            ray_count: 5,
            memory_size: 4,
        }
    }
}

/// Configuration errors. All of these are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A population or food count that makes the simulation degenerate.
    #[error("{name} must be at least 1, got {got}")]
    NonPositiveCount {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        got: usize,
    },
    /// A numeric constant outside its legal range.
    #[error("{name} must be positive, got {got}")]
    NonPositiveValue {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        got: f32,
    },
    /// The world rectangle cannot contain an agent of the given radius.
    #[error("world {width}x{height} is too small for radius {radius}")]
    WorldTooSmall {
        /// World width.
        width: f32,
        /// World height.
        height: f32,
        /// Largest radius that must fit.
        radius: f32,
    },
    /// Vision parameters that cannot produce a well-formed ray fan.
    #[error("vision variant needs ray_count >= 2, got {0}")]
    TooFewRays(usize),
    /// The configuration file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration file could not be parsed.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Params {
    /// Loads parameters from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&json)?;
        Ok(params)
    }

    /// Checks every constant before any simulation state is built.
    ///
    /// A zero prey population would leave the breeding pool empty at the
    /// first turnover, so it is rejected here rather than surfacing later as
    /// a runtime fault.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.prey_count == 0 {
            return Err(ConfigError::NonPositiveCount {
                name: "prey_count",
                got: self.prey_count,
            });
        }
        if self.food_count == 0 {
            return Err(ConfigError::NonPositiveCount {
                name: "food_count",
                got: self.food_count,
            });
        }

        let positive = [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("prey.radius", self.prey.radius),
            ("prey.max_speed", self.prey.max_speed),
            ("prey.max_energy", self.prey.max_energy),
            ("predator.radius", self.predator.radius),
            ("predator.max_speed", self.predator.max_speed),
            ("predator.max_energy", self.predator.max_energy),
            ("energy_decay", self.energy_decay),
            ("food_radius", self.food_radius),
            ("food_energy", self.food_energy),
            ("capture_bonus", self.capture_bonus),
        ];
        for (name, value) in positive {
            if value <= 0.0 || !value.is_finite() {
                return Err(ConfigError::NonPositiveValue { name, got: value });
            }
        }

        let max_radius = self.prey.radius.max(self.predator.radius);
        if self.world_width < 2.0 * max_radius || self.world_height < 2.0 * max_radius {
            return Err(ConfigError::WorldTooSmall {
                width: self.world_width,
                height: self.world_height,
                radius: max_radius,
            });
        }

        if self.sensor_mode == SensorMode::Vision {
            if self.ray_count < 2 {
                return Err(ConfigError::TooFewRays(self.ray_count));
            }
            for (name, value) in [
                ("vision_angle", self.vision_angle),
                ("vision_range", self.vision_range),
            ] {
                if value <= 0.0 || !value.is_finite() {
                    return Err(ConfigError::NonPositiveValue { name, got: value });
                }
            }
        }

        Ok(())
    }

    /// Length of the diagonal of the world rectangle, used to normalize
    /// distances into `[0, 1]`.
    pub fn world_diagonal(&self) -> f32 {
        self.world_width.hypot(self.world_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_are_valid() {
        assert!(Params::default().validate().is_ok());
    }

    #[test]
    fn zero_prey_population_is_rejected() {
        let params = Params {
            prey_count: 0,
            ..Params::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ConfigError::NonPositiveCount {
                name: "prey_count",
                ..
            })
        ));
    }

    #[test]
    fn negative_decay_is_rejected() {
        let params = Params {
            energy_decay: -0.1,
            ..Params::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn single_ray_fan_is_rejected() {
        let params = Params {
            ray_count: 1,
            ..Params::default()
        };
        assert!(matches!(params.validate(), Err(ConfigError::TooFewRays(1))));
    }
}
