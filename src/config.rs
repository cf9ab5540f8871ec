//! Configuration for route finding.
//!
//! Every tolerance the solvers compare at is explicit configuration passed
//! in at construction; nothing is process-wide state. All parameters have
//! defaults matching the routing behavior the solvers were tuned for.

use serde::Deserialize;
use std::path::Path;

use crate::core::math::{deg_to_rad, digit_tolerance};
use crate::error::{Result, RouteError};
use crate::routing::node::HeuristicFormula;

/// Digit-count tolerances shared across the pipeline.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct ToleranceConfig {
    /// Decimal digits for final coordinate rounding (default: 5).
    ///
    /// Rounding after every coordinate update keeps repeated-direction
    /// comparisons exact across stages.
    #[serde(default = "default_linear_digits")]
    pub linear_digits: u32,

    /// Decimal digits for derived comparisons: distances, intersection
    /// gaps (default: 3).
    #[serde(default = "default_compound_digits")]
    pub compound_digits: u32,

    /// Angle tolerance for parallelism tests, degrees (default: 3).
    #[serde(default = "default_angle_tolerance_deg")]
    pub angle_tolerance_deg: f64,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            linear_digits: default_linear_digits(),
            compound_digits: default_compound_digits(),
            angle_tolerance_deg: default_angle_tolerance_deg(),
        }
    }
}

impl ToleranceConfig {
    /// Angle tolerance in radians.
    #[inline]
    pub fn angle_tolerance(&self) -> f64 {
        deg_to_rad(self.angle_tolerance_deg)
    }

    /// Comparison epsilon implied by the compound digit count.
    #[inline]
    pub fn compound_epsilon(&self) -> f64 {
        digit_tolerance(self.compound_digits)
    }
}

/// Physical constraints of the routed trace.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct TraceSettings {
    /// The discrete turn angle fittings allow, degrees (default: 90).
    #[serde(default = "default_turn_angle")]
    pub turn_angle_deg: i32,

    /// Minimum straight length between fittings (default: 1.0).
    #[serde(default = "default_min_link_length")]
    pub min_link_length: f64,
}

impl Default for TraceSettings {
    fn default() -> Self {
        Self {
            turn_angle_deg: default_turn_angle(),
            min_link_length: default_min_link_length(),
        }
    }
}

/// Main route-finding configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct RouterConfig {
    /// Allowed turn angles in whole degrees. A candidate bend must round to
    /// a member exactly; 0°/180° parallel runs are always allowed.
    #[serde(default = "default_allowed_angles")]
    pub allowed_angles: Vec<i32>,

    /// Heuristic formula for the H score.
    #[serde(default = "default_heuristic_formula")]
    pub heuristic_formula: HeuristicFormula,

    /// Step sizes tried by the parameter sweep, outermost axis.
    #[serde(default = "default_step_sizes")]
    pub step_sizes: Vec<f64>,

    /// Coordinate-rounding digit counts tried by the sweep, middle axis.
    #[serde(default = "default_sweep_tolerances")]
    pub sweep_tolerances: Vec<u32>,

    /// Heuristic weight percentages tried by the sweep, innermost axis.
    #[serde(default = "default_heuristic_weights")]
    pub heuristic_weights: Vec<i32>,

    /// Multiply the incremental G of direction changes by the fixed
    /// penalty factor (default: false).
    #[serde(default)]
    pub punish_change_direction: bool,

    /// Wall-clock budget for the whole sweep, milliseconds (default: 200 000).
    #[serde(default = "default_deadline_ms")]
    pub deadline_ms: u64,

    /// Node-expansion guard for a single search attempt (default: 10 000).
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Maximum link length accepted by the node minimizer; `None` disables
    /// the bound.
    #[serde(default)]
    pub max_link_length: Option<f64>,

    #[serde(default)]
    pub trace: TraceSettings,

    #[serde(default)]
    pub tolerance: ToleranceConfig,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            allowed_angles: default_allowed_angles(),
            heuristic_formula: default_heuristic_formula(),
            step_sizes: default_step_sizes(),
            sweep_tolerances: default_sweep_tolerances(),
            heuristic_weights: default_heuristic_weights(),
            punish_change_direction: false,
            deadline_ms: default_deadline_ms(),
            max_iterations: default_max_iterations(),
            max_link_length: None,
            trace: TraceSettings::default(),
            tolerance: ToleranceConfig::default(),
        }
    }
}

impl RouterConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: RouterConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the sweep axes and constraints are usable.
    pub fn validate(&self) -> Result<()> {
        if self.allowed_angles.is_empty() {
            return Err(RouteError::Config("allowed_angles is empty".into()));
        }
        if self
            .allowed_angles
            .iter()
            .any(|&a| !(0..=180).contains(&a))
        {
            return Err(RouteError::Config(
                "allowed_angles must lie in 0..=180 degrees".into(),
            ));
        }
        if self.step_sizes.is_empty() || self.step_sizes.iter().any(|&s| s <= 0.0) {
            return Err(RouteError::Config(
                "step_sizes must be non-empty and positive".into(),
            ));
        }
        if self.sweep_tolerances.is_empty() {
            return Err(RouteError::Config("sweep_tolerances is empty".into()));
        }
        if self.heuristic_weights.is_empty() {
            return Err(RouteError::Config("heuristic_weights is empty".into()));
        }
        if self.trace.min_link_length < 0.0 {
            return Err(RouteError::Config(
                "trace.min_link_length must not be negative".into(),
            ));
        }
        Ok(())
    }
}

fn default_linear_digits() -> u32 {
    5
}

fn default_compound_digits() -> u32 {
    3
}

fn default_angle_tolerance_deg() -> f64 {
    3.0
}

fn default_turn_angle() -> i32 {
    90
}

fn default_min_link_length() -> f64 {
    1.0
}

fn default_allowed_angles() -> Vec<i32> {
    vec![90]
}

fn default_heuristic_formula() -> HeuristicFormula {
    HeuristicFormula::Manhattan
}

fn default_step_sizes() -> Vec<f64> {
    vec![5.0, 1.0]
}

fn default_sweep_tolerances() -> Vec<u32> {
    vec![3, 5]
}

fn default_heuristic_weights() -> Vec<i32> {
    vec![100, 50]
}

fn default_deadline_ms() -> u64 {
    200_000
}

fn default_max_iterations() -> usize {
    10_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(RouterConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_steps_rejected() {
        let config = RouterConfig {
            step_sizes: vec![],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_out_of_range_angle_rejected() {
        let config = RouterConfig {
            allowed_angles: vec![90, 270],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
            allowed_angles = [45, 90]
            step_sizes = [2.5]
            punish_change_direction = true

            [trace]
            turn_angle_deg = 45
        "#;
        let config: RouterConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.allowed_angles, vec![45, 90]);
        assert_eq!(config.trace.turn_angle_deg, 45);
        assert!(config.punish_change_direction);
        // defaults fill the rest
        assert_eq!(config.tolerance.linear_digits, 5);
        assert!(config.validate().is_ok());
    }
}
