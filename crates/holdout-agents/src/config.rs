//! Configurable parameters for vital mechanics.

use serde::Deserialize;

/// Tunable thresholds and rates for per-tick vital updates.
///
/// Loaded from `holdout-config.yaml` by the engine; defaults match the
/// reference behavior.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VitalsConfig {
    /// Hunger added every tick.
    pub hunger_rate: f64,
    /// Hunger at or above which an agent automatically eats held food.
    pub eat_threshold: f64,
    /// Hunger at or above which happiness decays.
    pub unhappy_hunger_threshold: f64,
    /// Happiness lost per tick while too hungry.
    pub happiness_decay: f64,
    /// Fear below which an agent slowly cheers up.
    pub calm_fear_threshold: f64,
    /// Happiness regained per tick while calm.
    pub calm_happiness_recovery: f64,
    /// Energy at or below which an agent automatically uses a held
    /// medical item.
    pub medical_threshold: f64,
    /// Energy restored by a wait action.
    pub wait_recovery: f64,
    /// Distance within which a hostile counts as "nearby" for fear.
    pub hostile_proximity_radius: f64,
    /// Fear added per nearby hostile per tick.
    pub fear_per_hostile: f64,
    /// Fear shed per tick when no hostile is nearby.
    pub fear_decay: f64,
}

impl Default for VitalsConfig {
    fn default() -> Self {
        Self {
            hunger_rate: 0.5,
            eat_threshold: 80.0,
            unhappy_hunger_threshold: 70.0,
            happiness_decay: 1.0,
            calm_fear_threshold: 10.0,
            calm_happiness_recovery: 0.5,
            medical_threshold: 30.0,
            wait_recovery: 5.0,
            hostile_proximity_radius: 100.0,
            fear_per_hostile: 5.0,
            fear_decay: 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_behavior() {
        let config = VitalsConfig::default();
        assert!((config.hunger_rate - 0.5).abs() < f64::EPSILON);
        assert!((config.eat_threshold - 80.0).abs() < f64::EPSILON);
        assert!((config.wait_recovery - 5.0).abs() < f64::EPSILON);
        assert!((config.hostile_proximity_radius - 100.0).abs() < f64::EPSILON);
    }
}
