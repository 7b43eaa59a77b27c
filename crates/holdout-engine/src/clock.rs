//! World clock: the tick counter and the derived night window.
//!
//! The tick number is the single source of temporal truth; the night
//! window is always computed from it, never stored. Night matters to the
//! rule engine (noise suppression) and is surfaced to the oracle prompt.

use serde::Deserialize;

/// Errors that can occur during clock operations.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Tick counter would overflow.
    #[error("tick counter overflow: cannot advance beyond u64::MAX")]
    TickOverflow,

    /// Invalid night-window configuration.
    #[error("invalid night configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong.
        reason: String,
    },
}

/// Night-window parameters: ticks `start..period` of every `period`-tick
/// cycle are night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NightConfig {
    /// Length of the full day/night cycle in ticks.
    pub period: u64,
    /// Offset within the cycle where night begins.
    pub start: u64,
}

impl Default for NightConfig {
    fn default() -> Self {
        Self {
            period: 50,
            start: 40,
        }
    }
}

/// The world clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldClock {
    tick: u64,
    night: NightConfig,
}

impl WorldClock {
    /// Create a clock at tick 0.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if the night window is
    /// degenerate (zero period, or a start outside the period).
    pub fn new(night: NightConfig) -> Result<Self, ClockError> {
        Self::from_parts(0, night)
    }

    /// Create a clock at an explicit tick (state restoration and tests).
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] for a degenerate night window.
    pub fn from_parts(tick: u64, night: NightConfig) -> Result<Self, ClockError> {
        if night.period == 0 {
            return Err(ClockError::InvalidConfig {
                reason: "night period must be at least 1".to_owned(),
            });
        }
        if night.start >= night.period {
            return Err(ClockError::InvalidConfig {
                reason: format!(
                    "night start {} must be inside the period {}",
                    night.start, night.period
                ),
            });
        }
        Ok(Self { tick, night })
    }

    /// Advance the clock by one tick. Returns the new tick number.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::TickOverflow`] if the counter would exceed
    /// `u64::MAX`.
    pub fn advance(&mut self) -> Result<u64, ClockError> {
        self.tick = self.tick.checked_add(1).ok_or(ClockError::TickOverflow)?;
        Ok(self.tick)
    }

    /// The current tick number.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Whether the current tick falls in the night window.
    pub fn is_night(&self) -> bool {
        night_at(self.tick, self.night)
    }
}

/// Whether a given tick falls in the night window.
///
/// Exposed separately so the rule engine can evaluate arbitrary ticks
/// without holding a clock.
pub fn night_at(tick: u64, night: NightConfig) -> bool {
    if night.period == 0 {
        return false;
    }
    tick.checked_rem(night.period).unwrap_or(0) >= night.start
}
