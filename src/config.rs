//! Search configuration
//!
//! All recognized knobs of the engine live here. Every option is checked
//! once, when a searcher or player is built; the search itself never
//! re-validates.

use crate::error::EngineError;

/// Seed used to derive Zobrist constants unless overridden.
pub const DEFAULT_ZOBRIST_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

/// Engine configuration.
///
/// # Example
///
/// ```
/// use hexorcist::SearchConfig;
///
/// let mut config = SearchConfig::default();
/// config.max_depth = 4;
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Deepest iteration the deepener will attempt. Must be at least 1.
    pub max_depth: u8,
    /// Transposition table slot count. Power of two, at least 1024.
    pub tt_capacity: usize,
    /// Heuristic weight on the opponent's connection distance.
    pub opponent_distance_weight: i32,
    /// Heuristic weight on the mover's own connection distance. One above
    /// the opponent weight by default, so equal-looking positions resolve
    /// toward finishing our own chain.
    pub own_distance_weight: i32,
    /// Include bridge (two-cell virtual connection) edges in the distance
    /// evaluator. Disabling removes only those edges.
    pub bridges: bool,
    /// Seed for the Zobrist constants. Fixed by default so keys are
    /// stable within a process and tests can pin them.
    pub zobrist_seed: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 64,
            tt_capacity: 1 << 20,
            opponent_distance_weight: 10,
            own_distance_weight: 11,
            bridges: true,
            zobrist_seed: DEFAULT_ZOBRIST_SEED,
        }
    }
}

impl SearchConfig {
    /// Check every option. Weight bounds keep heuristic values strictly
    /// inside the win scores for all supported board sizes.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.max_depth < 1 {
            return Err(EngineError::InvalidConfig(
                "max_depth must be at least 1".into(),
            ));
        }
        if self.tt_capacity < 1024 || !self.tt_capacity.is_power_of_two() {
            return Err(EngineError::InvalidConfig(format!(
                "tt_capacity must be a power of two >= 1024, got {}",
                self.tt_capacity
            )));
        }
        for (name, weight) in [
            ("opponent_distance_weight", self.opponent_distance_weight),
            ("own_distance_weight", self.own_distance_weight),
        ] {
            if !(1..=100).contains(&weight) {
                return Err(EngineError::InvalidConfig(format!(
                    "{name} must be in 1..=100, got {weight}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SearchConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_depth_rejected() {
        let config = SearchConfig {
            max_depth: 0,
            ..SearchConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn tt_capacity_must_be_power_of_two() {
        let config = SearchConfig {
            tt_capacity: 1000,
            ..SearchConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SearchConfig {
            tt_capacity: 3 << 10,
            ..SearchConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SearchConfig {
            tt_capacity: 1 << 10,
            ..SearchConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn weight_bounds_enforced() {
        for (a, b) in [(0, 11), (10, 0), (101, 11), (10, -3)] {
            let config = SearchConfig {
                opponent_distance_weight: a,
                own_distance_weight: b,
                ..SearchConfig::default()
            };
            assert!(config.validate().is_err(), "({a}, {b}) should be rejected");
        }
    }
}
