//! Promotion and demotion decisions over the rolling score window.

mod config;
mod policy;

pub use config::PromotionConfig;
pub use policy::{last_n, rolling_average};

use crate::workflows::progression::domain::{
    LevelChange, LevelChangeResult, LEVEL_MAX, LEVEL_MIN, ROLLING_WINDOW_SIZE,
};

/// Applies the promotion rules to a learner's recent scores.
#[derive(Debug, Clone)]
pub struct PromotionEngine {
    config: PromotionConfig,
}

impl PromotionEngine {
    pub fn new(config: PromotionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PromotionConfig {
        &self.config
    }

    /// Decides whether the level moves after the latest session.
    ///
    /// Fewer than [`ROLLING_WINDOW_SIZE`] recorded scores always keep the
    /// level where it is. Promotion is checked before demotion.
    pub fn evaluate(&self, current_level: u8, history: &[f64]) -> LevelChangeResult {
        let window = policy::last_n(history, ROLLING_WINDOW_SIZE);
        if window.len() < ROLLING_WINDOW_SIZE {
            return LevelChangeResult {
                new_level: current_level,
                change: LevelChange::Same,
            };
        }

        if policy::check_promotion(&self.config, current_level, window) {
            return LevelChangeResult {
                new_level: (current_level + 1).min(LEVEL_MAX),
                change: LevelChange::Promoted,
            };
        }

        if policy::check_demotion(&self.config, current_level, window) {
            return LevelChangeResult {
                new_level: current_level.saturating_sub(1).max(LEVEL_MIN),
                change: LevelChange::Demoted,
            };
        }

        LevelChangeResult {
            new_level: current_level,
            change: LevelChange::Same,
        }
    }
}
