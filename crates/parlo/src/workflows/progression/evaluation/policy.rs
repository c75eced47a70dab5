use super::config::PromotionConfig;
use crate::workflows::progression::domain::{LEVEL_MAX, LEVEL_MIN, ROLLING_WINDOW_SIZE};

/// Lowest level at which sustained low scores trigger a demotion.
const AUTO_DEMOTE_MIN_LEVEL: u8 = 6;

/// Trailing `n` entries of `scores`, or all of them when fewer exist.
pub fn last_n(scores: &[f64], n: usize) -> &[f64] {
    &scores[scores.len().saturating_sub(n)..]
}

/// Mean of the given scores, `None` when there are none.
pub fn rolling_average(scores: &[f64]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    Some(scores.iter().sum::<f64>() / scores.len() as f64)
}

pub(crate) fn check_promotion(config: &PromotionConfig, level: u8, window: &[f64]) -> bool {
    if window.len() < ROLLING_WINDOW_SIZE {
        return false;
    }
    if level >= LEVEL_MAX {
        return false;
    }
    rolling_average(window)
        .map(|average| average >= config.promotion_threshold)
        .unwrap_or(false)
}

pub(crate) fn check_demotion(config: &PromotionConfig, level: u8, window: &[f64]) -> bool {
    if window.len() < ROLLING_WINDOW_SIZE {
        return false;
    }
    if level <= LEVEL_MIN {
        return false;
    }
    if level == LEVEL_MAX && !config.allow_top_level_auto_demote {
        return false;
    }
    if level < AUTO_DEMOTE_MIN_LEVEL {
        return false;
    }
    rolling_average(window)
        .map(|average| average < config.demotion_threshold)
        .unwrap_or(false)
}
