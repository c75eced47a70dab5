/// Thresholds steering promotion, demotion and the certification gate.
#[derive(Debug, Clone, PartialEq)]
pub struct PromotionConfig {
    /// Rolling average at or above which a learner moves up a level.
    pub promotion_threshold: f64,
    /// Rolling average below which an eligible learner moves down a level.
    pub demotion_threshold: f64,
    /// Rolling average required before the certification exam opens.
    pub pro_entry_avg_threshold: f64,
    /// Overall exam score required to pass, when the grader reports one.
    pub pro_exam_pass_score: f64,
    /// Minimum every exam section must reach individually.
    pub pro_exam_min_sub_score: f64,
    /// Days a learner waits after a failed exam before retrying.
    pub pro_retry_cooldown_days: u32,
    /// Whether the top level may be lost through ordinary demotion.
    pub allow_top_level_auto_demote: bool,
}

impl Default for PromotionConfig {
    fn default() -> Self {
        Self {
            promotion_threshold: 80.0,
            demotion_threshold: 60.0,
            pro_entry_avg_threshold: 85.0,
            pro_exam_pass_score: 85.0,
            pro_exam_min_sub_score: 70.0,
            pro_retry_cooldown_days: 30,
            allow_top_level_auto_demote: false,
        }
    }
}
