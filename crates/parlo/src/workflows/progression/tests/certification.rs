use chrono::NaiveDate;

use super::common::*;

use crate::workflows::progression::domain::ExamOutcome;
use crate::workflows::progression::{CertificationGate, CERTIFIED_LEVEL, PRO_ENTRY_LEVEL};

fn gate() -> CertificationGate {
    CertificationGate::new(promotion_config())
}

fn passing_exam() -> ExamOutcome {
    ExamOutcome {
        passed: true,
        overall_score: Some(90.0),
        sub_scores: Some(vec![70.0, 71.0, 95.0]),
    }
}

#[test]
fn eligibility_requires_the_entry_level() {
    let gate = gate();
    assert!(!gate.exam_eligibility(6, &[90.0; 5]));
    assert!(!gate.exam_eligibility(CERTIFIED_LEVEL, &[90.0; 5]));
    assert!(gate.exam_eligibility(PRO_ENTRY_LEVEL, &[90.0; 5]));
}

#[test]
fn eligibility_requires_a_full_window() {
    let gate = gate();
    assert!(!gate.exam_eligibility(PRO_ENTRY_LEVEL, &[95.0; 4]));
    assert!(gate.exam_eligibility(PRO_ENTRY_LEVEL, &[95.0; 5]));
}

#[test]
fn eligibility_holds_exactly_at_the_entry_threshold() {
    let gate = gate();
    assert!(gate.exam_eligibility(PRO_ENTRY_LEVEL, &[85.0; 5]));
    assert!(!gate.exam_eligibility(PRO_ENTRY_LEVEL, &[84.0, 85.0, 85.0, 85.0, 85.0]));
}

#[test]
fn eligibility_looks_only_at_recent_scores() {
    let gate = gate();
    let history = [30.0, 30.0, 30.0, 90.0, 90.0, 90.0, 90.0, 90.0];
    assert!(gate.exam_eligibility(PRO_ENTRY_LEVEL, &history));
}

#[test]
fn passing_every_check_grants_the_certified_level() {
    let result = gate().process_exam(&passing_exam());
    assert!(result.certified);
    assert_eq!(result.new_level, CERTIFIED_LEVEL);
}

#[test]
fn grader_verdict_is_required() {
    let mut exam = passing_exam();
    exam.passed = false;

    let result = gate().process_exam(&exam);
    assert!(!result.certified);
    assert_eq!(result.new_level, PRO_ENTRY_LEVEL);
}

#[test]
fn overall_score_below_the_pass_mark_fails() {
    let mut exam = passing_exam();
    exam.overall_score = Some(84.9);

    let result = gate().process_exam(&exam);
    assert!(!result.certified);
    assert_eq!(result.new_level, PRO_ENTRY_LEVEL);
}

#[test]
fn any_section_below_the_minimum_fails() {
    let mut exam = passing_exam();
    exam.sub_scores = Some(vec![69.0, 90.0, 95.0]);

    let result = gate().process_exam(&exam);
    assert!(!result.certified);
    assert_eq!(result.new_level, PRO_ENTRY_LEVEL);
}

#[test]
fn sections_exactly_at_the_minimum_pass() {
    let mut exam = passing_exam();
    exam.sub_scores = Some(vec![70.0, 70.0, 70.0]);

    let result = gate().process_exam(&exam);
    assert!(result.certified);
}

#[test]
fn absent_scores_leave_the_verdict_standing() {
    let exam = ExamOutcome {
        passed: true,
        overall_score: None,
        sub_scores: None,
    };

    let result = gate().process_exam(&exam);
    assert!(result.certified);
    assert_eq!(result.new_level, CERTIFIED_LEVEL);
}

#[test]
fn retries_open_after_the_cooldown() {
    let failed_on = NaiveDate::from_ymd_opt(2026, 1, 15).expect("valid date");
    let retry = gate().retry_available_on(failed_on);
    assert_eq!(retry, NaiveDate::from_ymd_opt(2026, 2, 14).expect("valid date"));
}
