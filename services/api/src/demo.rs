use crate::infra::{default_promotion_config, InMemoryLevelStore, InMemoryScoreLedger};
use chrono::{Local, NaiveDate};
use clap::Args;
use parlo::error::AppError;
use parlo::workflows::placement::{
    classify, AssessmentContent, CefrTier, InterviewSession, InterviewStep, LexicalSelection,
    OccupationProfile, PlacementError, PlacementService, PlacementSubmission, ProductionResult,
    SelfReportTier, SpeechCapture, StandardContent, StatementAnswer,
};
use parlo::workflows::progression::{
    last_n, rolling_average, ExamOutcome, LearnerId, LevelChange, ProgressionService,
    ScoreHistoryImporter, ROLLING_WINDOW_SIZE,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Learner identifier used throughout the demo.
    #[arg(long)]
    pub(crate) learner: Option<String>,
    /// Date the certification exam is taken (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Optional session score export to hydrate the progression ledger.
    #[arg(long)]
    pub(crate) scores_csv: Option<PathBuf>,
    /// Include the full interview step listing in the demo output.
    #[arg(long)]
    pub(crate) include_steps: bool,
    /// Skip the certification exam portion of the demo.
    #[arg(long)]
    pub(crate) skip_exam: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreImportArgs {
    /// Path to the session score CSV export
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Print every learner's imported score history
    #[arg(long)]
    pub(crate) list_scores: bool,
}

pub(crate) fn run_score_import(args: ScoreImportArgs) -> Result<(), AppError> {
    let ScoreImportArgs { csv, list_scores } = args;

    let ledger = InMemoryScoreLedger::default();
    let summary = ScoreHistoryImporter::from_path(&csv, &ledger)?;

    println!("Score history import");
    println!(
        "- {} rows imported, {} skipped, {} learners",
        summary.imported, summary.skipped, summary.learners
    );

    for learner in ledger.learners() {
        let scores = ledger.recorded(&learner);
        let window = last_n(&scores, ROLLING_WINDOW_SIZE);
        match rolling_average(window) {
            Some(average) => println!(
                "- {}: {} sessions | rolling average {:.1} over last {}",
                learner.0,
                scores.len(),
                average,
                window.len()
            ),
            None => println!("- {}: no usable sessions", learner.0),
        }
        if list_scores {
            let listing: Vec<String> = scores.iter().map(|score| format!("{score:.1}")).collect();
            println!("    {}", listing.join(", "));
        }
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        learner,
        today,
        scores_csv,
        include_steps,
        skip_exam,
    } = args;

    let learner = LearnerId(learner.unwrap_or_else(|| "learner-demo".to_string()));
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    println!("Parlo proficiency demo");

    let content = Arc::new(StandardContent::standard());
    let levels = Arc::new(InMemoryLevelStore::default());
    let ledger = Arc::new(InMemoryScoreLedger::default());
    let placement = Arc::new(PlacementService::new(content.clone(), levels.clone()));
    let progression = Arc::new(ProgressionService::new(
        levels,
        ledger.clone(),
        default_promotion_config(),
    ));

    println!("\nPlacement interview walkthrough");
    let session = match run_scripted_interview(content.as_ref(), include_steps) {
        Ok(session) => session,
        Err(err) => {
            println!("  Interview walkthrough failed: {err}");
            return Ok(());
        }
    };
    println!(
        "- Native language {} | daily goal {} min | reminders {}",
        session.native_language().unwrap_or("unknown"),
        session.daily_goal().unwrap_or(0),
        if session.notifications_enabled() {
            "on"
        } else {
            "off"
        }
    );
    println!("- Progress {:.0}%", session.progress() * 100.0);
    let preview = match session.outcome() {
        Ok(outcome) => outcome,
        Err(err) => {
            println!("  Interview incomplete: {err}");
            return Ok(());
        }
    };
    println!(
        "- Vocabulary band {} | confirmed band {} | starting level {}",
        preview.lexical_band.label(),
        preview.final_band.label(),
        preview.level
    );

    let submission = demo_placement_submission(&learner, content.as_ref());
    let outcome = match placement.place(&submission) {
        Ok(outcome) => outcome,
        Err(err) => {
            println!("  Placement rejected: {err}");
            return Ok(());
        }
    };
    let view = outcome.view(&learner);
    match serde_json::to_string_pretty(&view) {
        Ok(json) => println!("  Stored placement payload:\n{json}"),
        Err(err) => println!("  Stored placement payload unavailable: {err}"),
    }

    if let Some(path) = scores_csv {
        match ScoreHistoryImporter::from_path(&path, ledger.as_ref()) {
            Ok(summary) => println!(
                "\nLedger hydrated from CSV: {} rows imported, {} skipped, {} learners",
                summary.imported, summary.skipped, summary.learners
            ),
            Err(err) => println!("\nLedger hydration failed: {err}"),
        }
    }

    let starting_level = match progression.current_level(&learner) {
        Ok(level) => level,
        Err(err) => {
            println!("  Level lookup unavailable: {err}");
            return Ok(());
        }
    };
    let season = synthetic_season_scores(starting_level);
    println!("\nPromotion season ({} scored sessions)", season.len());

    let mut digest = SeasonDigest::default();
    for score in season {
        let result = match progression.record_attempt(&learner, score) {
            Ok(result) => result,
            Err(err) => {
                println!("  Progression unavailable: {err}");
                return Ok(());
            }
        };
        digest.note(result.change);
        match result.change {
            LevelChange::Promoted => println!(
                "- Session scored {score:.0} -> promoted to level {}",
                result.new_level
            ),
            LevelChange::Demoted => println!(
                "- Session scored {score:.0} -> demoted to level {}",
                result.new_level
            ),
            LevelChange::Same => println!(
                "- Session scored {score:.0} -> level {} holds",
                result.new_level
            ),
        }
    }
    println!(
        "- {} sessions | {} promotions | {} demotions",
        digest.sessions, digest.promotions, digest.demotions
    );

    let eligibility = match progression.exam_eligibility(&learner) {
        Ok(view) => view,
        Err(err) => {
            println!("  Eligibility unavailable: {err}");
            return Ok(());
        }
    };
    match eligibility.rolling_average {
        Some(average) => println!(
            "\nCertification gate: level {} | {} recorded sessions | rolling average {:.1} | eligible {}",
            eligibility.current_level, eligibility.recorded_scores, average, eligibility.eligible
        ),
        None => println!(
            "\nCertification gate: level {} | no scored window yet",
            eligibility.current_level
        ),
    }

    if skip_exam {
        return Ok(());
    }

    if !eligibility.eligible {
        println!("  Exam skipped: learner has not met the entry bar");
        return Ok(());
    }

    let exam = ExamOutcome {
        passed: true,
        overall_score: Some(91.0),
        sub_scores: Some(vec![88.0, 90.0, 95.0]),
    };
    let decision = match progression.submit_exam(&learner, &exam, today) {
        Ok(decision) => decision,
        Err(err) => {
            println!("  Exam submission unavailable: {err}");
            return Ok(());
        }
    };
    if decision.result.certified {
        println!(
            "- Exam passed on {today}: certified at level {}",
            decision.result.new_level
        );
    } else {
        match decision.retry_available_on {
            Some(date) => println!(
                "- Exam failed: level {} retained, retry opens {date}",
                decision.result.new_level
            ),
            None => println!(
                "- Exam failed: level {} retained",
                decision.result.new_level
            ),
        }
    }

    let closing_level = match progression.current_level(&learner) {
        Ok(level) => level,
        Err(err) => {
            println!("  Level lookup unavailable: {err}");
            return Ok(());
        }
    };
    println!("- Closing level for {}: {closing_level}", learner.0);

    Ok(())
}

struct DemoCapture;

impl SpeechCapture for DemoCapture {
    fn available(&self) -> bool {
        true
    }

    fn capture(&self, _sentence: &str) -> bool {
        true
    }
}

fn run_scripted_interview(
    content: &StandardContent,
    include_steps: bool,
) -> Result<InterviewSession, PlacementError> {
    let mut session = InterviewSession::new(content);
    let capture = DemoCapture;

    if include_steps {
        println!("- Interview plan ({} steps)", session.plan().len());
        for step in session.plan() {
            println!("    {}", step.label());
        }
    }

    loop {
        match session.current() {
            InterviewStep::Language => {
                session.record_native_language("Korean".to_string());
            }
            InterviewStep::PracticeReason => {
                session.record_practice_reason("weekly planning calls".to_string());
            }
            InterviewStep::Occupation => {
                session.record_occupation(OccupationProfile {
                    field: "software".to_string(),
                    role: "backend engineer".to_string(),
                });
            }
            InterviewStep::SelfAssessment => {
                session.record_self_report(SelfReportTier::Meeting);
            }
            InterviewStep::Statement(index) => {
                session.record_statement(index, StatementAnswer::Partially)?;
            }
            InterviewStep::Lexical(tier) => {
                session.record_lexical(tier, demo_known_words(content, tier));
            }
            InterviewStep::DailyGoal => {
                session.record_daily_goal(15);
            }
            InterviewStep::Notifications => {
                session.record_notifications(true);
            }
            InterviewStep::Listening(_) => {
                let answer = session
                    .listening_item()
                    .tokens
                    .iter()
                    .map(|token| token.to_string())
                    .collect();
                session.record_listening_answer(answer);
            }
            InterviewStep::Speaking(_) => {
                session.record_speaking(&capture);
            }
            InterviewStep::Results => break,
        }
        session.advance()?;
    }

    Ok(session)
}

fn demo_known_words(content: &StandardContent, tier: CefrTier) -> Vec<String> {
    let vocabulary = content.vocabulary(tier);
    let keep = match tier {
        CefrTier::A => vocabulary.len(),
        CefrTier::B => 4,
        CefrTier::C => 0,
    };
    vocabulary[..keep]
        .iter()
        .map(|word| word.to_string())
        .collect()
}

fn demo_placement_submission(
    learner: &LearnerId,
    content: &StandardContent,
) -> PlacementSubmission {
    let mut lexical = LexicalSelection::default();
    lexical.set_words(CefrTier::A, demo_known_words(content, CefrTier::A));
    lexical.set_words(CefrTier::B, demo_known_words(content, CefrTier::B));
    let band = classify(&lexical);

    PlacementSubmission {
        learner_id: learner.clone(),
        statements: vec![StatementAnswer::Partially; content.statements().len()],
        lexical,
        self_report: "meeting".to_string(),
        listening_order: content
            .listening_item(band)
            .tokens
            .iter()
            .map(|token| token.to_string())
            .collect(),
        speaking: ProductionResult {
            done: true,
            capture_available: true,
        },
    }
}

/// Rising score curve that fills the evaluation window over one season.
fn synthetic_season_scores(starting_level: u8) -> Vec<f64> {
    let base = 70.0 + f64::from(starting_level);
    (0..7).map(|session| base + (session as f64) * 3.0).collect()
}

#[derive(Debug, Default)]
struct SeasonDigest {
    sessions: u32,
    promotions: u32,
    demotions: u32,
}

impl SeasonDigest {
    fn note(&mut self, change: LevelChange) {
        self.sessions += 1;
        match change {
            LevelChange::Promoted => self.promotions += 1,
            LevelChange::Demoted => self.demotions += 1,
            LevelChange::Same => {}
        }
    }
}
