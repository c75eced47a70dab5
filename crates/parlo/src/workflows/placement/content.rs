//! Static interview content: self-description statements, tiered vocabulary
//! and the listening/speaking micro-task scripts.

use super::domain::{Band, CefrTier};

/// One self-description statement shown during the interview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementPrompt {
    pub key: &'static str,
    pub text: &'static str,
}

/// Sentence played back for the listening task, with its expected word order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListeningItem {
    pub sentence: &'static str,
    pub tokens: Vec<&'static str>,
}

/// Sentence the learner is asked to read aloud for the speaking task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakingItem {
    pub sentence: &'static str,
}

/// Source of interview content, banded by difficulty.
pub trait AssessmentContent: Send + Sync {
    fn statements(&self) -> &[StatementPrompt];
    fn vocabulary(&self, tier: CefrTier) -> &[&'static str];
    fn listening_item(&self, band: Band) -> &ListeningItem;
    fn speaking_item(&self, band: Band) -> &SpeakingItem;
}

/// The built-in interview catalog.
#[derive(Debug, Clone)]
pub struct StandardContent {
    statements: Vec<StatementPrompt>,
    tier_a: Vec<&'static str>,
    tier_b: Vec<&'static str>,
    tier_c: Vec<&'static str>,
    listening: Vec<ListeningItem>,
    speaking: Vec<SpeakingItem>,
}

impl StandardContent {
    pub fn standard() -> Self {
        Self {
            statements: standard_statements(),
            tier_a: vec![
                "laugh",
                "run",
                "drink",
                "sky",
                "flower",
                "eat",
                "listen",
                "book",
                "chair",
                "happy",
                "walk",
                "sleep",
                "friend",
                "family",
                "car",
                "play",
                "dog",
                "dance",
                "water",
                "red",
                "morning",
                "hello",
                "thank you",
                "help",
            ],
            tier_b: vec![
                "challenge",
                "disappointment",
                "concentrate",
                "recommendation",
                "responsibility",
                "ambition",
                "creativity",
                "abandon",
                "beyond",
                "decrease",
                "emerge",
                "honesty",
                "maintain",
                "perception",
                "similarity",
                "schedule",
                "deadline",
                "feedback",
            ],
            tier_c: vec![
                "ambiguity",
                "intricate",
                "articulate",
                "ingenuity",
                "resilience",
                "absence",
                "introspection",
                "meticulous",
                "credibility",
                "architectural",
                "cultivate",
                "default",
                "noble",
                "residential",
                "sketch",
                "align",
                "scope",
                "stakeholder",
            ],
            listening: vec![
                ListeningItem {
                    sentence: "I have a job interview tomorrow.",
                    tokens: vec!["I", "have", "a", "job", "interview", "tomorrow."],
                },
                ListeningItem {
                    sentence: "Could you send me the report by Friday?",
                    tokens: vec!["Could", "you", "send", "me", "the", "report", "by", "Friday?"],
                },
                ListeningItem {
                    sentence: "We need to align on the timeline before the client call.",
                    tokens: vec![
                        "We", "need", "to", "align", "on", "the", "timeline", "before", "the",
                        "client", "call.",
                    ],
                },
            ],
            speaking: vec![
                SpeakingItem {
                    sentence: "Yes, I can do that.",
                },
                SpeakingItem {
                    sentence: "I'll get back to you by end of day.",
                },
                SpeakingItem {
                    sentence: "Let me check with the team and confirm by tomorrow.",
                },
            ],
        }
    }
}

impl AssessmentContent for StandardContent {
    fn statements(&self) -> &[StatementPrompt] {
        &self.statements
    }

    fn vocabulary(&self, tier: CefrTier) -> &[&'static str] {
        match tier {
            CefrTier::A => &self.tier_a,
            CefrTier::B => &self.tier_b,
            CefrTier::C => &self.tier_c,
        }
    }

    fn listening_item(&self, band: Band) -> &ListeningItem {
        &self.listening[band.index() as usize]
    }

    fn speaking_item(&self, band: Band) -> &SpeakingItem {
        &self.speaking[band.index() as usize]
    }
}

fn standard_statements() -> Vec<StatementPrompt> {
    vec![
        StatementPrompt {
            key: "listening",
            text: "I don't understand well when I hear fluent English.",
        },
        StatementPrompt {
            key: "vocabulary",
            text: "I often get stuck when speaking because I know few words.",
        },
        StatementPrompt {
            key: "grammar",
            text: "I often make sentences sound awkward when speaking.",
        },
        StatementPrompt {
            key: "production",
            text: "I understand, but words don't come out well.",
        },
        StatementPrompt {
            key: "natural",
            text: "I can speak English, but I want to speak more naturally.",
        },
        StatementPrompt {
            key: "movies",
            text: "I don't understand well when watching English movies.",
        },
    ]
}
