use std::path::PathBuf;

use crate::completion::CompletionRecord;
use crate::session::{PresentedQuestion, ScoreResult};

#[cfg(test)]
pub mod mock;
pub mod terminal;

#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    BankLoaded(usize),
    CertificateSaved(PathBuf),
    CompletionHistory(Vec<CompletionRecord>),
    Error(String),
    FacetChoices(Vec<String>, Vec<String>),
    Help,
    Mastered(CompletionRecord),
    NoMatchingQuestions,
    Questions(Vec<PresentedQuestion>),
    /// Round number, then how many questions it asks again.
    RetryRound(usize, usize),
    Score(ScoreResult),
    SelectionPending,
}

/// Where the drill talks to the learner.
pub trait QuizOutput {
    fn say(&self, message: &Message);
}
