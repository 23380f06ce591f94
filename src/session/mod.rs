use itertools::Itertools;
use std::collections::{BTreeSet, HashMap};

use crate::bank::{Question, QuestionBank};
use crate::completion::CompletionRecord;
use crate::error::SessionError;
use crate::shuffle::Shuffler;


#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Empty,
    Active,
    Mastered,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScoreResult {
    pub score: usize,
    pub total: usize,
    pub accuracy: f64,
    pub mastered: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Submission {
    pub result: ScoreResult,
    pub completion: Option<CompletionRecord>,
}

/// What the presentation layer needs to render one question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PresentedQuestion {
    pub number: usize,
    pub text: String,
    pub options: Vec<String>,
    pub selected: Option<String>,
    pub highlighted: bool,
}

/// A learner's drill over one filter selection at a time.
///
/// Each submission keeps only the missed questions in the working set, until
/// a round comes back fully correct.
///
/// Highlighted questions are tracked by their 1-based position in the working
/// set of the round in which they were scored. The set is patched with
/// inserts and removals rather than rebuilt, so once the working set shrinks a
/// position can point at a different question than the one that was missed.
pub struct QuizSession<S: Shuffler> {
    phase: Phase,
    shuffler: S,
    shuffled_options: HashMap<String, Vec<String>>,
    original_set: Vec<Question>,
    working_set: Vec<Question>,
    answers: HashMap<String, Option<String>>,
    highlighted: BTreeSet<usize>,
    submit_count: usize,
    selected_years: Vec<String>,
    selected_categories: Vec<String>,
    last_result: Option<ScoreResult>,
}

impl<S: Shuffler> QuizSession<S> {
    pub fn new(shuffler: S) -> Self {
        QuizSession {
            phase: Phase::Empty,
            shuffler,
            shuffled_options: HashMap::new(),
            original_set: Vec::new(),
            working_set: Vec::new(),
            answers: HashMap::new(),
            highlighted: BTreeSet::new(),
            submit_count: 0,
            selected_years: Vec::new(),
            selected_categories: Vec::new(),
            last_result: None,
        }
    }

    /// Forgets everything, including shuffled orders. Used when the bank changes.
    pub fn clear(&mut self) {
        self.shuffled_options.clear();
        self.original_set.clear();
        self.working_set.clear();
        self.answers.clear();
        self.highlighted.clear();
        self.submit_count = 0;
        self.selected_years.clear();
        self.selected_categories.clear();
        self.last_result = None;
        self.set_phase(Phase::Empty);
    }

    fn set_phase(&mut self, phase: Phase) {
        log::info!("Entering session phase: {:?}", phase);
        self.phase = phase;
    }

    pub fn apply_filter(&mut self, bank: &QuestionBank, years: &[String], categories: &[String]) {
        let questions = bank.filter(years, categories);
        log::info!(
            "Filter [{}] / [{}] selected {} questions",
            years.iter().join(", "),
            categories.iter().join(", "),
            questions.len()
        );

        self.answers = questions.iter().map(|q| (q.text.clone(), None)).collect();
        self.original_set = questions.clone();
        self.working_set = questions;
        self.highlighted.clear();
        self.submit_count = 0;
        self.last_result = None;
        self.selected_years = years.iter().unique().cloned().collect();
        self.selected_categories = categories.iter().unique().cloned().collect();
        self.set_phase(Phase::Active);
    }

    /// Any value is accepted; one that is not an option simply scores as wrong.
    pub fn record_answer(
        &mut self,
        question_text: &str,
        chosen_option: &str,
    ) -> Result<(), SessionError> {
        if self.phase == Phase::Empty {
            return Err(SessionError::NoFilter);
        }
        self.answers
            .insert(question_text.to_owned(), Some(chosen_option.to_owned()));
        Ok(())
    }

    /// Display order of a question's options, fixed the first time it is asked
    /// for and kept for the rest of the session, across filter changes.
    pub fn options_for(&mut self, question: &Question) -> Vec<String> {
        if let Some(options) = self.shuffled_options.get(&question.text) {
            return options.clone();
        }
        log::debug!("Shuffling options of `{}`", question.text);
        let options = self.shuffler.permute(&question.options);
        self.shuffled_options
            .insert(question.text.clone(), options.clone());
        options
    }

    pub fn present(&mut self) -> Vec<PresentedQuestion> {
        let mut presented = Vec::with_capacity(self.working_set.len());
        for index in 0..self.working_set.len() {
            let question = self.working_set[index].clone();
            let number = index + 1;
            presented.push(PresentedQuestion {
                number,
                options: self.options_for(&question),
                selected: self.answer_for(&question.text).map(str::to_owned),
                highlighted: self.highlighted.contains(&number),
                text: question.text,
            });
        }
        presented
    }

    pub fn submit(&mut self) -> Result<Submission, SessionError> {
        if self.phase == Phase::Empty {
            return Err(SessionError::NoFilter);
        }
        if self.working_set.is_empty() {
            return Err(SessionError::NothingToSubmit);
        }

        let total = self.working_set.len();
        let mut score = 0;
        let mut misses = Vec::new();
        for (index, question) in self.working_set.iter().enumerate() {
            let position = index + 1;
            let is_correct = self
                .answers
                .get(&question.text)
                .and_then(|a| a.as_deref())
                .map_or(false, |selected| question.is_correct(selected));
            if is_correct {
                score += 1;
                self.highlighted.remove(&position);
            } else {
                misses.push(question.clone());
                self.highlighted.insert(position);
            }
        }

        let accuracy = score as f64 / total as f64 * 100.0;
        let mastered = misses.is_empty();
        let completion = if mastered {
            self.working_set.clear();
            self.set_phase(Phase::Mastered);
            Some(CompletionRecord::new(
                self.selected_years.clone(),
                self.selected_categories.clone(),
                self.original_set.len(),
            ))
        } else {
            self.working_set = misses;
            None
        };
        self.submit_count += 1;

        let result = ScoreResult {
            score,
            total,
            accuracy,
            mastered,
        };
        log::info!(
            "Submission {}: {} / {} ({:.2}%)",
            self.submit_count,
            score,
            total,
            accuracy
        );
        self.last_result = Some(result.clone());

        Ok(Submission { result, completion })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn answer_for(&self, question_text: &str) -> Option<&str> {
        self.answers.get(question_text).and_then(|a| a.as_deref())
    }

    #[cfg(test)]
    pub fn original_set(&self) -> &[Question] {
        &self.original_set
    }

    pub fn working_set(&self) -> &[Question] {
        &self.working_set
    }

    #[cfg(test)]
    pub fn highlighted(&self) -> &BTreeSet<usize> {
        &self.highlighted
    }

    pub fn submit_count(&self) -> usize {
        self.submit_count
    }

    #[cfg(test)]
    pub fn selected_years(&self) -> &[String] {
        &self.selected_years
    }

    #[cfg(test)]
    pub fn selected_categories(&self) -> &[String] {
        &self.selected_categories
    }

    pub fn last_result(&self) -> Option<&ScoreResult> {
        self.last_result.as_ref()
    }
}
