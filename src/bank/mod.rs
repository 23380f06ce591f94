use itertools::Itertools;
use std::collections::HashSet;
use std::convert::TryFrom;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::BankError;

pub mod question;

pub use question::{Question, RawQuestion};

#[cfg(test)]
mod tests;

/// Selecting this value for a facet stands for every value of that facet.
pub const WILDCARD: &str = "(all)";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facet {
    Year,
    Category,
}

impl Facet {
    fn value_of<'a>(&self, question: &'a Question) -> &'a str {
        match self {
            Facet::Year => &question.year,
            Facet::Category => &question.category,
        }
    }
}

#[derive(Debug, Default)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn open(source: &Path) -> Result<QuestionBank, BankError> {
        let file = File::open(source)?;
        QuestionBank::from_reader(file)
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<QuestionBank, BankError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let content = String::from_utf8_lossy(&bytes);

        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());
        let headers = csv_reader
            .headers()
            .map_err(|e| BankError::malformed(1, e.to_string()))?
            .clone();

        let mut questions = Vec::new();
        let mut seen = HashSet::new();
        for record in csv_reader.records() {
            let record = record.map_err(|e| {
                let row = e.position().map(|p| p.line()).unwrap_or_default();
                BankError::malformed(row, e.to_string())
            })?;
            let row = record.position().map(|p| p.line()).unwrap_or_default();
            let raw_question: RawQuestion = record
                .deserialize(Some(&headers))
                .map_err(|e| BankError::malformed(row, e.to_string()))?;
            let question =
                Question::try_from(raw_question).map_err(|r| BankError::malformed(row, r))?;
            if !seen.insert(question.text.clone()) {
                return Err(BankError::malformed(
                    row,
                    format!("duplicate question `{}`", question.text),
                ));
            }
            questions.push(question);
        }

        log::info!("Loaded question bank with {} questions", questions.len());
        Ok(QuestionBank { questions })
    }

    #[cfg(test)]
    pub fn questions(&self) -> &Vec<Question> {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Distinct values of a facet, in the order they first appear.
    pub fn facet_values(&self, facet: Facet) -> Vec<String> {
        self.questions
            .iter()
            .map(|q| facet.value_of(q).to_owned())
            .unique()
            .collect()
    }

    /// The values a learner can pick from, wildcard first.
    pub fn facet_choices(&self, facet: Facet) -> Vec<String> {
        let mut choices = vec![WILDCARD.to_owned()];
        choices.append(&mut self.facet_values(facet));
        choices
    }

    fn resolve(&self, facet: Facet, selection: &[String]) -> HashSet<String> {
        if selection.iter().any(|s| s == WILDCARD) {
            self.facet_values(facet).into_iter().collect()
        } else {
            selection.iter().cloned().collect()
        }
    }

    pub fn filter(&self, years: &[String], categories: &[String]) -> Vec<Question> {
        let years = self.resolve(Facet::Year, years);
        let categories = self.resolve(Facet::Category, categories);
        self.questions
            .iter()
            .filter(|q| years.contains(&q.year) && categories.contains(&q.category))
            .cloned()
            .collect()
    }
}
