use chrono::{DateTime, Local};
use itertools::Itertools;


pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A filter selection that was answered entirely correctly.
#[derive(Clone, Debug, PartialEq)]
pub struct CompletionRecord {
    pub timestamp: DateTime<Local>,
    pub selected_years: Vec<String>,
    pub selected_categories: Vec<String>,
    pub question_count: usize,
}

impl CompletionRecord {
    pub fn new(
        selected_years: Vec<String>,
        selected_categories: Vec<String>,
        question_count: usize,
    ) -> Self {
        CompletionRecord {
            timestamp: Local::now(),
            selected_years,
            selected_categories,
            question_count,
        }
    }

    pub fn display_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn display_years(&self) -> String {
        self.selected_years.iter().join(", ")
    }

    pub fn display_categories(&self) -> String {
        self.selected_categories.iter().join(", ")
    }
}

/// Append-only history of completions, in insertion order.
#[derive(Clone, Debug, Default)]
pub struct CompletionLog {
    records: Vec<CompletionRecord>,
}

impl CompletionLog {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn append(&mut self, record: CompletionRecord) {
        log::info!(
            "Logging completion of {} questions ({} / {})",
            record.question_count,
            record.display_years(),
            record.display_categories()
        );
        self.records.push(record);
    }

    pub fn all(&self) -> &[CompletionRecord] {
        &self.records
    }

    pub fn last(&self) -> Option<&CompletionRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
