use itertools::Itertools;
use std::io::Write;

use crate::output::{Message, QuizOutput};
use crate::session::PresentedQuestion;

const HELP: &str = "Commands:
  load <path>                  load a question bank (CSV)
  years <a, b | (all)>         choose exam sessions
  categories <a, b | (all)>    choose categories
  show                         list the questions of the current round
  answer <question> <option>   pick an option, e.g. `answer 2 4`
  submit                       score this round
  history                      list completed problems
  certificate [all]            save the latest certificate, or the whole log
  quit                         leave";

#[derive(Clone, Debug, Default)]
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        TerminalOutput
    }

    fn interpret_question(question: &PresentedQuestion) -> String {
        let marker = if question.highlighted { " (!)" } else { "" };
        let mut text = format!("Question {}{}\n{}", question.number, marker, question.text);
        for (index, option) in question.options.iter().enumerate() {
            let selected = question.selected.as_deref() == Some(option.as_str());
            text += &format!(
                "\n  {} {}. {}",
                if selected { "[x]" } else { "[ ]" },
                index + 1,
                option
            );
        }
        text
    }

    fn interpret_message(&self, message: &Message) -> String {
        use Message::*;
        match message {
            BankLoaded(count) => format!("Loaded {} questions.", count),
            CertificateSaved(path) => format!("Certificate saved to {}", path.display()),
            CompletionHistory(records) => {
                if records.is_empty() {
                    return "No completed problems yet.".into();
                }
                let mut text = "Completed problems:".to_owned();
                for record in records {
                    text += &format!(
                        "\n- {} | {} | {} | {} questions",
                        record.display_timestamp(),
                        record.display_years(),
                        record.display_categories(),
                        record.question_count
                    );
                }
                text
            }
            Error(error) => format!("Error: {}", error),
            FacetChoices(years, categories) => format!(
                "Years: {}\nCategories: {}",
                years.iter().join(", "),
                categories.iter().join(", ")
            ),
            Help => HELP.into(),
            Mastered(record) => format!(
                "All questions answered correctly!\nCompleted problems\n  Date: {}\n  Years: {}\n  Categories: {}\n  Questions: {}\nUse `certificate` to save a certificate.",
                record.display_timestamp(),
                record.display_years(),
                record.display_categories(),
                record.question_count
            ),
            NoMatchingQuestions => "No questions match this selection.".into(),
            Questions(questions) => questions
                .iter()
                .map(TerminalOutput::interpret_question)
                .join("\n\n"),
            RetryRound(round, remaining) => format!(
                "Round {}: {} question(s) to retry. Questions you just missed are marked (!).",
                round, remaining
            ),
            Score(result) => format!(
                "Your score: {} / {}\nAccuracy: {:.2}%",
                result.score, result.total, result.accuracy
            ),
            SelectionPending => "Select at least one year and one category to start.".into(),
        }
    }
}

impl QuizOutput for TerminalOutput {
    fn say(&self, message: &Message) {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        if let Err(e) = writeln!(handle, "{}\n", self.interpret_message(message)) {
            log::error!("Could not write to terminal: {}", e);
        }
    }
}
