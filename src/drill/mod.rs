use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::bank::{Facet, QuestionBank};
use crate::certificate::CertificateRenderer;
use crate::completion::CompletionLog;
use crate::error::SessionError;
use crate::output::{Message, QuizOutput};
use crate::session::{Phase, QuizSession, ScoreResult};
use crate::shuffle::Shuffler;


#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CertificateScope {
    Latest,
    All,
}

/// Everything one learner works with. Learners never share a drill.
pub struct Drill<O: QuizOutput, S: Shuffler> {
    bank: Option<QuestionBank>,
    session: QuizSession<S>,
    log: CompletionLog,
    selected_years: Vec<String>,
    selected_categories: Vec<String>,
    renderer: Box<dyn CertificateRenderer>,
    certificate_dir: PathBuf,
    output: O,
}

impl<O: QuizOutput, S: Shuffler> Drill<O, S> {
    pub fn new(
        output: O,
        shuffler: S,
        renderer: Box<dyn CertificateRenderer>,
        certificate_dir: PathBuf,
    ) -> Self {
        Drill {
            bank: None,
            session: QuizSession::new(shuffler),
            log: CompletionLog::new(),
            selected_years: Vec::new(),
            selected_categories: Vec::new(),
            renderer,
            certificate_dir,
            output,
        }
    }

    fn get_bank(&self) -> Result<&QuestionBank> {
        self.bank
            .as_ref()
            .context("Load a question bank first, using `load <path>`")
    }

    pub fn load_bank(&mut self, path: &Path) -> Result<()> {
        let bank = QuestionBank::open(path)
            .with_context(|| format!("Could not load question bank {:?}", path))?;
        if bank.is_empty() {
            log::warn!("Question bank {:?} has no questions", path);
        }

        self.session.clear();
        self.selected_years.clear();
        self.selected_categories.clear();
        self.output.say(&Message::BankLoaded(bank.len()));
        self.output.say(&Message::FacetChoices(
            bank.facet_choices(Facet::Year),
            bank.facet_choices(Facet::Category),
        ));
        self.bank = Some(bank);
        Ok(())
    }

    pub fn select_years(&mut self, years: Vec<String>) -> Result<()> {
        self.get_bank()?;
        self.selected_years = years;
        self.refresh_filter();
        Ok(())
    }

    pub fn select_categories(&mut self, categories: Vec<String>) -> Result<()> {
        self.get_bank()?;
        self.selected_categories = categories;
        self.refresh_filter();
        Ok(())
    }

    fn refresh_filter(&mut self) {
        let bank = match &self.bank {
            Some(bank) => bank,
            None => return,
        };
        if self.selected_years.is_empty() || self.selected_categories.is_empty() {
            self.output.say(&Message::SelectionPending);
            return;
        }

        self.session
            .apply_filter(bank, &self.selected_years, &self.selected_categories);
        if self.session.working_set().is_empty() {
            self.output.say(&Message::NoMatchingQuestions);
        } else {
            let questions = self.session.present();
            self.output.say(&Message::Questions(questions));
        }
    }

    pub fn show(&mut self) -> Result<()> {
        match self.session.phase() {
            Phase::Empty => {
                self.get_bank()?;
                self.output.say(&Message::SelectionPending);
            }
            Phase::Mastered => {
                let record = self.log.last().context("No completed problems yet")?;
                self.output.say(&Message::Mastered(record.clone()));
            }
            Phase::Active => {
                if self.session.working_set().is_empty() {
                    self.output.say(&Message::NoMatchingQuestions);
                } else {
                    if let Some(result) = self.session.last_result().cloned() {
                        self.output.say(&Message::Score(result));
                        self.announce_retry();
                    }
                    let questions = self.session.present();
                    self.output.say(&Message::Questions(questions));
                }
            }
        }
        Ok(())
    }

    /// Numbers are 1-based and refer to what `show` displayed.
    pub fn answer(&mut self, question_number: usize, option_number: usize) -> Result<()> {
        if self.session.phase() == Phase::Empty {
            self.get_bank()?;
            return Err(SessionError::NoFilter.into());
        }
        let question = question_number
            .checked_sub(1)
            .and_then(|i| self.session.working_set().get(i))
            .cloned()
            .with_context(|| format!("There is no question {} in this round", question_number))?;
        let options = self.session.options_for(&question);
        let chosen = option_number
            .checked_sub(1)
            .and_then(|i| options.get(i))
            .with_context(|| {
                format!(
                    "Question {} has no option {}",
                    question_number, option_number
                )
            })?;
        self.session.record_answer(&question.text, chosen)?;
        log::debug!("Question {} answered with `{}`", question_number, chosen);
        Ok(())
    }

    pub fn submit(&mut self) -> Result<ScoreResult> {
        if self.session.phase() == Phase::Empty {
            self.get_bank()?;
        }
        let submission = self.session.submit()?;
        self.output.say(&Message::Score(submission.result.clone()));

        match submission.completion {
            Some(record) => {
                self.log.append(record.clone());
                self.output.say(&Message::Mastered(record));
            }
            None => {
                self.announce_retry();
                let questions = self.session.present();
                self.output.say(&Message::Questions(questions));
            }
        }
        Ok(submission.result)
    }

    fn announce_retry(&self) {
        self.output.say(&Message::RetryRound(
            self.session.submit_count() + 1,
            self.session.working_set().len(),
        ));
    }

    pub fn history(&self) {
        log::debug!("Listing {} completions", self.log.len());
        self.output
            .say(&Message::CompletionHistory(self.log.all().to_vec()));
    }

    pub fn help(&self) {
        self.output.say(&Message::Help);
    }

    pub fn save_certificate(&self, scope: CertificateScope) -> Result<PathBuf> {
        if self.log.is_empty() {
            return Err(anyhow!("No completed problems yet"));
        }
        let certificate = match scope {
            CertificateScope::Latest => {
                let record = self.log.last().context("No completed problems yet")?;
                self.renderer.render_record(record)?
            }
            CertificateScope::All => self.renderer.render_log(self.log.all())?,
        };

        fs::create_dir_all(&self.certificate_dir).with_context(|| {
            format!(
                "Could not create certificate directory {:?}",
                self.certificate_dir
            )
        })?;
        let path = self.certificate_dir.join(&certificate.file_name);
        fs::write(&path, &certificate.bytes)
            .with_context(|| format!("Could not write certificate {:?}", path))?;
        log::info!("Saved {} certificate to {:?}", certificate.mime_type, path);

        self.output.say(&Message::CertificateSaved(path.clone()));
        Ok(path)
    }

    pub fn say_error(&self, error: &anyhow::Error) {
        self.output.say(&Message::Error(format!("{:#}", error)));
    }

    #[cfg(test)]
    pub fn session(&self) -> &QuizSession<S> {
        &self.session
    }

    #[cfg(test)]
    pub fn log(&self) -> &CompletionLog {
        &self.log
    }
}
