use serde::Deserialize;

/// One CSV row as found in the file. Every column is optional here so that a
/// missing header and a blank cell are reported the same way.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct RawQuestion {
    pub question: Option<String>,
    pub option1: Option<String>,
    pub option2: Option<String>,
    pub option3: Option<String>,
    pub option4: Option<String>,
    pub option5: Option<String>,
    pub answer: Option<String>,
    pub year: Option<String>,
    pub category: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
    pub text: String,
    pub options: Vec<String>,
    pub correct_option: String,
    pub year: String,
    pub category: String,
}

impl Question {
    pub fn is_correct(&self, selected: &str) -> bool {
        self.correct_option == selected
    }
}

fn required(value: Option<String>, column: &str) -> Result<String, String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_owned()),
        _ => Err(format!("missing value for column `{}`", column)),
    }
}

impl std::convert::TryFrom<RawQuestion> for Question {
    type Error = String;

    fn try_from(raw_question: RawQuestion) -> Result<Self, Self::Error> {
        let text = required(raw_question.question, "question")?;
        let options = vec![
            required(raw_question.option1, "option1")?,
            required(raw_question.option2, "option2")?,
            required(raw_question.option3, "option3")?,
            required(raw_question.option4, "option4")?,
            required(raw_question.option5, "option5")?,
        ];
        let correct_option = required(raw_question.answer, "answer")?;
        let year = required(raw_question.year, "year")?;
        let category = required(raw_question.category, "category")?;

        if !options.contains(&correct_option) {
            return Err(format!(
                "answer `{}` is not one of the options of `{}`",
                correct_option, text
            ));
        }

        Ok(Question {
            text,
            options,
            correct_option,
            year,
            category,
        })
    }
}
