use anyhow::{anyhow, Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::path::PathBuf;

use crate::drill::{CertificateScope, Drill};
use crate::output::QuizOutput;
use crate::shuffle::Shuffler;

lazy_static! {
    static ref COMMAND_REGEX: Regex = Regex::new(r"^\s*(\S+)\s*(.*?)\s*$").unwrap();
    static ref LIST_SEPARATOR_REGEX: Regex = Regex::new(r"\s*,\s*").unwrap();
    static ref ANSWER_REGEX: Regex = Regex::new(r"^(\d+)\s+(\d+)$").unwrap();
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Load(PathBuf),
    Years(Vec<String>),
    Categories(Vec<String>),
    Show,
    Answer(usize, usize),
    Submit,
    History,
    Certificate(CertificateScope),
    Help,
    Quit,
}

fn parse_list(arguments: &str) -> Result<Vec<String>> {
    let values: Vec<String> = LIST_SEPARATOR_REGEX
        .split(arguments)
        .filter(|v| !v.is_empty())
        .map(|v| v.to_owned())
        .collect();
    if values.is_empty() {
        return Err(anyhow!("Name at least one value, separated by commas"));
    }
    Ok(values)
}

fn expect_no_arguments(name: &str, arguments: &str, command: Command) -> Result<Command> {
    if arguments.is_empty() {
        Ok(command)
    } else {
        Err(anyhow!("`{}` does not take arguments", name))
    }
}

/// Blank lines parse to `None`.
pub fn parse(line: &str) -> Result<Option<Command>> {
    let captures = match COMMAND_REGEX.captures(line) {
        Some(captures) => captures,
        None => return Ok(None),
    };
    let name = captures[1].to_lowercase();
    let arguments = &captures[2];

    let command = match name.as_str() {
        "load" => {
            if arguments.is_empty() {
                return Err(anyhow!("Filename cannot be blank"));
            }
            Command::Load(PathBuf::from(arguments))
        }
        "years" => Command::Years(parse_list(arguments)?),
        "categories" => Command::Categories(parse_list(arguments)?),
        "answer" => {
            let numbers = ANSWER_REGEX
                .captures(arguments)
                .context("Usage: answer <question number> <option number>")?;
            Command::Answer(numbers[1].parse()?, numbers[2].parse()?)
        }
        "certificate" => match arguments {
            "" => Command::Certificate(CertificateScope::Latest),
            "all" => Command::Certificate(CertificateScope::All),
            other => return Err(anyhow!("Unknown certificate scope `{}`", other)),
        },
        "show" => expect_no_arguments(&name, arguments, Command::Show)?,
        "submit" => expect_no_arguments(&name, arguments, Command::Submit)?,
        "history" => expect_no_arguments(&name, arguments, Command::History)?,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(anyhow!("Unknown command `{}`, try `help`", other)),
    };
    Ok(Some(command))
}

/// Returns `false` for `Quit`, which leaves the drill untouched.
pub fn execute<O: QuizOutput, S: Shuffler>(
    drill: &mut Drill<O, S>,
    command: Command,
) -> Result<bool> {
    match command {
        Command::Load(path) => drill.load_bank(&path)?,
        Command::Years(years) => drill.select_years(years)?,
        Command::Categories(categories) => drill.select_categories(categories)?,
        Command::Show => drill.show()?,
        Command::Answer(question, option) => drill.answer(question, option)?,
        Command::Submit => {
            drill.submit()?;
        }
        Command::History => drill.history(),
        Command::Certificate(scope) => {
            drill.save_certificate(scope)?;
        }
        Command::Help => drill.help(),
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

/// Runs one line of input. Returns `false` once the learner asks to quit.
pub fn run_line<O: QuizOutput, S: Shuffler>(drill: &mut Drill<O, S>, line: &str) -> bool {
    let result = || -> Result<bool> {
        match parse(line)? {
            Some(command) => execute(drill, command),
            None => Ok(true),
        }
    }();

    match result {
        Ok(keep_going) => keep_going,
        Err(e) => {
            log::error!("{:#}", e);
            drill.say_error(&e);
            true
        }
    }
}
