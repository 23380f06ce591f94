use anyhow::{Context, Result};
use std::env;
use std::io::{self, BufRead, Write};
use std::path::Path;

mod bank;
mod certificate;
mod commands;
mod completion;
mod drill;
mod error;
mod output;
mod session;
mod settings;
mod shuffle;

use crate::certificate::PngCertificateRenderer;
use crate::drill::Drill;
use crate::output::terminal::TerminalOutput;
use crate::settings::Settings;
use crate::shuffle::RandomShuffler;

fn run() -> Result<()> {
    let settings = Settings::from_env()?;
    log::info!("Certificates will be saved to {:?}", settings.certificate_dir);

    let renderer =
        PngCertificateRenderer::new(settings.certificate_min_width, settings.certificate_scale);
    let mut drill = Drill::new(
        TerminalOutput::new(),
        RandomShuffler::new(settings.shuffle_seed),
        Box::new(renderer),
        settings.certificate_dir.clone(),
    );
    drill.help();

    if let Some(path) = env::args().nth(1) {
        if let Err(e) = drill.load_bank(Path::new(&path)) {
            log::error!("{:#}", e);
            drill.say_error(&e);
        }
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    loop {
        print!("> ");
        io::stdout().flush().context("Could not write prompt")?;
        let mut line = String::new();
        if input.read_line(&mut line).context("Could not read input")? == 0 {
            break;
        }
        if !commands::run_line(&mut drill, &line) {
            break;
        }
    }
    Ok(())
}

fn main() {
    pretty_env_logger::init();
    if let Err(e) = run() {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}
