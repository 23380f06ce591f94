use anyhow::{Context, Result};
use directories_next::BaseDirs;
use std::env;
use std::path::PathBuf;

pub const CERTIFICATE_DIR_VAR: &str = "MASTERY_QUIZ_CERTIFICATE_DIR";
pub const SEED_VAR: &str = "MASTERY_QUIZ_SEED";

#[derive(Clone, Debug)]
pub struct Settings {
    pub certificate_dir: PathBuf,
    pub certificate_min_width: u32,
    pub certificate_scale: u32,
    pub shuffle_seed: Option<u64>,
}

fn default_certificate_dir() -> PathBuf {
    let mut dir = BaseDirs::new()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    dir.push("mastery-quiz");
    dir
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            certificate_dir: default_certificate_dir(),
            certificate_min_width: 640,
            certificate_scale: 2,
            shuffle_seed: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Settings> {
        Settings::from_vars(env::var(CERTIFICATE_DIR_VAR).ok(), env::var(SEED_VAR).ok())
    }

    fn from_vars(certificate_dir: Option<String>, seed: Option<String>) -> Result<Settings> {
        let mut settings = Settings::default();
        if let Some(dir) = certificate_dir.filter(|d| !d.trim().is_empty()) {
            settings.certificate_dir = PathBuf::from(dir);
        }
        if let Some(seed) = seed.filter(|s| !s.trim().is_empty()) {
            let seed = seed.trim().parse::<u64>().with_context(|| {
                format!("{} must be an unsigned integer, got {:?}", SEED_VAR, seed)
            })?;
            settings.shuffle_seed = Some(seed);
        }
        Ok(settings)
    }
}
