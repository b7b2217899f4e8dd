// src/bin/plainstart.rs

use anyhow::{Context, Result};
use plainstart::{
    core::{
        engine::{Engine, EngineError},
        environment::Environment,
        loader::{self, LoadError},
        locator::{self, LocateError},
        parser::{self, ParseError},
    },
    system::{launcher::ProcessLauncher, report},
};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
#[error("Configuration file not found.")]
struct ConfigNotFound;

/// The wrapper's entry point. Every failure path produces exactly one
/// user-facing message; all diagnostics beyond that go through `log`.
fn main() {
    env_logger::init();

    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            report::error(error_id(&e), &format!("{:#}", e));
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    // Everything after the wrapper's own name is forwarded to the child.
    let forwarded_args: Vec<String> = std::env::args().skip(1).collect();

    let wrapper_path =
        std::env::current_exe().context("Could not determine the wrapper's own location.")?;
    log::debug!("Wrapper binary: {}", wrapper_path.display());

    let (config_path, config_bytes) = load_first_candidate(&wrapper_path)?;
    log::debug!("Using configuration file: {}", config_path.display());

    let mut engine = Engine::new(
        Environment::from_process(),
        forwarded_args,
        ProcessLauncher,
    );

    let progname = wrapper_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let directory = wrapper_path
        .parent()
        .map(|dir| dunce::simplified(dir).display().to_string())
        .unwrap_or_default();
    engine.seed_identity(&progname, &directory)?;

    parser::parse(&config_bytes, &mut engine)?;

    Ok(engine.exit_code())
}

/// Tries each candidate configuration path in order. A missing candidate
/// moves on to the next one; an unreadable or oversized file aborts
/// immediately instead of falling through to a later candidate.
fn load_first_candidate(wrapper_path: &Path) -> Result<(PathBuf, Vec<u8>)> {
    for candidate in locator::candidate_paths(wrapper_path)? {
        match loader::slurp(&candidate) {
            Ok(bytes) => return Ok((candidate, bytes)),
            Err(e) if e.is_not_found() => {
                log::debug!("No configuration at '{}'", candidate.display());
            }
            Err(e) => return Err(e.into()),
        }
    }
    Err(ConfigNotFound.into())
}

/// Maps a failure to its numbered message prefix (kept from the original
/// plainstarter error dialogs).
fn error_id(e: &anyhow::Error) -> u8 {
    for cause in e.chain() {
        if cause.downcast_ref::<ConfigNotFound>().is_some() {
            return 10;
        }
        if let Some(load) = cause.downcast_ref::<LoadError>() {
            return match load {
                LoadError::Unreadable { .. } => 1,
                LoadError::TooLarge { .. } => 3,
                LoadError::NotFound(_) => 10,
            };
        }
        if let Some(ParseError::UnrecognizedEncoding) = cause.downcast_ref::<ParseError>() {
            return 9;
        }
        if let Some(engine_err) = cause.downcast_ref::<EngineError>() {
            return match engine_err {
                EngineError::Expand { .. } => 7,
                EngineError::EnvWrite(_) => 8,
            };
        }
        if cause.downcast_ref::<LocateError>().is_some() {
            return 11;
        }
    }
    0
}
