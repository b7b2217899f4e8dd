// src/core/engine.rs

use crate::{
    constants::{RESERVED_VARS, VAR_CMD_LINE, VAR_DIRECTORY, VAR_OPTIONS, VAR_PROGNAME},
    core::{
        environment::{Environment, EnvironmentError},
        expander::{self, ExpandError},
        parser::DirectiveSink,
    },
    models::{ChildResult, Directive, Options},
};
use anyhow::Result;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// Expansion failure on an ordinary directive is fatal: an unexpanded
    /// value could silently misconfigure the child.
    #[error("Could not expand the value of '{name}': {source}")]
    Expand {
        name: String,
        #[source]
        source: ExpandError,
    },
    #[error("Could not set environment variable: {0}")]
    EnvWrite(#[from] EnvironmentError),
}

/// The seam between directive interpretation and process creation. The
/// production implementation spawns a real child; tests substitute a
/// recording fake.
pub trait Launch {
    fn launch(&mut self, command_line: &str, options: Options, env: &Environment) -> ChildResult;
}

/// Applies directives to the environment as the parser produces them, and
/// fires the launcher when the terminator directive is reached.
///
/// This context object replaces the original's process-wide option flags and
/// exit-code globals: it owns the environment table, the forwarded
/// arguments, and the pending result, and is threaded through the parse.
#[derive(Debug)]
pub struct Engine<L: Launch> {
    env: Environment,
    forwarded_args: Vec<String>,
    launcher: L,
    last_result: Option<ChildResult>,
}

impl<L: Launch> Engine<L> {
    pub fn new(env: Environment, forwarded_args: Vec<String>, launcher: L) -> Self {
        Self {
            env,
            forwarded_args,
            launcher,
            last_result: None,
        }
    }

    /// Injects the wrapper's identity variables before parsing begins, so
    /// that directives can reference them like any inherited variable.
    pub fn seed_identity(&mut self, progname: &str, directory: &str) -> Result<(), EngineError> {
        self.env.set(VAR_PROGNAME, progname)?;
        self.env.set(VAR_DIRECTORY, directory)?;
        Ok(())
    }

    /// Applies one directive.
    ///
    /// An ordinary directive has its value expanded against the current
    /// environment and written back, which is how later directives observe
    /// earlier ones. The terminator directive assembles the final command
    /// line, consumes the stored options, clears the reserved bookkeeping
    /// variables and launches the child, all synchronously.
    pub fn apply(&mut self, directive: Directive) -> Result<(), EngineError> {
        if directive.name == VAR_CMD_LINE {
            self.launch_from(&directive.value);
            Ok(())
        } else {
            let expanded =
                expander::expand(&directive.value, &self.env).map_err(|source| {
                    EngineError::Expand {
                        name: directive.name.clone(),
                        source,
                    }
                })?;
            self.env.set(&directive.name, &expanded)?;
            Ok(())
        }
    }

    fn launch_from(&mut self, base_command: &str) {
        // Forwarded arguments are appended to the raw directive value, each
        // individually double-quoted, before the single expansion pass.
        let mut assembled = base_command.to_string();
        for arg in &self.forwarded_args {
            assembled.push(' ');
            assembled.push('"');
            assembled.push_str(arg);
            assembled.push('"');
        }

        let command_line = match expander::expand(&assembled, &self.env) {
            Ok(expanded) => expanded,
            Err(e) => {
                // Unlike ordinary directives, a command line that fails to
                // expand still runs, unexpanded.
                log::warn!("Command line expansion failed ({}), using it verbatim", e);
                assembled
            }
        };

        // The stored options value was expanded when its directive was
        // processed; derive the flags from it now, before cleanup.
        let options = Options::from_text(self.env.get(VAR_OPTIONS).unwrap_or(""));

        // The child must not inherit wrapper-internal state.
        for name in RESERVED_VARS {
            self.env.remove(name);
        }

        log::debug!("Launching [{}] with {:?}", command_line, options);
        let result = self.launcher.launch(&command_line, options, &self.env);
        self.last_result = Some(result);
    }

    /// The wrapper's exit code: the last launch outcome, or success when the
    /// configuration never reached a terminator directive.
    pub fn exit_code(&self) -> i32 {
        self.last_result
            .as_ref()
            .map_or(0, ChildResult::exit_code)
    }

    pub fn last_result(&self) -> Option<&ChildResult> {
        self.last_result.as_ref()
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }
}

impl<L: Launch> DirectiveSink for Engine<L> {
    fn dispatch(&mut self, directive: Directive) -> Result<()> {
        self.apply(directive)?;
        Ok(())
    }
}

// MARK: --- UNIT TESTS ---
