// src/models.rs

use crate::constants::{
    OPT_DEBUG, OPT_INIT_COMMON_CONTROLS, OPT_MONITOR_PROCESS, OPT_SHOW_CONSOLE,
};

/// One parsed `(name, value)` pair from the configuration file. The value is
/// raw, pre-expansion text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub name: String,
    pub value: String,
}

impl Directive {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Launch options derived from the expanded value of `PLAINSTARTER_OPTIONS`.
///
/// Membership is a case-sensitive substring test: a keyword embedded inside
/// another token still matches. That is a documented quirk of the format,
/// not a defect to fix here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    pub show_console: bool,
    pub init_common_controls: bool,
    pub monitor_process: bool,
    pub debug: bool,
}

impl Options {
    /// Derives the option set from the stored options text. An empty or
    /// unset value yields all options false.
    pub fn from_text(text: &str) -> Self {
        Self {
            show_console: text.contains(OPT_SHOW_CONSOLE),
            init_common_controls: text.contains(OPT_INIT_COMMON_CONTROLS),
            monitor_process: text.contains(OPT_MONITOR_PROCESS),
            debug: text.contains(OPT_DEBUG),
        }
    }

    /// True when the wrapper must block until the child terminates.
    pub fn wants_wait(&self) -> bool {
        self.monitor_process || self.debug
    }
}

/// Outcome of one launch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildResult {
    /// Fire-and-forget: the child was created and the wrapper did not wait.
    Launched,
    /// Supervised: the child terminated with this exit code (or the
    /// `EXIT_CODE_UNAVAILABLE` sentinel when it could not be retrieved).
    Exited(i32),
    /// The child process could not be created. Carries the attempted command
    /// line and the `PATH` value in effect, for diagnostics.
    LaunchFailed { command_line: String, path: String },
}

impl ChildResult {
    /// The wrapper exit code this outcome maps to.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Launched => 0,
            Self::Exited(code) => *code,
            Self::LaunchFailed { .. } => crate::constants::EXIT_LAUNCH_FAILED,
        }
    }
}

// MARK: --- UNIT TESTS ---
