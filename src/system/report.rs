// src/system/report.rs

//! User-facing presentation. The original showed every message in a dialog
//! box; here each failure produces exactly one formatted message on stderr.
//! Numbered error ids are kept as a stable prefix so existing plainstarter
//! documentation still applies.

use colored::Colorize;

/// A fatal error: one message, no recovery. The caller decides the exit code.
pub fn error(id: u8, message: &str) {
    eprintln!("{} {}", format!("Error#{:02}", id).red().bold(), message);
}

/// The assembled command line, shown before execution when `debug` is set.
///
/// The original blocked on a modal dialog here before creating the process;
/// this build prints and continues, so the launch proceeds without an
/// acknowledgement step.
pub fn debug_command_line(command_line: &str) {
    eprintln!("{} {}", "DEBUG".cyan().bold(), command_line);
}

/// The child's exit code, always shown after a `debug` run.
pub fn child_exit_code(code: i32) {
    eprintln!(
        "{} The child process terminated.\nReturn code {} (0x{:x})",
        "DEBUG".cyan().bold(),
        code,
        code
    );
}

/// A child process that could not be created, with the attempted command
/// line and the `PATH` in effect for diagnostics.
pub fn launch_failure(command_line: &str, path: &str) {
    eprintln!(
        "{} The command line could not be executed\n[{}]\n\nPATH: '{}'",
        "Error#08".red().bold(),
        command_line,
        path
    );
}
