// src/system/launcher.rs

use crate::{
    constants::EXIT_CODE_UNAVAILABLE,
    core::{engine::Launch, environment::Environment},
    models::{ChildResult, Options},
    system::report,
};
use std::process::Command;

/// The production [`Launch`] implementation: spawns the child with
/// `std::process::Command` and optionally supervises it.
#[derive(Debug, Default)]
pub struct ProcessLauncher;

impl Launch for ProcessLauncher {
    fn launch(&mut self, command_line: &str, options: Options, env: &Environment) -> ChildResult {
        if options.init_common_controls {
            init_common_controls();
        }

        if options.debug {
            report::debug_command_line(command_line);
        }

        let parts = split_command_line(command_line);
        if parts.is_empty() {
            return launch_failed(command_line, env);
        }
        let program = &parts[0];
        let args = &parts[1..];

        let mut command = Command::new(program);
        command.args(args).env_clear();
        for (name, value) in env.iter() {
            command.env(name, value);
        }
        configure_console(&mut command, &options);

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                log::debug!("Spawn of '{}' failed: {}", program, e);
                return launch_failed(command_line, env);
            }
        };

        if !options.wants_wait() {
            // Fire-and-forget: the wrapper reports success immediately,
            // whatever the child eventually does.
            log::debug!("Launched '{}' (pid {}), not waiting", program, child.id());
            return ChildResult::Launched;
        }

        // Supervised: block until the child terminates. There is no timeout
        // and no cancellation; a hung child hangs the wrapper.
        let code = match child.wait() {
            Ok(status) => status.code().unwrap_or(EXIT_CODE_UNAVAILABLE),
            Err(e) => {
                log::warn!("Could not retrieve exit status: {}", e);
                EXIT_CODE_UNAVAILABLE
            }
        };

        if options.debug {
            report::child_exit_code(code);
        }

        ChildResult::Exited(code)
    }
}

fn launch_failed(command_line: &str, env: &Environment) -> ChildResult {
    let path = env.get("PATH").unwrap_or("").to_string();
    report::launch_failure(command_line, &path);
    ChildResult::LaunchFailed {
        command_line: command_line.to_string(),
        path,
    }
}

/// Splits the assembled command line into program + arguments.
///
/// The command line is literal text (the original handed it to
/// `CreateProcess` untouched), so POSIX escaping rules do not apply here:
/// backslashes are ordinary characters — `--flag C:\some\sub` must reach
/// the child exactly as written. The only structure honored is the
/// double-quote grouping the engine itself emits around forwarded
/// arguments; quotes group text (including whitespace) into one token and
/// are not part of it. An unterminated quote runs to the end of the line.
fn split_command_line(command_line: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut token = String::new();
    let mut in_token = false;
    let mut in_quotes = false;

    for ch in command_line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                // An empty "" still yields a token.
                in_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if in_token {
                    parts.push(std::mem::take(&mut token));
                    in_token = false;
                }
            }
            c => {
                token.push(c);
                in_token = true;
            }
        }
    }
    if in_token {
        parts.push(token);
    }

    parts
}

/// One-time UI-subsystem initialization (`InitCommonControls` on Windows).
/// Spawning through `std::process::Command` gives the child its own
/// subsystem setup, so there is nothing to do here on any platform; the
/// option is still honored as a recognized keyword.
fn init_common_controls() {
    log::debug!("init-common-controls requested");
}

#[cfg(windows)]
fn configure_console(command: &mut Command, options: &Options) {
    use std::os::windows::process::CommandExt;

    // CREATE_NO_WINDOW: suppress the console window unless asked for.
    const CREATE_NO_WINDOW: u32 = 0x0800_0000;
    if !options.show_console {
        command.creation_flags(CREATE_NO_WINDOW);
    }
}

#[cfg(not(windows))]
fn configure_console(_command: &mut Command, _options: &Options) {
    // No console-window concept outside Windows.
}

// MARK: --- UNIT TESTS ---
