// src/constants.rs

/// Maximum size of a configuration file in bytes. Larger files are rejected
/// before parsing begins.
pub const MAX_CONFIG_FILE_SIZE_BYTES: u64 = 10240;

/// Maximum length of a directive name or value in UTF-16 code units.
/// Lines that would exceed this are dropped, not truncated-and-kept.
pub const MAX_LINE_LEN_UNITS: usize = 1024;

/// Extension of the configuration file, appended to the wrapper's file stem.
pub const CONFIG_FILE_EXTENSION: &str = "cfg";

/// Subdirectories searched for the configuration file, in order. The empty
/// entry is the wrapper's own directory.
pub const CONFIG_SEARCH_DIRS: &[&str] = &["configs", "config", ""];

/// The terminator directive: its value is the base command line to execute.
pub const VAR_CMD_LINE: &str = "PLAINSTARTER_CMD_LINE";

/// Space-separated keyword set controlling launch behavior.
pub const VAR_OPTIONS: &str = "PLAINSTARTER_OPTIONS";

/// Injected before parsing: the wrapper's file stem (extension stripped).
pub const VAR_PROGNAME: &str = "PLAINSTARTER_PROGNAME";

/// Injected before parsing: the absolute directory containing the wrapper.
pub const VAR_DIRECTORY: &str = "PLAINSTARTER_DIRECTORY";

/// All reserved variable names. These exist only during parsing and are
/// removed from the environment before the child is launched.
pub const RESERVED_VARS: &[&str] = &[VAR_CMD_LINE, VAR_OPTIONS, VAR_PROGNAME, VAR_DIRECTORY];

/// Option keyword: give the child a visible console window.
pub const OPT_SHOW_CONSOLE: &str = "show-console";

/// Option keyword: initialize the UI common-controls subsystem before launch.
pub const OPT_INIT_COMMON_CONTROLS: &str = "init-common-controls";

/// Option keyword: wait for the child and propagate its exit code.
pub const OPT_MONITOR_PROCESS: &str = "monitor-process";

/// Option keyword: show the command line before launch and the exit code after.
pub const OPT_DEBUG: &str = "debug";

/// Wrapper exit code when the child process could not be created.
pub const EXIT_LAUNCH_FAILED: i32 = -1;

/// Wrapper exit code when a supervised child's exit code could not be retrieved.
pub const EXIT_CODE_UNAVAILABLE: i32 = 99999;
