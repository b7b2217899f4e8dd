// src/core/expander.rs

use crate::core::environment::Environment;
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    static ref REFERENCE_RE: Regex = Regex::new(r"%([^%]*)%").expect("reference regex is valid");
}

#[derive(Error, Debug)]
pub enum ExpandError {
    #[error("Unresolvable environment reference: %{0}%")]
    Unresolved(String),
    #[error("Malformed environment reference near '{0}'")]
    Malformed(String),
}

/// Performs one pass of `%NAME%` substitution against the current
/// environment table.
///
/// Single-pass means substituted text is never re-scanned: a value that
/// itself expands to text containing `%...%` is left as-is. Directives must
/// therefore be ordered so that a referenced variable is set on an earlier
/// line.
///
/// Failures:
/// - a reference naming a variable absent from the environment
///   (case-insensitive lookup) is unresolvable;
/// - an empty reference (`%%`) or a `%` with no closing `%` before the end
///   of the string is malformed.
pub fn expand(template: &str, env: &Environment) -> Result<String, ExpandError> {
    let mut output = String::with_capacity(template.len());
    let mut cursor = 0;

    for caps in REFERENCE_RE.captures_iter(template) {
        let full = caps.get(0).expect("capture 0 always present");
        let name = caps.get(1).expect("capture 1 always present").as_str();

        // The gap before this reference must not contain a stray '%'.
        let gap = &template[cursor..full.start()];
        check_gap(gap)?;
        output.push_str(gap);

        if name.is_empty() {
            return Err(ExpandError::Malformed("%%".to_string()));
        }
        let value = env
            .get(name)
            .ok_or_else(|| ExpandError::Unresolved(name.to_string()))?;
        log::trace!("Expanded %{}% ({} chars)", name, value.len());
        output.push_str(value);

        cursor = full.end();
    }

    let tail = &template[cursor..];
    check_gap(tail)?;
    output.push_str(tail);

    Ok(output)
}

/// A '%' outside every matched reference is an unterminated reference.
fn check_gap(gap: &str) -> Result<(), ExpandError> {
    if let Some(pos) = gap.find('%') {
        return Err(ExpandError::Malformed(gap[pos..].to_string()));
    }
    Ok(())
}

// MARK: --- UNIT TESTS ---

#[cfg(test)]
mod tests {
    use super::*;

    fn env_with(pairs: &[(&str, &str)]) -> Environment {
        let mut env = Environment::new();
        for (name, value) in pairs {
            env.set(name, value).unwrap();
        }
        env
    }

    #[test]
    fn test_expand_plain_text_untouched() {
        let env = Environment::new();
        assert_eq!(expand("no references here", &env).unwrap(), "no references here");
    }

    #[test]
    fn test_expand_single_reference() {
        let env = env_with(&[("PATH", "/usr/bin")]);
        assert_eq!(expand("%PATH%;C:\\extra", &env).unwrap(), "/usr/bin;C:\\extra");
    }

    #[test]
    fn test_expand_multiple_references() {
        let env = env_with(&[("A", "1"), ("B", "2")]);
        assert_eq!(expand("%A%-%B%", &env).unwrap(), "1-2");
    }

    #[test]
    fn test_expand_lookup_is_case_insensitive() {
        let env = env_with(&[("Path", "/bin")]);
        assert_eq!(expand("%PATH%", &env).unwrap(), "/bin");
    }

    #[test]
    fn test_expand_is_single_pass() {
        // B expands to text containing %A%, which must not be re-scanned.
        let env = env_with(&[("A", "one"), ("B", "%A%")]);
        assert_eq!(expand("%B%", &env).unwrap(), "%A%");
    }

    #[test]
    fn test_expand_unresolved_reference_fails() {
        let env = Environment::new();
        let err = expand("%MISSING%", &env).unwrap_err();
        assert!(matches!(err, ExpandError::Unresolved(name) if name == "MISSING"));
    }

    #[test]
    fn test_expand_unterminated_reference_fails() {
        let env = env_with(&[("A", "1")]);
        assert!(matches!(expand("%A% at 50%", &env), Err(ExpandError::Malformed(_))));
        assert!(matches!(expand("50% off", &env), Err(ExpandError::Malformed(_))));
    }

    #[test]
    fn test_expand_empty_reference_fails() {
        let env = Environment::new();
        assert!(matches!(expand("%%", &env), Err(ExpandError::Malformed(_))));
    }
}
