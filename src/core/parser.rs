// src/core/parser.rs

use crate::constants::MAX_LINE_LEN_UNITS;
use crate::models::Directive;
use anyhow::Result;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error(
        "Expecting a UTF-16 encoded configuration file (missing byte-order marker)."
    )]
    UnrecognizedEncoding,
    #[error(transparent)]
    Directive(#[from] anyhow::Error),
}

/// Streaming consumer of parsed directives. The parser dispatches each
/// completed directive immediately, in file order; a dispatch error aborts
/// the parse.
pub trait DirectiveSink {
    fn dispatch(&mut self, directive: Directive) -> Result<()>;
}

/// Collects directives without side effects. Used by tests and diagnostics.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub directives: Vec<Directive>,
}

impl DirectiveSink for CollectingSink {
    fn dispatch(&mut self, directive: Directive) -> Result<()> {
        self.directives.push(directive);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ReadName,
    ReadValue,
    ReadComment,
    ReadLineEnd,
}

const UNIT_HASH: u16 = b'#' as u16;
const UNIT_EQUALS: u16 = b'=' as u16;
const UNIT_CR: u16 = b'\r' as u16;
const UNIT_LF: u16 = b'\n' as u16;

/// Parses the raw configuration bytes and feeds each completed directive to
/// `sink` as soon as its terminating carriage-return is seen.
///
/// The text must be UTF-16 with a byte-order marker (`FF FE` little-endian
/// or `FE FF` big-endian); anything else is a hard failure. Everything after
/// that degrades per line instead of aborting:
///
/// - a `#` anywhere outside a value turns the rest of the line into a
///   comment, even mid-name;
/// - a name or value that would exceed [`MAX_LINE_LEN_UNITS`] code units
///   drops that whole line and parsing resumes at the next one;
/// - a bare carriage-return outside a value skips to the next line;
/// - trailing content without a final line terminator yields no directive.
pub fn parse<S: DirectiveSink>(bytes: &[u8], sink: &mut S) -> Result<(), ParseError> {
    let units = decode_utf16_units(bytes)?;

    let mut state = State::ReadName;
    let mut name: Vec<u16> = Vec::new();
    let mut value: Vec<u16> = Vec::new();

    for unit in units {
        // Global transitions, checked before the per-state step. Value text
        // is never re-interpreted as a comment marker or a line break.
        if state != State::ReadValue {
            if unit == UNIT_HASH {
                state = State::ReadComment;
            } else if unit == UNIT_CR {
                state = State::ReadLineEnd;
            }
        }

        match state {
            State::ReadComment => {}
            State::ReadName => {
                if unit == UNIT_EQUALS {
                    state = State::ReadValue;
                } else if name.len() == MAX_LINE_LEN_UNITS {
                    log::debug!("Dropping line: name exceeds {} units", MAX_LINE_LEN_UNITS);
                    state = State::ReadLineEnd;
                } else {
                    name.push(unit);
                }
            }
            State::ReadValue => {
                if unit == UNIT_CR {
                    let directive = Directive::new(
                        String::from_utf16_lossy(&name),
                        String::from_utf16_lossy(&value),
                    );
                    state = State::ReadLineEnd;
                    log::trace!("Parsed directive '{}'", directive.name);
                    sink.dispatch(directive)?;
                } else if value.len() == MAX_LINE_LEN_UNITS {
                    log::debug!("Dropping line: value exceeds {} units", MAX_LINE_LEN_UNITS);
                    state = State::ReadLineEnd;
                } else {
                    value.push(unit);
                }
            }
            State::ReadLineEnd => {
                if unit == UNIT_LF {
                    state = State::ReadName;
                    name.clear();
                    value.clear();
                }
            }
        }
    }

    // End of input mid-line: the trailing partial directive is dropped.
    if state == State::ReadValue {
        log::debug!("Dropping unterminated trailing line");
    }

    Ok(())
}

/// Verifies the byte-order marker and decodes the remaining bytes as 16-bit
/// code units. An odd trailing byte is dropped.
fn decode_utf16_units(bytes: &[u8]) -> Result<Vec<u16>, ParseError> {
    let (body, big_endian) = match bytes {
        [0xFF, 0xFE, rest @ ..] => (rest, false),
        [0xFE, 0xFF, rest @ ..] => (rest, true),
        _ => return Err(ParseError::UnrecognizedEncoding),
    };

    let units = body
        .chunks_exact(2)
        .map(|pair| {
            let pair: [u8; 2] = [pair[0], pair[1]];
            if big_endian {
                u16::from_be_bytes(pair)
            } else {
                u16::from_le_bytes(pair)
            }
        })
        .collect();

    Ok(units)
}

// MARK: --- UNIT TESTS ---

#[cfg(test)]
mod tests {
    use super::*;

    /// Encodes text as UTF-16LE with a BOM, the way a Windows editor saves a
    /// plainstart config file.
    fn utf16le(text: &str) -> Vec<u8> {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        bytes
    }

    fn utf16be(text: &str) -> Vec<u8> {
        let mut bytes = vec![0xFE, 0xFF];
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        bytes
    }

    fn parse_all(bytes: &[u8]) -> Vec<Directive> {
        let mut sink = CollectingSink::default();
        parse(bytes, &mut sink).unwrap();
        sink.directives
    }

    #[test]
    fn test_basic_directives_in_order() {
        let directives = parse_all(&utf16le("A=1\r\nB=two\r\n"));
        assert_eq!(
            directives,
            vec![Directive::new("A", "1"), Directive::new("B", "two")]
        );
    }

    #[test]
    fn test_big_endian_input() {
        let directives = parse_all(&utf16be("A=1\r\n"));
        assert_eq!(directives, vec![Directive::new("A", "1")]);
    }

    #[test]
    fn test_missing_bom_is_fatal() {
        let mut sink = CollectingSink::default();
        let result = parse(b"A=1\r\n", &mut sink);
        assert!(matches!(result, Err(ParseError::UnrecognizedEncoding)));
        assert!(sink.directives.is_empty());
    }

    #[test]
    fn test_empty_file_with_bom_yields_nothing() {
        assert!(parse_all(&utf16le("")).is_empty());
    }

    #[test]
    fn test_comment_line_ignored() {
        let directives = parse_all(&utf16le("# a comment\r\nA=1\r\n"));
        assert_eq!(directives, vec![Directive::new("A", "1")]);
    }

    #[test]
    fn test_hash_mid_name_discards_line() {
        // The comment rule is global outside values: a '#' between name
        // characters turns the rest of the line into a comment.
        let directives = parse_all(&utf16le("AB#C=1\r\nB=2\r\n"));
        assert_eq!(directives, vec![Directive::new("B", "2")]);
    }

    #[test]
    fn test_hash_inside_value_is_literal() {
        let directives = parse_all(&utf16le("A=x#y\r\n"));
        assert_eq!(directives, vec![Directive::new("A", "x#y")]);
    }

    #[test]
    fn test_equals_inside_value_is_literal() {
        let directives = parse_all(&utf16le("A=x=y\r\n"));
        assert_eq!(directives, vec![Directive::new("A", "x=y")]);
    }

    #[test]
    fn test_bare_cr_in_name_skips_line() {
        let directives = parse_all(&utf16le("ABC\r\nB=2\r\n"));
        assert_eq!(directives, vec![Directive::new("B", "2")]);
    }

    #[test]
    fn test_overlong_name_drops_only_that_line() {
        let long_name = "A".repeat(MAX_LINE_LEN_UNITS + 1);
        let text = format!("{}=x\r\nB=1\r\n", long_name);
        let directives = parse_all(&utf16le(&text));
        assert_eq!(directives, vec![Directive::new("B", "1")]);
    }

    #[test]
    fn test_name_at_exact_limit_is_kept() {
        let name = "A".repeat(MAX_LINE_LEN_UNITS);
        let text = format!("{}=x\r\n", name);
        let directives = parse_all(&utf16le(&text));
        assert_eq!(directives, vec![Directive::new(name.as_str(), "x")]);
    }

    #[test]
    fn test_overlong_value_drops_only_that_line() {
        let long_value = "v".repeat(MAX_LINE_LEN_UNITS + 1);
        let text = format!("A={}\r\nB=1\r\n", long_value);
        let directives = parse_all(&utf16le(&text));
        assert_eq!(directives, vec![Directive::new("B", "1")]);
    }

    #[test]
    fn test_unterminated_trailing_line_dropped() {
        let directives = parse_all(&utf16le("A=1\r\nB=partial"));
        assert_eq!(directives, vec![Directive::new("A", "1")]);
    }

    #[test]
    fn test_value_ends_at_cr_lf_optional_garbage_tolerated() {
        // Anything between CR and LF is ignored in ReadLineEnd.
        let directives = parse_all(&utf16le("A=1\r\rx\nB=2\r\n"));
        assert_eq!(
            directives,
            vec![Directive::new("A", "1"), Directive::new("B", "2")]
        );
    }

    #[test]
    fn test_empty_value_dispatched() {
        let directives = parse_all(&utf16le("A=\r\n"));
        assert_eq!(directives, vec![Directive::new("A", "")]);
    }

    #[test]
    fn test_dispatch_error_aborts_parse() {
        struct FailingSink;
        impl DirectiveSink for FailingSink {
            fn dispatch(&mut self, _directive: Directive) -> Result<()> {
                anyhow::bail!("boom")
            }
        }
        let result = parse(&utf16le("A=1\r\nB=2\r\n"), &mut FailingSink);
        assert!(matches!(result, Err(ParseError::Directive(_))));
    }

    #[test]
    fn test_odd_trailing_byte_dropped() {
        let mut bytes = utf16le("A=1\r\n");
        bytes.push(0x41);
        let directives = parse_all(&bytes);
        assert_eq!(directives, vec![Directive::new("A", "1")]);
    }
}
