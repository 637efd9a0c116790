//! Candidate input parsing and verdict messages
//!
//! Numbers arrive as decimal text (command-line arguments or input files).
//! Parsing is strict: base 10, digits only, must fit in a `u64`.

use crate::engine::Verdict;
use anyhow::Context;
use std::fs;
use std::num::IntErrorKind;
use std::path::Path;
use thiserror::Error;

/// Why a piece of input could not be tested
///
/// The rendered message never includes the input itself; callers that need
/// it (the JSON report) read it from the variant.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("No input detected")]
    Empty,

    #[error("Input must be an integer")]
    NotAnInteger { input: String },

    /// Digits only, but larger than `u64::MAX`
    #[error("Input must be an integer")]
    OutOfRange { input: String },
}

impl InputError {
    /// Offending input, trimmed; empty for [`InputError::Empty`]
    pub fn input(&self) -> &str {
        match self {
            InputError::Empty => "",
            InputError::NotAnInteger { input } | InputError::OutOfRange { input } => input,
        }
    }
}

/// Parse a decimal candidate
///
/// Surrounding whitespace is ignored. Signs, separators and non-decimal
/// digits are rejected.
///
/// ```
/// use primality::input::{parse_candidate, InputError};
///
/// assert_eq!(parse_candidate(" 97 "), Ok(97));
/// assert_eq!(parse_candidate(""), Err(InputError::Empty));
/// assert!(matches!(parse_candidate("+5"), Err(InputError::NotAnInteger { .. })));
/// assert!(matches!(
///     parse_candidate("18446744073709551616"),
///     Err(InputError::OutOfRange { .. })
/// ));
/// ```
pub fn parse_candidate(input: &str) -> Result<u64, InputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }
    if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InputError::NotAnInteger {
            input: trimmed.to_string(),
        });
    }

    trimmed.parse::<u64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => InputError::OutOfRange {
            input: trimmed.to_string(),
        },
        _ => InputError::NotAnInteger {
            input: trimmed.to_string(),
        },
    })
}

/// One-line answer for a tested input
///
/// ```
/// use primality::engine::Verdict;
/// use primality::input::verdict_message;
///
/// assert_eq!(verdict_message("17", Verdict::Prime), "17 is prime.");
/// assert_eq!(verdict_message("18", Verdict::NotPrime), "18 is not prime.");
/// ```
pub fn verdict_message(input: &str, verdict: Verdict) -> String {
    format!("{} is {}.", input.trim(), verdict)
}

/// Message shown for input that could not be tested
pub fn error_message(error: &InputError) -> String {
    format!("Whoops! An error occurred. {}.", error)
}

/// Read candidates from a file, one per line
///
/// Blank lines and lines starting with `#` are skipped. Lines are returned
/// unparsed so that each one can be reported individually.
pub fn read_inputs(path: &Path) -> anyhow::Result<Vec<String>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_valid() {
        assert_eq!(parse_candidate("0"), Ok(0));
        assert_eq!(parse_candidate("17"), Ok(17));
        assert_eq!(parse_candidate("\t91\n"), Ok(91));
        assert_eq!(parse_candidate("007"), Ok(7));
        assert_eq!(parse_candidate("18446744073709551615"), Ok(u64::MAX));
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse_candidate(""), Err(InputError::Empty));
        assert_eq!(parse_candidate("   "), Err(InputError::Empty));
    }

    #[test]
    fn test_parse_not_an_integer() {
        for input in ["abc", "-5", "+5", "1.5", "1e6", "12 34", "0x1f", "1_000"] {
            assert!(
                matches!(parse_candidate(input), Err(InputError::NotAnInteger { .. })),
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn test_parse_out_of_range() {
        assert_eq!(
            parse_candidate("18446744073709551616"),
            Err(InputError::OutOfRange {
                input: "18446744073709551616".to_string()
            })
        );
        assert!(matches!(
            parse_candidate("99999999999999999999999"),
            Err(InputError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            error_message(&InputError::Empty),
            "Whoops! An error occurred. No input detected."
        );
        assert_eq!(
            error_message(&InputError::NotAnInteger { input: "x".to_string() }),
            "Whoops! An error occurred. Input must be an integer."
        );
        assert_eq!(
            error_message(&InputError::OutOfRange {
                input: "18446744073709551616".to_string()
            }),
            "Whoops! An error occurred. Input must be an integer."
        );
    }

    #[test]
    fn test_input_accessor() {
        assert_eq!(InputError::Empty.input(), "");
        assert_eq!(InputError::NotAnInteger { input: "abc".to_string() }.input(), "abc");
        assert_eq!(parse_candidate(" 1e6 ").unwrap_err().input(), "1e6");
    }

    #[test]
    fn test_verdict_message_trims() {
        assert_eq!(verdict_message(" 97 ", Verdict::Prime), "97 is prime.");
    }

    #[test]
    fn test_read_inputs_skips_comments_and_blanks() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# candidates").unwrap();
        writeln!(file, "17").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  91  ").unwrap();
        writeln!(file, "abc").unwrap();

        let inputs = read_inputs(file.path()).unwrap();
        assert_eq!(inputs, vec!["17", "91", "abc"]);
    }

    #[test]
    fn test_read_inputs_missing_file() {
        let err = read_inputs(Path::new("/nonexistent/primality/inputs.txt")).unwrap_err();
        assert!(err.to_string().contains("Failed to read input file"));
    }
}
