//! Input acquisition: the first non-empty line of a file or a reader
//!
//! Reads are capped at the compile-time `MAX_INPUT_BYTES`; anything after the
//! sequence line is ignored.

use crate::config::compile_time::input::MAX_INPUT_BYTES;
use crate::logging::codes;
use crate::{log_debug, log_error, log_success};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Label used for stdin in logs and error reports
pub const STDIN_SOURCE: &str = "<stdin>";

/// Input acquisition errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Input from {source_name} is not valid UTF-8")]
    InvalidEncoding { source_name: String },

    #[error("I/O error reading {source_name}: {message}")]
    Io {
        source_name: String,
        message: String,
    },

    #[error("No sequence line found in {source_name}")]
    EmptyInput { source_name: String },

    #[error("Input from {source_name} too large: more than {max_bytes} bytes")]
    InputTooLarge { source_name: String, max_bytes: u64 },
}

impl InputError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            InputError::FileNotFound { .. } => codes::input::FILE_NOT_FOUND,
            InputError::PermissionDenied { .. } => codes::input::PERMISSION_DENIED,
            InputError::InvalidEncoding { .. } => codes::input::INVALID_ENCODING,
            InputError::Io { .. } => codes::input::IO_ERROR,
            InputError::EmptyInput { .. } => codes::input::EMPTY_INPUT,
            InputError::InputTooLarge { .. } => codes::input::INPUT_TOO_LARGE,
        }
    }

    fn from_io(error: io::Error, source_name: &str) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => InputError::FileNotFound {
                path: source_name.to_string(),
            },
            io::ErrorKind::PermissionDenied => InputError::PermissionDenied {
                path: source_name.to_string(),
            },
            io::ErrorKind::InvalidData => InputError::InvalidEncoding {
                source_name: source_name.to_string(),
            },
            _ => InputError::Io {
                source_name: source_name.to_string(),
                message: error.to_string(),
            },
        }
    }
}

/// Read the first non-empty, trimmed line from a buffered reader
pub fn read_sequence_line<R: BufRead>(
    reader: R,
    source_name: &str,
) -> Result<String, InputError> {
    let mut limited = reader.take(MAX_INPUT_BYTES + 1);
    let mut consumed: u64 = 0;
    let mut line = String::new();

    loop {
        line.clear();
        let read = match limited.read_line(&mut line) {
            Ok(read) => read,
            Err(e) => {
                let error = InputError::from_io(e, source_name);
                log_error!(error.error_code(), "Failed to read input",
                    "source" => source_name,
                    "reason" => &error);
                return Err(error);
            }
        };
        consumed += read as u64;

        if consumed > MAX_INPUT_BYTES {
            let error = InputError::InputTooLarge {
                source_name: source_name.to_string(),
                max_bytes: MAX_INPUT_BYTES,
            };
            log_error!(error.error_code(), "Input exceeds maximum size",
                "source" => source_name,
                "max_bytes" => MAX_INPUT_BYTES);
            return Err(error);
        }

        if read == 0 {
            let error = InputError::EmptyInput {
                source_name: source_name.to_string(),
            };
            log_error!(error.error_code(), "Input contains no sequence line",
                "source" => source_name);
            return Err(error);
        }

        let trimmed = line.trim();
        if !trimmed.is_empty() {
            log_success!(codes::input::INPUT_READ, "Input line read",
                "source" => source_name,
                "bytes_consumed" => consumed,
                "line_chars" => trimmed.chars().count());
            return Ok(trimmed.to_string());
        }

        log_debug!("Skipping blank input line", "source" => source_name);
    }
}

/// Read the first non-empty, trimmed line of a file
pub fn read_sequence_file(path: &Path) -> Result<String, InputError> {
    let source_name = path.display().to_string();

    let file = File::open(path).map_err(|e| {
        let error = InputError::from_io(e, &source_name);
        log_error!(error.error_code(), "Failed to open input file",
            "path" => &source_name);
        error
    })?;

    if let Ok(metadata) = file.metadata() {
        log_debug!("Opened input file",
            "path" => &source_name,
            "size_bytes" => metadata.len());
    }

    read_sequence_line(BufReader::new(file), &source_name)
}

/// Read the first non-empty, trimmed line of stdin
pub fn read_sequence_stdin() -> Result<String, InputError> {
    let stdin = io::stdin();
    read_sequence_line(stdin.lock(), STDIN_SOURCE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    #[test]
    fn test_first_non_empty_line_is_trimmed() {
        let input = Cursor::new("\n   \n  AUGC \r\nGGGG\n");
        assert_eq!(read_sequence_line(input, "test").unwrap(), "AUGC");
    }

    #[test]
    fn test_missing_trailing_newline() {
        let input = Cursor::new("ACGU");
        assert_eq!(read_sequence_line(input, "test").unwrap(), "ACGU");
    }

    #[test]
    fn test_blank_input_is_rejected() {
        assert_matches!(
            read_sequence_line(Cursor::new(""), "test"),
            Err(InputError::EmptyInput { .. })
        );
        assert_matches!(
            read_sequence_line(Cursor::new("\n \t\n"), "test"),
            Err(InputError::EmptyInput { .. })
        );
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        let input = Cursor::new(vec![0x41, 0xff, 0xfe, b'\n']);
        assert_matches!(
            read_sequence_line(input, "test"),
            Err(InputError::InvalidEncoding { .. })
        );
    }

    #[test]
    fn test_oversized_input_is_rejected() {
        let input = Cursor::new("A".repeat(MAX_INPUT_BYTES as usize + 1));
        assert_matches!(
            read_sequence_line(input, "big"),
            Err(InputError::InputTooLarge { max_bytes, .. }) if max_bytes == MAX_INPUT_BYTES
        );
    }

    #[test]
    fn test_read_sequence_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "AUAU").unwrap();
        writeln!(file, "ignored").unwrap();

        assert_eq!(read_sequence_file(file.path()).unwrap(), "AUAU");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.txt");

        assert_matches!(
            read_sequence_file(&missing),
            Err(InputError::FileNotFound { .. })
        );
    }

    #[test]
    fn test_error_codes() {
        let error = InputError::EmptyInput {
            source_name: STDIN_SOURCE.to_string(),
        };
        assert_eq!(error.error_code(), codes::input::EMPTY_INPUT);
        assert_eq!(error.to_string(), "No sequence line found in <stdin>");
    }
}
