//! Program loading from `.ls8` text.
//!
//! An `.ls8` file holds one instruction or operand byte per line, written as
//! eight binary digits. Everything after `#` is a comment and blank lines are
//! ignored:
//!
//! ```text
//! # print8.ls8
//! 10011001 # LDI R0,8
//! 00000000
//! 00001000
//! 01000011 # PRN R0
//! 00000000
//! 00000001 # HLT
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::memory::MEMORY_SIZE;

/// Errors raised while loading a program.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// A non-comment line is not exactly eight binary digits.
    #[error("line {line}: expected 8 binary digits, found {text:?}")]
    InvalidByte { line: usize, text: String },

    /// The program does not fit in the address space.
    #[error("program is {len} bytes, memory holds {max}", max = MEMORY_SIZE)]
    ProgramTooLarge { len: usize },

    /// The program file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Parses `.ls8` text into program bytes.
///
/// # Errors
///
/// Returns `LoadError::InvalidByte` with the 1-based line number of the first
/// malformed line, or `LoadError::ProgramTooLarge` for more than 256 bytes.
///
/// # Examples
///
/// ```
/// use ls8::parse_program;
///
/// let bytes = parse_program("10011001 # LDI\n00000000\n\n00001000\n").unwrap();
/// assert_eq!(bytes, vec![0b1001_1001, 0, 8]);
/// ```
pub fn parse_program(source: &str) -> Result<Vec<u8>, LoadError> {
    let mut program = Vec::new();

    for (index, line) in source.lines().enumerate() {
        let text = match line.split_once('#') {
            Some((code, _comment)) => code,
            None => line,
        }
        .trim();

        if text.is_empty() {
            continue;
        }

        program.push(parse_byte(text).ok_or_else(|| LoadError::InvalidByte {
            line: index + 1,
            text: text.to_string(),
        })?);
    }

    if program.len() > MEMORY_SIZE {
        return Err(LoadError::ProgramTooLarge { len: program.len() });
    }

    Ok(program)
}

fn parse_byte(text: &str) -> Option<u8> {
    if text.len() != 8 || !text.bytes().all(|b| b == b'0' || b == b'1') {
        return None;
    }
    u8::from_str_radix(text, 2).ok()
}

/// Reads and parses an `.ls8` file.
pub fn load_file(path: impl AsRef<Path>) -> Result<Vec<u8>, LoadError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!("loaded {}", path.display());
    parse_program(&source)
}
