//! Program image loading.
//!
//! The machine core accepts and returns only integers; turning program
//! text into an image is the runtime layer's job. The on-disk format is
//! a single line of comma-separated decimal words, with insignificant
//! surrounding whitespace.

use std::fs;
use std::path::Path;

use crate::core::{MachineError, MachineResult, Word};

/// Parse a comma-separated program text into an image.
pub fn parse_image(text: &str) -> MachineResult<Vec<Word>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(MachineError::EmptyImage);
    }

    trimmed
        .split(',')
        .enumerate()
        .map(|(index, field)| {
            field.trim().parse::<Word>().map_err(|_| MachineError::InvalidWord {
                text: field.trim().to_string(),
                index,
            })
        })
        .collect()
}

/// Read and parse a program file.
pub fn load_image(path: impl AsRef<Path>) -> MachineResult<Vec<Word>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|err| MachineError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    })?;
    parse_image(&text)
}
