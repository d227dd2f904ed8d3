//! Errors raised while reading or writing the student records file.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("The file '{}' does not exist. Please check the filename.", path.display())]
    FileNotFound { path: PathBuf },

    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("Student with ID {0} not found.")]
    StudentNotFound(String),

    #[error("{field} '{value}' cannot contain a comma or a line break, or start or end the line with whitespace")]
    InvalidField { field: &'static str, value: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, StoreError>;
