use thiserror::Error;

pub const MIN_MARK: i64 = 0;
pub const MAX_MARK: i64 = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MarkInputError {
    #[error("Invalid marks input. Marks must be an integer between 0 and 100.")]
    NotAnInteger(String),

    #[error("Invalid marks input. Marks must be an integer between 0 and 100.")]
    OutOfRange(i64),
}

pub fn validate_mark(token: &str) -> Result<i64, MarkInputError> {
    let mark = token
        .trim()
        .parse::<i64>()
        .map_err(|_| MarkInputError::NotAnInteger(token.to_string()))?;

    if !(MIN_MARK..=MAX_MARK).contains(&mark) {
        return Err(MarkInputError::OutOfRange(mark));
    }
    Ok(mark)
}

/// Parses a comma-separated mark list. One bad token rejects the whole list.
pub fn parse_marks(input: &str) -> Result<Vec<i64>, MarkInputError> {
    input.split(',').map(validate_mark).collect()
}
