//! Line codec for the records file: `id,name[,mark...]`, one student per line.
//!
//! There is no escaping, so `id` and `name` must never contain the delimiter or
//! a line break. Lines are trimmed on read, so the line must also not start or
//! end with whitespace. Encoding refuses such fields instead of writing a line
//! that would read back as a different record.

use super::error::{Result, StoreError};
use crate::components::student::record::StudentRecord;

pub const FIELD_DELIMITER: char = ',';

/// Parses one line into a record. `line_no` is 1-based and only used for errors.
pub fn parse_line(line: &str, line_no: usize) -> Result<StudentRecord> {
    let mut fields = line.trim().split(FIELD_DELIMITER);

    let (id, name) = match (fields.next(), fields.next()) {
        (Some(id), Some(name)) => (id, name),
        _ => {
            return Err(StoreError::Malformed {
                line: line_no,
                reason: format!("expected at least 'id,name', found '{}'", line.trim()),
            })
        }
    };

    let marks = fields
        .map(|token| {
            token
                .trim()
                .parse::<i64>()
                .map_err(|_| StoreError::Malformed {
                    line: line_no,
                    reason: format!("invalid mark '{}'", token),
                })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut record = StudentRecord::new(id, name);
    record.add_marks(marks);
    Ok(record)
}

/// Encodes a record as a newline-terminated line. Zero marks gives `id,name\n`.
pub fn encode_line(record: &StudentRecord) -> Result<String> {
    check_field("id", &record.id)?;
    check_field("name", &record.name)?;

    // The id opens the line, and the name closes it when there are no marks
    if record.id.starts_with(char::is_whitespace) {
        return Err(invalid_field("id", &record.id));
    }
    if record.marks.is_empty() && record.name.ends_with(char::is_whitespace) {
        return Err(invalid_field("name", &record.name));
    }

    let mut line = format!("{}{}{}", record.id, FIELD_DELIMITER, record.name);
    for mark in &record.marks {
        line.push(FIELD_DELIMITER);
        line.push_str(&mark.to_string());
    }
    line.push('\n');
    Ok(line)
}

/// Concatenates the encoded lines of every record in order.
pub fn encode_all(records: &[StudentRecord]) -> Result<String> {
    records.iter().map(encode_line).collect()
}

/// Decodes file content line by line.
///
/// Stops at the first malformed line and hands back the records read so far
/// together with the error; later lines are not looked at.
pub fn decode_all(content: &str) -> (Vec<StudentRecord>, Option<StoreError>) {
    let mut records = Vec::new();

    for (index, line) in content.lines().enumerate() {
        match parse_line(line, index + 1) {
            Ok(record) => records.push(record),
            Err(e) => return (records, Some(e)),
        }
    }

    (records, None)
}

pub(crate) fn check_field(field: &'static str, value: &str) -> Result<()> {
    if value.contains(FIELD_DELIMITER) || value.contains('\n') || value.contains('\r') {
        return Err(invalid_field(field, value));
    }
    Ok(())
}

fn invalid_field(field: &'static str, value: &str) -> StoreError {
    StoreError::InvalidField {
        field,
        value: value.to_string(),
    }
}
