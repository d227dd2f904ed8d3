use super::record::StudentRecord;

/// Sum of every mark across all students divided by the number of students.
///
/// The denominator is the student count, not the mark count, so students with
/// more marks weigh more heavily. Returns 0 for an empty collection.
pub fn class_average(records: &[StudentRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }

    let total_marks: i128 = records
        .iter()
        .flat_map(|record| record.marks.iter())
        .map(|&mark| mark as i128)
        .sum();
    total_marks as f64 / records.len() as f64
}

/// Student with the highest average. Ties go to the earliest student in `records`.
pub fn top_performer(records: &[StudentRecord]) -> Option<&StudentRecord> {
    // Iterator::max_by keeps the last maximum, so fold with a strict comparison
    records.iter().fold(None, |best, candidate| match best {
        Some(current) if candidate.average() <= current.average() => Some(current),
        _ => Some(candidate),
    })
}
