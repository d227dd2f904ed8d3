use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRecord {
    pub id: String,      // Opaque key, not guaranteed unique
    pub name: String,    // Free text without the field delimiter
    pub marks: Vec<i64>, // Insertion order is kept but ignored by aggregation
}

impl StudentRecord {
    pub fn new(id: &str, name: &str) -> Self {
        StudentRecord {
            id: id.to_string(),
            name: name.to_string(),
            marks: Vec::new(),
        }
    }

    #[allow(dead_code)]
    pub fn with_marks(id: &str, name: &str, marks: Vec<i64>) -> Self {
        StudentRecord {
            id: id.to_string(),
            name: name.to_string(),
            marks,
        }
    }

    /// Appends marks as given. No range check happens here; the 0-100 bound
    /// is only enforced on interactive input.
    pub fn add_marks<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = i64>,
    {
        self.marks.extend(values);
    }

    /// Mean of all marks, or 0 when there are none.
    pub fn average(&self) -> f64 {
        if self.marks.is_empty() {
            return 0.0;
        }
        // Widened so marks anywhere in the i64 range cannot overflow the sum
        let total: i128 = self.marks.iter().map(|&m| m as i128).sum();
        total as f64 / self.marks.len() as f64
    }
}

impl fmt::Display for StudentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Name: {}, Average Marks: {:.2}",
            self.id,
            self.name,
            self.average()
        )
    }
}

// Serialized with the derived average included, in the shape the web front end
// consumes: { student_id, name, marks, average }.
impl Serialize for StudentRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct StudentView<'a> {
            student_id: &'a str,
            name: &'a str,
            marks: &'a [i64],
            average: f64,
        }

        StudentView {
            student_id: &self.id,
            name: &self.name,
            marks: &self.marks,
            average: self.average(),
        }
        .serialize(serializer)
    }
}
