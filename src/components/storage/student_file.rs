use std::{
    fs::{File, OpenOptions},
    io::{self, ErrorKind, Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

use tracing::{debug, info, warn};

use super::{
    codec,
    error::{Result, StoreError},
};
use crate::components::student::record::StudentRecord;

/// Result of reading the whole file. `records` holds whatever was parsed before
/// `error` (if any) stopped the load.
#[derive(Debug, Default)]
pub struct Loaded {
    pub records: Vec<StudentRecord>,
    pub error: Option<StoreError>,
}

/// Flat-file student repository. Every operation reads or rewrites the whole
/// file; there is no locking, so concurrent writers race and the last one wins.
#[derive(Debug, Clone)]
pub struct StudentFile {
    path: PathBuf,
}

impl StudentFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        StudentFile {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn load_all(&self) -> Loaded {
        let content = match self.read_content() {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read {}: {}", self.path.display(), e);
                return Loaded {
                    records: Vec::new(),
                    error: Some(e),
                };
            }
        };

        let (records, error) = codec::decode_all(&content);
        match &error {
            Some(e) => warn!(
                "Stopped loading {} after {} records: {}",
                self.path.display(),
                records.len(),
                e
            ),
            None => debug!("Loaded {} records from {}", records.len(), self.path.display()),
        }

        Loaded { records, error }
    }

    /// Overwrites the file with `records`, creating it if needed.
    pub fn save_all(&self, records: &[StudentRecord]) -> Result<()> {
        // Encode up front so a bad field never leaves a truncated file behind
        let content = codec::encode_all(records)?;

        let mut file = File::create(&self.path).map_err(|e| self.write_error(e))?;
        file.write_all(content.as_bytes())
            .map_err(|e| self.write_error(e))?;
        file.flush().map_err(|e| self.write_error(e))?;

        debug!("Saved {} records to {}", records.len(), self.path.display());
        Ok(())
    }

    /// Appends `id,name` with no marks. Existing records are not loaded, so a
    /// duplicate id is written without complaint. A file whose last line has
    /// no terminator gets one first, so the new record starts its own line.
    pub fn append_new(&self, id: &str, name: &str) -> Result<()> {
        let line = codec::encode_line(&StudentRecord::new(id, name))?;

        let mut file = OpenOptions::new()
            .read(true)
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.write_error(e))?;

        let mut content = String::new();
        if !ends_with_newline(&mut file).map_err(|e| self.write_error(e))? {
            content.push('\n');
        }
        content.push_str(&line);
        file.write_all(content.as_bytes())
            .map_err(|e| self.write_error(e))?;

        info!("Added student {} to {}", id, self.path.display());
        Ok(())
    }

    /// First record whose id matches. The load outcome is returned alongside so
    /// the caller can report a missing or malformed file.
    pub fn find_by_id(&self, id: &str) -> (Option<StudentRecord>, Option<StoreError>) {
        let Loaded { records, error } = self.load_all();
        let found = records.into_iter().find(|record| record.id == id);
        (found, error)
    }

    /// Replaces the marks of the first student with `id` and rewrites the file
    /// with every loaded record.
    ///
    /// A missing or malformed file is not fatal: the update runs against the
    /// records that did load, and the load error is handed back next to the
    /// outcome for the caller to report. After a malformed line that means the
    /// rewrite keeps only the records before it. Any other read failure aborts
    /// the update.
    pub fn update_marks(&self, id: &str, new_marks: Vec<i64>) -> (Result<()>, Option<StoreError>) {
        let Loaded { mut records, error } = self.load_all();

        let load_error = match error {
            Some(e @ StoreError::Io(_)) => return (Err(e), None),
            other => other,
        };

        let Some(student) = records.iter_mut().find(|record| record.id == id) else {
            return (Err(StoreError::StudentNotFound(id.to_string())), load_error);
        };
        student.marks = new_marks;

        if load_error.is_some() {
            warn!(
                "Rewriting {} with the {} records read before the load error",
                self.path.display(),
                records.len()
            );
        }

        let outcome = self.save_all(&records);
        if outcome.is_ok() {
            info!("Updated marks for student {}", id);
        }
        (outcome, load_error)
    }

    fn write_error(&self, source: io::Error) -> StoreError {
        StoreError::Write {
            path: self.path.clone(),
            source,
        }
    }

    fn read_content(&self) -> Result<String> {
        let mut file = File::open(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StoreError::FileNotFound {
                path: self.path.clone(),
            },
            _ => StoreError::Io(e),
        })?;

        let mut content = String::new();
        file.read_to_string(&mut content)?;
        Ok(content)
    }
}

fn ends_with_newline(file: &mut File) -> io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }

    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}
