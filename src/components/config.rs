//! Runtime configuration resolved from the process environment.
use std::{env, path::PathBuf, str::FromStr};

use super::shell::OutputFormat;

pub const DEFAULT_DATA_FILE: &str = "students.txt";

#[derive(Debug, Clone)]
pub struct RecordsConfig {
    pub data_file: PathBuf,          // Flat file holding one student per line
    pub output_format: OutputFormat, // Rendering for summary, average and top performer
}

impl Default for RecordsConfig {
    fn default() -> Self {
        RecordsConfig {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            output_format: OutputFormat::Standard,
        }
    }
}

impl RecordsConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `STUDENT_RECORDS_FILE` - Path of the records file (default: students.txt)
    /// - `STUDENT_RECORDS_FORMAT` - `standard`, `json` or `table` (default: standard)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = env::var("STUDENT_RECORDS_FILE") {
            if !path.trim().is_empty() {
                config.data_file = PathBuf::from(path);
            }
        }

        if let Some(format) = read_env::<OutputFormat>("STUDENT_RECORDS_FORMAT") {
            config.output_format = format;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: FromStr,
{
    env::var(key).ok()?.parse().ok()
}
