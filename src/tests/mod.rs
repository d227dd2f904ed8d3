#![allow(dead_code)]

use crate::components::{
    shell::{OutputFormat, Shell},
    storage::student_file::StudentFile,
    student::record::StudentRecord,
};
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;
use tempfile::TempDir;

mod shell;

// Keeps the temp dir alive for as long as the store is in use
pub struct TestStore {
    _dir: TempDir,
    pub path: PathBuf,
    pub store: StudentFile,
}

impl TestStore {
    pub fn contents(&self) -> String {
        fs::read_to_string(&self.path).unwrap()
    }
}

// Store whose file does not exist yet
pub fn setup_empty_store() -> TestStore {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("students.txt");
    let store = StudentFile::new(&path);
    TestStore {
        _dir: dir,
        path,
        store,
    }
}

// Store backed by a file holding exactly `content`
pub fn setup_store(content: &str) -> TestStore {
    let test_store = setup_empty_store();
    fs::write(&test_store.path, content).unwrap();
    test_store
}

pub fn student(id: &str, name: &str, marks: &[i64]) -> StudentRecord {
    StudentRecord::with_marks(id, name, marks.to_vec())
}

// Feeds `script` to a shell over `store` and returns everything it printed
pub fn run_shell(store: &StudentFile, format: OutputFormat, script: &str) -> String {
    let input = Cursor::new(script.as_bytes().to_vec());
    let mut shell = Shell::new(store.clone(), format, input, Vec::new());
    shell.run().unwrap();
    String::from_utf8(shell.into_output()).unwrap()
}
