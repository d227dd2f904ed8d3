use serde::Serialize;
use serde_json::json;
use std::{
    io::{self, BufRead, Write},
    str::FromStr,
};
use tabled::{builder::Builder, settings::Style, Table, Tabled};
use tracing::debug;

use crate::components::{
    storage::{error::StoreError, student_file::StudentFile},
    student::{
        aggregate::{class_average, top_performer},
        record::StudentRecord,
    },
};

pub mod input;
pub mod menu;

use input::parse_marks;
use menu::{parse_choice, render_menu, MenuChoice, CHOICE_PROMPT};

/// How results of the read-only menu actions are printed.
/// Errors and prompts are always plain text.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Standard, // Plain text lines
    JSON,  // Pretty-printed JSON with the record data attached
    Table, // ASCII table
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" | "text" => Ok(OutputFormat::Standard),
            "json" => Ok(OutputFormat::JSON),
            "table" => Ok(OutputFormat::Table),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// States of the menu loop. Every action state returns to `Menu`; `Exit` ends the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShellState {
    Menu,
    AddStudent,
    UpdateMarks,
    ViewSummary,
    ClassAverage,
    TopPerformer,
    Exit,
}

impl From<MenuChoice> for ShellState {
    fn from(choice: MenuChoice) -> Self {
        match choice {
            MenuChoice::AddStudent => ShellState::AddStudent,
            MenuChoice::UpdateMarks => ShellState::UpdateMarks,
            MenuChoice::ViewSummary => ShellState::ViewSummary,
            MenuChoice::ClassAverage => ShellState::ClassAverage,
            MenuChoice::TopPerformer => ShellState::TopPerformer,
            MenuChoice::Exit => ShellState::Exit,
        }
    }
}

#[derive(Serialize, Debug, PartialEq)]
enum ActionKind {
    ViewSummary,
    ClassAverage,
    TopPerformer,
}

/// Outcome of a read-only action, rendered according to the output format.
#[derive(Serialize, Debug)]
struct ActionResult {
    executed_action: ActionKind,     // Menu action that produced this result
    success: bool,                   // Whether the action found something to show
    message: String,                 // Human-readable result line
    data: Option<serde_json::Value>, // Structured payload for JSON output
    timestamp: String,               // ISO 8601 timestamp of execution
}

impl ActionResult {
    fn new(kind: ActionKind, success: bool, message: String, data: Option<serde_json::Value>) -> Self {
        ActionResult {
            executed_action: kind,
            success,
            message,
            data,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Tabled)]
struct StudentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Marks")]
    marks: String,
    #[tabled(rename = "Average")]
    average: String,
}

impl From<&StudentRecord> for StudentRow {
    fn from(record: &StudentRecord) -> Self {
        StudentRow {
            id: record.id.clone(),
            name: record.name.clone(),
            marks: record
                .marks
                .iter()
                .map(|m| m.to_string())
                .collect::<Vec<_>>()
                .join(", "),
            average: format!("{:.2}", record.average()),
        }
    }
}

#[derive(Tabled)]
struct StatusRow {
    status: String,
    message: String,
    timestamp: String,
}

/// Interactive menu over a student records file.
///
/// Generic over its input and output so it can run against the terminal or
/// against in-memory buffers.
pub struct Shell<R, W> {
    store: StudentFile,
    format: OutputFormat,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(store: StudentFile, format: OutputFormat, input: R, output: W) -> Self {
        Shell {
            store,
            format,
            input,
            output,
        }
    }

    #[allow(dead_code)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs the menu loop until the user picks Exit or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        let mut state = ShellState::Menu;

        loop {
            debug!("Shell state: {:?}", state);
            state = match state {
                ShellState::Menu => self.select()?,
                ShellState::AddStudent => self.add_student()?,
                ShellState::UpdateMarks => self.update_marks()?,
                ShellState::ViewSummary => self.view_summary()?,
                ShellState::ClassAverage => self.class_average()?,
                ShellState::TopPerformer => self.top_performer()?,
                ShellState::Exit => break,
            };
        }

        self.output.flush()
    }

    fn select(&mut self) -> io::Result<ShellState> {
        write!(self.output, "{}", render_menu())?;
        let Some(line) = self.prompt(CHOICE_PROMPT)? else {
            return Ok(ShellState::Exit);
        };

        match parse_choice(&line) {
            Ok(choice) => Ok(choice.into()),
            Err(e) => {
                writeln!(self.output, "{}", e)?;
                Ok(ShellState::Menu)
            }
        }
    }

    fn add_student(&mut self) -> io::Result<ShellState> {
        let Some(id) = self.prompt("Enter student ID: ")? else {
            return Ok(ShellState::Exit);
        };
        let Some(name) = self.prompt("Enter student name: ")? else {
            return Ok(ShellState::Exit);
        };

        if let Err(e) = self.store.append_new(&id, &name) {
            self.report_store_error(&e)?;
        }
        Ok(ShellState::Menu)
    }

    fn update_marks(&mut self) -> io::Result<ShellState> {
        let Some(id) = self.prompt("Enter student ID: ")? else {
            return Ok(ShellState::Exit);
        };
        let Some(raw_marks) = self.prompt("Enter marks separated by commas: ")? else {
            return Ok(ShellState::Exit);
        };

        let marks = match parse_marks(&raw_marks) {
            Ok(marks) => marks,
            Err(e) => {
                writeln!(self.output, "{}", e)?;
                return Ok(ShellState::Menu);
            }
        };

        let (outcome, load_error) = self.store.update_marks(&id, marks);
        if let Some(e) = load_error {
            self.report_store_error(&e)?;
        }
        if let Err(e) = outcome {
            self.report_store_error(&e)?;
        }
        Ok(ShellState::Menu)
    }

    fn view_summary(&mut self) -> io::Result<ShellState> {
        let Some(id) = self.prompt("Enter student ID: ")? else {
            return Ok(ShellState::Exit);
        };

        let (found, error) = self.store.find_by_id(&id);
        if let Some(e) = error {
            self.report_store_error(&e)?;
        }

        let rows = found.as_ref().map(|student| vec![StudentRow::from(student)]);
        let result = match &found {
            Some(student) => ActionResult::new(
                ActionKind::ViewSummary,
                true,
                student.to_string(),
                Some(json!(student)),
            ),
            None => ActionResult::new(
                ActionKind::ViewSummary,
                false,
                StoreError::StudentNotFound(id).to_string(),
                None,
            ),
        };

        let rendered = self.render(&result, rows);
        writeln!(self.output, "{}", rendered)?;
        Ok(ShellState::Menu)
    }

    fn class_average(&mut self) -> io::Result<ShellState> {
        let records = self.load_reporting()?;
        let average = class_average(&records);

        let result = ActionResult::new(
            ActionKind::ClassAverage,
            true,
            format!("Class average: {:.2}", average),
            Some(json!({ "class_average": average, "students": records.len() })),
        );

        let rendered = match self.format {
            OutputFormat::Table => {
                let mut builder = Builder::new();
                builder.push_record(["Students".to_string(), records.len().to_string()]);
                builder.push_record(["Class average".to_string(), format!("{:.2}", average)]);
                builder.build().with(Style::ascii()).to_string()
            }
            _ => self.render(&result, None),
        };
        writeln!(self.output, "{}", rendered)?;
        Ok(ShellState::Menu)
    }

    fn top_performer(&mut self) -> io::Result<ShellState> {
        let records = self.load_reporting()?;

        let Some(student) = top_performer(&records) else {
            writeln!(self.output, "No students available.")?;
            return Ok(ShellState::Menu);
        };

        let result = ActionResult::new(
            ActionKind::TopPerformer,
            true,
            format!("Top performing student: {}", student),
            Some(json!(student)),
        );
        let rendered = self.render(&result, Some(vec![StudentRow::from(student)]));
        writeln!(self.output, "{}", rendered)?;
        Ok(ShellState::Menu)
    }

    /// Loads every record and prints any load error before handing back what was read.
    fn load_reporting(&mut self) -> io::Result<Vec<StudentRecord>> {
        let loaded = self.store.load_all();
        if let Some(e) = &loaded.error {
            self.report_store_error(e)?;
        }
        Ok(loaded.records)
    }

    fn report_store_error(&mut self, error: &StoreError) -> io::Result<()> {
        match error {
            StoreError::FileNotFound { .. } | StoreError::InvalidField { .. } => {
                writeln!(self.output, "Error: {}", error)
            }
            StoreError::StudentNotFound(_) => writeln!(self.output, "{}", error),
            StoreError::Write { .. } => writeln!(self.output, "Error writing file: {}", error),
            StoreError::Malformed { .. } | StoreError::Io(_) => {
                writeln!(self.output, "Error reading file: {}", error)
            }
        }
    }

    fn render(&self, result: &ActionResult, rows: Option<Vec<StudentRow>>) -> String {
        match self.format {
            OutputFormat::Standard => result.message.clone(),
            OutputFormat::JSON => serde_json::to_string_pretty(result)
                .unwrap_or_else(|e| format!("Failed to render result: {}", e)),
            OutputFormat::Table => match rows {
                Some(rows) if result.success => Table::new(rows).with(Style::ascii()).to_string(),
                _ => {
                    let status = StatusRow {
                        status: if result.success { "SUCCESS" } else { "ERROR" }.to_string(),
                        message: result.message.clone(),
                        timestamp: result.timestamp.clone(),
                    };
                    Table::new(vec![status]).with(Style::ascii()).to_string()
                }
            },
        }
    }

    /// Writes `text`, then reads one line with its line ending stripped.
    /// Returns `None` once input is exhausted.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let trimmed = line.trim_end_matches(&['\n', '\r'][..]).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}
