use lazy_static::lazy_static;
use thiserror::Error;

/// One selectable entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddStudent,
    UpdateMarks,
    ViewSummary,
    ClassAverage,
    TopPerformer,
    Exit,
}

#[derive(Debug, Clone)]
pub struct MenuOption {
    pub number: i64,
    pub label: String,
    pub choice: MenuChoice,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MenuError {
    #[error("Invalid input. Please enter a number between 1 and 6.")]
    NotANumber(String),

    #[error("Invalid choice. Please try again.")]
    OutOfRange(i64),
}

pub const MENU_TITLE: &str = "-- Student Marks Management System --";
pub const CHOICE_PROMPT: &str = "Enter your choice (1-6): ";

lazy_static! {
    pub static ref MENU_OPTIONS: Vec<MenuOption> = {
        let entries = [
            ("Add new student", MenuChoice::AddStudent),
            ("Add or update marks for an existing student", MenuChoice::UpdateMarks),
            ("View student summary", MenuChoice::ViewSummary),
            ("Calculate class average", MenuChoice::ClassAverage),
            ("Top performing student", MenuChoice::TopPerformer),
            ("Exit", MenuChoice::Exit),
        ];

        entries
            .iter()
            .enumerate()
            .map(|(i, (label, choice))| MenuOption {
                number: i as i64 + 1,
                label: label.to_string(),
                choice: *choice,
            })
            .collect()
    };
}

/// Menu text printed before every prompt, starting with a blank line.
pub fn render_menu() -> String {
    let mut text = format!("\n{}\n", MENU_TITLE);
    for option in MENU_OPTIONS.iter() {
        text.push_str(&format!("{}. {}\n", option.number, option.label));
    }
    text
}

pub fn parse_choice(input: &str) -> Result<MenuChoice, MenuError> {
    let number = input
        .trim()
        .parse::<i64>()
        .map_err(|_| MenuError::NotANumber(input.to_string()))?;

    MENU_OPTIONS
        .iter()
        .find(|option| option.number == number)
        .map(|option| option.choice)
        .ok_or(MenuError::OutOfRange(number))
}
