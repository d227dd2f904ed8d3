use crate::components::shell::{
    input::{parse_marks, validate_mark, MarkInputError},
    menu::{parse_choice, render_menu, MenuChoice, MenuError},
    OutputFormat,
};
use crate::tests::{run_shell, setup_empty_store, setup_store};

#[test]
fn test_parse_choice() {
    assert_eq!(parse_choice("1"), Ok(MenuChoice::AddStudent));
    assert_eq!(parse_choice(" 6 "), Ok(MenuChoice::Exit));
    assert_eq!(parse_choice("7"), Err(MenuError::OutOfRange(7)));
    assert_eq!(parse_choice("0"), Err(MenuError::OutOfRange(0)));
    assert!(matches!(parse_choice("two"), Err(MenuError::NotANumber(_))));
    assert!(matches!(parse_choice(""), Err(MenuError::NotANumber(_))));
}

#[test]
fn test_render_menu() {
    let menu = render_menu();
    assert!(menu.starts_with("\n-- Student Marks Management System --\n"));
    assert!(menu.contains("2. Add or update marks for an existing student\n"));
    assert!(menu.ends_with("6. Exit\n"));
}

#[test]
fn test_mark_validation() {
    assert_eq!(validate_mark(" 0"), Ok(0));
    assert_eq!(validate_mark("100 "), Ok(100));
    assert_eq!(validate_mark("101"), Err(MarkInputError::OutOfRange(101)));
    assert_eq!(validate_mark("-1"), Err(MarkInputError::OutOfRange(-1)));
    assert!(matches!(validate_mark("9.5"), Err(MarkInputError::NotAnInteger(_))));

    assert_eq!(parse_marks("80, 90,100"), Ok(vec![80, 90, 100]));
    assert!(parse_marks("80,abc,90").is_err());
    assert!(parse_marks("").is_err());
}

#[test]
fn test_shell_full_session() {
    let test_store = setup_empty_store();

    let output = run_shell(
        &test_store.store,
        OutputFormat::Standard,
        "1\n1\nAlice\n1\n2\nBob\n2\n1\n80,90\n2\n2\n70\n3\n1\n4\n5\n6\n",
    );

    assert_eq!(test_store.contents(), "1,Alice,80,90\n2,Bob,70\n");
    assert!(output.contains("Enter student name: "));
    assert!(output.contains("ID: 1, Name: Alice, Average Marks: 85.00"));
    assert!(output.contains("Class average: 120.00"));
    assert!(output.contains("Top performing student: ID: 1, Name: Alice, Average Marks: 85.00"));
    assert_eq!(output.matches("Enter your choice (1-6): ").count(), 8);
}

#[test]
fn test_shell_invalid_menu_input_reprompts() {
    let test_store = setup_store("1,Alice,80\n");
    let output = run_shell(&test_store.store, OutputFormat::Standard, "abc\n9\n6\n");

    assert!(output.contains("Invalid input. Please enter a number between 1 and 6."));
    assert!(output.contains("Invalid choice. Please try again."));
    assert_eq!(output.matches("-- Student Marks Management System --").count(), 3);
}

#[test]
fn test_shell_rejects_out_of_range_marks() {
    let original = "1,Alice,80\n";
    let test_store = setup_store(original);
    let output = run_shell(&test_store.store, OutputFormat::Standard, "2\n1\n90,101\n6\n");

    assert!(output.contains("Invalid marks input. Marks must be an integer between 0 and 100."));
    assert_eq!(test_store.contents(), original);
}

#[test]
fn test_shell_update_unknown_student() {
    let original = "1,Alice,80\n";
    let test_store = setup_store(original);
    let output = run_shell(&test_store.store, OutputFormat::Standard, "2\n5\n50\n3\n5\n6\n");

    assert_eq!(output.matches("Student with ID 5 not found.").count(), 2);
    assert_eq!(test_store.contents(), original);
}

#[test]
fn test_shell_missing_file() {
    let test_store = setup_empty_store();
    let output = run_shell(&test_store.store, OutputFormat::Standard, "4\n5\n6\n");

    assert!(output.contains("does not exist. Please check the filename."));
    assert!(output.contains("Class average: 0.00"));
    assert!(output.contains("No students available."));
}

#[test]
fn test_shell_reports_malformed_file() {
    let test_store = setup_store("1,Alice,80\n2,Bob,abc\n3,Carol,100\n");
    let output = run_shell(&test_store.store, OutputFormat::Standard, "5\n6\n");

    assert!(output.contains("Error reading file: line 2: invalid mark 'abc'"));
    // Carol sits after the bad line and is never loaded
    assert!(output.contains("Top performing student: ID: 1, Name: Alice"));
}

#[test]
fn test_shell_exits_on_end_of_input() {
    let test_store = setup_store("1,Alice,80\n");
    let output = run_shell(&test_store.store, OutputFormat::Standard, "3\n");

    assert!(output.ends_with("Enter student ID: "));
}

#[test]
fn test_shell_json_output() {
    let test_store = setup_store("1,Alice,80,90\n");
    let output = run_shell(&test_store.store, OutputFormat::JSON, "3\n1\n4\n6\n");

    assert!(output.contains("\"executed_action\": \"ViewSummary\""));
    assert!(output.contains("\"student_id\": \"1\""));
    assert!(output.contains("\"average\": 85.0"));
    assert!(output.contains("\"class_average\": 170.0"));
    assert!(output.contains("\"timestamp\""));
}

#[test]
fn test_shell_table_output() {
    let test_store = setup_store("1,Alice,80,90\n2,Bob,70\n");
    let output = run_shell(&test_store.store, OutputFormat::Table, "5\n3\n7\n6\n");

    assert!(output.contains("| ID | Name  | Marks  | Average |"));
    assert!(output.contains("| 1  | Alice | 80, 90 | 85.00   |"));
    assert!(output.contains("ERROR"));
    assert!(output.contains("Student with ID 7 not found."));
}

#[test]
fn test_shell_update_on_missing_file_reports_file() {
    let test_store = setup_empty_store();
    let output = run_shell(&test_store.store, OutputFormat::Standard, "2\n1\n50\n6\n");

    assert!(output.contains("Error: The file '"));
    assert!(output.contains("does not exist. Please check the filename.\nStudent with ID 1 not found."));
    assert!(!test_store.path.exists());
}

#[test]
fn test_shell_update_after_bad_line_rewrites_prefix() {
    let test_store = setup_store("1,Alice,80\n2,Bob,x\n3,Carol,90\n");
    let output = run_shell(&test_store.store, OutputFormat::Standard, "2\n1\n100\n6\n");

    assert!(output.contains("Error reading file: line 2: invalid mark 'x'"));
    assert_eq!(test_store.contents(), "1,Alice,100\n");
}

#[test]
fn test_shell_add_student_after_unterminated_line() {
    let test_store = setup_store("1,Alice,80");
    run_shell(&test_store.store, OutputFormat::Standard, "1\n2\nBob\n3\n1\n6\n");

    assert_eq!(test_store.contents(), "1,Alice,80\n2,Bob\n");
}

#[test]
fn test_shell_view_with_extreme_marks() {
    let test_store = setup_store("1,Big,9223372036854775807,1\n");
    let output = run_shell(&test_store.store, OutputFormat::Standard, "3\n1\n4\n5\n6\n");

    assert!(output.contains("ID: 1, Name: Big, Average Marks: "));
    assert!(output.contains("Class average: "));
    assert!(output.contains("Top performing student: ID: 1"));
}
