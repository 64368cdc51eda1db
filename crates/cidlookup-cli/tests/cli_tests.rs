//! Subcommands run end to end against a CSV table on disk

use cidlookup_cli::{commands, AppConfig, Commands, OutputFormat};
use tempfile::TempDir;

const TABLE: &str = "\
C-ID #,C-ID Descriptor,Institution,Local Course Title(s),Local Dept. Name & Number
ACCT 110,Financial Accounting,Foothill College,Financial Accounting,ACTG 1A
ACCT 110,Financial Accounting,De Anza College,Financial Accounting I,ACCT 1A
ACCT 120,Managerial Accounting,De Anza College,Managerial Accounting,ACCT 1B
ACCT 120,Managerial Accounting,Hartnell College,\"Managerial Accounting, Intro\",ACC 2
CDEV 100,Child Growth and Development,De Anza College,Child Growth and Development Through the Lifespan,C D 10
";

fn config(dir: &TempDir, table: &str) -> AppConfig {
    let path = dir.path().join("cid.csv");
    std::fs::write(&path, table).unwrap();
    AppConfig {
        data_file: path,
        ..Default::default()
    }
}

fn run(config: &AppConfig, command: Commands, format: OutputFormat) -> anyhow::Result<String> {
    let mut out = Vec::new();
    commands::run(&command, config, format, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn test_search_table() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir, TABLE);

    let text = run(
        &config,
        Commands::Search {
            query: vec!["acct".to_string(), "120".to_string()],
        },
        OutputFormat::Table,
    )
    .unwrap();

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "acct 120");
    assert_eq!(lines[1], "Found 1 C-ID(s), 2 course(s)");
    assert!(lines[4].starts_with('*'));
    assert!(lines[5].contains("Managerial Accounting, Intro"));
}

#[test]
fn test_departments_and_courses() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir, TABLE);

    let text = run(&config, Commands::Departments, OutputFormat::Table).unwrap();
    assert_eq!(text, "ACCT\nC D\n");

    let text = run(
        &config,
        Commands::Courses {
            department: "ACCT".to_string(),
        },
        OutputFormat::Table,
    )
    .unwrap();
    assert_eq!(
        text,
        "1A (ACCT 110) :: Financial Accounting I\n1B (ACCT 120) :: Managerial Accounting\n"
    );

    let text = run(
        &config,
        Commands::Courses {
            department: "c d".to_string(),
        },
        OutputFormat::Json,
    )
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value[0]["first_number"], "10");
    assert_eq!(value[0]["equivalency_id"], "CDEV 100");
}

#[test]
fn test_show_json() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir, TABLE);

    let text = run(
        &config,
        Commands::Show {
            department: "ACCT".to_string(),
            number: Some("1A".to_string()),
        },
        OutputFormat::Json,
    )
    .unwrap();

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["heading"], "ACCT 1A");
    assert_eq!(value["total"], 2);
    assert_eq!(value["rows"][0]["school"], "De Anza College");
    assert_eq!(value["rows"][1]["school"], "Foothill College");
}

#[test]
fn test_home_override_changes_order() {
    let dir = TempDir::new().unwrap();
    let mut config = config(&dir, TABLE);
    config.engine.home_institution = "Foothill College".to_string();

    let text = run(
        &config,
        Commands::Search {
            query: vec!["ACCT-110".to_string()],
        },
        OutputFormat::Json,
    )
    .unwrap();

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["path"], "cid");
    assert_eq!(value["rows"][0]["school"], "Foothill College");
    assert_eq!(value["rows"][0]["home"], true);
}

#[test]
fn test_missing_table_is_data_format_error() {
    let dir = TempDir::new().unwrap();
    let config = AppConfig {
        data_file: dir.path().join("cid.csv"),
        ..Default::default()
    };

    let err = run(&config, Commands::Departments, OutputFormat::Table).unwrap_err();
    let err = err.downcast_ref::<cidlookup_core::Error>().unwrap();
    assert!(err.is_data_format());
    assert!(err.to_string().starts_with("Data file not found: cid.csv"));
}

#[test]
fn test_malformed_table_names_missing_columns() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir, "Institution,Title\nFoothill College,Calculus\n");

    let err = run(&config, Commands::Departments, OutputFormat::Table).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("missing required column(s)"));
    assert!(message.contains("C-ID #"));
}
