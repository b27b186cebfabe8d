//! E2E tests running the impotc binary against the fixtures in tests/data

use std::process::{Command, Output};

fn impotc(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_impotc"))
        .args(args)
        .output()
        .expect("Failed to execute command")
}

/// Test the JSON summary of the 2025 fixture (the 2024 record is left out by the year in the file)
#[test]
fn summary_json_output() {
    let output = impotc(&["summary", "-r", "tests/data/records_2025.json", "--json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("\"tax_year\": \"2025\""));
    assert!(stdout.contains("\"income_count\": 5"));
    assert!(stdout.contains("\"gross_income\": \"24500.00\""));
    // 3 x (3500 - 448) + 12000 * 0.66 + (2000 - 448)
    assert!(stdout.contains("\"taxable_income\": \"18628.00\""));
    assert!(stdout.contains("\"salary_deduction\": \"1792.00\""));
    assert!(stdout.contains("\"self_employed_deduction\": \"4080.00\""));
    // (18628 - 11294) * 0.11
    assert!(stdout.contains("\"gross_tax\": \"806.74\""));
    assert!(stdout.contains("\"donation_credit\": \"198.00\""));
    assert!(stdout.contains("\"net_tax\": \"608.74\""));
    assert!(stdout.contains("\"effective_rate_pct\": \"3.27\""));
    assert!(stdout.contains("\"monthly_reserve\": \"50.73\""));
    assert!(stdout.contains("\"marginal_rate_pct\": \"11\""));
}

/// Test that the CSV ledger gives the same estimate as the JSON input
#[test]
fn summary_csv_input() {
    let output = impotc(&["summary", "-r", "tests/data/ledger.csv", "-y", "2025", "--json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("\"taxable_income\": \"18628.00\""));
    assert!(stdout.contains("\"net_tax\": \"608.74\""));
}

/// Test the formatted summary text
#[test]
fn summary_text_output() {
    let output = impotc(&["summary", "-r", "tests/data/records_2025.json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("INCOME TAX ESTIMATE (2025)"));
    assert!(stdout.contains("MONTHLY RESERVE"));
    assert!(stdout.contains("608,74\u{A0}€"));
}

/// Test that an empty year gives a zero estimate
#[test]
fn summary_year_without_records() {
    let output = impotc(&["summary", "-r", "tests/data/ledger.csv", "-y", "2030", "--json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("\"income_count\": 0"));
    assert!(stdout.contains("\"net_tax\": \"0.00\""));
    assert!(stdout.contains("\"effective_rate_pct\": \"0.00\""));
}

/// Test the detailed calculation view
#[test]
fn details_sections() {
    let output = impotc(&["details", "-r", "tests/data/records_2025.json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("GROSS INCOME BY CATEGORY"));
    assert!(stdout.contains("Self-employed (BNC)"));
    assert!(stdout.contains("PROGRESSIVE SCALE"));
    assert!(stdout.contains("DONATION CREDIT"));
    assert!(stdout.contains("Studio Lumiere"));
    // 20% of 18,628 is 3,725.60, 300 already given
    assert!(stdout.contains("Room left: 3\u{202F}425,60\u{A0}€, up to 2\u{202F}458,90\u{A0}€ credit"));
}

/// Test the monthly view and the reserve for the remaining months
#[test]
fn monthly_remaining_reserve() {
    let output = impotc(&[
        "monthly",
        "-r",
        "tests/data/records_2025.json",
        "--as-of",
        "2025-10-18",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("MONTHLY VIEW (2025)"));
    assert!(stdout.contains("January"));
    assert!(stdout.contains("December"));
    // 608.74 over October, November and December
    assert!(stdout.contains("3 left"));
    assert!(stdout.contains("202,91\u{A0}€"));
}

/// Test that validation reports records outside the year and exits with 1
#[test]
fn validate_outside_year() {
    let output = impotc(&["validate", "-r", "tests/data/records_2025.json", "--json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("\"issue_count\": 1"));
    assert!(stdout.contains("\"type\": \"OutsideTaxYear\""));
    assert!(stdout.contains("s-00"));
}

/// Test that validation reports unknown categories and negative amounts
#[test]
fn validate_unclassified() {
    let output = impotc(&["validate", "-r", "tests/data/unclassified.csv"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("2 issue(s) found"));
    assert!(stdout.contains("[UnrecognizedCategory] record r-01"));
    assert!(stdout.contains("[NegativeAmount] record d-01"));
}

/// Test that clean records pass validation
#[test]
fn validate_clean_records() {
    let output = impotc(&["validate", "-r", "tests/data/ledger.csv", "-y", "2025"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("No issues found"));
}

/// Test the CSV header schema output
#[test]
fn schema_csv_header() {
    let output = impotc(&["schema", "csv-header"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert_eq!(stdout.trim(), "kind,id,date,source,category,amount");
}

/// Test that the printed tax table can be read back with --table
#[test]
fn custom_tax_table() {
    let output = impotc(&["schema", "tax-table"]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let table_path = std::env::temp_dir().join("impotc-test-table.json");
    let table = String::from_utf8_lossy(&output.stdout).replace("\"0.11\"", "\"0.20\"");
    std::fs::write(&table_path, table).unwrap();

    let output = impotc(&[
        "summary",
        "-r",
        "tests/data/records_2025.json",
        "--table",
        table_path.to_str().unwrap(),
        "--json",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    // (18628 - 11294) * 0.20
    assert!(stdout.contains("\"gross_tax\": \"1466.80\""));
}

/// Test that the HTML report is written to the requested path
#[test]
fn html_report_written() {
    let report_path = std::env::temp_dir().join("impotc-test-report.html");
    let output = impotc(&[
        "html",
        "-r",
        "tests/data/records_2025.json",
        "-o",
        report_path.to_str().unwrap(),
    ]);

    assert!(output.status.success(), "Command failed: {:?}", output);
    let html = std::fs::read_to_string(&report_path).unwrap();
    assert!(html.contains("Income Tax Estimate 2025"));
    assert!(html.contains("id=\"report-data\""));
}
