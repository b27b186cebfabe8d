//! Validate command - surface data quality issues without computing the tax

use super::{year_label, RecordsArgs};
use clap::Args;
use impotc::tax::{validate, TaxYear, Warning};
use serde::Serialize;

#[derive(Args, Debug)]
pub struct ValidateCommand {
    #[command(flatten)]
    records: RecordsArgs,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

/// JSON output structure
#[derive(Debug, Serialize)]
struct ValidationOutput<'a> {
    tax_year: String,
    issue_count: usize,
    issues: &'a [Warning],
}

impl ValidateCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        // Records outside the year are reported, not dropped
        let (input, year) = self.records.load_unscoped()?;
        let table = self.records.tax_table()?;
        let issues = validate(&input, year, &table);

        if self.json {
            self.print_json(&issues, year)?;
        } else {
            self.print_text(&issues, year);
        }

        // Exit with code 1 if issues found
        if !issues.is_empty() {
            std::process::exit(1);
        }
        Ok(())
    }

    fn print_text(&self, issues: &[Warning], year: Option<TaxYear>) {
        println!();
        println!("VALIDATION RESULTS ({})", year_label(year));
        println!();

        if issues.is_empty() {
            println!("\u{2713} No issues found.");
            return;
        }

        println!("\u{26A0} {} issue(s) found:", issues.len());
        println!();
        for (i, issue) in issues.iter().enumerate() {
            match issue.id() {
                Some(id) => println!("  {}. [{}] record {}", i + 1, issue.kind(), id),
                None => println!("  {}. [{}]", i + 1, issue.kind()),
            }
            println!("     {}", issue.message());
            println!();
        }
    }

    fn print_json(&self, issues: &[Warning], year: Option<TaxYear>) -> anyhow::Result<()> {
        let output = ValidationOutput {
            tax_year: year_label(year),
            issue_count: issues.len(),
            issues,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }
}
