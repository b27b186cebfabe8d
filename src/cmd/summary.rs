//! Summary command - the income tax estimate and the figures it is built from

use super::{year_label, RecordsArgs};
use clap::Args;
use impotc::money::{format_amount, format_eur, format_percent};
use impotc::tax::aggregate::{total_donations, total_gross_income};
use impotc::tax::{compute_tax_with, TaxComputationResult};
use rust_decimal_macros::dec;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct SummaryCommand {
    #[command(flatten)]
    records: RecordsArgs,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

/// Summary data for JSON output
#[derive(Debug, Serialize)]
struct SummaryData {
    tax_year: String,
    income_count: usize,
    donation_count: usize,
    gross_income: String,
    salary_deduction: String,
    self_employed_deduction: String,
    taxable_income: String,
    gross_tax: String,
    marginal_rate_pct: String,
    total_donations: String,
    donation_credit: String,
    net_tax: String,
    effective_rate_pct: String,
    monthly_reserve: String,
}

impl SummaryCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let (input, table) = self.records.load()?;
        let result = compute_tax_with(&table, &input.incomes, &input.donations);

        let data = SummaryData {
            tax_year: year_label(input.year),
            income_count: input.incomes.len(),
            donation_count: input.donations.len(),
            gross_income: format_amount(total_gross_income(&input.incomes)),
            salary_deduction: format_amount(result.salary_deduction),
            self_employed_deduction: format_amount(result.self_employed_deduction),
            taxable_income: format_amount(result.taxable_income),
            gross_tax: format_amount(result.gross_tax),
            marginal_rate_pct: format!("{:.0}", result.marginal_rate * dec!(100)),
            total_donations: format_amount(total_donations(&input.donations)),
            donation_credit: format_amount(result.donation_credit),
            net_tax: format_amount(result.net_tax),
            effective_rate_pct: format_amount(result.effective_rate_percent),
            monthly_reserve: format_amount(result.monthly_reserve),
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&data)?);
        } else {
            print_summary(&data.tax_year, &input, &result);
        }
        Ok(())
    }
}

fn print_summary(year: &str, input: &impotc::records::TaxInput, result: &TaxComputationResult) {
    println!();
    println!("INCOME TAX ESTIMATE ({})", year);
    println!();

    println!("INCOME");
    println!(
        "  Records: {} | Gross: {}",
        input.incomes.len(),
        format_eur(total_gross_income(&input.incomes))
    );
    println!(
        "  Salary deduction: {} | Self-employed deduction: {}",
        format_eur(result.salary_deduction),
        format_eur(result.self_employed_deduction)
    );
    println!("  Taxable income: {}", format_eur(result.taxable_income));
    println!();

    println!("DONATIONS");
    println!(
        "  Donations: {} | Credit: {}",
        format_eur(total_donations(&input.donations)),
        format_eur(result.donation_credit)
    );
    println!();

    println!("TAX");
    println!(
        "  Gross tax: {} (marginal rate {})",
        format_eur(result.gross_tax),
        format_percent(result.marginal_rate * dec!(100))
    );
    println!("  Net tax: {}", format_eur(result.net_tax));
    println!("  Effective rate: {}", format_percent(result.effective_rate_percent));
    println!();

    println!("MONTHLY RESERVE: {}", format_eur(result.monthly_reserve));
    println!();
}
