//! Monthly command - income month by month and how much to set aside

use super::RecordsArgs;
use chrono::{Local, NaiveDate};
use clap::Args;
use impotc::money::format_eur;
use impotc::tax::aggregate::{monthly_overview, months_remaining, remaining_reserve, total_gross_income};
use impotc::tax::{compute_tax_with, TaxYear};
use rust_decimal::Decimal;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct MonthlyCommand {
    #[command(flatten)]
    records: RecordsArgs,

    /// Date the remaining reserve is computed from (YYYY-MM-DD, default today)
    #[arg(long)]
    as_of: Option<NaiveDate>,
}

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Records")]
    count: usize,
    #[tabled(rename = "Gross")]
    total: String,
}

impl MonthlyCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let as_of = self.as_of.unwrap_or_else(|| Local::now().date_naive());
        let (input, table) = self.records.load()?;
        // Without an explicit year, show the year of the reference date
        let (input, year) = match input.year {
            Some(year) => (input, year),
            None => {
                let year = TaxYear::from_date(as_of);
                (input.for_year(year), year)
            }
        };

        let rows: Vec<MonthRow> = monthly_overview(&input.incomes, year)
            .into_iter()
            .map(|m| MonthRow {
                month: m.name.to_string(),
                count: m.count,
                total: if m.count == 0 { "-".to_string() } else { format_eur(m.total) },
            })
            .collect();

        println!();
        println!("MONTHLY VIEW ({})", year);
        println!();
        let rendered = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", rendered);

        let gross = total_gross_income(&input.incomes);
        let result = compute_tax_with(&table, &input.incomes, &input.donations);
        let months_left = months_remaining(as_of, year);

        println!();
        println!(
            "  Annual gross: {} | Average per month: {}",
            format_eur(gross),
            format_eur(gross / Decimal::from(12))
        );
        println!(
            "  Net tax: {} | Reserve per month: {}",
            format_eur(result.net_tax),
            format_eur(result.monthly_reserve)
        );
        if months_left > 0 {
            println!(
                "  Reserve per remaining month ({} left at {}): {}",
                months_left,
                as_of,
                format_eur(remaining_reserve(result.net_tax, as_of, year))
            );
        } else {
            println!("  Tax year {} is over at {}", year, as_of);
        }
        println!();
        Ok(())
    }
}
