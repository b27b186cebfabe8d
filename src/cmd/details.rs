//! Details command - step by step view of the calculation

use super::{year_label, RecordsArgs};
use clap::Args;
use impotc::money::{format_eur, format_percent};
use impotc::records::TaxInput;
use impotc::tax::aggregate::{total_gross_income, totals_by_category};
use impotc::tax::{
    assess_donations, bracket_breakdown, bracket_tax, compute_tax_with, taxable_income, TaxTable,
};
use rust_decimal_macros::dec;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct DetailsCommand {
    #[command(flatten)]
    records: RecordsArgs,
}

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Gross")]
    gross: String,
}

#[derive(Tabled)]
struct IncomeRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Gross")]
    gross: String,
    #[tabled(rename = "Deduction")]
    deduction: String,
    #[tabled(rename = "Taxable")]
    taxable: String,
}

#[derive(Tabled)]
struct BracketRow {
    #[tabled(rename = "Bracket")]
    bracket: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Income")]
    amount: String,
    #[tabled(rename = "Tax")]
    tax: String,
}

impl DetailsCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let (input, table) = self.records.load()?;

        println!();
        println!("CALCULATION DETAILS ({})", year_label(input.year));

        if input.is_empty() {
            println!();
            println!("No records found");
            return Ok(());
        }

        print_categories(&input);
        print_incomes(&input, &table);
        print_brackets(&input, &table);
        print_result(&input, &table);
        Ok(())
    }
}

fn print_table<T: Tabled>(rows: Vec<T>, first_numeric: usize) {
    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(first_numeric..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);
}

fn print_categories(input: &TaxInput) {
    let rows: Vec<CategoryRow> = totals_by_category(&input.incomes)
        .into_iter()
        .map(|(category, gross)| CategoryRow {
            category: category.label().to_string(),
            gross: format_eur(gross),
        })
        .collect();

    println!();
    println!(
        "1. GROSS INCOME BY CATEGORY (total {})",
        format_eur(total_gross_income(&input.incomes))
    );
    print_table(rows, 1);
}

fn print_incomes(input: &TaxInput, table: &TaxTable) {
    let income = taxable_income(&input.incomes, table);
    let rows: Vec<IncomeRow> = input
        .incomes
        .iter()
        .zip(&income.assessments)
        .map(|(record, assessment)| IncomeRow {
            date: record.date.format("%Y-%m-%d").to_string(),
            source: record.source.clone(),
            category: assessment.category.label().to_string(),
            gross: format_eur(assessment.gross),
            deduction: format_eur(assessment.deduction),
            taxable: format_eur(assessment.taxable),
        })
        .collect();

    let salary = &table.salary_deduction;
    println!();
    println!("2. DEDUCTIONS");
    println!(
        "  Salary and unemployment: {} per record, min {}, max {}",
        format_percent(salary.rate * dec!(100)),
        format_eur(salary.floor),
        format_eur(salary.ceiling)
    );
    println!(
        "  Self-employed: BIC {} | BNC {}",
        format_percent(table.commercial_rate * dec!(100)),
        format_percent(table.professional_rate * dec!(100))
    );
    if !rows.is_empty() {
        print_table(rows, 3);
    }
    println!(
        "  Salary deduction: {} | Self-employed deduction: {} | Taxable income: {}",
        format_eur(income.salary_deduction),
        format_eur(income.self_employed_deduction),
        format_eur(income.taxable_income)
    );
}

fn print_brackets(input: &TaxInput, table: &TaxTable) {
    let taxable = taxable_income(&input.incomes, table).taxable_income;
    let rows: Vec<BracketRow> = bracket_breakdown(taxable, &table.brackets)
        .into_iter()
        .map(|slice| BracketRow {
            bracket: match slice.upper {
                Some(upper) => format!("{} - {}", format_eur(slice.lower), format_eur(upper)),
                None => format!("over {}", format_eur(slice.lower)),
            },
            rate: format_percent(slice.rate * dec!(100)),
            amount: format_eur(slice.amount),
            tax: format_eur(slice.tax),
        })
        .collect();

    println!();
    println!("3. PROGRESSIVE SCALE");
    if rows.is_empty() {
        println!("  No taxable income");
    } else {
        print_table(rows, 1);
    }
    println!(
        "  Gross tax: {}",
        format_eur(bracket_tax(taxable, &table.brackets))
    );
}

fn print_result(input: &TaxInput, table: &TaxTable) {
    let result = compute_tax_with(table, &input.incomes, &input.donations);
    let donations = assess_donations(&input.donations, result.taxable_income, &table.donations);

    println!();
    println!("4. DONATION CREDIT");
    println!(
        "  Donations: {} | Ceiling ({} of taxable income): {}",
        format_eur(donations.total),
        format_percent(table.donations.income_cap_rate * dec!(100)),
        format_eur(donations.ceiling)
    );
    println!(
        "  Eligible: {} | Credit ({}): {}",
        format_eur(donations.eligible),
        format_percent(table.donations.credit_rate * dec!(100)),
        format_eur(donations.credit)
    );
    if donations.excess > rust_decimal::Decimal::ZERO {
        println!("  Not credited this year: {}", format_eur(donations.excess));
    }
    if donations.credit < donations.max_credit {
        println!(
            "  Room left: {}, up to {} credit",
            format_eur(donations.room),
            format_eur(donations.max_credit)
        );
    }

    println!();
    println!("5. NET TAX");
    println!(
        "  {} - {} = {}",
        format_eur(result.gross_tax),
        format_eur(result.donation_credit),
        format_eur(result.net_tax)
    );
    println!(
        "  Effective rate: {} | Monthly reserve: {}",
        format_percent(result.effective_rate_percent),
        format_eur(result.monthly_reserve)
    );
    println!();
}
