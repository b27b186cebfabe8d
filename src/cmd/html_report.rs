//! HTML dashboard for the tax estimate
//!
//! Generates a self-contained HTML file with embedded CSS and the report data as JSON.

use super::{year_label, RecordsArgs};
use clap::Args;
use impotc::money::{format_amount, format_eur, format_percent};
use impotc::records::TaxInput;
use impotc::tax::aggregate::{monthly_overview, total_donations, total_gross_income, totals_by_category};
use impotc::tax::{bracket_breakdown, compute_tax_with, taxable_income, TaxTable, TaxYear};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::fmt::Write;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct HtmlCommand {
    #[command(flatten)]
    records: RecordsArgs,

    /// Output file path (default: opens in browser)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl HtmlCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let (input, table) = self.records.load()?;
        let html = generate(&input, &table);

        if let Some(ref output_path) = self.output {
            std::fs::write(output_path, &html)?;
            println!("HTML report written to: {}", output_path.display());
        } else {
            // Write to temp file and open in browser
            let temp_path = std::env::temp_dir().join("impotc-report.html");
            std::fs::write(&temp_path, &html)?;
            opener::open(&temp_path)?;
            println!("Opened HTML report in browser: {}", temp_path.display());
        }

        Ok(())
    }
}

/// Data structure embedded in the HTML as JSON
#[derive(Serialize)]
pub struct HtmlReportData {
    pub tax_year: String,
    pub summary: Summary,
    pub categories: Vec<CategoryTotal>,
    pub months: Vec<MonthTotal>,
    pub incomes: Vec<IncomeRow>,
}

#[derive(Serialize)]
pub struct Summary {
    pub gross_income: String,
    pub taxable_income: String,
    pub salary_deduction: String,
    pub self_employed_deduction: String,
    pub gross_tax: String,
    pub total_donations: String,
    pub donation_credit: String,
    pub net_tax: String,
    pub effective_rate_pct: String,
    pub monthly_reserve: String,
}

#[derive(Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub gross: String,
}

#[derive(Serialize)]
pub struct MonthTotal {
    pub month: String,
    pub count: usize,
    pub gross: String,
}

#[derive(Serialize)]
pub struct IncomeRow {
    pub date: String,
    pub source: String,
    pub category: String,
    pub gross: String,
    pub deduction: String,
    pub taxable: String,
}

/// Generate HTML report content
pub fn generate(input: &TaxInput, table: &TaxTable) -> String {
    let result = compute_tax_with(table, &input.incomes, &input.donations);
    let data = build_report_data(input, table);
    let json_data = serde_json::to_string(&data)
        .unwrap_or_else(|_| "{}".to_string())
        .replace('<', "\\u003c");

    let cards = [
        ("Gross income", format_eur(total_gross_income(&input.incomes)), ""),
        ("Taxable income", format_eur(result.taxable_income), ""),
        ("Net tax", format_eur(result.net_tax), "highlight"),
        ("Effective rate", format_percent(result.effective_rate_percent), ""),
        ("Set aside each month", format_eur(result.monthly_reserve), "highlight"),
        ("Donation credit", format_eur(result.donation_credit), ""),
    ];
    let mut cards_html = String::new();
    for (title, value, class) in cards {
        let _ = writeln!(
            cards_html,
            r#"            <div class="card {class}"><h3>{title}</h3><p class="value">{value}</p></div>"#
        );
    }

    let categories = totals_by_category(&input.incomes);
    let category_max = categories.iter().map(|(_, v)| *v).max().unwrap_or_default();
    let mut categories_html = String::new();
    for (category, gross) in &categories {
        let _ = writeln!(
            categories_html,
            r#"            <div class="bar-row"><span class="bar-label">{}</span><span class="bar" style="width: {}%"></span><span class="bar-value">{}</span></div>"#,
            escape(category.label()),
            bar_width(*gross, category_max),
            format_eur(*gross)
        );
    }

    let year = report_year(input);
    let months = monthly_overview(&input.incomes, year);
    let month_max = months.iter().map(|m| m.total).max().unwrap_or_default();
    let mut months_html = String::new();
    for month in &months {
        let _ = writeln!(
            months_html,
            r#"            <div class="bar-row"><span class="bar-label">{}</span><span class="bar" style="width: {}%"></span><span class="bar-value">{}</span></div>"#,
            month.name,
            bar_width(month.total, month_max),
            format_eur(month.total)
        );
    }

    let mut brackets_html = String::new();
    for slice in bracket_breakdown(result.taxable_income, &table.brackets) {
        let range = match slice.upper {
            Some(upper) => format!("{} - {}", format_eur(slice.lower), format_eur(upper)),
            None => format!("over {}", format_eur(slice.lower)),
        };
        let _ = writeln!(
            brackets_html,
            "                <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            range,
            format_percent(slice.rate * dec!(100)),
            format_eur(slice.amount),
            format_eur(slice.tax)
        );
    }

    let mut incomes_html = String::new();
    let assessments = taxable_income(&input.incomes, table).assessments;
    for (record, assessment) in input.incomes.iter().zip(&assessments) {
        let _ = writeln!(
            incomes_html,
            "                <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            record.date.format("%Y-%m-%d"),
            escape(&record.source),
            escape(assessment.category.label()),
            format_eur(assessment.gross),
            format_eur(assessment.deduction),
            format_eur(assessment.taxable)
        );
    }

    format!(
        r##"<!DOCTYPE html>
<html lang="fr">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Income Tax Estimate {title_year}</title>
    <style>
{css}
    </style>
</head>
<body>
    <header>
        <h1>Income Tax Estimate {title_year}</h1>
        <p>{income_count} income record(s), {donation_count} donation(s)</p>
    </header>

    <main>
        <section class="summary-cards">
{cards_html}        </section>

        <section>
            <h2>Gross income by category</h2>
{categories_html}        </section>

        <section>
            <h2>Monthly income ({month_year})</h2>
{months_html}        </section>

        <section>
            <h2>Progressive scale</h2>
            <table>
                <thead><tr><th>Bracket</th><th>Rate</th><th>Income</th><th>Tax</th></tr></thead>
                <tbody>
{brackets_html}                </tbody>
            </table>
            <p>Gross tax {gross_tax} - donation credit {credit} (donations {donations}) = net tax {net_tax}</p>
        </section>

        <section>
            <h2>Incomes</h2>
            <table>
                <thead><tr><th>Date</th><th>Source</th><th>Category</th><th>Gross</th><th>Deduction</th><th>Taxable</th></tr></thead>
                <tbody>
{incomes_html}                </tbody>
            </table>
        </section>
    </main>

    <script type="application/json" id="report-data">{json_data}</script>
</body>
</html>
"##,
        title_year = year_label(input.year),
        css = CSS,
        income_count = input.incomes.len(),
        donation_count = input.donations.len(),
        month_year = year,
        gross_tax = format_eur(result.gross_tax),
        credit = format_eur(result.donation_credit),
        donations = format_eur(total_donations(&input.donations)),
        net_tax = format_eur(result.net_tax),
    )
}

fn build_report_data(input: &TaxInput, table: &TaxTable) -> HtmlReportData {
    let result = compute_tax_with(table, &input.incomes, &input.donations);
    let income = taxable_income(&input.incomes, table);
    let year = report_year(input);

    HtmlReportData {
        tax_year: year_label(input.year),
        summary: Summary {
            gross_income: format_amount(total_gross_income(&input.incomes)),
            taxable_income: format_amount(result.taxable_income),
            salary_deduction: format_amount(result.salary_deduction),
            self_employed_deduction: format_amount(result.self_employed_deduction),
            gross_tax: format_amount(result.gross_tax),
            total_donations: format_amount(total_donations(&input.donations)),
            donation_credit: format_amount(result.donation_credit),
            net_tax: format_amount(result.net_tax),
            effective_rate_pct: format_amount(result.effective_rate_percent),
            monthly_reserve: format_amount(result.monthly_reserve),
        },
        categories: totals_by_category(&input.incomes)
            .into_iter()
            .map(|(category, gross)| CategoryTotal {
                category: category.name().to_string(),
                gross: format_amount(gross),
            })
            .collect(),
        months: monthly_overview(&input.incomes, year)
            .into_iter()
            .map(|m| MonthTotal {
                month: m.key,
                count: m.count,
                gross: format_amount(m.total),
            })
            .collect(),
        incomes: input
            .incomes
            .iter()
            .zip(income.assessments)
            .map(|(record, assessment)| IncomeRow {
                date: record.date.format("%Y-%m-%d").to_string(),
                source: record.source.clone(),
                category: assessment.category.label().to_string(),
                gross: format_amount(assessment.gross),
                deduction: format_amount(assessment.deduction),
                taxable: format_amount(assessment.taxable),
            })
            .collect(),
    }
}

/// Year shown by the monthly chart: the requested year, else the year of the first income
fn report_year(input: &TaxInput) -> TaxYear {
    input.year.unwrap_or_else(|| {
        input
            .incomes
            .first()
            .map_or(TaxYear::from_date(chrono::Local::now().date_naive()), |r| {
                TaxYear::from_date(r.date)
            })
    })
}

fn bar_width(value: Decimal, max: Decimal) -> Decimal {
    if max <= Decimal::ZERO || value <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (value / max * dec!(70)).round_dp(1)
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const CSS: &str = r#"        body { font-family: -apple-system, "Segoe UI", Roboto, sans-serif; margin: 0; background: #f5f6fa; color: #222; }
        header { background: #1f3a93; color: #fff; padding: 1.5rem 2rem; }
        header h1 { margin: 0 0 .25rem 0; }
        main { padding: 1.5rem 2rem; max-width: 1100px; }
        section { background: #fff; border-radius: 8px; padding: 1rem 1.5rem; margin-bottom: 1.5rem; box-shadow: 0 1px 3px rgba(0,0,0,.08); }
        .summary-cards { display: grid; grid-template-columns: repeat(auto-fit, minmax(160px, 1fr)); gap: 1rem; background: none; box-shadow: none; padding: 0; }
        .card { background: #fff; border-radius: 8px; padding: 1rem; box-shadow: 0 1px 3px rgba(0,0,0,.08); }
        .card h3 { margin: 0; font-size: .85rem; color: #666; font-weight: 500; }
        .card .value { margin: .5rem 0 0 0; font-size: 1.4rem; font-weight: 600; }
        .card.highlight .value { color: #1f3a93; }
        .bar-row { display: flex; align-items: center; margin: .35rem 0; }
        .bar-label { width: 170px; font-size: .9rem; }
        .bar { display: inline-block; height: 14px; background: #4a69bd; border-radius: 3px; margin-right: .5rem; }
        .bar-value { font-size: .9rem; color: #444; }
        table { border-collapse: collapse; width: 100%; font-size: .9rem; }
        th, td { padding: .4rem .6rem; border-bottom: 1px solid #eee; text-align: right; }
        th:first-child, td:first-child { text-align: left; }"#;

#[cfg(test)]
mod tests {
    use super::*;
    use impotc::records::{DonationRecord, IncomeCategory, IncomeRecord};
    use chrono::NaiveDate;

    fn input() -> TaxInput {
        TaxInput {
            year: Some(TaxYear(2025)),
            incomes: vec![IncomeRecord {
                id: "r1".to_string(),
                date: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
                source: "Dupont & <Fils>".to_string(),
                category: IncomeCategory::Salary,
                gross_amount: dec!(40000),
            }],
            donations: vec![DonationRecord {
                id: "d1".to_string(),
                date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
                organization: "Restos du Coeur".to_string(),
                amount: dec!(1000),
            }],
        }
    }

    #[test]
    fn report_contains_summary_and_escaped_sources() {
        let html = generate(&input(), &TaxTable::default());
        assert!(html.contains("Income Tax Estimate 2025"));
        assert!(html.contains("Dupont &amp; &lt;Fils&gt;"));
        assert!(!html.contains("<Fils>"));
        assert!(html.contains(&format_eur(dec!(3426.23))));
    }

    #[test]
    fn report_data_has_twelve_months() {
        let data = build_report_data(&input(), &TaxTable::default());
        assert_eq!(data.months.len(), 12);
        assert_eq!(data.months[2].month, "2025-03");
        assert_eq!(data.months[2].gross, "40000.00");
        assert_eq!(data.summary.net_tax, "3426.23");
        assert_eq!(data.incomes.len(), 1);
    }

    #[test]
    fn bar_width_scales_to_largest() {
        assert_eq!(bar_width(dec!(50), dec!(100)), dec!(35));
        assert_eq!(bar_width(Decimal::ZERO, dec!(100)), Decimal::ZERO);
        assert_eq!(bar_width(dec!(10), Decimal::ZERO), Decimal::ZERO);
    }
}
