//! Totals and groupings of income records used by the dashboard views

use super::france::TaxYear;
use crate::records::{DonationRecord, IncomeCategory, IncomeRecord};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub fn total_gross_income(incomes: &[IncomeRecord]) -> Decimal {
    incomes.iter().map(|r| r.gross_amount).sum()
}

pub fn total_donations(donations: &[DonationRecord]) -> Decimal {
    donations.iter().map(|d| d.amount).sum()
}

/// Gross income per category.
///
/// The four known categories always appear, in declaration order, followed by
/// any unrecognized categories found in the data.
pub fn totals_by_category(incomes: &[IncomeRecord]) -> Vec<(IncomeCategory, Decimal)> {
    let mut totals: Vec<(IncomeCategory, Decimal)> = IncomeCategory::KNOWN
        .iter()
        .map(|c| (c.clone(), Decimal::ZERO))
        .collect();

    for income in incomes {
        match totals.iter_mut().find(|(c, _)| *c == income.category) {
            Some((_, total)) => *total += income.gross_amount,
            None => totals.push((income.category.clone(), income.gross_amount)),
        }
    }

    totals
}

/// Records grouped by month key (`YYYY-MM`), in chronological order
pub fn group_by_month(incomes: &[IncomeRecord]) -> BTreeMap<String, Vec<&IncomeRecord>> {
    let mut groups: BTreeMap<String, Vec<&IncomeRecord>> = BTreeMap::new();
    for income in incomes {
        let key = income.date.format("%Y-%m").to_string();
        groups.entry(key).or_default().push(income);
    }
    groups
}

/// One month of the yearly overview
#[derive(Debug, Clone, PartialEq)]
pub struct MonthSummary {
    pub key: String,
    pub name: &'static str,
    pub count: usize,
    pub total: Decimal,
}

/// Twelve months of `year`, empty months included
pub fn monthly_overview(incomes: &[IncomeRecord], year: TaxYear) -> Vec<MonthSummary> {
    let groups = group_by_month(incomes);

    MONTH_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let key = format!("{}-{:02}", year.0, i + 1);
            let records = groups.get(&key).map(Vec::as_slice).unwrap_or_default();
            MonthSummary {
                name: *name,
                count: records.len(),
                total: records.iter().map(|r| r.gross_amount).sum(),
                key,
            }
        })
        .collect()
}

/// Months of `year` left at `as_of`, the current month included
pub fn months_remaining(as_of: NaiveDate, year: TaxYear) -> u32 {
    match as_of.year().cmp(&year.0) {
        std::cmp::Ordering::Less => 12,
        std::cmp::Ordering::Equal => 12 - as_of.month0(),
        std::cmp::Ordering::Greater => 0,
    }
}

/// Net tax spread over the months left in the year
pub fn remaining_reserve(net_tax: Decimal, as_of: NaiveDate, year: TaxYear) -> Decimal {
    match months_remaining(as_of, year) {
        0 => Decimal::ZERO,
        months => net_tax / Decimal::from(months),
    }
}
