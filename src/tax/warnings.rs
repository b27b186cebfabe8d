use super::deductions::taxable_income;
use super::donations::assess_donations;
use super::france::{TaxTable, TaxYear};
use crate::records::TaxInput;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Data quality warnings; none of them stop the computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type")]
pub enum Warning {
    /// Income category is not one of the four known ones; taxed in full.
    UnrecognizedCategory { id: String, category: String },
    /// Negative amounts reduce totals instead of being rejected.
    NegativeAmount {
        id: String,
        #[schemars(with = "f64")]
        amount: Decimal,
    },
    /// Record dated outside the requested tax year.
    OutsideTaxYear {
        id: String,
        #[schemars(with = "String")]
        date: NaiveDate,
    },
    /// Donations above the ceiling earn no credit this year.
    DonationsAboveCeiling {
        #[schemars(with = "f64")]
        total: Decimal,
        #[schemars(with = "f64")]
        ceiling: Decimal,
    },
}

impl Warning {
    pub fn id(&self) -> Option<&str> {
        match self {
            Warning::UnrecognizedCategory { id, .. }
            | Warning::NegativeAmount { id, .. }
            | Warning::OutsideTaxYear { id, .. } => Some(id),
            Warning::DonationsAboveCeiling { .. } => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Warning::UnrecognizedCategory { .. } => "UnrecognizedCategory",
            Warning::NegativeAmount { .. } => "NegativeAmount",
            Warning::OutsideTaxYear { .. } => "OutsideTaxYear",
            Warning::DonationsAboveCeiling { .. } => "DonationsAboveCeiling",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Warning::UnrecognizedCategory { category, .. } => format!(
                "Unknown income category '{}'; the full amount is taxed with no deduction",
                category
            ),
            Warning::NegativeAmount { amount, .. } => {
                format!("Negative amount {:.2} reduces the totals", amount)
            }
            Warning::OutsideTaxYear { date, .. } => {
                format!("Dated {} which is outside the tax year", date)
            }
            Warning::DonationsAboveCeiling { total, ceiling } => format!(
                "Donations of {:.2} exceed the ceiling of {:.2}; the excess earns no credit",
                total, ceiling
            ),
        }
    }
}

/// Collect warnings for a set of records. With `year`, records dated outside it are flagged.
pub fn validate(input: &TaxInput, year: Option<TaxYear>, table: &TaxTable) -> Vec<Warning> {
    let mut warnings = Vec::new();

    for income in &input.incomes {
        if !income.category.is_recognized() {
            warnings.push(Warning::UnrecognizedCategory {
                id: income.id.clone(),
                category: income.category.name().to_string(),
            });
        }
        if income.gross_amount < Decimal::ZERO {
            warnings.push(Warning::NegativeAmount {
                id: income.id.clone(),
                amount: income.gross_amount,
            });
        }
        if let Some(year) = year.filter(|y| !y.contains(income.date)) {
            log::debug!("Income {} outside {}", income.id, year);
            warnings.push(Warning::OutsideTaxYear {
                id: income.id.clone(),
                date: income.date,
            });
        }
    }

    for donation in &input.donations {
        if donation.amount < Decimal::ZERO {
            warnings.push(Warning::NegativeAmount {
                id: donation.id.clone(),
                amount: donation.amount,
            });
        }
        if year.is_some_and(|y| !y.contains(donation.date)) {
            warnings.push(Warning::OutsideTaxYear {
                id: donation.id.clone(),
                date: donation.date,
            });
        }
    }

    // The ceiling is measured against the year's own income
    let scoped = match year {
        Some(year) => input.clone().for_year(year),
        None => input.clone(),
    };
    let taxable = taxable_income(&scoped.incomes, table).taxable_income;
    let donations = assess_donations(&scoped.donations, taxable, &table.donations);
    if donations.excess > Decimal::ZERO {
        warnings.push(Warning::DonationsAboveCeiling {
            total: donations.total,
            ceiling: donations.ceiling,
        });
    }

    warnings
}
