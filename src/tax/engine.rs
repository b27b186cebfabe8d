use super::brackets::{bracket_tax, marginal_rate};
use super::deductions::taxable_income;
use super::donations::donation_credit;
use super::france::TaxTable;
use crate::records::{DonationRecord, IncomeRecord};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Income tax estimate for one set of records
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaxComputationResult {
    pub taxable_income: Decimal,
    pub gross_tax: Decimal,
    pub donation_credit: Decimal,
    pub net_tax: Decimal,
    pub effective_rate_percent: Decimal,
    /// Net tax spread evenly over twelve months
    pub monthly_reserve: Decimal,
    pub salary_deduction: Decimal,
    pub self_employed_deduction: Decimal,
    /// Rate of the highest bracket reached
    pub marginal_rate: Decimal,
}

/// Compute the income tax estimate with the built-in scale
pub fn compute_tax(incomes: &[IncomeRecord], donations: &[DonationRecord]) -> TaxComputationResult {
    compute_tax_with(&TaxTable::default(), incomes, donations)
}

/// Compute the income tax estimate with the given scale
pub fn compute_tax_with(
    table: &TaxTable,
    incomes: &[IncomeRecord],
    donations: &[DonationRecord],
) -> TaxComputationResult {
    let income = taxable_income(incomes, table);
    let gross_tax = bracket_tax(income.taxable_income, &table.brackets);
    let donation_credit = donation_credit(donations, income.taxable_income, &table.donations);
    let net_tax = (gross_tax - donation_credit).max(Decimal::ZERO);

    let effective_rate_percent = if income.taxable_income > Decimal::ZERO {
        net_tax / income.taxable_income * dec!(100)
    } else {
        Decimal::ZERO
    };

    log::debug!(
        "Taxable {}, gross tax {}, credit {}, net tax {}",
        income.taxable_income,
        gross_tax,
        donation_credit,
        net_tax
    );

    TaxComputationResult {
        taxable_income: income.taxable_income,
        gross_tax,
        donation_credit,
        net_tax,
        effective_rate_percent,
        monthly_reserve: net_tax / dec!(12),
        salary_deduction: income.salary_deduction,
        self_employed_deduction: income.self_employed_deduction,
        marginal_rate: marginal_rate(income.taxable_income, &table.brackets),
    }
}
