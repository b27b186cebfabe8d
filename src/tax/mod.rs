pub mod aggregate;
pub mod brackets;
pub mod deductions;
pub mod donations;
pub mod engine;
pub mod france;
pub mod warnings;

pub use brackets::{bracket_breakdown, bracket_tax, marginal_rate, BracketSlice};
pub use deductions::{taxable_income, IncomeAssessment, TaxableIncome};
pub use donations::{assess_donations, donation_credit, DonationAssessment};
pub use engine::{compute_tax, compute_tax_with, TaxComputationResult};
pub use france::{DonationRule, SalaryDeduction, TaxBracket, TaxTable, TaxYear};
pub use warnings::{validate, Warning};
