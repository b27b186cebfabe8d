use super::france::DonationRule;
use crate::records::DonationRecord;
use rust_decimal::Decimal;

/// How much of the donations earn a credit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DonationAssessment {
    pub total: Decimal,
    /// Maximum donations eligible for the credit
    pub ceiling: Decimal,
    pub eligible: Decimal,
    /// Donations above the ceiling, lost for this period
    pub excess: Decimal,
    pub credit: Decimal,
    /// Further donations that would still earn a credit
    pub room: Decimal,
    /// Credit earned by donating up to the ceiling
    pub max_credit: Decimal,
}

pub fn assess_donations(
    donations: &[DonationRecord],
    taxable_income: Decimal,
    rule: &DonationRule,
) -> DonationAssessment {
    let total: Decimal = donations.iter().map(|d| d.amount).sum();
    let ceiling = taxable_income * rule.income_cap_rate;
    let eligible = total.min(ceiling);
    let credit = (eligible * rule.credit_rate).max(Decimal::ZERO);

    log::debug!(
        "Donations {} (ceiling {}), eligible {}, credit {}",
        total,
        ceiling,
        eligible,
        credit
    );

    DonationAssessment {
        total,
        ceiling,
        eligible,
        excess: (total - ceiling).max(Decimal::ZERO),
        credit,
        room: (ceiling - total.max(Decimal::ZERO)).max(Decimal::ZERO),
        max_credit: (ceiling * rule.credit_rate).max(Decimal::ZERO),
    }
}

/// Credit against gross tax for donations, capped at a share of taxable income
pub fn donation_credit(
    donations: &[DonationRecord],
    taxable_income: Decimal,
    rule: &DonationRule,
) -> Decimal {
    assess_donations(donations, taxable_income, rule).credit
}
