use super::france::TaxTable;
use crate::records::{IncomeCategory, IncomeRecord};
use rust_decimal::Decimal;

/// Deduction and taxable portion of a single income record
#[derive(Debug, Clone, PartialEq)]
pub struct IncomeAssessment {
    pub id: String,
    pub category: IncomeCategory,
    pub gross: Decimal,
    pub deduction: Decimal,
    /// Never negative
    pub taxable: Decimal,
}

/// Taxable income after category deductions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaxableIncome {
    pub taxable_income: Decimal,
    /// Salary and unemployment deductions
    pub salary_deduction: Decimal,
    /// BIC and BNC deductions
    pub self_employed_deduction: Decimal,
    pub assessments: Vec<IncomeAssessment>,
}

/// Apply the flat-rate deduction of each record's category and sum the taxable portions
pub fn taxable_income(incomes: &[IncomeRecord], table: &TaxTable) -> TaxableIncome {
    let mut result = TaxableIncome::default();

    for income in incomes {
        let gross = income.gross_amount;
        let deduction = match &income.category {
            IncomeCategory::Salary | IncomeCategory::Unemployment => {
                let deduction = table.salary_deduction.apply(gross);
                result.salary_deduction += deduction;
                deduction
            }
            IncomeCategory::SelfEmployedCommercial => {
                let deduction = gross * table.commercial_rate;
                result.self_employed_deduction += deduction;
                deduction
            }
            IncomeCategory::SelfEmployedProfessional => {
                let deduction = gross * table.professional_rate;
                result.self_employed_deduction += deduction;
                deduction
            }
            IncomeCategory::Unrecognized(raw) => {
                log::warn!(
                    "Income {} has unrecognized category '{}', taxing the full {} with no deduction",
                    income.id,
                    raw,
                    gross
                );
                Decimal::ZERO
            }
        };

        // The salary floor can exceed a small gross amount
        let taxable = (gross - deduction).max(Decimal::ZERO);
        log::debug!(
            "Income {} ({}): gross {}, deduction {}, taxable {}",
            income.id,
            income.category,
            gross,
            deduction,
            taxable
        );

        result.taxable_income += taxable;
        result.assessments.push(IncomeAssessment {
            id: income.id.clone(),
            category: income.category.clone(),
            gross,
            deduction,
            taxable,
        });
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn income(category: IncomeCategory, gross: Decimal) -> IncomeRecord {
        IncomeRecord {
            id: "r".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            source: "ACME".to_string(),
            category,
            gross_amount: gross,
        }
    }

    fn assess(category: IncomeCategory, gross: Decimal) -> TaxableIncome {
        taxable_income(&[income(category, gross)], &TaxTable::default())
    }

    #[test]
    fn empty_incomes_are_zero() {
        let result = taxable_income(&[], &TaxTable::default());
        assert_eq!(result.taxable_income, Decimal::ZERO);
        assert_eq!(result.salary_deduction, Decimal::ZERO);
        assert_eq!(result.self_employed_deduction, Decimal::ZERO);
        assert!(result.assessments.is_empty());
    }

    #[test]
    fn salary_ten_percent_deduction() {
        let result = assess(IncomeCategory::Salary, dec!(5000));
        assert_eq!(result.salary_deduction, dec!(500));
        assert_eq!(result.taxable_income, dec!(4500));
    }

    #[test]
    fn salary_deduction_floor() {
        let result = assess(IncomeCategory::Salary, dec!(1000));
        assert_eq!(result.salary_deduction, dec!(448));
        assert_eq!(result.taxable_income, dec!(552));
    }

    #[test]
    fn salary_below_floor_is_never_negative() {
        let result = assess(IncomeCategory::Salary, dec!(100));
        assert_eq!(result.salary_deduction, dec!(448));
        assert_eq!(result.taxable_income, Decimal::ZERO);
        assert_eq!(result.assessments[0].taxable, Decimal::ZERO);
    }

    #[test]
    fn salary_deduction_ceiling() {
        let result = assess(IncomeCategory::Salary, dec!(200000));
        assert_eq!(result.salary_deduction, dec!(13522));
        assert_eq!(result.taxable_income, dec!(186478));
    }

    #[test]
    fn unemployment_taxed_like_salary() {
        let result = assess(IncomeCategory::Unemployment, dec!(5000));
        assert_eq!(result.salary_deduction, dec!(500));
        assert_eq!(result.self_employed_deduction, Decimal::ZERO);
        assert_eq!(result.taxable_income, dec!(4500));
    }

    #[test]
    fn commercial_income_halved() {
        let result = assess(IncomeCategory::SelfEmployedCommercial, dec!(10000));
        assert_eq!(result.self_employed_deduction, dec!(5000));
        assert_eq!(result.taxable_income, dec!(5000));
    }

    #[test]
    fn professional_income_deduction() {
        let result = assess(IncomeCategory::SelfEmployedProfessional, dec!(10000));
        assert_eq!(result.self_employed_deduction, dec!(3400));
        assert_eq!(result.taxable_income, dec!(6600));
    }

    #[test]
    fn unrecognized_category_taxed_in_full() {
        let result = assess(IncomeCategory::Unrecognized("Dividends".to_string()), dec!(1234));
        assert_eq!(result.taxable_income, dec!(1234));
        assert_eq!(result.salary_deduction, Decimal::ZERO);
        assert_eq!(result.self_employed_deduction, Decimal::ZERO);
        assert_eq!(result.assessments[0].deduction, Decimal::ZERO);
    }

    #[test]
    fn clamp_applies_per_record() {
        // Two 3,000 salaries: 448 floor twice, not 10% of 6,000 once
        let incomes = vec![
            income(IncomeCategory::Salary, dec!(3000)),
            income(IncomeCategory::Salary, dec!(3000)),
        ];
        let result = taxable_income(&incomes, &TaxTable::default());
        assert_eq!(result.salary_deduction, dec!(896));
        assert_eq!(result.taxable_income, dec!(5104));
    }

    #[test]
    fn negative_salary_taxable_floored_at_zero() {
        let result = assess(IncomeCategory::Salary, dec!(-1000));
        assert_eq!(result.salary_deduction, dec!(448));
        assert_eq!(result.assessments[0].taxable, Decimal::ZERO);
        assert_eq!(result.taxable_income, Decimal::ZERO);
    }

    #[test]
    fn negative_commercial_record_next_to_positive_one() {
        let incomes = vec![
            income(IncomeCategory::SelfEmployedCommercial, dec!(10000)),
            income(IncomeCategory::SelfEmployedCommercial, dec!(-4000)),
        ];
        let result = taxable_income(&incomes, &TaxTable::default());

        assert_eq!(result.assessments[1].deduction, dec!(-2000));
        assert_eq!(result.assessments[1].taxable, Decimal::ZERO);
        assert_eq!(result.self_employed_deduction, dec!(3000));
        assert_eq!(result.taxable_income, dec!(5000));
    }

    #[test]
    fn mixed_categories_accumulate_separately() {
        let incomes = vec![
            income(IncomeCategory::Salary, dec!(30000)),
            income(IncomeCategory::SelfEmployedCommercial, dec!(10000)),
            income(IncomeCategory::SelfEmployedProfessional, dec!(10000)),
        ];
        let result = taxable_income(&incomes, &TaxTable::default());
        assert_eq!(result.salary_deduction, dec!(3000));
        assert_eq!(result.self_employed_deduction, dec!(8400));
        assert_eq!(result.taxable_income, dec!(38600));
        assert_eq!(result.assessments.len(), 3);
    }
}
