use super::france::TaxBracket;
use rust_decimal::Decimal;

/// Portion of taxable income falling in one bracket
#[derive(Debug, Clone, PartialEq)]
pub struct BracketSlice {
    pub lower: Decimal,
    pub upper: Option<Decimal>,
    pub rate: Decimal,
    pub amount: Decimal,
    pub tax: Decimal,
}

/// Split taxable income across the brackets it reaches, lowest first
pub fn bracket_breakdown(taxable_income: Decimal, brackets: &[TaxBracket]) -> Vec<BracketSlice> {
    let mut slices = Vec::new();

    for bracket in brackets {
        if taxable_income <= bracket.lower {
            break;
        }
        let top = bracket
            .upper
            .map_or(taxable_income, |upper| taxable_income.min(upper));
        let amount = top - bracket.lower;
        let tax = amount * bracket.rate;
        log::debug!(
            "Bracket {}..{:?} @ {}: {} taxed {}",
            bracket.lower,
            bracket.upper,
            bracket.rate,
            amount,
            tax
        );
        slices.push(BracketSlice {
            lower: bracket.lower,
            upper: bracket.upper,
            rate: bracket.rate,
            amount,
            tax,
        });
    }

    slices
}

/// Progressive tax on taxable income: each euro at the rate of its own bracket
pub fn bracket_tax(taxable_income: Decimal, brackets: &[TaxBracket]) -> Decimal {
    bracket_breakdown(taxable_income, brackets)
        .iter()
        .map(|s| s.tax)
        .sum::<Decimal>()
        .max(Decimal::ZERO)
}

/// Rate of the bracket the last euro of taxable income falls into
pub fn marginal_rate(taxable_income: Decimal, brackets: &[TaxBracket]) -> Decimal {
    bracket_breakdown(taxable_income, brackets)
        .last()
        .map_or(Decimal::ZERO, |s| s.rate)
}
