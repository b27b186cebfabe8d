//! fr-FR display of euro amounts and percentages

use rust_decimal::{Decimal, RoundingStrategy};

/// Thousands separator used by fr-FR (narrow no-break space)
const GROUP_SEPARATOR: char = '\u{202F}';
/// Space between an amount and its unit
const UNIT_SEPARATOR: char = '\u{A0}';

fn format_fr(value: Decimal, decimals: u32) -> String {
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.*}", decimals as usize, rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let mut grouped = String::new();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(c);
    }

    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{},{}", sign, grouped, frac_part)
    }
}

/// `1234.5` -> `1 234,50 €`
pub fn format_eur(amount: Decimal) -> String {
    format!("{}{}€", format_fr(amount, 2), UNIT_SEPARATOR)
}

/// Percentage already scaled to 100: `12.345` -> `12,35 %`
pub fn format_percent(percent: Decimal) -> String {
    format!("{}{}%", format_fr(percent, 2), GROUP_SEPARATOR)
}

/// Plain two-decimal amount for JSON and CSV output
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn euros_grouped_by_thousands() {
        assert_eq!(format_eur(dec!(1234.5)), "1\u{202F}234,50\u{A0}€");
        assert_eq!(format_eur(dec!(1234567.891)), "1\u{202F}234\u{202F}567,89\u{A0}€");
        assert_eq!(format_eur(dec!(999)), "999,00\u{A0}€");
    }

    #[test]
    fn euros_zero_and_negative() {
        assert_eq!(format_eur(Decimal::ZERO), "0,00\u{A0}€");
        assert_eq!(format_eur(dec!(-1500)), "-1\u{202F}500,00\u{A0}€");
        assert_eq!(format_eur(dec!(-0.001)), "0,00\u{A0}€");
    }

    #[test]
    fn euros_round_half_away_from_zero() {
        assert_eq!(format_eur(dec!(0.125)), "0,13\u{A0}€");
    }

    #[test]
    fn percentages() {
        assert_eq!(format_percent(dec!(12.345)), "12,35\u{202F}%");
        assert_eq!(format_percent(Decimal::ZERO), "0,00\u{202F}%");
    }

    #[test]
    fn plain_amounts() {
        assert_eq!(format_amount(dec!(2286.23)), "2286.23");
        assert_eq!(format_amount(dec!(340.5191666)), "340.52");
        assert_eq!(format_amount(dec!(7)), "7.00");
    }
}
