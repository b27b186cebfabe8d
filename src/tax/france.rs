use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// French tax year (calendar year, 1 January to 31 December)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
pub struct TaxYear(pub i32);

impl TaxYear {
    /// Create a tax year from a date
    pub fn from_date(date: NaiveDate) -> Self {
        TaxYear(date.year())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.0
    }
}

impl std::fmt::Display for TaxYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One marginal bracket of the progressive scale.
///
/// `lower` is inclusive, `upper` exclusive. `upper = None` marks the open top bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TaxBracket {
    #[schemars(with = "f64")]
    pub lower: Decimal,
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub upper: Option<Decimal>,
    #[schemars(with = "f64")]
    pub rate: Decimal,
}

impl TaxBracket {
    fn new(lower: Decimal, upper: Option<Decimal>, rate: Decimal) -> Self {
        TaxBracket { lower, upper, rate }
    }
}

/// Flat-rate deduction for salaries and unemployment benefits, clamped per record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SalaryDeduction {
    #[schemars(with = "f64")]
    pub rate: Decimal,
    #[schemars(with = "f64")]
    pub floor: Decimal,
    #[schemars(with = "f64")]
    pub ceiling: Decimal,
}

impl SalaryDeduction {
    /// Deduction for a single gross amount: `clamp(gross * rate, floor, ceiling)`
    pub fn apply(&self, gross: Decimal) -> Decimal {
        (gross * self.rate).max(self.floor).min(self.ceiling)
    }
}

/// Donation credit rule: a share of donations, capped relative to taxable income
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DonationRule {
    /// Share of taxable income above which donations earn no credit
    #[schemars(with = "f64")]
    pub income_cap_rate: Decimal,
    /// Share of eligible donations credited against tax
    #[schemars(with = "f64")]
    pub credit_rate: Decimal,
}

/// Immutable rate configuration for one scale of the income tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TaxTable {
    /// Brackets in ascending order of lower bound
    pub brackets: Vec<TaxBracket>,
    pub salary_deduction: SalaryDeduction,
    /// Flat deduction rate for commercial self-employment income (BIC)
    #[schemars(with = "f64")]
    pub commercial_rate: Decimal,
    /// Flat deduction rate for professional self-employment income (BNC)
    #[schemars(with = "f64")]
    pub professional_rate: Decimal,
    pub donations: DonationRule,
}

impl TaxTable {
    /// 2024 scale, also used as the estimate for 2025 income
    pub fn scale_2024() -> Self {
        TaxTable {
            brackets: vec![
                TaxBracket::new(dec!(0), Some(dec!(11294)), dec!(0)),
                TaxBracket::new(dec!(11294), Some(dec!(28797)), dec!(0.11)),
                TaxBracket::new(dec!(28797), Some(dec!(82341)), dec!(0.30)),
                TaxBracket::new(dec!(82341), Some(dec!(177106)), dec!(0.41)),
                TaxBracket::new(dec!(177106), None, dec!(0.45)),
            ],
            salary_deduction: SalaryDeduction {
                rate: dec!(0.10),
                floor: dec!(448),
                ceiling: dec!(13522),
            },
            commercial_rate: dec!(0.50),
            professional_rate: dec!(0.34),
            donations: DonationRule {
                income_cap_rate: dec!(0.20),
                credit_rate: dec!(0.66),
            },
        }
    }

    /// Read a table from JSON, rejecting scales that do not cover every income from 0 upwards
    pub fn read_json<R: Read>(reader: R) -> anyhow::Result<Self> {
        let table: TaxTable = serde_json::from_reader(reader)?;
        table.check()?;
        Ok(table)
    }

    fn check(&self) -> anyhow::Result<()> {
        if self.brackets.is_empty() {
            anyhow::bail!("tax table has no brackets");
        }
        let last = self.brackets.len() - 1;
        if self.brackets[0].lower != Decimal::ZERO {
            anyhow::bail!("first bracket starts at {}, not 0", self.brackets[0].lower);
        }
        if self.brackets[last].upper.is_some() {
            anyhow::bail!("last bracket must be unbounded");
        }
        for (i, bracket) in self.brackets.iter().enumerate() {
            match bracket.upper {
                Some(upper) if upper <= bracket.lower => {
                    anyhow::bail!("bracket {} has upper bound {} <= lower bound {}", i, upper, bracket.lower)
                }
                None if i != last => anyhow::bail!("only the last bracket may be unbounded"),
                _ => {}
            }
            if let Some(next) = self.brackets.get(i + 1) {
                if bracket.upper != Some(next.lower) {
                    anyhow::bail!("bracket {} does not end where bracket {} starts", i, i + 1);
                }
            }
        }
        Ok(())
    }
}

impl Default for TaxTable {
    fn default() -> Self {
        TaxTable::scale_2024()
    }
}
