use crate::tax::TaxYear;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("duplicate income id: {0}")]
    DuplicateIncomeId(String),
    #[error("duplicate donation id: {0}")]
    DuplicateDonationId(String),
    #[error("invalid date '{date}' for record {id}")]
    InvalidDate { id: String, date: String },
    #[error("unknown record kind '{kind}' for record {id} (expected income or donation)")]
    UnknownKind { id: String, kind: String },
    #[error("amount {amount} for record {id} is outside +/-{}", MAX_AMOUNT)]
    AmountOutOfRange { id: String, amount: Decimal },
}

/// Largest absolute amount a record may carry, so that totals cannot overflow
pub const MAX_AMOUNT: Decimal = dec!(1000000000000000);

/// Income classification, each with its own flat-rate deduction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IncomeCategory {
    /// Salaries and wages
    Salary,
    /// Micro-enterprise commercial income (BIC)
    SelfEmployedCommercial,
    /// Micro-enterprise professional income (BNC)
    SelfEmployedProfessional,
    /// Unemployment benefits, taxed like salaries
    Unemployment,
    /// Anything else found in the data; taxed in full with no deduction
    Unrecognized(String),
}

impl IncomeCategory {
    pub const KNOWN: [IncomeCategory; 4] = [
        IncomeCategory::Salary,
        IncomeCategory::SelfEmployedCommercial,
        IncomeCategory::SelfEmployedProfessional,
        IncomeCategory::Unemployment,
    ];

    pub fn parse(s: &str) -> IncomeCategory {
        match s.trim().to_lowercase().as_str() {
            "salary" | "salaire" => IncomeCategory::Salary,
            "selfemployedcommercial" | "self_employed_commercial" | "bic"
            | "auto_entrepreneur_bic" => IncomeCategory::SelfEmployedCommercial,
            "selfemployedprofessional" | "self_employed_professional" | "bnc"
            | "auto_entrepreneur_bnc" => IncomeCategory::SelfEmployedProfessional,
            "unemployment" | "chomage" | "chômage" => IncomeCategory::Unemployment,
            _ => IncomeCategory::Unrecognized(s.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            IncomeCategory::Salary => "Salary",
            IncomeCategory::SelfEmployedCommercial => "SelfEmployedCommercial",
            IncomeCategory::SelfEmployedProfessional => "SelfEmployedProfessional",
            IncomeCategory::Unemployment => "Unemployment",
            IncomeCategory::Unrecognized(raw) => raw,
        }
    }

    /// Human readable label used in reports
    pub fn label(&self) -> &str {
        match self {
            IncomeCategory::Salary => "Salary",
            IncomeCategory::SelfEmployedCommercial => "Self-employed (BIC)",
            IncomeCategory::SelfEmployedProfessional => "Self-employed (BNC)",
            IncomeCategory::Unemployment => "Unemployment",
            IncomeCategory::Unrecognized(_) => "Unrecognized",
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, IncomeCategory::Unrecognized(_))
    }
}

impl From<String> for IncomeCategory {
    fn from(s: String) -> Self {
        IncomeCategory::parse(&s)
    }
}

impl From<IncomeCategory> for String {
    fn from(category: IncomeCategory) -> Self {
        category.name().to_string()
    }
}

impl std::fmt::Display for IncomeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single income receipt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct IncomeRecord {
    /// Unique identifier for linking back to source data
    pub id: String,
    /// Date the income was received (YYYY-MM-DD)
    #[schemars(with = "String")]
    pub date: NaiveDate,
    /// Payer or organization
    pub source: String,
    /// Salary, SelfEmployedCommercial, SelfEmployedProfessional or Unemployment
    #[schemars(with = "String")]
    pub category: IncomeCategory,
    /// Gross amount in euros
    #[schemars(with = "f64")]
    pub gross_amount: Decimal,
}

/// A charitable donation eligible for the donation credit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DonationRecord {
    /// Unique identifier for linking back to source data
    pub id: String,
    /// Date of the donation (YYYY-MM-DD)
    #[schemars(with = "String")]
    pub date: NaiveDate,
    /// Receiving organization
    pub organization: String,
    /// Amount given in euros
    #[schemars(with = "f64")]
    pub amount: Decimal,
}

/// Unified input format: a snapshot of income and donation records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TaxInput {
    /// Tax year the records belong to (calendar year)
    #[serde(default)]
    pub year: Option<TaxYear>,
    #[serde(default)]
    pub incomes: Vec<IncomeRecord>,
    #[serde(default)]
    pub donations: Vec<DonationRecord>,
}

impl TaxInput {
    /// Keep only records dated inside `year`
    pub fn for_year(self, year: TaxYear) -> TaxInput {
        TaxInput {
            year: Some(year),
            incomes: self
                .incomes
                .into_iter()
                .filter(|r| year.contains(r.date))
                .collect(),
            donations: self
                .donations
                .into_iter()
                .filter(|r| year.contains(r.date))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.incomes.is_empty() && self.donations.is_empty()
    }

    fn check_unique_ids(&self) -> Result<(), RecordError> {
        let mut seen = HashSet::new();
        for income in &self.incomes {
            if !seen.insert(income.id.as_str()) {
                return Err(RecordError::DuplicateIncomeId(income.id.clone()));
            }
        }
        let mut seen = HashSet::new();
        for donation in &self.donations {
            if !seen.insert(donation.id.as_str()) {
                return Err(RecordError::DuplicateDonationId(donation.id.clone()));
            }
        }
        Ok(())
    }

    fn check_amounts(&self) -> Result<(), RecordError> {
        let amounts = self
            .incomes
            .iter()
            .map(|r| (&r.id, r.gross_amount))
            .chain(self.donations.iter().map(|r| (&r.id, r.amount)));
        for (id, amount) in amounts {
            if amount.abs() > MAX_AMOUNT {
                return Err(RecordError::AmountOutOfRange {
                    id: id.clone(),
                    amount,
                });
            }
        }
        Ok(())
    }

    fn sort_by_date(&mut self) {
        self.incomes.sort_by_key(|r| r.date);
        self.donations.sort_by_key(|r| r.date);
    }
}

/// CSV ledger row; incomes and donations share one file, told apart by `kind`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerRecord {
    pub kind: String,
    pub id: String,
    pub date: String,
    pub source: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}

fn parse_date(id: &str, s: &str) -> Result<NaiveDate, RecordError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| RecordError::InvalidDate {
        id: id.to_string(),
        date: s.to_string(),
    })
}

/// Read records from a CSV ledger
pub fn read_csv<R: Read>(reader: R) -> anyhow::Result<TaxInput> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut input = TaxInput::default();

    for row in rdr.deserialize::<LedgerRecord>() {
        let row = row?;
        let date = parse_date(&row.id, &row.date)?;
        match row.kind.to_lowercase().as_str() {
            "income" => input.incomes.push(IncomeRecord {
                id: row.id,
                date,
                source: row.source,
                category: IncomeCategory::parse(row.category.as_deref().unwrap_or_default()),
                gross_amount: row.amount,
            }),
            "donation" => input.donations.push(DonationRecord {
                id: row.id,
                date,
                organization: row.source,
                amount: row.amount,
            }),
            _ => {
                return Err(RecordError::UnknownKind {
                    id: row.id,
                    kind: row.kind,
                }
                .into())
            }
        }
    }

    input.check_unique_ids()?;
    input.check_amounts()?;
    input.sort_by_date();
    log::info!(
        "Read {} income and {} donation csv records",
        input.incomes.len(),
        input.donations.len()
    );
    Ok(input)
}

/// Read records from JSON
pub fn read_json<R: Read>(reader: R) -> anyhow::Result<TaxInput> {
    let mut input: TaxInput = serde_json::from_reader(reader)?;
    input.check_unique_ids()?;
    input.check_amounts()?;
    input.sort_by_date();
    log::info!(
        "Read {} income and {} donation json records",
        input.incomes.len(),
        input.donations.len()
    );
    Ok(input)
}
