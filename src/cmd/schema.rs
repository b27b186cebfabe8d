//! Schema command - print expected input formats

use clap::Args;
use impotc::records::TaxInput;
use impotc::tax::TaxTable;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for the records file
    JsonSchema,
    /// CSV header row with column names
    CsvHeader,
    /// CSV column descriptions
    CsvFields,
    /// Built-in tax table, as accepted by --table
    TaxTable,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => {
                let schema = schema_for!(TaxInput);
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
            SchemaFormat::CsvHeader => println!("{}", CSV_COLUMNS.join(",")),
            SchemaFormat::CsvFields => print_csv_fields(),
            SchemaFormat::TaxTable => {
                println!("{}", serde_json::to_string_pretty(&TaxTable::default())?)
            }
        }
        Ok(())
    }
}

fn print_csv_fields() {
    println!("CSV Input Format");
    println!("================");
    println!();
    for (name, required, description) in CSV_FIELD_DESCRIPTIONS {
        let req = if *required { "required" } else { "optional" };
        println!("{:10} ({:8})  {}", name, req, description);
    }
    println!();
    println!("Amounts are in euros. Incomes and donations share one file.");
}

const CSV_COLUMNS: &[&str] = &["kind", "id", "date", "source", "category", "amount"];

const CSV_FIELD_DESCRIPTIONS: &[(&str, bool, &str)] = &[
    ("kind", true, "income or donation"),
    ("id", true, "Unique identifier (per kind) for linking back to source data"),
    ("date", true, "Date received or given (YYYY-MM-DD)"),
    ("source", true, "Payer for incomes, receiving organization for donations"),
    (
        "category",
        false,
        "Income only: Salary, SelfEmployedCommercial (BIC), SelfEmployedProfessional (BNC), Unemployment",
    ),
    ("amount", true, "Gross amount in euros"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_columns_match_descriptions() {
        let described: Vec<_> = CSV_FIELD_DESCRIPTIONS.iter().map(|(name, _, _)| *name).collect();
        assert_eq!(described, CSV_COLUMNS);
    }

    #[test]
    fn json_schema_lists_record_collections() {
        let schema = serde_json::to_string(&schema_for!(TaxInput)).unwrap();
        assert!(schema.contains("incomes"));
        assert!(schema.contains("donations"));
        assert!(schema.contains("gross_amount"));
    }
}
