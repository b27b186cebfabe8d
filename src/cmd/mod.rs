pub mod details;
pub mod html_report;
pub mod monthly;
pub mod schema;
pub mod summary;
pub mod validate;

use clap::Args;
use impotc::records::{self, TaxInput};
use impotc::tax::{TaxTable, TaxYear};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

/// Options shared by every command that reads records
#[derive(Args, Debug)]
pub struct RecordsArgs {
    /// JSON or CSV file of income and donation records ("-" reads JSON from stdin)
    #[arg(short, long)]
    pub records: PathBuf,

    /// Tax year to report (calendar year, e.g. 2025). Defaults to the year in the input file
    #[arg(short, long)]
    pub year: Option<i32>,

    /// JSON tax table to use instead of the built-in 2024 scale
    #[arg(long)]
    pub table: Option<PathBuf>,
}

impl RecordsArgs {
    /// Records scoped to the requested tax year (if any), and the tax table
    pub fn load(&self) -> anyhow::Result<(TaxInput, TaxTable)> {
        let (input, year) = self.load_unscoped()?;
        let input = match year {
            Some(year) => input.for_year(year),
            None => input,
        };
        Ok((input, self.tax_table()?))
    }

    /// All records as read, and the tax year they should belong to
    pub fn load_unscoped(&self) -> anyhow::Result<(TaxInput, Option<TaxYear>)> {
        let input = read_records(&self.records)?;
        let year = self.year.map(TaxYear).or(input.year);
        Ok((input, year))
    }

    pub fn tax_table(&self) -> anyhow::Result<TaxTable> {
        match self.table {
            Some(ref path) => {
                let table = TaxTable::read_json(BufReader::new(File::open(path)?))?;
                log::info!("Using tax table from {}", path.display());
                Ok(table)
            }
            None => Ok(TaxTable::default()),
        }
    }
}

/// Read records from a JSON or CSV file (or JSON from stdin with "-")
pub fn read_records(path: &Path) -> anyhow::Result<TaxInput> {
    if path.as_os_str() == "-" {
        return read_from_stdin();
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);

    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => records::read_json(reader),
        // Default to CSV for .csv files and any other extension
        _ => records::read_csv(reader),
    }
}

fn read_from_stdin() -> anyhow::Result<TaxInput> {
    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin.lock());

    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    if buffer.is_empty() {
        anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
    }

    records::read_json(io::Cursor::new(buffer))
}

pub fn year_label(year: Option<TaxYear>) -> String {
    year.map_or("All Years".to_string(), |y| y.to_string())
}
