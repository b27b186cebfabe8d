use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser, Debug)]
#[command(name = "impotc", version, about = "Estimate French income tax from income and donation records")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Income tax estimate: taxable income, tax, donation credit and monthly reserve
    Summary(cmd::summary::SummaryCommand),
    /// Step by step calculation: categories, deductions, brackets and credit
    Details(cmd::details::DetailsCommand),
    /// Income month by month and the reserve for the months left
    Monthly(cmd::monthly::MonthlyCommand),
    /// Report data quality issues (exits with 1 when any are found)
    Validate(cmd::validate::ValidateCommand),
    /// Print the expected input formats or the built-in tax table
    Schema(cmd::schema::SchemaCommand),
    /// Generate an HTML dashboard
    Html(cmd::html_report::HtmlCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Summary(summary) => summary.exec(),
        Command::Details(details) => details.exec(),
        Command::Monthly(monthly) => monthly.exec(),
        Command::Validate(validate) => validate.exec(),
        Command::Schema(schema) => schema.exec(),
        Command::Html(html) => html.exec(),
    }
}
