use clap::Parser;
use surveydb::loader::load_csv;
use surveydb::SurveyStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "surveydb-load")]
#[command(about = "Import a survey CSV into the SurveyDB users table", long_about = None)]
struct Args {
    /// CSV file to import
    csv: String,

    /// SQLite database file to (re)create the users table in
    #[arg(long, default_value = "survey.db")]
    db_path: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "surveydb=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let store = SurveyStore::open(&args.db_path)?;
    let report = load_csv(&store, &args.csv)?;

    tracing::info!(
        "Import complete: {} rows inserted, {} skipped",
        report.inserted,
        report.skipped
    );
    Ok(())
}
