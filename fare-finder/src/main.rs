use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fare_finder::cli::Cli;
use fare_finder::farfnd::{FarfndClient, MockFarfndClient};
use fare_finder::planner::{
    FareProvider, FareSearch, SearchConfig, SearchError, SearchOutcome, rank_fares,
};
use fare_finder::report::{OutputFormat, Report};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fare_finder=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = cli.search_config()?;

    match config.plan() {
        Err(SearchError::NoDepartureAirports) => {
            print!("{}", Report::render_no_departures(cli.format)?);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
        Ok(queries) => tracing::debug!(pairs = queries.len(), "search planned"),
    }

    if cli.format == OutputFormat::Text {
        println!("Finding the cheapest round-trip flights...");
    }

    let outcome = match &cli.mock_data {
        Some(dir) => {
            tracing::info!(?dir, "using mock fare data");
            let mock = MockFarfndClient::from_dir(dir)?;
            search(&mock, &config).await?
        }
        None => {
            let client = FarfndClient::new(cli.client_config())?;
            search(&client, &config).await?
        }
    };

    let fares = rank_fares(outcome.fares, config.sort_by);
    let report = Report::new(&fares, &outcome.failures);
    print!("{}", report.render(cli.format)?);

    Ok(())
}

async fn search<P: FareProvider>(
    provider: &P,
    config: &SearchConfig,
) -> Result<SearchOutcome, SearchError> {
    FareSearch::new(provider).run(config).await
}
