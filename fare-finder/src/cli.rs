//! Command-line interface.
//!
//! Every flag maps onto a `SearchConfig` or `FarfndConfig` field. Defaults
//! search the north-east Italy / Croatia airports for 2 passengers.

use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;
use clap::Parser;

use crate::domain::{IataCode, InvalidIataCode};
use crate::farfnd::FarfndConfig;
use crate::planner::{DEFAULT_MAX_PRICE, DEFAULT_PASSENGERS, SearchConfig, SortKey};
use crate::report::OutputFormat;

// LJU Ljubljana, TSF Treviso, VCE Venice Marco Polo, ZAG Zagreb, RJK Rijeka,
// TRS Trieste, VIE Vienna, BUD Budapest
const DEFAULT_DEPARTURES: [&str; 5] = ["TSF", "VCE", "ZAG", "RJK", "TRS"];

/// Find cheap round-trip fares from a set of airports.
#[derive(Debug, Parser)]
#[command(name = "fare-finder", version)]
pub struct Cli {
    /// Departure airports (IATA codes, comma separated)
    #[arg(
        long = "from",
        value_delimiter = ',',
        num_args = 0..,
        default_values = DEFAULT_DEPARTURES
    )]
    pub departures: Vec<String>,

    /// Arrival airports (IATA codes, comma separated); empty searches anywhere
    #[arg(long = "to", value_delimiter = ',', num_args = 0..)]
    pub arrivals: Vec<String>,

    /// Number of adult passengers
    #[arg(long, default_value_t = DEFAULT_PASSENGERS)]
    pub passengers: u8,

    /// Earliest outbound date (YYYY-MM-DD)
    #[arg(long)]
    pub outbound_from: NaiveDate,

    /// Latest outbound date (defaults to --outbound-from)
    #[arg(long)]
    pub outbound_to: Option<NaiveDate>,

    /// Earliest inbound date (YYYY-MM-DD)
    #[arg(long)]
    pub inbound_from: NaiveDate,

    /// Latest inbound date (defaults to --inbound-from unless --no-inbound-default)
    #[arg(long)]
    pub inbound_to: Option<NaiveDate>,

    /// Minimum trip length in days
    #[arg(long, default_value_t = 0)]
    pub min_days: u32,

    /// Maximum trip length in days
    #[arg(long, default_value_t = 10)]
    pub max_days: u32,

    /// Maximum round-trip price per passenger (EUR)
    #[arg(long, default_value_t = DEFAULT_MAX_PRICE)]
    pub max_price: f64,

    /// Order of the results
    #[arg(long, value_enum, default_value_t = SortKey::Price)]
    pub sort: SortKey,

    /// Treat the API price as per passenger instead of a total for the party
    #[arg(long)]
    pub price_per_passenger: bool,

    /// Leave the inbound upper date bound to the API when --inbound-to is unset
    #[arg(long)]
    pub no_inbound_default: bool,

    /// Number of airport pairs queried at once
    #[arg(long, default_value_t = 1)]
    pub concurrency: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Override the API base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Request timeout in seconds (no timeout by default)
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Override the User-Agent header sent to the API
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Serve responses from `{DEP}.json` / `{DEP}-{ARR}.json` files instead of the API
    #[arg(long)]
    pub mock_data: Option<PathBuf>,
}

impl Cli {
    /// Build the search configuration from the parsed flags.
    pub fn search_config(&self) -> Result<SearchConfig, InvalidIataCode> {
        let mut config = SearchConfig::new(
            parse_airports(&self.departures)?,
            self.outbound_from,
            self.inbound_from,
        )
        .with_arrivals(parse_airports(&self.arrivals)?)
        .with_passengers(self.passengers)
        .with_duration(self.min_days, self.max_days)
        .with_max_price(self.max_price)
        .with_sort(self.sort)
        .with_price_is_total_for_party(!self.price_per_passenger)
        .with_default_inbound_date_to(!self.no_inbound_default)
        .with_concurrency(self.concurrency);

        config.outbound_date_to = self.outbound_to;
        config.inbound_date_to = self.inbound_to;

        Ok(config)
    }

    /// Build the API client configuration from the parsed flags.
    pub fn client_config(&self) -> FarfndConfig {
        let mut config = FarfndConfig::new();
        if let Some(url) = &self.base_url {
            config = config.with_base_url(url);
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if let Some(user_agent) = &self.user_agent {
            config = config.with_user_agent(user_agent);
        }
        config
    }
}

/// Parse airport codes, ignoring blank entries and accepting lowercase.
fn parse_airports(codes: &[String]) -> Result<Vec<IataCode>, InvalidIataCode> {
    codes
        .iter()
        .map(|code| code.trim())
        .filter(|code| !code.is_empty())
        .map(|code| IataCode::parse(&code.to_ascii_uppercase()))
        .collect()
}
