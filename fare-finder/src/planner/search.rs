//! Fare search across every configured airport pair.
//!
//! Runs one query per (departure, arrival) pair, converts and filters the
//! responses, and accumulates the surviving fares in pair order.

use std::fmt;

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::domain::Fare;
use crate::farfnd::{
    FareQuery, FarfndClient, FarfndError, MockFarfndClient, RoundTripFaresResponse,
    convert_response,
};

use super::config::SearchConfig;

/// Error that stops a search before any query is issued.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SearchError {
    /// No departure airports configured
    #[error("no departure airports specified")]
    NoDepartureAirports,

    /// Configuration values are inconsistent
    #[error("invalid search configuration: {0}")]
    InvalidConfig(String),
}

/// Trait for fetching round-trip fares for one airport pair.
///
/// This abstraction allows the search to be tested with mock data.
#[allow(async_fn_in_trait)]
pub trait FareProvider {
    async fn round_trip_fares(
        &self,
        query: &FareQuery,
    ) -> Result<RoundTripFaresResponse, FarfndError>;
}

impl FareProvider for FarfndClient {
    async fn round_trip_fares(
        &self,
        query: &FareQuery,
    ) -> Result<RoundTripFaresResponse, FarfndError> {
        FarfndClient::round_trip_fares(self, query).await
    }
}

impl FareProvider for MockFarfndClient {
    async fn round_trip_fares(
        &self,
        query: &FareQuery,
    ) -> Result<RoundTripFaresResponse, FarfndError> {
        MockFarfndClient::round_trip_fares(self, query).await
    }
}

/// An airport pair whose query failed. Other pairs are unaffected.
#[derive(Debug)]
pub struct PairFailure {
    pub query: FareQuery,
    pub error: FarfndError,
}

impl fmt::Display for PairFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.query.route_label(), self.error)
    }
}

/// Result of a fare search.
#[derive(Debug, Default)]
pub struct SearchOutcome {
    /// Fares within the price ceiling, in pair order then response order.
    pub fares: Vec<Fare>,

    /// Pairs that could not be searched.
    pub failures: Vec<PairFailure>,

    /// Number of requests made.
    pub queries_issued: usize,
}

/// Fare search over a provider.
pub struct FareSearch<'a, P: FareProvider> {
    provider: &'a P,
}

impl<'a, P: FareProvider> FareSearch<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// Search every airport pair in the configuration.
    ///
    /// Configuration errors abort before any request. A failed pair is
    /// recorded in `SearchOutcome::failures` and the remaining pairs are
    /// still searched. With `concurrency > 1` requests overlap, but results
    /// are still merged in pair order.
    pub async fn run(&self, config: &SearchConfig) -> Result<SearchOutcome, SearchError> {
        let queries = config.plan()?;
        let options = config.extract_options();
        let concurrency = config.concurrency.max(1);

        info!(
            pairs = queries.len(),
            concurrency, "searching round-trip fares"
        );

        let responses: Vec<_> = stream::iter(queries)
            .map(|query| async move {
                debug!(route = %query.route_label(), "querying fares");
                let result = self.provider.round_trip_fares(&query).await;
                (query, result)
            })
            .buffered(concurrency)
            .collect()
            .await;

        let mut outcome = SearchOutcome {
            queries_issued: responses.len(),
            ..SearchOutcome::default()
        };

        for (query, result) in responses {
            let fares = result.and_then(|response| {
                convert_response(&response, &options).map_err(|e| FarfndError::UnexpectedShape {
                    message: e.to_string(),
                    body: None,
                })
            });

            match fares {
                Ok(fares) => {
                    debug!(
                        route = %query.route_label(),
                        kept = fares.len(),
                        "fares within price ceiling"
                    );
                    outcome.fares.extend(fares);
                }
                Err(error) => {
                    warn!(
                        route = %query.route_label(),
                        status = ?error.status(),
                        unexpected_shape = error.is_unexpected_shape(),
                        %error,
                        "fare query failed"
                    );
                    outcome.failures.push(PairFailure { query, error });
                }
            }
        }

        info!(
            found = outcome.fares.len(),
            failed = outcome.failures.len(),
            "search finished"
        );

        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
