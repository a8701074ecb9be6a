//! Fare finder HTTP client.
//!
//! Issues `roundTripFares` requests, one per airport pair, and returns the
//! parsed response body.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

use crate::domain::IataCode;

use super::error::FarfndError;
use super::types::RoundTripFaresResponse;

/// Default base URL for the fare finder API.
const DEFAULT_BASE_URL: &str = "https://www.ryanair.com/api/farfnd/v4";

const DEFAULT_USER_AGENT: &str = concat!("fare-finder/", env!("CARGO_PKG_VERSION"));

/// Parameters for a single round-trip fare query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FareQuery {
    pub departure: IataCode,
    /// `None` searches every destination.
    pub arrival: Option<IataCode>,
    pub passengers: u8,
    pub outbound_from: NaiveDate,
    pub outbound_to: NaiveDate,
    pub inbound_from: NaiveDate,
    /// `None` leaves the upper inbound bound to the API.
    pub inbound_to: Option<NaiveDate>,
    pub duration_from: u32,
    pub duration_to: u32,
}

impl FareQuery {
    /// Query-string parameters, in the order they are sent.
    ///
    /// `arrivalAirportIataCode` and `inboundDepartureDateTo` are omitted
    /// entirely when unset rather than sent empty.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("departureAirportIataCode", self.departure.to_string())];

        if let Some(arrival) = self.arrival {
            params.push(("arrivalAirportIataCode", arrival.to_string()));
        }

        params.push(("adultPaxCount", self.passengers.to_string()));
        params.push(("outboundDepartureDateFrom", iso_date(self.outbound_from)));
        params.push(("outboundDepartureDateTo", iso_date(self.outbound_to)));
        params.push(("inboundDepartureDateFrom", iso_date(self.inbound_from)));
        if let Some(inbound_to) = self.inbound_to {
            params.push(("inboundDepartureDateTo", iso_date(inbound_to)));
        }
        params.push(("durationFrom", self.duration_from.to_string()));
        params.push(("durationTo", self.duration_to.to_string()));

        params
    }

    /// Short label for logs and failure reports, e.g. `TSF -> any`.
    pub fn route_label(&self) -> String {
        match self.arrival {
            Some(arrival) => format!("{} -> {}", self.departure, arrival),
            None => format!("{} -> any", self.departure),
        }
    }
}

fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Configuration for the fare finder client.
#[derive(Debug, Clone)]
pub struct FarfndConfig {
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Request timeout; `None` waits as long as the server does
    pub timeout: Option<Duration>,
    /// User-Agent header value
    pub user_agent: String,
}

impl FarfndConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for FarfndConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Fare finder API client.
#[derive(Debug, Clone)]
pub struct FarfndClient {
    http: reqwest::Client,
    base_url: String,
}

impl FarfndClient {
    /// Create a new client with the given configuration.
    pub fn new(config: FarfndConfig) -> Result<Self, FarfndError> {
        let mut headers = HeaderMap::new();

        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|_| FarfndError::NotConfigured("invalid user agent".to_string()))?;
        headers.insert(USER_AGENT, user_agent);

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Full URL of the round-trip fares endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}/roundTripFares", self.base_url)
    }

    /// Fetch round-trip fares for one airport pair.
    ///
    /// Makes exactly one request. Non-success statuses are returned as
    /// errors carrying the status code.
    pub async fn round_trip_fares(
        &self,
        query: &FareQuery,
    ) -> Result<RoundTripFaresResponse, FarfndError> {
        let response = self
            .http
            .get(self.endpoint())
            .query(&query.params())
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FarfndError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FarfndError::Status {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| FarfndError::UnexpectedShape {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}
