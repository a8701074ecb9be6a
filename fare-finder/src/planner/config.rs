//! Search configuration and its resolution into concrete queries.

use chrono::NaiveDate;

use crate::domain::IataCode;
use crate::farfnd::{ExtractOptions, FareQuery};

use super::rank::SortKey;
use super::search::SearchError;

/// Default number of adult passengers.
pub const DEFAULT_PASSENGERS: u8 = 2;

/// Default per-passenger price ceiling in EUR.
pub const DEFAULT_MAX_PRICE: f64 = 60.0;

/// Configuration parameters for a fare search.
///
/// Built once before the run and only read afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Airports to fly out of. Must not be empty.
    pub departure_airports: Vec<IataCode>,

    /// Airports to fly to. Empty means any destination.
    pub arrival_airports: Vec<IataCode>,

    /// Number of adult passengers.
    pub passengers: u8,

    /// Earliest outbound departure date.
    pub outbound_date_from: NaiveDate,

    /// Latest outbound departure date. Defaults to `outbound_date_from`.
    pub outbound_date_to: Option<NaiveDate>,

    /// Earliest inbound departure date.
    pub inbound_date_from: NaiveDate,

    /// Latest inbound departure date. See `default_inbound_date_to_from_from`.
    pub inbound_date_to: Option<NaiveDate>,

    /// Minimum trip length in days.
    pub duration_from: u32,

    /// Maximum trip length in days.
    pub duration_to: u32,

    /// Per-passenger round-trip price ceiling in EUR.
    pub max_roundtrip_price: f64,

    /// Ordering of the final report.
    pub sort_by: SortKey,

    /// Whether the API's price is the total for the party (divided by
    /// `passengers`) or already per passenger.
    pub price_is_total_for_party: bool,

    /// Whether an unset `inbound_date_to` falls back to `inbound_date_from`.
    /// When false the bound is left to the API.
    pub default_inbound_date_to_from_from: bool,

    /// Maximum number of queries in flight at once.
    pub concurrency: usize,
}

impl SearchConfig {
    /// Create a configuration with single-day date windows and default limits.
    pub fn new(
        departure_airports: Vec<IataCode>,
        outbound_date_from: NaiveDate,
        inbound_date_from: NaiveDate,
    ) -> Self {
        Self {
            departure_airports,
            arrival_airports: Vec::new(),
            passengers: DEFAULT_PASSENGERS,
            outbound_date_from,
            outbound_date_to: None,
            inbound_date_from,
            inbound_date_to: None,
            duration_from: 0,
            duration_to: 10,
            max_roundtrip_price: DEFAULT_MAX_PRICE,
            sort_by: SortKey::Price,
            price_is_total_for_party: true,
            default_inbound_date_to_from_from: true,
            concurrency: 1,
        }
    }

    pub fn with_arrivals(mut self, arrivals: Vec<IataCode>) -> Self {
        self.arrival_airports = arrivals;
        self
    }

    pub fn with_passengers(mut self, passengers: u8) -> Self {
        self.passengers = passengers;
        self
    }

    pub fn with_outbound_date_to(mut self, date: NaiveDate) -> Self {
        self.outbound_date_to = Some(date);
        self
    }

    pub fn with_inbound_date_to(mut self, date: NaiveDate) -> Self {
        self.inbound_date_to = Some(date);
        self
    }

    /// Set the trip length bounds in days (inclusive).
    pub fn with_duration(mut self, from: u32, to: u32) -> Self {
        self.duration_from = from;
        self.duration_to = to;
        self
    }

    pub fn with_max_price(mut self, max_price: f64) -> Self {
        self.max_roundtrip_price = max_price;
        self
    }

    pub fn with_sort(mut self, sort_by: SortKey) -> Self {
        self.sort_by = sort_by;
        self
    }

    pub fn with_price_is_total_for_party(mut self, total: bool) -> Self {
        self.price_is_total_for_party = total;
        self
    }

    pub fn with_default_inbound_date_to(mut self, enabled: bool) -> Self {
        self.default_inbound_date_to_from_from = enabled;
        self
    }

    pub fn with_concurrency(mut self, n: usize) -> Self {
        self.concurrency = n;
        self
    }

    /// Validate the configuration and resolve it into one query per
    /// (departure, arrival) pair.
    ///
    /// Queries are ordered by departure airport, then arrival airport. This
    /// is the only place date defaults are applied.
    pub fn plan(&self) -> Result<Vec<FareQuery>, SearchError> {
        if self.departure_airports.is_empty() {
            return Err(SearchError::NoDepartureAirports);
        }
        self.validate()?;

        let outbound_to = self.outbound_date_to.unwrap_or(self.outbound_date_from);
        let inbound_to = match self.inbound_date_to {
            Some(date) => Some(date),
            None if self.default_inbound_date_to_from_from => Some(self.inbound_date_from),
            None => None,
        };

        let arrivals: Vec<Option<IataCode>> = if self.arrival_airports.is_empty() {
            vec![None]
        } else {
            self.arrival_airports.iter().copied().map(Some).collect()
        };

        let mut queries = Vec::with_capacity(self.departure_airports.len() * arrivals.len());
        for &departure in &self.departure_airports {
            for &arrival in &arrivals {
                queries.push(FareQuery {
                    departure,
                    arrival,
                    passengers: self.passengers,
                    outbound_from: self.outbound_date_from,
                    outbound_to,
                    inbound_from: self.inbound_date_from,
                    inbound_to,
                    duration_from: self.duration_from,
                    duration_to: self.duration_to,
                });
            }
        }

        Ok(queries)
    }

    /// Options for turning response entries into fares.
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            passengers: self.passengers,
            price_is_total_for_party: self.price_is_total_for_party,
            max_price: self.max_roundtrip_price,
        }
    }

    fn validate(&self) -> Result<(), SearchError> {
        let invalid = |msg: &str| Err(SearchError::InvalidConfig(msg.to_string()));

        if self.passengers == 0 {
            return invalid("passenger count must be at least 1");
        }
        if self.duration_from > self.duration_to {
            return invalid("minimum trip length is greater than maximum");
        }
        if self
            .outbound_date_to
            .is_some_and(|to| to < self.outbound_date_from)
        {
            return invalid("outbound date window ends before it starts");
        }
        if self
            .inbound_date_to
            .is_some_and(|to| to < self.inbound_date_from)
        {
            return invalid("inbound date window ends before it starts");
        }
        if !self.max_roundtrip_price.is_finite() || self.max_roundtrip_price < 0.0 {
            return invalid("maximum price must be a non-negative number");
        }

        Ok(())
    }
}
