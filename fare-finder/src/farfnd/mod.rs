//! Fare finder (`farfnd`) API client.
//!
//! This module provides an HTTP client for the airline's public round-trip
//! fare search, plus conversion of its responses into `Fare` records.
//!
//! Key characteristics of the API:
//! - One request covers one departure airport and either one arrival
//!   airport or every destination (arrival parameter omitted)
//! - Dates are plain `YYYY-MM-DD` calendar dates, no timezone
//! - The reported `summary.price` may be a total for the whole party

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{FareQuery, FarfndClient, FarfndConfig};
pub use convert::{ConversionError, ExtractOptions, convert_response, extract_fare};
pub use error::FarfndError;
pub use mock::MockFarfndClient;
pub use types::{AirportDto, FareEntry, FlightDto, PriceDto, RoundTripFaresResponse, SummaryDto};
