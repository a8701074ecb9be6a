//! Conversion from fare finder DTOs to domain types.
//!
//! This is where the reported price is normalized to a per-passenger figure
//! and where fares above the price ceiling are dropped.

use chrono::NaiveDate;

use crate::domain::{Airport, Fare, IataCode};

use super::types::{AirportDto, FareEntry, RoundTripFaresResponse};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// Failed to parse an airport code
    #[error("invalid IATA code: {0}")]
    InvalidIata(String),

    /// Failed to parse a departure date
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// Price was negative, NaN or infinite
    #[error("invalid price: {0}")]
    InvalidPrice(f64),

    /// Cannot normalize a price for zero passengers
    #[error("passenger count must be at least 1")]
    NoPassengers,
}

/// How to turn a reported fare into a `Fare`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractOptions {
    /// Number of adult passengers the query was made for.
    pub passengers: u8,

    /// Treat the reported price as the total for the whole party and divide
    /// it by `passengers`. When false the reported price is used as-is.
    pub price_is_total_for_party: bool,

    /// Per-passenger price ceiling. Fares above it are dropped.
    pub max_price: f64,
}

impl ExtractOptions {
    /// Per-passenger price for a reported price.
    pub fn normalize_price(&self, reported: f64) -> Result<f64, ConversionError> {
        if !reported.is_finite() || reported < 0.0 {
            return Err(ConversionError::InvalidPrice(reported));
        }
        if self.passengers == 0 {
            return Err(ConversionError::NoPassengers);
        }

        // Collapse -0.0 so equal prices compare equal.
        let reported = if reported == 0.0 { 0.0 } else { reported };

        if self.price_is_total_for_party {
            Ok(reported / f64::from(self.passengers))
        } else {
            Ok(reported)
        }
    }
}

/// Convert one fare entry.
///
/// Returns `Ok(None)` when the normalized price exceeds the ceiling. The
/// filter runs before any other field is parsed.
pub fn extract_fare(
    entry: &FareEntry,
    options: &ExtractOptions,
) -> Result<Option<Fare>, ConversionError> {
    let price = options.normalize_price(entry.summary.price.value)?;
    if price > options.max_price {
        return Ok(None);
    }

    let departure = convert_airport(&entry.outbound.departure_airport)?;
    // The inbound flight departs from the far end of the round trip.
    let arrival = convert_airport(&entry.inbound.departure_airport)?;

    let outbound_date = parse_departure_date(&entry.outbound.departure_date)?;
    let inbound_date = parse_departure_date(&entry.inbound.departure_date)?;

    Ok(Some(Fare::new(
        departure,
        arrival,
        price,
        outbound_date,
        inbound_date,
        entry.summary.trip_duration_days,
    )))
}

/// Convert every entry of a response, keeping response order.
///
/// Any malformed entry fails the whole response.
pub fn convert_response(
    response: &RoundTripFaresResponse,
    options: &ExtractOptions,
) -> Result<Vec<Fare>, ConversionError> {
    let mut fares = Vec::with_capacity(response.fares.len());

    for entry in &response.fares {
        if let Some(fare) = extract_fare(entry, options)? {
            fares.push(fare);
        }
    }

    Ok(fares)
}

fn convert_airport(dto: &AirportDto) -> Result<Airport, ConversionError> {
    let code = IataCode::parse(&dto.iata_code)
        .map_err(|_| ConversionError::InvalidIata(dto.iata_code.clone()))?;
    Ok(Airport::new(code, dto.name.clone()))
}

/// Parse the calendar date of a `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS` string.
fn parse_departure_date(s: &str) -> Result<NaiveDate, ConversionError> {
    let invalid = || ConversionError::InvalidDate(s.to_string());

    let (date, rest) = match s.split_once('T') {
        Some((date, time)) => (date, Some(time)),
        None => (s, None),
    };
    if rest.is_some_and(str::is_empty) {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| invalid())
}
