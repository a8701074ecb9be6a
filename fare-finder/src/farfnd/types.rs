//! Fare finder API response DTOs.
//!
//! These types map directly to the `roundTripFares` JSON response. Only the
//! fields the extractor reads are declared; serde ignores the rest.

use serde::Deserialize;

/// Response from `roundTripFares`.
#[derive(Debug, Clone, Deserialize)]
pub struct RoundTripFaresResponse {
    /// One entry per priced round trip.
    pub fares: Vec<FareEntry>,
}

/// A single round-trip fare.
#[derive(Debug, Clone, Deserialize)]
pub struct FareEntry {
    pub outbound: FlightDto,
    pub inbound: FlightDto,
    pub summary: SummaryDto,
}

/// One flight of the round trip.
///
/// For the inbound flight, `departure_airport` is the far end of the trip.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightDto {
    pub departure_airport: AirportDto,
    /// `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS`.
    pub departure_date: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirportDto {
    pub iata_code: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDto {
    pub price: PriceDto,
    pub trip_duration_days: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PriceDto {
    pub value: f64,
}
