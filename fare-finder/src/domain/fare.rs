//! Round-trip fare record.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use super::IataCode;

/// One side of a round trip: an airport code and its human-readable name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Airport {
    pub code: IataCode,
    pub name: String,
}

impl Airport {
    pub fn new(code: IataCode, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
        }
    }
}

impl fmt::Display for Airport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

/// A priced round trip between two airports.
///
/// The price is per passenger, in EUR. Fields are private so a `Fare`
/// cannot change after extraction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fare {
    departure: Airport,
    arrival: Airport,
    price: f64,
    outbound_date: NaiveDate,
    inbound_date: NaiveDate,
    trip_length_days: u32,
}

impl Fare {
    pub fn new(
        departure: Airport,
        arrival: Airport,
        price: f64,
        outbound_date: NaiveDate,
        inbound_date: NaiveDate,
        trip_length_days: u32,
    ) -> Self {
        Self {
            departure,
            arrival,
            price,
            outbound_date,
            inbound_date,
            trip_length_days,
        }
    }

    pub fn departure(&self) -> &Airport {
        &self.departure
    }

    /// The far end of the trip (where the inbound flight departs from).
    pub fn arrival(&self) -> &Airport {
        &self.arrival
    }

    /// Price per passenger in EUR.
    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn outbound_date(&self) -> NaiveDate {
        self.outbound_date
    }

    pub fn inbound_date(&self) -> NaiveDate {
        self.inbound_date
    }

    pub fn trip_length_days(&self) -> u32 {
        self.trip_length_days
    }
}

impl fmt::Display for Fare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} <<-->> {} on {} and back on {} ({} days) for {:.2} EUR",
            self.departure,
            self.arrival,
            self.outbound_date,
            self.inbound_date,
            self.trip_length_days,
            self.price
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fare() -> Fare {
        Fare::new(
            Airport::new(IataCode::parse("TSF").unwrap(), "Venice Treviso"),
            Airport::new(IataCode::parse("CRL").unwrap(), "Brussels Charleroi"),
            49.99,
            NaiveDate::from_ymd_opt(2024, 11, 15).unwrap(),
            NaiveDate::from_ymd_opt(2024, 11, 17).unwrap(),
            2,
        )
    }

    #[test]
    fn display_line() {
        assert_eq!(
            fare().to_string(),
            "Venice Treviso (TSF) <<-->> Brussels Charleroi (CRL) on 2024-11-15 \
             and back on 2024-11-17 (2 days) for 49.99 EUR"
        );
    }

    #[test]
    fn accessors() {
        let fare = fare();
        assert_eq!(fare.departure().code.as_str(), "TSF");
        assert_eq!(fare.arrival().name, "Brussels Charleroi");
        assert_eq!(fare.price(), 49.99);
        assert_eq!(fare.trip_length_days(), 2);
    }

    #[test]
    fn serializes_to_json() {
        let json = serde_json::to_value(fare()).unwrap();
        assert_eq!(json["departure"]["code"], "TSF");
        assert_eq!(json["arrival"]["name"], "Brussels Charleroi");
        assert_eq!(json["outbound_date"], "2024-11-15");
        assert_eq!(json["trip_length_days"], 2);
    }
}
