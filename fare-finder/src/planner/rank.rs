//! Fare ordering for the final report.

use std::cmp::Ordering;

use crate::domain::Fare;

/// Field the final fare list is ordered by (ascending).
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SortKey {
    /// Keep the order fares were found in.
    None,
    /// Cheapest first.
    Price,
    /// Shortest trip first.
    TripLength,
}

impl SortKey {
    /// Comparator for this key, or `None` when the order is left alone.
    pub fn comparator(self) -> Option<fn(&Fare, &Fare) -> Ordering> {
        match self {
            SortKey::None => None,
            SortKey::Price => Some(by_price),
            SortKey::TripLength => Some(by_trip_length),
        }
    }
}

fn by_price(a: &Fare, b: &Fare) -> Ordering {
    price_key(a).total_cmp(&price_key(b))
}

/// `-0.0` and `0.0` are the same price.
fn price_key(fare: &Fare) -> f64 {
    let price = fare.price();
    if price == 0.0 { 0.0 } else { price }
}

fn by_trip_length(a: &Fare, b: &Fare) -> Ordering {
    a.trip_length_days().cmp(&b.trip_length_days())
}

/// Order fares by the given key.
///
/// The sort is stable: fares with equal keys keep their relative order, so
/// identical input always produces identical output.
pub fn rank_fares(mut fares: Vec<Fare>, key: SortKey) -> Vec<Fare> {
    if let Some(compare) = key.comparator() {
        fares.sort_by(compare);
    }
    fares
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{Airport, IataCode};
    use chrono::NaiveDate;
    use proptest::prelude::*;

    /// Fares tagged with their input position via the outbound date.
    fn fares_strategy() -> impl Strategy<Value = Vec<Fare>> {
        prop::collection::vec((0u32..200, 0u32..15), 0..30).prop_map(|items| {
            let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
            items
                .into_iter()
                .enumerate()
                .map(|(i, (price, days))| {
                    let airport = Airport::new(IataCode::parse("TSF").unwrap(), "Treviso");
                    let tag = base + chrono::Duration::days(i as i64);
                    Fare::new(airport.clone(), airport, f64::from(price), tag, tag, days)
                })
                .collect()
        })
    }

    fn sort_key() -> impl Strategy<Value = SortKey> {
        prop_oneof![
            Just(SortKey::None),
            Just(SortKey::Price),
            Just(SortKey::TripLength)
        ]
    }

    proptest! {
        #[test]
        fn ranked_is_sorted_and_stable(fares in fares_strategy(), key in sort_key()) {
            let ranked = rank_fares(fares.clone(), key);
            prop_assert_eq!(ranked.len(), fares.len());

            match key.comparator() {
                None => prop_assert_eq!(&ranked, &fares),
                Some(compare) => {
                    for window in ranked.windows(2) {
                        let order = compare(&window[0], &window[1]);
                        prop_assert!(order != Ordering::Greater);
                        if order == Ordering::Equal {
                            // Input position is encoded in the outbound date.
                            prop_assert!(window[0].outbound_date() < window[1].outbound_date());
                        }
                    }
                }
            }
        }
    }
}
