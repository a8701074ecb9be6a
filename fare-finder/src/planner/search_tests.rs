//! Unit tests for the airport-pair fare search.

use super::*;
use crate::domain::IataCode;
use crate::planner::{SortKey, rank_fares};
use chrono::NaiveDate;
use std::sync::Mutex;

fn iata(s: &str) -> IataCode {
    IataCode::parse(s).unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn config(departures: &[&str]) -> SearchConfig {
    SearchConfig::new(
        departures.iter().map(|d| iata(d)).collect(),
        date("2024-11-15"),
        date("2024-11-17"),
    )
}

/// JSON body for one fare entry.
fn fare_json(dep: &str, arr: &str, price: f64, days: u32) -> String {
    format!(
        r#"{{
            "outbound": {{"departureAirport": {{"iataCode": "{dep}", "name": "{dep} Airport"}}, "departureDate": "2024-11-15T06:30:00"}},
            "inbound": {{"departureAirport": {{"iataCode": "{arr}", "name": "{arr} Airport"}}, "departureDate": "2024-11-17T21:10:00"}},
            "summary": {{"price": {{"value": {price}}}, "tripDurationDays": {days}}}
        }}"#
    )
}

fn body(entries: &[String]) -> String {
    format!(r#"{{"fares": [{}]}}"#, entries.join(","))
}

fn arrivals(fares: &[Fare]) -> Vec<&str> {
    fares.iter().map(|f| f.arrival().code.as_str()).collect()
}

#[tokio::test]
async fn total_price_within_ceiling_is_included() {
    // 100 total for 2 passengers = 50 each, ceiling 60
    let mock = MockFarfndClient::new().with_body(
        iata("TSF"),
        None,
        body(&[fare_json("TSF", "CRL", 100.0, 3)]),
    );
    let config = config(&["TSF"]).with_passengers(2).with_max_price(60.0);

    let outcome = FareSearch::new(&mock).run(&config).await.unwrap();

    assert_eq!(outcome.fares.len(), 1);
    assert_eq!(outcome.fares[0].price(), 50.0);
    assert_eq!(outcome.fares[0].trip_length_days(), 3);
    assert!(outcome.failures.is_empty());
}

#[tokio::test]
async fn total_price_above_ceiling_is_excluded() {
    // 140 total for 2 passengers = 70 each, ceiling 60
    let mock = MockFarfndClient::new().with_body(
        iata("TSF"),
        None,
        body(&[fare_json("TSF", "CRL", 140.0, 3)]),
    );
    let config = config(&["TSF"]).with_passengers(2).with_max_price(60.0);

    let outcome = FareSearch::new(&mock).run(&config).await.unwrap();

    assert!(outcome.fares.is_empty());
    assert!(outcome.failures.is_empty());
    assert_eq!(outcome.queries_issued, 1);
}

#[tokio::test]
async fn per_passenger_price_is_not_divided() {
    let mock = MockFarfndClient::new().with_body(
        iata("TSF"),
        None,
        body(&[
            fare_json("TSF", "CRL", 100.0, 3),
            fare_json("TSF", "STN", 55.0, 2),
        ]),
    );
    let config = config(&["TSF"])
        .with_passengers(2)
        .with_max_price(60.0)
        .with_price_is_total_for_party(false);

    let outcome = FareSearch::new(&mock).run(&config).await.unwrap();

    assert_eq!(arrivals(&outcome.fares), vec!["STN"]);
    assert_eq!(outcome.fares[0].price(), 55.0);
}

#[tokio::test]
async fn no_departures_issues_no_queries() {
    let mock = MockFarfndClient::new().with_body(iata("TSF"), None, body(&[]));

    let result = FareSearch::new(&mock).run(&config(&[])).await;

    assert!(matches!(result, Err(SearchError::NoDepartureAirports)));
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn invalid_config_issues_no_queries() {
    let mock = MockFarfndClient::new().with_body(iata("TSF"), None, body(&[]));
    let config = config(&["TSF"]).with_passengers(0);

    let result = FareSearch::new(&mock).run(&config).await;

    assert!(matches!(result, Err(SearchError::InvalidConfig(_))));
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn empty_arrivals_searches_any_destination() {
    // Only the "any destination" route is registered.
    let mock = MockFarfndClient::new().with_body(
        iata("TSF"),
        None,
        body(&[fare_json("TSF", "CRL", 40.0, 2)]),
    );

    let outcome = FareSearch::new(&mock).run(&config(&["TSF"])).await.unwrap();

    assert_eq!(mock.call_count(), 1);
    assert_eq!(arrivals(&outcome.fares), vec!["CRL"]);
}

#[tokio::test]
async fn results_follow_pair_order_then_response_order() {
    let mock = MockFarfndClient::new()
        .with_body(
            iata("TSF"),
            Some(iata("CRL")),
            body(&[
                fare_json("TSF", "CRL", 30.0, 2),
                fare_json("TSF", "CRL", 10.0, 3),
            ]),
        )
        .with_body(
            iata("TSF"),
            Some(iata("STN")),
            body(&[fare_json("TSF", "STN", 20.0, 2)]),
        )
        .with_body(
            iata("VCE"),
            Some(iata("CRL")),
            body(&[fare_json("VCE", "CRL", 5.0, 2)]),
        )
        .with_body(iata("VCE"), Some(iata("STN")), body(&[]));
    let config = config(&["TSF", "VCE"]).with_arrivals(vec![iata("CRL"), iata("STN")]);

    let outcome = FareSearch::new(&mock).run(&config).await.unwrap();

    assert_eq!(outcome.queries_issued, 4);
    let found: Vec<_> = outcome
        .fares
        .iter()
        .map(|f| (f.departure().code.as_str(), f.price()))
        .collect();
    assert_eq!(
        found,
        vec![("TSF", 15.0), ("TSF", 5.0), ("TSF", 10.0), ("VCE", 2.5)]
    );
}

#[tokio::test]
async fn sort_by_trip_length_across_departures() {
    let mock = MockFarfndClient::new()
        .with_body(
            iata("TSF"),
            None,
            body(&[fare_json("TSF", "CRL", 40.0, 5)]),
        )
        .with_body(
            iata("VCE"),
            None,
            body(&[fare_json("VCE", "STN", 40.0, 3)]),
        );
    let config = config(&["TSF", "VCE"]).with_sort(SortKey::TripLength);

    let outcome = FareSearch::new(&mock).run(&config).await.unwrap();
    let ranked = rank_fares(outcome.fares, config.sort_by);

    let days: Vec<_> = ranked.iter().map(Fare::trip_length_days).collect();
    assert_eq!(days, vec![3, 5]);
}

#[tokio::test]
async fn failed_pair_does_not_stop_others() {
    let mock = MockFarfndClient::new()
        .with_status(iata("TSF"), None, 500)
        .with_body(
            iata("VCE"),
            None,
            body(&[fare_json("VCE", "CRL", 40.0, 2)]),
        );

    let outcome = FareSearch::new(&mock)
        .run(&config(&["TSF", "VCE"]))
        .await
        .unwrap();

    assert_eq!(outcome.queries_issued, 2);
    assert_eq!(arrivals(&outcome.fares), vec!["CRL"]);
    assert_eq!(outcome.failures.len(), 1);

    let failure = &outcome.failures[0];
    assert_eq!(failure.query.departure, iata("TSF"));
    assert_eq!(failure.error.status(), Some(500));
    assert!(failure.to_string().starts_with("TSF -> any: API error 500"));
}

#[tokio::test]
async fn unexpected_shape_fails_only_that_pair() {
    let bad_entry = fare_json("VCE", "CRL", 10.0, 2).replace("2024-11-17T21:10:00", "tomorrow");

    let mock = MockFarfndClient::new()
        .with_body(iata("TSF"), None, r#"{"error": "Request failed"}"#)
        .with_body(
            iata("VCE"),
            None,
            body(&[fare_json("VCE", "STN", 20.0, 2), bad_entry]),
        )
        .with_body(
            iata("ZAG"),
            None,
            body(&[fare_json("ZAG", "CRL", 20.0, 2)]),
        );

    let outcome = FareSearch::new(&mock)
        .run(&config(&["TSF", "VCE", "ZAG"]))
        .await
        .unwrap();

    // Only ZAG survives; a bad entry discards its whole pair.
    assert_eq!(outcome.fares.len(), 1);
    assert_eq!(outcome.fares[0].departure().code, iata("ZAG"));

    assert_eq!(outcome.failures.len(), 2);
    assert!(outcome.failures.iter().all(|f| f.error.is_unexpected_shape()));
    assert_eq!(outcome.failures[0].query.departure, iata("TSF"));
    assert_eq!(outcome.failures[1].query.departure, iata("VCE"));
}

/// Provider whose earlier queries finish later, to exercise reordering.
struct SlowFirstProvider {
    mock: MockFarfndClient,
    completed: Mutex<Vec<IataCode>>,
}

impl FareProvider for SlowFirstProvider {
    async fn round_trip_fares(
        &self,
        query: &FareQuery,
    ) -> Result<RoundTripFaresResponse, FarfndError> {
        let delay = match query.departure.as_str() {
            "TSF" => 20,
            "VCE" => 10,
            _ => 0,
        };
        for _ in 0..delay {
            tokio::task::yield_now().await;
        }
        self.completed.lock().unwrap().push(query.departure);
        self.mock.round_trip_fares(query).await
    }
}

#[tokio::test]
async fn concurrent_search_keeps_pair_order() {
    let mock = MockFarfndClient::new()
        .with_body(
            iata("TSF"),
            None,
            body(&[fare_json("TSF", "CRL", 40.0, 2)]),
        )
        .with_body(
            iata("VCE"),
            None,
            body(&[fare_json("VCE", "STN", 30.0, 2)]),
        )
        .with_body(
            iata("ZAG"),
            None,
            body(&[fare_json("ZAG", "BGY", 20.0, 2)]),
        );
    let provider = SlowFirstProvider {
        mock,
        completed: Mutex::new(Vec::new()),
    };
    let config = config(&["TSF", "VCE", "ZAG"]).with_concurrency(3);

    let outcome = FareSearch::new(&provider).run(&config).await.unwrap();

    // Requests completed out of order...
    assert_eq!(
        *provider.completed.lock().unwrap(),
        vec![iata("ZAG"), iata("VCE"), iata("TSF")]
    );
    // ...but results are merged in pair order.
    assert_eq!(arrivals(&outcome.fares), vec!["CRL", "STN", "BGY"]);
}

#[tokio::test]
async fn every_fare_respects_the_ceiling() {
    let entries: Vec<String> = (0..20u32)
        .map(|i| fare_json("TSF", "CRL", f64::from(i) * 10.0, 2))
        .collect();
    let mock = MockFarfndClient::new().with_body(iata("TSF"), None, body(&entries));
    let config = config(&["TSF"]).with_max_price(45.0);

    let outcome = FareSearch::new(&mock).run(&config).await.unwrap();

    // 0..=90 total -> 0..=45 per passenger
    assert_eq!(outcome.fares.len(), 10);
    assert!(outcome.fares.iter().all(|f| f.price() <= 45.0));
}
