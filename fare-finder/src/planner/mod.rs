//! Fare search planning, execution and ranking.
//!
//! A `SearchConfig` is resolved once into one query per airport pair.
//! `FareSearch` runs those queries against a `FareProvider`, keeps the fares
//! under the price ceiling, and `rank_fares` orders them for the report.

mod config;
mod rank;
mod search;

pub use config::{DEFAULT_MAX_PRICE, DEFAULT_PASSENGERS, SearchConfig};
pub use rank::{SortKey, rank_fares};
pub use search::{FareProvider, FareSearch, PairFailure, SearchError, SearchOutcome};
