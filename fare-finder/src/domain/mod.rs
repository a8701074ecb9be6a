//! Domain types for the fare finder.
//!
//! Types here are validated at construction time, so code that receives
//! them can trust their contents.

mod airport;
mod fare;

pub use airport::{IataCode, InvalidIataCode};
pub use fare::{Airport, Fare};
