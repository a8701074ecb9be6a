//! Round-trip fare finder.
//!
//! A command-line tool that answers: "where can we fly, there and back,
//! from one of these airports on these dates, under this price?"

pub mod cli;
pub mod domain;
pub mod farfnd;
pub mod planner;
pub mod report;
