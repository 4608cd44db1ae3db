//! Roster source for Rollcall.
//!
//! The roster is fetched once per session with a single `GET` to a fixed
//! endpoint. There is no retry: a failure disables picking until the next
//! start. A JSON file in the same format can stand in for the endpoint.

pub mod client;
pub mod config;
pub mod error;

pub use client::{RosterClient, failure_notice, load_roster_file};
pub use config::{ClientConfig, DEFAULT_ENDPOINT};
pub use error::{FetchError, FetchResult};
