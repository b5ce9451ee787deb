//! Core library for lunisol
//!
//! This crate implements the **Functional Core** of the lunisol
//! project: pure transformations over lunar-solar calendar data, with
//! zero I/O.
//!
//! - [`item`]: the solar/lunar correspondence record, its derived
//!   fields (weekday, leap-year flag, Julian day number), cross-field
//!   validation, and orderings over lunar dates with leap months
//! - [`envelope`]: decoding of service payloads (XML or JSON) into a
//!   typed response envelope, with the record invariants checked at
//!   the decode boundary
//! - [`request`]: outbound query construction and page math
//!
//! Everything here is deterministic and testable with fixture data —
//! no mocking required. Transports, runtimes, and output formatting
//! live in the `lunisol` binary crate (the Imperative Shell).

pub mod envelope;
pub mod error;
pub mod item;
pub mod request;

pub use error::Error;
