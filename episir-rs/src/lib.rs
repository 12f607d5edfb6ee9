pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod observations;
pub mod presenter;
pub mod prelude;
pub mod solve;

pub use crate::error::{Error, Result};

/// Basic representation of time. This crate usually assumes time is measured
/// in days.
pub type Time = u32;

/// Base Real type used by this crate. Uses an alias to easily change precision
/// if necessary.
pub type Real = f64;

/// Calendar day key. Days are kept as ISO `YYYY-MM-DD` strings, which order
/// correctly under plain lexicographic comparison.
pub type Day = String;
