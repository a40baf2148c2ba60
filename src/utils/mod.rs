//! Utility types
//!
//! Currently only date/time handling lives here.

pub mod datetime;

pub use datetime::PremisDateTime;
