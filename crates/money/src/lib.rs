//! Currency conversion and display formatting.
//!
//! Pure functions only. Amounts are plain `f64` TWD/KRW totals; rounding
//! policy lives here and nowhere else.

pub mod convert;
pub mod format;

pub use convert::to_home;
pub use format::{format_foreign, format_home};
