//! Display formatting for amounts, USD values and addresses.

pub mod address;
pub mod decimal;
pub mod num;

pub use address::shorten;
pub use decimal::{fixed, usd_display, usd_value};
