//! Display formatting: currency amounts and plain numbers.

pub mod currency;
pub mod num;
