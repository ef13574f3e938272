//! Domain types: price points and validated price series.

pub mod price;

pub use price::{PricePoint, PriceSeries};
