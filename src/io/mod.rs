//! City data source.
//!
//! Reads whitespace-delimited records of the form `<id> <x> <y>`, one city
//! per line. The identifier is ignored; cities are numbered by line order.

mod loader;

pub use loader::{load_cities, parse_cities, parse_city_line};
