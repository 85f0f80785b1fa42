//! Text parsing for city records.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{TspError, TspResult};
use crate::models::City;

/// Parses one record. `line_no` is 1-based and only used in errors.
///
/// Tokens beyond the third are ignored.
///
/// # Errors
///
/// [`TspError::DataFormat`] when a coordinate is missing or not numeric.
pub fn parse_city_line(line: &str, line_no: usize) -> TspResult<City> {
    let mut tokens = line.split_whitespace();
    // Identifier.
    tokens.next();
    let x = parse_coordinate(tokens.next(), "x", line_no)?;
    let y = parse_coordinate(tokens.next(), "y", line_no)?;
    Ok(City::new(x, y))
}

fn parse_coordinate(token: Option<&str>, axis: &str, line_no: usize) -> TspResult<f64> {
    let token =
        token.ok_or_else(|| TspError::data_format(line_no, format!("missing {axis} coordinate")))?;
    let value: f64 = token.parse().map_err(|_| {
        TspError::data_format(line_no, format!("{axis} coordinate {token:?} is not a number"))
    })?;
    if !value.is_finite() {
        return Err(TspError::data_format(
            line_no,
            format!("{axis} coordinate {token:?} is not finite"),
        ));
    }
    Ok(value)
}

/// Parses every non-blank line of `input` into a city.
///
/// # Examples
///
/// ```
/// use tsp_ga::io::parse_cities;
///
/// let cities = parse_cities("1 0 0\n2 3 4\n").unwrap();
/// assert_eq!(cities.len(), 2);
/// assert_eq!(cities[1].y(), 4.0);
/// ```
pub fn parse_cities(input: &str) -> TspResult<Vec<City>> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| parse_city_line(line, i + 1))
        .collect()
}

/// Reads and parses a city file.
pub fn load_cities(path: impl AsRef<Path>) -> TspResult<Vec<City>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let cities = parse_cities(&text)?;
    debug!(path = %path.display(), count = cities.len(), "loaded cities");
    Ok(cities)
}
