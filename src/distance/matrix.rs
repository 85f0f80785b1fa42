//! Dense distance matrix.

use crate::error::{TspError, TspResult};
use crate::models::City;

/// A dense n×n Euclidean distance matrix stored in row-major order.
///
/// Built once from the city list and read-only afterward. Entries are
/// symmetric and the diagonal is zero.
///
/// # Examples
///
/// ```
/// use tsp_ga::models::City;
/// use tsp_ga::distance::DistanceMatrix;
///
/// let cities = vec![City::new(0.0, 0.0), City::new(3.0, 4.0), City::new(6.0, 8.0)];
/// let dm = DistanceMatrix::from_cities(&cities).unwrap();
/// assert_eq!(dm.get(0, 1), 5.0);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Computes the Euclidean distance matrix for `cities`.
    ///
    /// Each unordered pair `i < j` is computed once and mirrored.
    ///
    /// # Errors
    ///
    /// Returns [`TspError::InvalidInput`] for fewer than 2 cities, since no
    /// tour exists, and when the coordinates are spread so far apart that a
    /// distance or a full tour length would not be finite.
    pub fn from_cities(cities: &[City]) -> TspResult<Self> {
        let n = cities.len();
        if n < 2 {
            return Err(TspError::InvalidInput(format!(
                "at least 2 cities are required, got {n}"
            )));
        }

        let mut data = vec![0.0; n * n];
        let mut longest = 0.0_f64;
        for i in 0..n - 1 {
            for j in (i + 1)..n {
                let d = cities[i].distance_to(&cities[j]);
                if !d.is_finite() {
                    return Err(TspError::InvalidInput(format!(
                        "distance between cities {i} and {j} is not finite"
                    )));
                }
                longest = longest.max(d);
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }

        // A tour has n edges, so this bounds every tour length.
        if !(longest * n as f64).is_finite() {
            return Err(TspError::InvalidInput(format!(
                "tour length over {n} cities with longest edge {longest:e} is not finite"
            )));
        }
        Ok(Self { data, size: n })
    }

    /// Returns the distance between cities `from` and `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Number of cities in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }
}
