//! Tour representation.
//!
//! A [`Tour`] is a permutation of city indices `0..n`. The last city links
//! back to the first, so every rotation of a tour has the same length.

use std::ops::Index;

/// An ordered visiting sequence containing each city index exactly once.
///
/// Every operator in this crate preserves the permutation invariant; the
/// only way to build a tour from arbitrary data is [`Tour::new`], which
/// checks it.
///
/// # Examples
///
/// ```
/// use tsp_ga::ga::Tour;
///
/// let tour = Tour::new(vec![2, 0, 1]).unwrap();
/// assert_eq!(tour.len(), 3);
/// assert!(Tour::new(vec![0, 0, 1]).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour {
    cities: Vec<usize>,
}

impl Tour {
    /// Wraps `cities` as a tour.
    ///
    /// Returns `None` if `cities` is not a permutation of `0..cities.len()`.
    pub fn new(cities: Vec<usize>) -> Option<Self> {
        if is_permutation(&cities, cities.len()) {
            Some(Self { cities })
        } else {
            None
        }
    }

    /// The tour `0, 1, ..., n - 1`.
    pub fn identity(n: usize) -> Self {
        Self {
            cities: (0..n).collect(),
        }
    }

    pub(crate) fn from_permutation(cities: Vec<usize>) -> Self {
        debug_assert!(is_permutation(&cities, cities.len()));
        Self { cities }
    }

    /// Number of cities in the tour.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Returns `true` for the empty tour.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// City indices in visiting order.
    pub fn as_slice(&self) -> &[usize] {
        &self.cities
    }

    /// Consumes the tour, returning the visiting order.
    pub fn into_vec(self) -> Vec<usize> {
        self.cities
    }

    /// Exchanges the cities at positions `i` and `j`.
    ///
    /// # Panics
    ///
    /// Panics if either position is out of bounds.
    pub fn swap(&mut self, i: usize, j: usize) {
        self.cities.swap(i, j);
    }

    /// Returns `true` if this tour is a permutation of `0..n`.
    pub fn is_permutation_of(&self, n: usize) -> bool {
        is_permutation(&self.cities, n)
    }
}

impl Index<usize> for Tour {
    type Output = usize;

    fn index(&self, position: usize) -> &usize {
        &self.cities[position]
    }
}

impl AsRef<[usize]> for Tour {
    fn as_ref(&self) -> &[usize] {
        &self.cities
    }
}

/// Check that a slice is a valid permutation of `0..n`.
pub fn is_permutation(perm: &[usize], n: usize) -> bool {
    if perm.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &city in perm {
        if city >= n || seen[city] {
            return false;
        }
        seen[city] = true;
    }
    true
}
