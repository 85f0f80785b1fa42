//! Population of candidate tours.

use rand::seq::SliceRandom;
use rand::Rng;

use super::tour::Tour;

/// A fixed-size, ordered collection of tours.
///
/// The evolutionary loop owns the population and moves it through each
/// operator; operators return a fresh population instead of sharing one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Population {
    tours: Vec<Tour>,
}

impl Population {
    /// Creates `size` independent, uniformly random permutations of
    /// `0..n_cities`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tsp_ga::ga::Population;
    /// use tsp_ga::random::create_rng;
    ///
    /// let mut rng = create_rng(42);
    /// let pop = Population::random(10, 6, &mut rng);
    /// assert_eq!(pop.len(), 10);
    /// assert!(pop.iter().all(|t| t.is_permutation_of(6)));
    /// ```
    pub fn random<R: Rng>(size: usize, n_cities: usize, rng: &mut R) -> Self {
        let tours = (0..size)
            .map(|_| {
                let mut cities: Vec<usize> = (0..n_cities).collect();
                cities.shuffle(rng);
                Tour::from_permutation(cities)
            })
            .collect();
        Self { tours }
    }

    /// Wraps an explicit list of tours.
    pub fn from_tours(tours: Vec<Tour>) -> Self {
        Self { tours }
    }

    /// Number of tours.
    pub fn len(&self) -> usize {
        self.tours.len()
    }

    /// Returns `true` if the population holds no tours.
    pub fn is_empty(&self) -> bool {
        self.tours.is_empty()
    }

    /// Tours in population order.
    pub fn tours(&self) -> &[Tour] {
        &self.tours
    }

    /// Mutable access to the tours, in population order.
    pub fn tours_mut(&mut self) -> &mut [Tour] {
        &mut self.tours
    }

    /// Iterates over tours in population order.
    pub fn iter(&self) -> std::slice::Iter<'_, Tour> {
        self.tours.iter()
    }

    /// Consumes the population, returning its tours.
    pub fn into_tours(self) -> Vec<Tour> {
        self.tours
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Tour;
    type IntoIter = std::slice::Iter<'a, Tour>;

    fn into_iter(self) -> Self::IntoIter {
        self.tours.iter()
    }
}

/// Index of the highest fitness value; the first one wins ties.
///
/// Returns `None` for an empty slice. NaN entries are never selected over a
/// real value.
pub fn best_index(fitness: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, &f) in fitness.iter().enumerate() {
        match best {
            None => best = Some(i),
            Some(b) if f > fitness[b] || fitness[b].is_nan() => best = Some(i),
            _ => {}
        }
    }
    best
}
