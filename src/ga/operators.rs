//! Permutation-preserving genetic operators for tours.
//!
//! # Crossover
//!
//! - [`segment_crossover`]: single-point suffix exchange with order-preserving
//!   repair. Each child starts with the other parent's suffix and is
//!   completed with its own remaining genes in their original order.
//! - [`crossover_population`]: applies it to adjacent pairs `(2k, 2k + 1)`.
//!
//! # Mutation
//!
//! - [`swap_mutation`]: exchange two distinct random positions. O(1)
//! - [`mutate_population`]: applies it to each tour with a given probability.
//!
//! A naive single-point crossover on raw index arrays would duplicate some
//! cities and drop others; every operator here returns a valid permutation
//! whenever its inputs are valid.

use rand::Rng;

use super::population::Population;
use super::tour::Tour;
use crate::error::{TspError, TspResult};

// ============================================================================
// Crossover operators
// ============================================================================

/// Single-point segment exchange between two parents.
///
/// # Algorithm
///
/// 1. Child A's first `n - cut` positions are parent B's suffix `b[cut..]`
/// 2. Its remaining positions are parent A's genes missing from that suffix,
///    in parent A's order
/// 3. Child B is built the same way with the roles swapped
///
/// A cut of 0 exchanges the parents wholesale.
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if parents have different lengths or `cut >= n`.
///
/// # Examples
///
/// ```
/// use tsp_ga::ga::{segment_crossover, Tour};
///
/// let a = Tour::new(vec![0, 1, 2, 3, 4]).unwrap();
/// let b = Tour::new(vec![4, 3, 2, 1, 0]).unwrap();
/// let (c1, c2) = segment_crossover(&a, &b, 3);
/// assert_eq!(c1.as_slice(), &[1, 0, 2, 3, 4]);
/// assert_eq!(c2.as_slice(), &[3, 4, 2, 1, 0]);
/// ```
pub fn segment_crossover(parent_a: &Tour, parent_b: &Tour, cut: usize) -> (Tour, Tour) {
    let n = parent_a.len();
    assert_eq!(n, parent_b.len(), "parents must have equal length");
    assert!(cut < n, "cut point {cut} out of range for {n} cities");

    let child_a = build_child(parent_a.as_slice(), parent_b.as_slice(), cut);
    let child_b = build_child(parent_b.as_slice(), parent_a.as_slice(), cut);

    (
        Tour::from_permutation(child_a),
        Tour::from_permutation(child_b),
    )
}

/// Build one child: `donor[cut..]`, then `own` minus those genes.
fn build_child(own: &[usize], donor: &[usize], cut: usize) -> Vec<usize> {
    let n = own.len();
    let mut child = Vec::with_capacity(n);
    let mut taken = vec![false; n];

    for &city in &donor[cut..] {
        child.push(city);
        taken[city] = true;
    }
    child.extend(own.iter().copied().filter(|&city| !taken[city]));

    child
}

/// Recombines adjacent pairs `(2k, 2k + 1)` with one random cut per pair.
///
/// Cut points are drawn uniformly from `0..n_cities`. Both parents of each
/// pair are replaced by their children.
///
/// # Errors
///
/// - [`TspError::InvalidPopulationSize`] if the population size is odd
/// - [`TspError::InvalidInput`] if `n_cities < 2` or a tour has a different
///   length
pub fn crossover_population<R: Rng>(
    population: Population,
    n_cities: usize,
    rng: &mut R,
) -> TspResult<Population> {
    if population.len() % 2 != 0 {
        return Err(TspError::InvalidPopulationSize {
            size: population.len(),
        });
    }
    if n_cities < 2 {
        return Err(TspError::InvalidInput(format!(
            "crossover needs at least 2 cities, got {n_cities}"
        )));
    }
    if let Some(tour) = population.iter().find(|t| t.len() != n_cities) {
        return Err(TspError::InvalidInput(format!(
            "tour of {} cities in a {n_cities}-city population",
            tour.len()
        )));
    }

    let mut tours = population.into_tours();
    for pair in tours.chunks_exact_mut(2) {
        let cut = rng.random_range(0..n_cities);
        let (child_a, child_b) = segment_crossover(&pair[0], &pair[1], cut);
        pair[0] = child_a;
        pair[1] = child_b;
    }

    Ok(Population::from_tours(tours))
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Swap mutation: exchange two distinct random positions.
///
/// Tours shorter than 2 are left unchanged.
///
/// # Complexity
/// O(1)
pub fn swap_mutation<R: Rng>(tour: &mut Tour, rng: &mut R) {
    let n = tour.len();
    if n < 2 {
        return;
    }
    let i = rng.random_range(0..n);
    let mut j = rng.random_range(0..n - 1);
    if j >= i {
        j += 1;
    }
    tour.swap(i, j);
}

/// Mutates the population in place: each tour independently undergoes
/// [`swap_mutation`] with probability `rate`.
///
/// Returns how many tours were mutated.
pub fn mutate_population<R: Rng>(population: &mut Population, rate: f64, rng: &mut R) -> usize {
    let mut mutated = 0;
    for tour in population.tours_mut() {
        if rng.random::<f64>() < rate {
            swap_mutation(tour, rng);
            mutated += 1;
        }
    }
    mutated
}

// ============================================================================
// Tests
// ============================================================================
