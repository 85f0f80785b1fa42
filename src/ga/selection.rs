//! Fitness-proportionate selection.
//!
//! Roulette wheel sampling with replacement: each output slot independently
//! draws a tour with probability `f_i / Σf`.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 1
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use rand::Rng;

use super::population::Population;
use crate::error::{TspError, TspResult};

/// Samples a new population of the same size, proportionally to fitness.
///
/// The input population is consumed; selected tours are cloned into the
/// output, so a strong tour may appear several times.
///
/// If all fitness values are equal, this is uniform sampling.
///
/// # Errors
///
/// [`TspError::InvalidFitness`] when the fitness vector does not match the
/// population length, contains a negative or non-finite value, or sums to
/// zero.
///
/// # Complexity
/// O(n log n): one prefix-sum pass, then a binary search per slot.
pub fn roulette_select<R: Rng>(
    population: Population,
    fitness: &[f64],
    rng: &mut R,
) -> TspResult<Population> {
    let wheel = RouletteWheel::new(fitness)?;
    if wheel.len() != population.len() {
        return Err(TspError::InvalidFitness(format!(
            "{} fitness values for {} tours",
            wheel.len(),
            population.len()
        )));
    }

    let tours = population.tours();
    let selected = (0..tours.len())
        .map(|_| tours[wheel.spin(rng)].clone())
        .collect();
    Ok(Population::from_tours(selected))
}

/// Cumulative fitness table for repeated sampling.
#[derive(Debug, Clone)]
pub struct RouletteWheel {
    cumulative: Vec<f64>,
    total: f64,
}

impl RouletteWheel {
    /// Builds the wheel, validating that probabilities are well defined.
    pub fn new(fitness: &[f64]) -> TspResult<Self> {
        if let Some((i, &f)) = fitness
            .iter()
            .enumerate()
            .find(|(_, f)| !f.is_finite() || **f < 0.0)
        {
            return Err(TspError::InvalidFitness(format!(
                "fitness[{i}] = {f} is negative or not finite"
            )));
        }

        let mut cumulative = Vec::with_capacity(fitness.len());
        let mut total = 0.0;
        for &f in fitness {
            total += f;
            cumulative.push(total);
        }

        if !(total > 0.0 && total.is_finite()) {
            return Err(TspError::InvalidFitness(format!(
                "fitness sum {total} is not positive"
            )));
        }

        Ok(Self { cumulative, total })
    }

    /// Number of slots on the wheel.
    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    /// Always `false`: construction rejects an empty wheel.
    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }

    /// Draws one index.
    pub fn spin<R: Rng>(&self, rng: &mut R) -> usize {
        let threshold = rng.random_range(0.0..self.total);
        // First slot whose cumulative weight exceeds the threshold; zero-weight
        // slots share their predecessor's bound and are never hit.
        let idx = self.cumulative.partition_point(|&c| c <= threshold);
        idx.min(self.cumulative.len() - 1) // floating-point fallback
    }
}
