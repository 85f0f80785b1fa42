//! Tour length and fitness evaluation.
//!
//! Fitness is the inverse of the cyclic tour length, so higher is better and
//! roulette selection can use it directly as a weight.

use super::population::Population;
use super::tour::Tour;
use crate::distance::DistanceMatrix;
use crate::error::{TspError, TspResult};

/// Total length of the closed route, including the edge from the last city
/// back to the first.
///
/// # Examples
///
/// ```
/// use tsp_ga::distance::DistanceMatrix;
/// use tsp_ga::ga::{tour_length, Tour};
/// use tsp_ga::models::City;
///
/// let square = [
///     City::new(0.0, 0.0),
///     City::new(0.0, 1.0),
///     City::new(1.0, 1.0),
///     City::new(1.0, 0.0),
/// ];
/// let dm = DistanceMatrix::from_cities(&square).unwrap();
/// assert_eq!(tour_length(&Tour::identity(4), &dm), 4.0);
/// ```
///
/// # Panics
///
/// Panics if the tour visits a city index outside the matrix. [`fitness`]
/// checks the sizes first and returns an error instead.
pub fn tour_length(tour: &Tour, matrix: &DistanceMatrix) -> f64 {
    let cities = tour.as_slice();
    let (Some(&first), Some(&last)) = (cities.first(), cities.last()) else {
        return 0.0;
    };
    let open: f64 = cities.windows(2).map(|w| matrix.get(w[0], w[1])).sum();
    open + matrix.get(last, first)
}

/// Fitness of a single tour: `1 / tour_length`.
///
/// # Errors
///
/// [`TspError::InvalidInput`] when the tour does not cover exactly the
/// matrix's cities; [`TspError::DegenerateTour`] when the length is zero
/// (all cities coincide, or the tour has a single city).
pub fn fitness(tour: &Tour, matrix: &DistanceMatrix) -> TspResult<f64> {
    if tour.len() != matrix.size() {
        return Err(TspError::InvalidInput(format!(
            "tour of {} cities does not match a {}-city matrix",
            tour.len(),
            matrix.size()
        )));
    }
    let length = tour_length(tour, matrix);
    if length > 0.0 {
        Ok(1.0 / length)
    } else {
        Err(TspError::DegenerateTour)
    }
}

/// Evaluates every tour, returning fitness values in population order.
///
/// With the `parallel` feature, `parallel = true` spreads the work over the
/// rayon pool. Without the feature the flag is ignored.
pub fn evaluate_population(
    population: &Population,
    matrix: &DistanceMatrix,
    parallel: bool,
) -> TspResult<Vec<f64>> {
    if parallel {
        evaluate_parallel(population, matrix)
    } else {
        evaluate_sequential(population, matrix)
    }
}

fn evaluate_sequential(population: &Population, matrix: &DistanceMatrix) -> TspResult<Vec<f64>> {
    population.iter().map(|tour| fitness(tour, matrix)).collect()
}

#[cfg(feature = "parallel")]
fn evaluate_parallel(population: &Population, matrix: &DistanceMatrix) -> TspResult<Vec<f64>> {
    use rayon::prelude::*;

    // Indexed collect keeps population order.
    population
        .tours()
        .par_iter()
        .map(|tour| fitness(tour, matrix))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn evaluate_parallel(population: &Population, matrix: &DistanceMatrix) -> TspResult<Vec<f64>> {
    evaluate_sequential(population, matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::City;

    fn unit_square() -> DistanceMatrix {
        DistanceMatrix::from_cities(&[
            City::new(0.0, 0.0),
            City::new(0.0, 1.0),
            City::new(1.0, 1.0),
            City::new(1.0, 0.0),
        ])
        .expect("valid")
    }

    #[test]
    fn test_perimeter_tour() {
        let dm = unit_square();
        let tour = Tour::identity(4);
        assert_eq!(tour_length(&tour, &dm), 4.0);
        assert_eq!(fitness(&tour, &dm).expect("non-degenerate"), 0.25);
    }

    #[test]
    fn test_crossing_tour_is_longer() {
        let dm = unit_square();
        let perimeter = Tour::identity(4);
        let crossing = Tour::new(vec![0, 2, 1, 3]).expect("valid");
        let expected = 2.0 + 2.0 * 2f64.sqrt();
        assert!((tour_length(&crossing, &dm) - expected).abs() < 1e-12);

        let f_short = fitness(&perimeter, &dm).expect("valid");
        let f_long = fitness(&crossing, &dm).expect("valid");
        assert!(f_short > f_long);
    }

    #[test]
    fn test_rotation_and_reflection_invariant() {
        let dm = unit_square();
        let a = Tour::new(vec![1, 2, 3, 0]).expect("valid");
        let b = Tour::new(vec![3, 2, 1, 0]).expect("valid");
        assert_eq!(tour_length(&a, &dm), 4.0);
        assert_eq!(tour_length(&b, &dm), 4.0);
    }

    #[test]
    fn test_closing_edge_counted() {
        let dm = DistanceMatrix::from_cities(&[City::new(0.0, 0.0), City::new(3.0, 4.0)])
            .expect("valid");
        assert_eq!(tour_length(&Tour::identity(2), &dm), 10.0);
    }

    #[test]
    fn test_coincident_cities_are_degenerate() {
        let dm = DistanceMatrix::from_cities(&[City::new(2.0, 2.0), City::new(2.0, 2.0)])
            .expect("valid");
        let err = fitness(&Tour::identity(2), &dm).unwrap_err();
        assert!(matches!(err, TspError::DegenerateTour));
    }

    #[test]
    fn test_tour_size_mismatch_is_an_error() {
        let two = DistanceMatrix::from_cities(&[City::new(0.0, 0.0), City::new(3.0, 4.0)])
            .expect("valid");
        let err = fitness(&Tour::identity(3), &two).unwrap_err();
        assert!(matches!(err, TspError::InvalidInput(_)));

        let err = fitness(&Tour::identity(2), &unit_square()).unwrap_err();
        assert!(matches!(err, TspError::InvalidInput(_)));

        let pop = Population::from_tours(vec![Tour::identity(4), Tour::identity(3)]);
        let err = evaluate_population(&pop, &unit_square(), false).unwrap_err();
        assert!(matches!(err, TspError::InvalidInput(_)));
    }

    #[test]
    fn test_evaluate_population_order() {
        let dm = unit_square();
        let pop = Population::from_tours(vec![
            Tour::new(vec![0, 2, 1, 3]).expect("valid"),
            Tour::identity(4),
        ]);
        let values = evaluate_population(&pop, &dm, false).expect("valid");
        assert_eq!(values.len(), 2);
        assert!(values[1] > values[0]);
        assert_eq!(values[1], 0.25);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let dm = unit_square();
        let mut rng = crate::random::create_rng(42);
        let pop = Population::random(40, 4, &mut rng);
        let seq = evaluate_population(&pop, &dm, false).expect("valid");
        let par = evaluate_population(&pop, &dm, true).expect("valid");
        assert_eq!(seq, par);
    }
}
