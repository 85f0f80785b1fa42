//! GA evolutionary loop execution.
//!
//! [`GaRunner`] drives the generations:
//! selection → crossover → mutation → evaluation → repeat,
//! keeping the best tour seen so far and stopping on stagnation or when the
//! generation budget runs out.

use std::mem;
use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{debug, info, instrument, trace, warn};

use super::config::GaConfig;
use super::fitness::evaluate_population;
use super::observer::{GaObserver, ProgressEvent, RunReport};
use super::operators::{crossover_population, mutate_population};
use super::population::{best_index, Population};
use super::selection::roulette_select;
use super::tour::Tour;
use crate::distance::DistanceMatrix;
use crate::error::{TspError, TspResult};
use crate::models::City;
use crate::random::rng_from_seed;

/// Lifecycle of a run.
///
/// `Initialized → Running → Converged | MaxGenerationsReached`. The last two
/// are terminal, as is `Aborted`, which any non-terminal state enters when a
/// generation returns an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunState {
    /// Initial population evaluated; no generation has run yet.
    Initialized,
    /// At least one generation has run and no stopping rule has fired.
    Running,
    /// The stagnation limit was reached.
    Converged,
    /// `max_generations` generations ran without converging.
    MaxGenerationsReached,
    /// A generation failed. The best tour is still valid; the population is
    /// not.
    Aborted,
}

impl RunState {
    /// Returns `true` for `Converged`, `MaxGenerationsReached` and `Aborted`.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            RunState::Converged | RunState::MaxGenerationsReached | RunState::Aborted
        )
    }
}

/// Best tour observed so far and its fitness.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BestSolution {
    /// The tour.
    pub tour: Tour,
    /// Its fitness, `1 / length`.
    pub fitness: f64,
}

impl BestSolution {
    /// True tour length, `1 / fitness`.
    pub fn length(&self) -> f64 {
        1.0 / self.fitness
    }
}

/// Result of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// The best tour found during the entire run.
    pub best: Tour,

    /// Fitness of `best`.
    pub best_fitness: f64,

    /// Total length of `best`.
    pub best_length: f64,

    /// Total number of generations executed.
    pub generations: usize,

    /// Terminal state that ended the run.
    pub state: RunState,

    /// Generation at which `best` was found (0 = initial population).
    pub last_improvement: usize,

    /// Best fitness after initialization and after each generation.
    pub fitness_history: Vec<f64>,

    /// Wall-clock time of the run.
    pub elapsed: Duration,
}

impl GaResult {
    /// Whether the run stopped because of stagnation.
    pub fn converged(&self) -> bool {
        self.state == RunState::Converged
    }
}

/// Executes the GA evolutionary loop on one TSP instance.
///
/// The runner owns its population and random generator; each generation
/// moves the population through the operators by value.
///
/// # Usage
///
/// ```
/// use tsp_ga::distance::DistanceMatrix;
/// use tsp_ga::ga::{GaConfig, GaRunner, NoopObserver};
/// use tsp_ga::models::City;
/// use tsp_ga::random::create_rng;
///
/// let cities = [
///     City::new(0.0, 0.0),
///     City::new(0.0, 1.0),
///     City::new(1.0, 1.0),
///     City::new(1.0, 0.0),
/// ];
/// let matrix = DistanceMatrix::from_cities(&cities).unwrap();
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_max_generations(100);
/// let runner = GaRunner::new(&matrix, config, create_rng(42)).unwrap();
/// let result = runner.run(NoopObserver).unwrap();
/// assert!(result.best.is_permutation_of(4));
/// ```
#[derive(Debug)]
pub struct GaRunner<'a, R: Rng> {
    matrix: &'a DistanceMatrix,
    config: GaConfig,
    rng: R,
    population: Population,
    fitness: Vec<f64>,
    best: BestSolution,
    state: RunState,
    generation: usize,
    stagnation: usize,
    last_improvement: usize,
    fitness_history: Vec<f64>,
    started: Instant,
}

impl<'a, R: Rng> GaRunner<'a, R> {
    /// Creates and evaluates the initial population.
    ///
    /// # Errors
    ///
    /// Configuration errors from [`GaConfig::validate`], or
    /// [`TspError::DegenerateTour`] if the instance has zero-length tours.
    pub fn new(matrix: &'a DistanceMatrix, config: GaConfig, mut rng: R) -> TspResult<Self> {
        config.validate()?;
        let started = Instant::now();

        let population = Population::random(config.population_size, matrix.size(), &mut rng);
        let fitness = evaluate_population(&population, matrix, config.parallel)?;
        let best = Self::best_of(&population, &fitness)?;

        debug!(
            cities = matrix.size(),
            population = config.population_size,
            initial_length = best.length(),
            "initial population evaluated"
        );

        let fitness_history = vec![best.fitness];

        Ok(Self {
            matrix,
            config,
            rng,
            population,
            fitness,
            best,
            state: RunState::Initialized,
            generation: 0,
            stagnation: 0,
            last_improvement: 0,
            fitness_history,
            started,
        })
    }

    /// Runs one generation and returns the resulting state.
    ///
    /// Calling this on a runner that already reached a terminal state is a
    /// no-op. If an operator fails, the error is returned and the runner
    /// moves to [`RunState::Aborted`]; [`best`](Self::best) and
    /// [`into_result`](Self::into_result) still report the best tour found
    /// before the failure.
    pub fn step(&mut self) -> TspResult<RunState> {
        if self.state.is_terminal() {
            return Ok(self.state);
        }
        self.state = RunState::Running;

        if let Err(err) = self.advance() {
            warn!(generation = self.generation, error = %err, "generation failed");
            self.state = RunState::Aborted;
            return Err(err);
        }

        if self.stagnation >= self.config.stagnation_limit {
            self.state = RunState::Converged;
        } else if self.generation >= self.config.max_generations {
            self.state = RunState::MaxGenerationsReached;
        }
        Ok(self.state)
    }

    fn advance(&mut self) -> TspResult<()> {
        let n_cities = self.matrix.size();
        let population = mem::take(&mut self.population);

        let selected = roulette_select(population, &self.fitness, &mut self.rng)?;
        let mut next = crossover_population(selected, n_cities, &mut self.rng)?;
        let mutated = mutate_population(&mut next, self.config.mutation_rate, &mut self.rng);
        self.fitness = evaluate_population(&next, self.matrix, self.config.parallel)?;
        self.population = next;
        self.generation += 1;

        let gen_best = best_index(&self.fitness).ok_or(TspError::InvalidPopulationSize {
            size: self.population.len(),
        })?;

        // Ties keep the incumbent.
        if self.fitness[gen_best] > self.best.fitness {
            self.best = BestSolution {
                tour: self.population.tours()[gen_best].clone(),
                fitness: self.fitness[gen_best],
            };
            self.stagnation = 0;
            self.last_improvement = self.generation;
            trace!(
                generation = self.generation,
                best_length = self.best.length(),
                mutated,
                "new best tour"
            );
        } else {
            self.stagnation += 1;
        }
        self.fitness_history.push(self.best.fitness);
        Ok(())
    }

    /// Steps until a terminal state, reporting to `observer`.
    #[instrument(level = "info", skip_all, fields(
        cities = self.matrix.size(),
        population = self.config.population_size,
    ))]
    pub fn run<O: GaObserver>(mut self, mut observer: O) -> TspResult<GaResult> {
        info!(
            max_generations = self.config.max_generations,
            stagnation_limit = self.config.stagnation_limit,
            "starting evolution"
        );

        while !self.state.is_terminal() {
            self.step()?;
            let interval = self.config.report_interval;
            if interval > 0 && self.generation % interval == 0 {
                let event = self.progress();
                debug!(
                    generation = event.generation,
                    best_length = event.best_length,
                    "generation report"
                );
                observer.on_progress(&event);
            }
        }

        let result = self.into_result();
        info!(
            state = ?result.state,
            generations = result.generations,
            best_length = result.best_length,
            "evolution finished"
        );
        observer.on_finish(&RunReport {
            state: result.state,
            generations: result.generations,
            best_tour: result.best.as_slice().to_vec(),
            best_length: result.best_length,
            elapsed: result.elapsed,
        });
        Ok(result)
    }

    /// Current progress snapshot.
    pub fn progress(&self) -> ProgressEvent {
        ProgressEvent {
            generation: self.generation,
            best_length: self.best.length(),
            best_fitness: self.best.fitness,
            stagnation: self.stagnation,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Best tour observed so far.
    pub fn best(&self) -> &BestSolution {
        &self.best
    }

    /// Generations executed so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Consecutive generations without strict improvement.
    pub fn stagnation(&self) -> usize {
        self.stagnation
    }

    /// The current population. Empty once the runner is
    /// [`Aborted`](RunState::Aborted).
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Fitness of the current population, in population order.
    pub fn fitness(&self) -> &[f64] {
        &self.fitness
    }

    /// Consumes the runner and packages what it found.
    ///
    /// May be called before a terminal state; the result then reflects the
    /// generations run so far with `state` still non-terminal.
    pub fn into_result(self) -> GaResult {
        let best_length = self.best.length();
        GaResult {
            best: self.best.tour,
            best_fitness: self.best.fitness,
            best_length,
            generations: self.generation,
            state: self.state,
            last_improvement: self.last_improvement,
            fitness_history: self.fitness_history,
            elapsed: self.started.elapsed(),
        }
    }

    fn best_of(population: &Population, fitness: &[f64]) -> TspResult<BestSolution> {
        let idx = best_index(fitness).ok_or(TspError::InvalidPopulationSize {
            size: population.len(),
        })?;
        Ok(BestSolution {
            tour: population.tours()[idx].clone(),
            fitness: fitness[idx],
        })
    }
}

/// Builds the distance matrix, seeds a generator from `config.seed`, and
/// runs the GA to completion.
///
/// # Errors
///
/// [`TspError::InvalidInput`] for fewer than 2 cities, before any
/// evolution starts; otherwise any error from [`GaRunner`].
pub fn solve<O: GaObserver>(cities: &[City], config: &GaConfig, observer: O) -> TspResult<GaResult> {
    let matrix = DistanceMatrix::from_cities(cities)?;
    let rng = rng_from_seed(config.seed);
    GaRunner::new(&matrix, config.clone(), rng)?.run(observer)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::observer::{CollectingObserver, NoopObserver};
    use crate::random::create_rng;

    fn unit_square() -> Vec<City> {
        vec![
            City::new(0.0, 0.0),
            City::new(0.0, 1.0),
            City::new(1.0, 1.0),
            City::new(1.0, 0.0),
        ]
    }

    fn circle(n: usize) -> Vec<City> {
        (0..n)
            .map(|i| {
                let angle = 2.0 * std::f64::consts::PI * i as f64 / n as f64;
                City::new(100.0 * angle.cos(), 100.0 * angle.sin())
            })
            .collect()
    }

    fn small_config() -> GaConfig {
        GaConfig::default()
            .with_population_size(20)
            .with_max_generations(200)
            .with_stagnation_limit(50)
            .with_report_interval(0)
    }

    #[test]
    fn test_new_is_initialized() {
        let cities = unit_square();
        let dm = DistanceMatrix::from_cities(&cities).expect("valid");
        let runner = GaRunner::new(&dm, small_config(), create_rng(42)).expect("valid");
        assert_eq!(runner.state(), RunState::Initialized);
        assert_eq!(runner.generation(), 0);
        assert_eq!(runner.population().len(), 20);
        assert_eq!(runner.fitness().len(), 20);
        assert!(runner.best().tour.is_permutation_of(4));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let dm = DistanceMatrix::from_cities(&unit_square()).expect("valid");
        let config = small_config().with_population_size(21);
        let err = GaRunner::new(&dm, config, create_rng(42)).unwrap_err();
        assert!(matches!(err, TspError::InvalidPopulationSize { size: 21 }));
    }

    #[test]
    fn test_step_transitions_to_running() {
        let dm = DistanceMatrix::from_cities(&circle(8)).expect("valid");
        let mut runner = GaRunner::new(&dm, small_config(), create_rng(42)).expect("valid");
        assert_eq!(runner.step().expect("step"), RunState::Running);
        assert_eq!(runner.generation(), 1);
        for tour in runner.population() {
            assert!(tour.is_permutation_of(8));
        }
    }

    #[test]
    fn test_best_never_regresses() {
        let dm = DistanceMatrix::from_cities(&circle(12)).expect("valid");
        let mut runner = GaRunner::new(&dm, small_config(), create_rng(7)).expect("valid");
        let mut previous = runner.best().fitness;
        while !runner.step().expect("step").is_terminal() {
            let current = runner.best().fitness;
            assert!(current >= previous, "best fitness regressed");
            let gen_max = runner.fitness().iter().cloned().fold(f64::MIN, f64::max);
            assert!(current >= gen_max, "best must dominate the current generation");
            previous = current;
        }
    }

    #[test]
    fn test_max_generations_reached() {
        let dm = DistanceMatrix::from_cities(&circle(10)).expect("valid");
        let config = small_config()
            .with_max_generations(5)
            .with_stagnation_limit(1000);
        let result = GaRunner::new(&dm, config, create_rng(42))
            .expect("valid")
            .run(NoopObserver)
            .expect("run");
        assert_eq!(result.state, RunState::MaxGenerationsReached);
        assert_eq!(result.generations, 5);
        assert_eq!(result.fitness_history.len(), 6);
    }

    #[test]
    fn test_converges_within_limit_of_last_improvement() {
        let dm = DistanceMatrix::from_cities(&circle(10)).expect("valid");
        let config = small_config()
            .with_max_generations(100_000)
            .with_stagnation_limit(30);
        let result = GaRunner::new(&dm, config, create_rng(3))
            .expect("valid")
            .run(NoopObserver)
            .expect("run");
        assert!(result.converged());
        assert_eq!(result.generations, result.last_improvement + 30);
    }

    #[test]
    fn test_ties_keep_the_initial_best() {
        // Both orderings of two cities have length 2d exactly, so no
        // generation can strictly improve on the initial best.
        let dm = DistanceMatrix::from_cities(&[City::new(0.0, 0.0), City::new(3.0, 4.0)])
            .expect("valid");
        let config = small_config()
            .with_population_size(10)
            .with_mutation_rate(0.5)
            .with_stagnation_limit(25);
        let tie = 1.0 / (2.0 * dm.get(0, 1));
        let mut runner = GaRunner::new(&dm, config, create_rng(42)).expect("valid");
        assert!(runner.fitness().iter().all(|&f| f == tie));
        let initial = runner.best().clone();

        while !runner.step().expect("step").is_terminal() {
            assert_eq!(runner.best(), &initial);
        }
        assert_eq!(runner.best(), &initial);

        let result = runner.into_result();
        assert_eq!(result.state, RunState::Converged);
        assert_eq!(result.last_improvement, 0);
        assert_eq!(result.generations, 25);
        assert_eq!(result.best, initial.tour);
        assert!(result.fitness_history.iter().all(|&f| f == tie));
    }

    #[test]
    fn test_failed_generation_aborts() {
        let dm = DistanceMatrix::from_cities(&circle(6)).expect("valid");
        let mut runner = GaRunner::new(&dm, small_config(), create_rng(42)).expect("valid");
        runner.step().expect("step");
        let best = runner.best().clone();

        runner.fitness = vec![0.0; runner.fitness.len()];
        let err = runner.step().unwrap_err();
        assert!(matches!(err, TspError::InvalidFitness(_)));
        assert_eq!(runner.state(), RunState::Aborted);
        assert!(runner.state().is_terminal());

        // Later steps do not touch the emptied population again.
        assert_eq!(runner.step().expect("no-op"), RunState::Aborted);
        assert_eq!(runner.generation(), 1);
        assert_eq!(runner.best(), &best);

        let result = runner.into_result();
        assert_eq!(result.state, RunState::Aborted);
        assert!(!result.converged());
        assert_eq!(result.best, best.tour);
    }

    #[test]
    fn test_step_after_terminal_is_noop() {
        let dm = DistanceMatrix::from_cities(&unit_square()).expect("valid");
        let config = small_config().with_max_generations(1);
        let mut runner = GaRunner::new(&dm, config, create_rng(42)).expect("valid");
        assert_eq!(runner.step().expect("step"), RunState::MaxGenerationsReached);
        assert_eq!(runner.step().expect("step"), RunState::MaxGenerationsReached);
        assert_eq!(runner.generation(), 1);
    }

    #[test]
    fn test_progress_events_at_interval() {
        let dm = DistanceMatrix::from_cities(&circle(8)).expect("valid");
        let config = small_config()
            .with_max_generations(50)
            .with_stagnation_limit(1000)
            .with_report_interval(10);
        let mut observer = CollectingObserver::default();
        let result = GaRunner::new(&dm, config, create_rng(42))
            .expect("valid")
            .run(&mut observer)
            .expect("run");

        let generations: Vec<usize> = observer.progress.iter().map(|e| e.generation).collect();
        assert_eq!(generations, vec![10, 20, 30, 40, 50]);
        let report = observer.report.expect("finish reported");
        assert_eq!(report.generations, result.generations);
        assert_eq!(report.best_tour, result.best.as_slice());
        assert_eq!(report.best_length, result.best_length);
    }

    #[test]
    fn test_reported_length_matches_tour() {
        let cities = circle(9);
        let dm = DistanceMatrix::from_cities(&cities).expect("valid");
        let result = GaRunner::new(&dm, small_config(), create_rng(11))
            .expect("valid")
            .run(NoopObserver)
            .expect("run");
        let length = crate::ga::tour_length(&result.best, &dm);
        assert!((result.best_length - length).abs() < 1e-9);
        assert!((result.best_fitness - 1.0 / length).abs() < 1e-12);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let cities = circle(10);
        let config = small_config().with_seed(99);
        let a = solve(&cities, &config, NoopObserver).expect("run");
        let b = solve(&cities, &config, NoopObserver).expect("run");
        assert_eq!(a.best, b.best);
        assert_eq!(a.generations, b.generations);
        assert_eq!(a.fitness_history, b.fitness_history);
    }

    #[test]
    fn test_solve_rejects_single_city() {
        let err = solve(&[City::new(0.0, 0.0)], &small_config(), NoopObserver).unwrap_err();
        assert!(matches!(err, TspError::InvalidInput(_)));
    }

    #[test]
    fn test_solve_unit_square() {
        let config = GaConfig::default()
            .with_population_size(50)
            .with_max_generations(500)
            .with_seed(42);
        let result = solve(&unit_square(), &config, NoopObserver).expect("run");
        assert!((result.best_length - 4.0).abs() < 1e-9);
    }
}
