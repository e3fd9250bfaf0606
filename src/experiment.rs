//! Timed trials and parameter sweeps.
//!
//! Drivers for tuning the permutation GA: run a configuration several
//! times, average cost and wall time, sweep a grid of configurations and
//! re-check the promising ones with more repetitions.
//!
//! ```
//! use u_permga::experiment::{run_trials, TrialParams};
//! use u_permga::problems::NQueens;
//!
//! let params = TrialParams::new(30, 20, 0.1);
//! let summary = run_trials(|| NQueens::new(5), &params, 3, 42).unwrap();
//! assert_eq!(summary.repetitions, 3);
//! assert!(summary.min_cost >= 0.0);
//! ```

use crate::ga::{GaConfig, GaError, GeneticEngine, PermutationGa, Problem, State};
use std::fmt;
use std::time::{Duration, Instant};

/// One GA configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialParams {
    pub population_size: usize,
    pub generations: usize,
    pub mutation_probability: f64,
}

impl TrialParams {
    pub fn new(population_size: usize, generations: usize, mutation_probability: f64) -> Self {
        Self {
            population_size,
            generations,
            mutation_probability,
        }
    }
}

/// Result of a single search.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TrialOutcome<G> {
    pub state: State<G>,
    pub cost: f64,
    /// Wall time of the search, excluding population setup.
    pub elapsed: Duration,
}

/// Aggregate over repeated searches with one configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TrialSummary {
    pub params: TrialParams,
    pub repetitions: usize,
    pub mean_cost: f64,
    pub min_cost: f64,
    pub mean_elapsed: Duration,
    /// Runs that reached cost 0.
    pub solved: usize,
}

impl fmt::Display for TrialSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "population={} generations={} mutation={} mean_cost={:.3} min_cost={} solved={}/{} mean_time={:.3}s",
            self.params.population_size,
            self.params.generations,
            self.params.mutation_probability,
            self.mean_cost,
            self.min_cost,
            self.solved,
            self.repetitions,
            self.mean_elapsed.as_secs_f64()
        )
    }
}

/// Runs one seeded search and measures it.
pub fn run_trial<P: Problem>(
    problem: P,
    params: &TrialParams,
    seed: u64,
) -> Result<TrialOutcome<P::Gene>, GaError> {
    let config = GaConfig::default()
        .with_population_size(params.population_size)
        .with_seed(seed);
    let operators = PermutationGa::new(params.mutation_probability)?;
    let mut engine = GeneticEngine::new(problem, operators, config)?;

    let start = Instant::now();
    let state = engine.search(params.generations)?;
    let elapsed = start.elapsed();

    let cost = engine.problem().cost(&state);
    Ok(TrialOutcome {
        state,
        cost,
        elapsed,
    })
}

/// Runs `repetitions` searches with seeds `seed, seed + 1, ...`, building a
/// fresh problem for each.
pub fn run_trials<P, F>(
    factory: F,
    params: &TrialParams,
    repetitions: usize,
    seed: u64,
) -> Result<TrialSummary, GaError>
where
    P: Problem,
    F: Fn() -> P,
{
    if repetitions == 0 {
        return Err(GaError::InvalidConfig(
            "repetitions must be at least 1".into(),
        ));
    }

    let mut total_cost = 0.0;
    let mut min_cost = f64::INFINITY;
    let mut total_elapsed = Duration::ZERO;
    let mut solved = 0;
    for r in 0..repetitions {
        let outcome = run_trial(factory(), params, seed.wrapping_add(r as u64))?;
        total_cost += outcome.cost;
        min_cost = min_cost.min(outcome.cost);
        total_elapsed += outcome.elapsed;
        if outcome.cost == 0.0 {
            solved += 1;
        }
    }

    Ok(TrialSummary {
        params: *params,
        repetitions,
        mean_cost: total_cost / repetitions as f64,
        min_cost,
        mean_elapsed: mean_duration(total_elapsed, repetitions)?,
        solved,
    })
}

fn mean_duration(total: Duration, count: usize) -> Result<Duration, GaError> {
    let count = u32::try_from(count).map_err(|_| {
        GaError::InvalidConfig(format!("cannot average time over {count} repetitions"))
    })?;
    Ok(total / count)
}

/// Cartesian grid of configurations.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParameterGrid {
    pub population_sizes: Vec<usize>,
    pub generations: Vec<usize>,
    pub mutation_probabilities: Vec<f64>,
}

impl ParameterGrid {
    /// All combinations, population size outermost and mutation
    /// probability innermost.
    pub fn params(&self) -> impl Iterator<Item = TrialParams> + '_ {
        self.population_sizes.iter().flat_map(move |&population_size| {
            self.generations.iter().flat_map(move |&generations| {
                self.mutation_probabilities
                    .iter()
                    .map(move |&p| TrialParams::new(population_size, generations, p))
            })
        })
    }

    pub fn len(&self) -> usize {
        self.population_sizes.len() * self.generations.len() * self.mutation_probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Runs [`run_trials`] for every configuration of the grid.
pub fn sweep<P, F>(
    factory: F,
    grid: &ParameterGrid,
    repetitions: usize,
    seed: u64,
) -> Result<Vec<TrialSummary>, GaError>
where
    P: Problem,
    F: Fn() -> P,
{
    let mut rows = Vec::with_capacity(grid.len());
    for params in grid.params() {
        let row = run_trials(&factory, &params, repetitions, seed)?;
        tracing::info!(
            population_size = params.population_size,
            generations = params.generations,
            mutation_probability = params.mutation_probability,
            mean_cost = row.mean_cost,
            mean_secs = row.mean_elapsed.as_secs_f64(),
            "sweep row"
        );
        rows.push(row);
    }
    Ok(rows)
}

/// Rows whose mean cost is strictly below `max_mean_cost`.
pub fn best_rows(rows: &[TrialSummary], max_mean_cost: f64) -> Vec<TrialSummary> {
    rows.iter()
        .filter(|row| row.mean_cost < max_mean_cost)
        .cloned()
        .collect()
}

/// Re-runs each row's configuration with `repetitions` searches and keeps
/// those still below `max_mean_cost`.
pub fn confirm<P, F>(
    factory: F,
    rows: &[TrialSummary],
    repetitions: usize,
    max_mean_cost: f64,
    seed: u64,
) -> Result<Vec<TrialSummary>, GaError>
where
    P: Problem,
    F: Fn() -> P,
{
    let mut confirmed = Vec::new();
    for row in rows {
        let rerun = run_trials(&factory, &row.params, repetitions, seed)?;
        if rerun.mean_cost < max_mean_cost {
            confirmed.push(rerun);
        } else {
            tracing::debug!(params = ?row.params, mean_cost = rerun.mean_cost, "row rejected on rerun");
        }
    }
    Ok(confirmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problems::{EndSum, NQueens};

    #[test]
    fn test_run_trial_cost_matches_state() {
        let outcome = run_trial(NQueens::new(6), &TrialParams::new(20, 10, 0.1), 1).unwrap();
        assert_eq!(outcome.state.len(), 6);
        assert_eq!(outcome.cost, NQueens::conflicts(&outcome.state) as f64);
    }

    #[test]
    fn test_run_trial_rejects_bad_probability() {
        let result = run_trial(NQueens::new(6), &TrialParams::new(20, 10, 2.0), 1);
        assert!(matches!(result, Err(GaError::InvalidConfig(_))));
    }

    #[test]
    fn test_run_trials_summary() {
        let params = TrialParams::new(10, 30, 0.1);
        let summary = run_trials(|| EndSum::new(8), &params, 4, 7).unwrap();
        assert_eq!(summary.repetitions, 4);
        assert_eq!(summary.params, params);
        // EndSum never reaches 0.
        assert_eq!(summary.solved, 0);
        assert!(summary.min_cost >= 1.0);
        assert!(summary.mean_cost >= summary.min_cost);
    }

    #[test]
    fn test_run_trials_is_reproducible() {
        let params = TrialParams::new(20, 15, 0.1);
        let a = run_trials(|| NQueens::new(6), &params, 3, 11).unwrap();
        let b = run_trials(|| NQueens::new(6), &params, 3, 11).unwrap();
        assert_eq!(a.mean_cost, b.mean_cost);
        assert_eq!(a.solved, b.solved);
    }

    #[test]
    fn test_run_trials_zero_repetitions() {
        let params = TrialParams::new(10, 5, 0.1);
        assert!(run_trials(|| EndSum::new(5), &params, 0, 1).is_err());
    }

    #[test]
    fn test_mean_duration() {
        assert_eq!(
            mean_duration(Duration::from_millis(900), 3),
            Ok(Duration::from_millis(300))
        );
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_mean_duration_rejects_oversized_count() {
        let count = u32::MAX as usize + 1;
        assert!(matches!(
            mean_duration(Duration::from_secs(1), count),
            Err(GaError::InvalidConfig(_))
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_results_are_serializable() {
        fn assert_serialize<T: serde::Serialize>(_: &T) {}
        let outcome = run_trial(NQueens::new(5), &TrialParams::new(10, 2, 0.1), 1).unwrap();
        assert_serialize(&outcome);
        let summary = run_trials(|| NQueens::new(5), &TrialParams::new(10, 2, 0.1), 2, 1).unwrap();
        assert_serialize(&summary);
    }

    #[test]
    fn test_grid_order() {
        let grid = ParameterGrid {
            population_sizes: vec![10, 20],
            generations: vec![5],
            mutation_probabilities: vec![0.1, 0.2],
        };
        let params: Vec<TrialParams> = grid.params().collect();
        assert_eq!(grid.len(), 4);
        assert_eq!(
            params,
            vec![
                TrialParams::new(10, 5, 0.1),
                TrialParams::new(10, 5, 0.2),
                TrialParams::new(20, 5, 0.1),
                TrialParams::new(20, 5, 0.2),
            ]
        );
        assert!(ParameterGrid::default().is_empty());
    }

    #[test]
    fn test_sweep_and_filter() {
        let grid = ParameterGrid {
            population_sizes: vec![10, 30],
            generations: vec![20],
            mutation_probabilities: vec![0.05, 0.1],
        };
        let rows = sweep(|| NQueens::new(5), &grid, 2, 3).unwrap();
        assert_eq!(rows.len(), 4);

        let kept = best_rows(&rows, 0.5);
        assert!(kept.iter().all(|r| r.mean_cost < 0.5));

        let confirmed = confirm(|| NQueens::new(5), &kept, 3, 0.5, 100).unwrap();
        assert!(confirmed.len() <= kept.len());
        assert!(confirmed.iter().all(|r| r.repetitions == 3 && r.mean_cost < 0.5));
    }

    #[test]
    fn test_summary_display() {
        let summary = TrialSummary {
            params: TrialParams::new(50, 25, 0.1),
            repetitions: 4,
            mean_cost: 0.25,
            min_cost: 0.0,
            mean_elapsed: Duration::from_millis(1500),
            solved: 3,
        };
        let text = summary.to_string();
        assert!(text.contains("population=50"));
        assert!(text.contains("solved=3/4"));
        assert!(text.contains("mean_time=1.500s"));
    }
}
