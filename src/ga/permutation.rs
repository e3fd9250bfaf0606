//! Operators for permutation-encoded chromosomes.
//!
//! [`PermutationGa`] plugs three operators into the generic engine:
//!
//! - **Roulette pair selection**: fitness-proportional, two distinct parents
//! - **Order-preserving crossover**: segment from parent 2, repaired by
//!   positional lookup so no value is duplicated
//! - **Swap mutation**: per-gene swap with a uniformly random position
//!
//! The free functions are public so they can be used and tested on their
//! own, with any [`Rng`].

use super::config::GaConfig;
use super::error::GaError;
use super::runner::GeneticEngine;
use super::types::{Chromosome, GeneticOperators, Individual, Problem};
use rand::Rng;

/// Default per-gene mutation probability.
pub const DEFAULT_MUTATION_PROBABILITY: f64 = 0.01;

const ROUNDING_SLACK: f64 = 1e-9;

/// GA operators tuned for permutation problems (n-queens, TSP, ...).
///
/// # Examples
///
/// ```
/// use u_permga::ga::PermutationGa;
///
/// let ops = PermutationGa::new(0.05).unwrap();
/// assert_eq!(ops.mutation_probability(), 0.05);
/// assert!(PermutationGa::new(1.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PermutationGa {
    mutation_probability: f64,
}

impl Default for PermutationGa {
    fn default() -> Self {
        Self {
            mutation_probability: DEFAULT_MUTATION_PROBABILITY,
        }
    }
}

impl PermutationGa {
    /// Creates the operators with a per-gene swap probability in `[0, 1]`.
    pub fn new(mutation_probability: f64) -> Result<Self, GaError> {
        if !(0.0..=1.0).contains(&mutation_probability) {
            return Err(GaError::InvalidConfig(format!(
                "mutation_probability must be in [0, 1], got {mutation_probability}"
            )));
        }
        Ok(Self {
            mutation_probability,
        })
    }

    pub fn mutation_probability(&self) -> f64 {
        self.mutation_probability
    }
}

impl<G> GeneticOperators<G> for PermutationGa
where
    G: Clone + PartialEq + Send + Sync,
{
    /// Pair selection excludes the first parent from the second draw.
    fn min_population(&self) -> usize {
        2
    }

    fn select<R: Rng>(
        &self,
        population: &[Individual<G>],
        rng: &mut R,
    ) -> Result<Vec<(usize, usize)>, GaError> {
        (0..population.len())
            .map(|_| select_pair(population, rng))
            .collect()
    }

    fn crossover_pair<R: Rng>(
        &self,
        parent1: &[G],
        parent2: &[G],
        rng: &mut R,
    ) -> Result<Chromosome<G>, GaError> {
        order_crossover(parent1, parent2, rng)
    }

    fn mutate<R: Rng>(&self, children: &mut [Chromosome<G>], rng: &mut R) {
        let swaps: usize = children
            .iter_mut()
            .map(|c| swap_mutation(c, self.mutation_probability, rng))
            .sum();
        tracing::trace!(swaps, children = children.len(), "swap mutation applied");
    }
}

impl<P: Problem> GeneticEngine<P, PermutationGa> {
    /// Shorthand for an engine with [`PermutationGa`] operators and an
    /// OS-seeded random source.
    pub fn permutation(
        problem: P,
        population_size: usize,
        mutation_probability: f64,
    ) -> Result<Self, GaError> {
        Self::new(
            problem,
            PermutationGa::new(mutation_probability)?,
            GaConfig::default().with_population_size(population_size),
        )
    }
}

// ============================================================================
// Selection
// ============================================================================

/// Fitness-proportional (roulette wheel) selection of one index.
///
/// Draws `u` uniformly from `[0, 1)` and returns the first index whose
/// cumulative normalized fitness reaches `u`.
///
/// # Errors
///
/// [`GaError::EmptyPopulation`] for an empty slice, and
/// [`GaError::RouletteExhausted`] if the cumulative shares never reach
/// the draw (zero or non-finite total fitness). A draw that falls in the
/// rounding gap just below 1.0 goes to the last individual with positive
/// fitness.
pub fn roulette<G, R: Rng>(population: &[Individual<G>], rng: &mut R) -> Result<usize, GaError> {
    spin(population.iter().map(|ind| ind.fitness), rng)
}

fn spin<I, R>(fitnesses: I, rng: &mut R) -> Result<usize, GaError>
where
    I: Iterator<Item = f64> + Clone,
    R: Rng,
{
    if fitnesses.clone().next().is_none() {
        return Err(GaError::EmptyPopulation);
    }
    let total: f64 = fitnesses.clone().sum();
    let draw: f64 = rng.random();
    let mut cumulative = 0.0;
    let mut last_positive = None;
    for (i, fitness) in fitnesses.enumerate() {
        cumulative += fitness / total;
        if fitness > 0.0 {
            last_positive = Some(i);
        }
        if draw <= cumulative {
            return Ok(i);
        }
    }
    // Rounding can leave the cumulative sum a few ulps short of 1.0.
    match last_positive {
        Some(i) if 1.0 - cumulative <= ROUNDING_SLACK => Ok(i),
        _ => Err(GaError::RouletteExhausted),
    }
}

/// Selects one mating pair `(i, j)` with `i != j`.
///
/// `i` is drawn over the whole population, `j` over the population without
/// `i`, then mapped back to the original indices.
pub fn select_pair<G, R: Rng>(
    population: &[Individual<G>],
    rng: &mut R,
) -> Result<(usize, usize), GaError> {
    let i = roulette(population, rng)?;
    let rest = population
        .iter()
        .enumerate()
        .filter(move |&(k, _)| k != i)
        .map(|(_, ind)| ind.fitness);
    let j = spin(rest, rng)?;
    Ok((i, if j < i { j } else { j + 1 }))
}

// ============================================================================
// Crossover
// ============================================================================

/// Order-preserving crossover with random cut points.
///
/// Draws `c1` from `[0, len)` and `c2` from `[c1 + 1, len]`, then delegates
/// to [`order_crossover_with_cuts`]. Empty parents yield an empty child.
pub fn order_crossover<G, R>(
    parent1: &[G],
    parent2: &[G],
    rng: &mut R,
) -> Result<Chromosome<G>, GaError>
where
    G: Clone + PartialEq,
    R: Rng,
{
    let len = parent1.len();
    if parent2.len() != len {
        return Err(GaError::LengthMismatch {
            expected: len,
            found: parent2.len(),
        });
    }
    if len == 0 {
        return Ok(Vec::new());
    }
    let c1 = rng.random_range(0..len);
    let c2 = rng.random_range(c1 + 1..=len);
    order_crossover_with_cuts(parent1, parent2, c1, c2)
}

/// Order-preserving crossover with fixed cut points.
///
/// The child starts as a copy of `parent1`. Genes outside `[c1, c2)` are
/// protected. Each position inside the segment takes `parent2`'s gene; a
/// gene that already sits in the protected part is replaced by following
/// `parent2[position of gene in parent1]` until the value is free.
///
/// Both parents must be permutations of the same value set.
///
/// # Examples
///
/// ```
/// use u_permga::ga::order_crossover_with_cuts;
///
/// let child = order_crossover_with_cuts(&[0, 1, 2, 3, 4], &[2, 0, 4, 1, 3], 1, 4).unwrap();
/// assert_eq!(child, vec![0, 2, 3, 1, 4]);
/// ```
pub fn order_crossover_with_cuts<G>(
    parent1: &[G],
    parent2: &[G],
    c1: usize,
    c2: usize,
) -> Result<Chromosome<G>, GaError>
where
    G: Clone + PartialEq,
{
    let len = parent1.len();
    if parent2.len() != len {
        return Err(GaError::LengthMismatch {
            expected: len,
            found: parent2.len(),
        });
    }
    if c1 >= c2 || c2 > len {
        return Err(GaError::InvalidCutPoints { c1, c2, len });
    }

    let is_protected = |gene: &G| parent1[..c1].contains(gene) || parent1[c2..].contains(gene);

    let mut child = parent1.to_vec();
    for i in c1..c2 {
        let mut gene = &parent2[i];
        let mut hops = 0;
        while is_protected(gene) {
            // Each hop lands on a distinct position outside the segment.
            hops += 1;
            if hops > len {
                return Err(GaError::NotAPermutation);
            }
            let pos = parent1
                .iter()
                .position(|v| v == gene)
                .ok_or(GaError::NotAPermutation)?;
            gene = &parent2[pos];
        }
        child[i] = gene.clone();
    }
    Ok(child)
}

// ============================================================================
// Mutation
// ============================================================================

/// Swap mutation in place.
///
/// Every position is, with `probability`, swapped with a uniformly random
/// position of the same chromosome (possibly itself). Returns the number of
/// swap attempts.
pub fn swap_mutation<G, R: Rng>(chromosome: &mut [G], probability: f64, rng: &mut R) -> usize {
    let len = chromosome.len();
    let mut attempts = 0;
    for i in 0..len {
        if rng.random::<f64>() < probability {
            let k = rng.random_range(0..len);
            chromosome.swap(i, k);
            attempts += 1;
        }
    }
    attempts
}

// ============================================================================
// Tests
// ============================================================================
