//! Core trait definitions for the GA engine.
//!
//! [`Problem`] is the contract with the outside world (random states and
//! their cost). [`GeneticOperators`] holds the hooks that a specialization
//! fills in: selection, single-pair crossover, and mutation, plus the
//! state/chromosome encoding.

use super::error::GaError;
use rand::Rng;

/// Problem-native candidate solution. Immutable once produced.
pub type State<G> = Box<[G]>;

/// Encoded, mutable form of a [`State`] used inside the engine.
pub type Chromosome<G> = Vec<G>;

/// An optimization problem over fixed-length sequences of genes.
///
/// # Implementing
///
/// ```
/// use rand::Rng;
/// use rand::seq::SliceRandom;
/// use u_permga::ga::{Problem, State};
///
/// struct Reversed(usize);
///
/// impl Problem for Reversed {
///     type Gene = usize;
///
///     fn random_state<R: Rng>(&self, rng: &mut R) -> State<usize> {
///         let mut v: Vec<usize> = (0..self.0).collect();
///         v.shuffle(rng);
///         v.into_boxed_slice()
///     }
///
///     fn cost(&self, state: &[usize]) -> f64 {
///         state.windows(2).filter(|w| w[0] < w[1]).count() as f64
///     }
/// }
/// ```
///
/// # Thread Safety
///
/// `Problem` must be `Send + Sync` because fitness evaluation may run in
/// parallel when the `parallel` feature is enabled.
pub trait Problem: Send + Sync {
    /// Gene / domain value type.
    type Gene: Clone + PartialEq + std::fmt::Debug + Send + Sync;

    /// Returns a state drawn uniformly over the whole state space.
    fn random_state<R: Rng>(&self, rng: &mut R) -> State<Self::Gene>;

    /// Cost of a state. Lower is better; must be non-negative and
    /// deterministic.
    fn cost(&self, state: &[Self::Gene]) -> f64;
}

/// A member of the population: a chromosome paired with its fitness.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Individual<G> {
    /// `1 / (1 + cost)`; higher is better.
    pub fitness: f64,
    pub chromosome: Chromosome<G>,
}

impl<G> Individual<G> {
    pub fn new(fitness: f64, chromosome: Chromosome<G>) -> Self {
        Self {
            fitness,
            chromosome,
        }
    }

    /// Recovers the cost the fitness was computed from.
    pub fn cost(&self) -> f64 {
        1.0 / self.fitness - 1.0
    }
}

/// Converts a non-negative cost into a fitness in `(0, 1]`.
///
/// Returns [`GaError::NegativeCost`] for negative or NaN costs. An infinite
/// cost maps to fitness 0.
pub fn fitness_from_cost(cost: f64) -> Result<f64, GaError> {
    if cost.is_nan() || cost < 0.0 {
        return Err(GaError::NegativeCost { cost });
    }
    Ok(1.0 / (1.0 + cost))
}

/// The specialization hooks of the generic engine.
///
/// The engine drives the generational loop; implementors decide how
/// parents are paired, how two parents make a child, and how children are
/// perturbed.
pub trait GeneticOperators<G: Clone>: Send + Sync {
    /// Smallest population the operators can work with.
    fn min_population(&self) -> usize {
        1
    }

    /// Converts a problem state into a chromosome. Identity by default.
    fn encode(&self, state: State<G>) -> Chromosome<G> {
        state.into_vec()
    }

    /// Converts a chromosome back into a problem state. Identity by default.
    fn decode(&self, chromosome: &[G]) -> State<G> {
        chromosome.to_vec().into_boxed_slice()
    }

    /// Returns exactly `population.len()` index pairs into `population`,
    /// one per reproduction slot.
    fn select<R: Rng>(
        &self,
        population: &[Individual<G>],
        rng: &mut R,
    ) -> Result<Vec<(usize, usize)>, GaError>;

    /// Combines two parents into one child of the same length.
    fn crossover_pair<R: Rng>(
        &self,
        parent1: &[G],
        parent2: &[G],
        rng: &mut R,
    ) -> Result<Chromosome<G>, GaError>;

    /// Mutates a batch of children in place. Must preserve lengths.
    fn mutate<R: Rng>(&self, children: &mut [Chromosome<G>], rng: &mut R);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fitness_from_cost() {
        assert_eq!(fitness_from_cost(0.0), Ok(1.0));
        assert_eq!(fitness_from_cost(1.0), Ok(0.5));
        assert_eq!(fitness_from_cost(f64::INFINITY), Ok(0.0));
    }

    #[test]
    fn test_fitness_rejects_negative_and_nan() {
        assert_eq!(
            fitness_from_cost(-1.0),
            Err(GaError::NegativeCost { cost: -1.0 })
        );
        assert!(fitness_from_cost(f64::NAN).is_err());
    }

    #[test]
    fn test_individual_cost_roundtrip() {
        let ind = Individual::new(fitness_from_cost(3.0).unwrap(), vec![0usize, 1, 2]);
        assert!((ind.cost() - 3.0).abs() < 1e-12);
    }
}
