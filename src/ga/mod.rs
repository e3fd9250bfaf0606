//! Genetic Algorithm engine.
//!
//! A generic generational GA built on trait-based abstractions. Users
//! describe their problem by implementing [`Problem`] (random state and
//! cost). The evolutionary mechanics are split between the generic
//! [`GeneticEngine`] and a set of [`GeneticOperators`].
//!
//! # Core Traits
//!
//! - [`Problem`]: random state generation and cost evaluation
//! - [`GeneticOperators`]: selection, single-pair crossover, mutation,
//!   state/chromosome encoding
//!
//! # Key Types
//!
//! - [`GaConfig`]: engine parameters (population size, seed, parallelism)
//! - [`GeneticEngine`]: runs the generational loop with elitist replacement
//! - [`PermutationGa`]: roulette selection, order-preserving crossover and
//!   swap mutation for permutation chromosomes
//! - [`GaError`]: contract, invariant and parameter violations
//!
//! # Fitness
//!
//! Fitness is `1 / (1 + cost)`: higher is better, and costs must be
//! non-negative.
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Goldberg & Lingle (1985), "Alleles, Loci, and the Traveling Salesman Problem"

mod config;
mod error;
mod permutation;
mod runner;
mod types;

pub use config::GaConfig;
pub use error::GaError;
pub use permutation::{
    order_crossover, order_crossover_with_cuts, roulette, select_pair, swap_mutation,
    PermutationGa, DEFAULT_MUTATION_PROBABILITY,
};
pub use runner::GeneticEngine;
pub use types::{fitness_from_cost, Chromosome, GeneticOperators, Individual, Problem, State};
