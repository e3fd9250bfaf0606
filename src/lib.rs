//! Genetic algorithm framework for permutation-encoded problems.
//!
//! - **Genetic Algorithm (GA)**: a generic generational engine with
//!   elitist replacement, parameterized by pluggable selection, crossover,
//!   and mutation operators.
//! - **Permutation operators**: roulette pair selection, order-preserving
//!   crossover, and swap mutation that keep every chromosome a valid
//!   permutation.
//! - **Reference problems**: n-queens and a toy end-sum problem.
//! - **Experiments**: timed repeated trials and parameter sweeps.
//!
//! # Quick start
//!
//! ```
//! use u_permga::ga::{GaConfig, GeneticEngine, PermutationGa, Problem};
//! use u_permga::problems::NQueens;
//!
//! let config = GaConfig::default().with_population_size(50).with_seed(1);
//! let mut engine = GeneticEngine::new(NQueens::new(8), PermutationGa::new(0.1)?, config)?;
//! let solution = engine.search(25)?;
//! assert!(NQueens::new(8).cost(&solution) >= 0.0);
//! # Ok::<(), u_permga::ga::GaError>(())
//! ```
//!
//! # Architecture
//!
//! Randomness is always an explicit, seedable generator owned by the
//! engine. Problems are pure: they only produce random states and score
//! them.

pub mod experiment;
pub mod ga;
pub mod problems;
