//! Error taxonomy for the GA engine.
//!
//! Every variant is a broken contract: a bad parameter, a misbehaving
//! problem implementation, or an operator that violated its invariants.
//! None of them are transient, so nothing in the engine retries.

/// Errors raised by the GA engine and its operators.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GaError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("problem returned an invalid cost: {cost} (must be >= 0)")]
    NegativeCost { cost: f64 },

    #[error("chromosome length mismatch: expected {expected}, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("mating pair {pair:?} out of range for population of {population_size}")]
    PairOutOfRange {
        pair: (usize, usize),
        population_size: usize,
    },

    #[error("selection produced {found} pairs, expected {expected}")]
    SelectionCount { expected: usize, found: usize },

    #[error("invalid cut points c1={c1}, c2={c2} for chromosome of length {len}")]
    InvalidCutPoints { c1: usize, c2: usize, len: usize },

    #[error("parents are not permutations of the same value set")]
    NotAPermutation,

    #[error("roulette selection did not land on any index")]
    RouletteExhausted,

    #[error("cannot select from an empty population")]
    EmptyPopulation,
}
