//! Reference problems.
//!
//! Small permutation problems used to exercise the GA: [`NQueens`] and the
//! toy [`EndSum`]. Both draw states as uniformly shuffled permutations of
//! `0..n`.

mod end_sum;
mod n_queens;

pub use end_sum::EndSum;
pub use n_queens::NQueens;

use rand::seq::SliceRandom;
use rand::Rng;

/// A uniformly random permutation of `0..n`.
pub(crate) fn random_permutation<R: Rng>(n: usize, rng: &mut R) -> Box<[usize]> {
    let mut perm: Vec<usize> = (0..n).collect();
    perm.shuffle(rng);
    perm.into_boxed_slice()
}
