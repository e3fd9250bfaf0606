//! The n-queens problem on a permutation encoding.

use super::random_permutation;
use crate::ga::{Problem, State};
use rand::Rng;

/// `n` queens, one per column; `state[i]` is the row of the queen in
/// column `i`. A permutation never has row or column clashes, so the cost
/// counts diagonal conflicts only.
///
/// ```
/// use u_permga::ga::Problem;
/// use u_permga::problems::NQueens;
///
/// let q = NQueens::new(4);
/// assert_eq!(q.cost(&[1, 3, 0, 2]), 0.0);
/// assert_eq!(q.cost(&[0, 1, 2, 3]), 6.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NQueens {
    pub n: usize,
}

impl NQueens {
    pub fn new(n: usize) -> Self {
        Self { n }
    }

    /// Number of queen pairs sharing a diagonal.
    pub fn conflicts(state: &[usize]) -> usize {
        let mut conflicts = 0;
        for i in 0..state.len() {
            for j in i + 1..state.len() {
                if state[i].abs_diff(state[j]) == j - i {
                    conflicts += 1;
                }
            }
        }
        conflicts
    }
}

impl Default for NQueens {
    fn default() -> Self {
        Self::new(8)
    }
}

impl Problem for NQueens {
    type Gene = usize;

    fn random_state<R: Rng>(&self, rng: &mut R) -> State<usize> {
        random_permutation(self.n, rng)
    }

    fn cost(&self, state: &[usize]) -> f64 {
        Self::conflicts(state) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_known_solution_has_no_conflicts() {
        let q = NQueens::default();
        assert_eq!(q.cost(&[0, 4, 7, 5, 2, 6, 1, 3]), 0.0);
    }

    #[test]
    fn test_diagonal_conflicts() {
        // Every pair on the main diagonal: C(5, 2).
        assert_eq!(NQueens::conflicts(&[0, 1, 2, 3, 4]), 10);
        assert_eq!(NQueens::conflicts(&[4, 3, 2, 1, 0]), 10);
        assert_eq!(NQueens::conflicts(&[1, 0]), 1);
        assert_eq!(NQueens::conflicts(&[]), 0);
    }

    #[test]
    fn test_random_state_is_permutation() {
        let q = NQueens::new(12);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let mut s = q.random_state(&mut rng).into_vec();
            s.sort_unstable();
            assert_eq!(s, (0..12).collect::<Vec<_>>());
        }
    }
}
