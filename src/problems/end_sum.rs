use super::random_permutation;
use crate::ga::{Problem, State};
use rand::Rng;

/// Toy problem for sanity checks: the cost of a permutation of `0..n` is
/// its first plus its last element. Optimal states put 0 and 1 at the ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EndSum {
    pub n: usize,
}

impl EndSum {
    pub fn new(n: usize) -> Self {
        Self { n }
    }
}

impl Problem for EndSum {
    type Gene = usize;

    fn random_state<R: Rng>(&self, rng: &mut R) -> State<usize> {
        random_permutation(self.n, rng)
    }

    fn cost(&self, state: &[usize]) -> f64 {
        match (state.first(), state.last()) {
            (Some(first), Some(last)) => (first + last) as f64,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost() {
        let p = EndSum::new(5);
        assert_eq!(p.cost(&[0, 2, 3, 4, 1]), 1.0);
        assert_eq!(p.cost(&[4, 0, 1, 2, 3]), 7.0);
        assert_eq!(p.cost(&[]), 0.0);
    }
}
