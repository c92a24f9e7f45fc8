//! Small shared helpers for permutations and random draws.

use rand::seq::SliceRandom;
use rand::Rng;

/// Returns a uniformly random permutation of `0..n`.
pub fn random_permutation<R: Rng>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..n).collect();
    perm.shuffle(rng);
    perm
}

/// Draws a uniform value from `0..bound` that differs from `forbidden`.
///
/// If `forbidden` lies outside `0..bound` the draw is unconstrained.
/// `bound` must be at least 2 whenever `forbidden` is in range.
pub fn random_unequal<R: Rng>(bound: usize, forbidden: usize, rng: &mut R) -> usize {
    if forbidden >= bound {
        return rng.gen_range(0..bound);
    }
    let draw = rng.gen_range(0..bound - 1);
    if draw >= forbidden {
        draw + 1
    } else {
        draw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn permutation_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let perm = random_permutation(25, &mut rng);
        let mut seen = vec![false; 25];
        for &p in &perm {
            assert!(!seen[p]);
            seen[p] = true;
        }
    }

    #[test]
    fn unequal_draw_avoids_forbidden() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let v = random_unequal(4, 2, &mut rng);
            assert!(v < 4 && v != 2);
        }
        // out-of-range forbidden value leaves the draw unconstrained
        for _ in 0..50 {
            assert!(random_unequal(3, usize::MAX, &mut rng) < 3);
        }
    }

}
