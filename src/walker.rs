//! Walker's Alias Method (Vose's variant) over integer weights.
//!
//! Every bucket holds `total_weight` units of mass. Scaling each weight by `n`
//! makes the per-bucket threshold an exact integer, so the build never touches
//! floating point and needs no rounding fix-ups.

use rand::Rng;

/// Alias table for discrete distribution sampling.
///
/// `probabilities[i]` is the share of bucket `i` (out of `total_weight`) that
/// stays with index `i`; the rest goes to `aliases[i]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    probabilities: Vec<u64>,
    aliases: Vec<usize>,
    total_weight: u64,
    min_weight: u32,
    max_weight: u32,
    uniform: bool,
}

impl AliasTable {
    /// Construct an alias table from positive weights. O(n).
    ///
    /// An empty slice gives an empty table. If every weight is the same the
    /// table is marked uniform and the bucket thresholds are left unused.
    pub fn new(weights: &[u32]) -> Self {
        let n = weights.len();
        let Some(&first) = weights.first() else {
            return Self::default();
        };

        let mut total_weight = 0u64;
        let (mut min_weight, mut max_weight) = (first, first);
        for &w in weights {
            total_weight += u64::from(w);
            min_weight = min_weight.min(w);
            max_weight = max_weight.max(w);
        }

        let mut probabilities = vec![0u64; n];
        let mut aliases = (0..n).collect::<Vec<_>>();

        if min_weight == max_weight {
            log::trace!("rebuilt alias table: n={n} total={total_weight} uniform");
            return Self {
                probabilities,
                aliases,
                total_weight,
                min_weight,
                max_weight,
                uniform: true,
            };
        }

        let mut scaled: Vec<u64> = weights.iter().map(|&w| u64::from(w) * n as u64).collect();

        let mut small = Vec::with_capacity(n);
        let mut large = Vec::with_capacity(n);

        for (i, &s) in scaled.iter().enumerate() {
            if s < total_weight {
                small.push(i);
            } else {
                large.push(i);
            }
        }

        while let Some((l, g)) = pop_small_large_pair(&mut small, &mut large) {
            probabilities[l] = scaled[l];
            aliases[l] = g;

            // scaled[l] < total_weight <= scaled[g], so this cannot underflow.
            scaled[g] = scaled[g] + scaled[l] - total_weight;

            if scaled[g] < total_weight {
                small.push(g);
            } else {
                large.push(g);
            }
        }

        for g in large {
            probabilities[g] = total_weight;
        }
        // Exact arithmetic leaves `small` empty here. Should it ever hold an
        // index, that bucket keeps `aliases[i] == i` and still samples itself.

        log::trace!(
            "rebuilt alias table: n={n} total={total_weight} min={min_weight} max={max_weight}"
        );

        Self {
            probabilities,
            aliases,
            total_weight,
            min_weight,
            max_weight,
            uniform: false,
        }
    }

    /// Draw a single index in O(1), or `None` for an empty table.
    #[inline]
    pub fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        let n = self.probabilities.len();
        if n == 0 {
            return None;
        }
        let i = rng.random_range(0..n);
        if self.uniform {
            return Some(i);
        }
        let r = rng.random_range(0..self.total_weight);
        Some(if r < self.probabilities[i] { i } else { self.aliases[i] })
    }

    /// Draw k samples, returning counts per index (useful for checks).
    #[cfg(test)]
    pub fn sample_counts<R: Rng + ?Sized>(&self, rng: &mut R, draws: usize) -> Vec<usize> {
        let mut counts = vec![0usize; self.len()];
        for _ in 0..draws {
            if let Some(i) = self.sample_index(rng) {
                counts[i] += 1;
            }
        }
        counts
    }

    pub fn probabilities(&self) -> &[u64] {
        &self.probabilities
    }

    pub fn aliases(&self) -> &[usize] {
        &self.aliases
    }

    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    /// Smallest weight, `0` when empty.
    pub fn min_weight(&self) -> u32 {
        self.min_weight
    }

    /// Largest weight, `0` when empty.
    pub fn max_weight(&self) -> u32 {
        self.max_weight
    }

    /// All weights equal: sampling skips the thresholds and picks uniformly.
    pub fn is_uniform(&self) -> bool {
        self.uniform
    }

    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }
}

/// Pop one index from each pile, or neither if either pile is empty.
fn pop_small_large_pair(small: &mut Vec<usize>, large: &mut Vec<usize>) -> Option<(usize, usize)> {
    if small.is_empty() || large.is_empty() {
        return None;
    }
    Some((small.pop()?, large.pop()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::{SeedableRng, rngs::StdRng};

    /// Mass each index ends up with: its own threshold plus whatever other
    /// buckets route to it. Must equal `weight * n` for every index.
    fn routed_mass(table: &AliasTable) -> Vec<u64> {
        let total = table.total_weight();
        let mut mass = table.probabilities().to_vec();
        for (i, (&p, &a)) in table.probabilities().iter().zip(table.aliases()).enumerate() {
            if a != i {
                mass[a] += total - p;
            }
        }
        mass
    }

    #[test]
    fn empty_weights_give_empty_table() {
        let t = AliasTable::new(&[]);
        assert!(t.is_empty());
        assert_eq!(t.total_weight(), 0);
        assert_eq!((t.min_weight(), t.max_weight()), (0, 0));
        assert_eq!(t.sample_index(&mut StdRng::seed_from_u64(1)), None);
    }

    #[test]
    fn worked_example_one_three() {
        let t = AliasTable::new(&[1, 3]);
        assert_eq!(t.total_weight(), 4);
        assert!(!t.is_uniform());
        // A: scaled 2, aliased to B. B: 6 + 2 - 4 = 4, a full bucket.
        assert_eq!(t.probabilities(), &[2, 4]);
        assert_eq!(t.aliases(), &[1, 1]);
    }

    #[test]
    fn equal_weights_take_uniform_path() {
        let t = AliasTable::new(&[5, 5, 5]);
        assert!(t.is_uniform());
        assert_eq!(t.len(), 3);
        assert_eq!(t.total_weight(), 15);
        assert_eq!((t.min_weight(), t.max_weight()), (5, 5));
    }

    #[test]
    fn degenerate_singleton() {
        let t = AliasTable::new(&[9]);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            assert_eq!(t.sample_index(&mut rng), Some(0));
        }
    }

    #[test]
    fn roughly_matches_distribution() {
        let weights = [1u32, 2, 3, 4, 10];
        let table = AliasTable::new(&weights);

        let mut rng = StdRng::seed_from_u64(42);
        let draws = 100_000usize;
        let counts = table.sample_counts(&mut rng, draws);

        let sum_w: u32 = weights.iter().sum();
        for (i, &c) in counts.iter().enumerate() {
            let p = f64::from(weights[i]) / f64::from(sum_w);
            let emp = c as f64 / draws as f64;
            assert!((emp - p).abs() < 0.02, "i={i} emp={emp} p={p}");
        }
    }

    proptest! {
        #[test]
        fn conserves_mass(weights in prop::collection::vec(1u32..10_000, 1..64)) {
            let table = AliasTable::new(&weights);
            let n = weights.len() as u64;
            let total: u64 = weights.iter().map(|&w| u64::from(w)).sum();
            prop_assert_eq!(table.total_weight(), total);
            prop_assert_eq!(table.len(), weights.len());
            prop_assert_eq!(table.aliases().len(), weights.len());

            if table.is_uniform() {
                prop_assert!(weights.iter().all(|&w| w == weights[0]));
            } else {
                prop_assert!(table.probabilities().iter().all(|&p| p <= total));
                let mass = routed_mass(&table);
                for (i, &w) in weights.iter().enumerate() {
                    prop_assert_eq!(mass[i], u64::from(w) * n, "index {}", i);
                }
                prop_assert_eq!(mass.iter().sum::<u64>(), n * total);
            }
        }
    }
}
