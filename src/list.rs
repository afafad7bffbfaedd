use std::fmt;
use std::ops::Index;

use rand::Rng;

use crate::error::WeightError;
use crate::policy::WeightPolicy;
use crate::random::{RandomState, Xorshift32};
use crate::walker::AliasTable;

/// A mutable collection of items with positive integer weights, sampled in
/// O(1) through an [`AliasTable`].
///
/// Every successful mutation rebuilds the table before returning, so the list
/// is always ready to sample. Indices shift on insert and remove; look items up
/// again by value after mutating rather than holding on to an index.
#[derive(Debug, Clone)]
pub struct WeightedList<T> {
    items: Vec<T>,
    weights: Vec<u32>,
    table: AliasTable,
    policy: WeightPolicy,
    rng: Xorshift32,
}

/// Configuration for a [`WeightedList`]: weight policy and random source.
#[derive(Debug, Clone, Default)]
pub struct WeightedListBuilder {
    policy: WeightPolicy,
    rng: Xorshift32,
}

impl WeightedListBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn policy(mut self, policy: WeightPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Use a random source with this seed and cursor.
    pub fn seed(mut self, seed: u32, state: u32) -> Self {
        self.rng = Xorshift32::new(seed, state);
        self
    }

    pub fn random_state(mut self, snapshot: RandomState) -> Self {
        self.rng = snapshot.into();
        self
    }

    /// An empty list.
    pub fn build<T>(self) -> WeightedList<T> {
        WeightedList {
            items: Vec::new(),
            weights: Vec::new(),
            table: AliasTable::default(),
            policy: self.policy,
            rng: self.rng,
        }
    }

    /// A list holding `pairs`, built with a single table pass.
    ///
    /// # Errors
    /// [`WeightError::InvalidWeight`] under [`WeightPolicy::RejectOnAdd`] if any
    /// weight is `<= 0`.
    pub fn build_from<T, I>(self, pairs: I) -> Result<WeightedList<T>, WeightError>
    where
        I: IntoIterator<Item = (T, i32)>,
    {
        let mut list = self.build();
        list.add_all(pairs)?;
        Ok(list)
    }
}

impl<T> WeightedList<T> {
    /// Empty list, [`WeightPolicy::ClampToOne`], default random source.
    pub fn new() -> Self {
        WeightedListBuilder::new().build()
    }

    /// Empty list drawing from a random source with the given seed and cursor.
    pub fn with_seed(seed: u32, state: u32) -> Self {
        WeightedListBuilder::new().seed(seed, state).build()
    }

    /// Bulk-load `pairs` with [`WeightPolicy::ClampToOne`]; one table build.
    pub fn from_pairs<I>(pairs: I, seed: u32, state: u32) -> Self
    where
        I: IntoIterator<Item = (T, i32)>,
    {
        let mut list = Self::with_seed(seed, state);
        for (item, weight) in pairs {
            list.items.push(item);
            list.weights.push(weight.max(1) as u32);
        }
        list.rebuild();
        list
    }

    // ----- sampling -----

    /// Draw an item by reference, advancing the owned random source.
    /// `None` only when the list is empty.
    pub fn sample(&mut self) -> Option<&T> {
        let i = self.table.sample_index(&mut self.rng)?;
        Some(&self.items[i])
    }

    /// Draw an item by value (clones the chosen element).
    pub fn sample_owned(&mut self) -> Option<T>
    where
        T: Clone,
    {
        self.sample().cloned()
    }

    /// Draw with an external generator; the owned cursor is not touched.
    pub fn sample_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&T> {
        let i = self.table.sample_index(rng)?;
        Some(&self.items[i])
    }

    // ----- mutation -----

    /// Append an item.
    pub fn add(&mut self, item: T, weight: i32) -> Result<(), WeightError> {
        let weight = self.policy.normalize(weight)?;
        self.items.push(item);
        self.weights.push(weight);
        self.rebuild();
        Ok(())
    }

    /// Append every pair, rebuilding once. Under
    /// [`WeightPolicy::RejectOnAdd`] one bad weight rejects the whole batch.
    pub fn add_all<I>(&mut self, pairs: I) -> Result<(), WeightError>
    where
        I: IntoIterator<Item = (T, i32)>,
    {
        let mut items = Vec::new();
        let mut weights = Vec::new();
        for (item, weight) in pairs {
            weights.push(self.policy.normalize(weight)?);
            items.push(item);
        }
        self.items.append(&mut items);
        self.weights.append(&mut weights);
        self.rebuild();
        Ok(())
    }

    /// Insert at `index` (`0..=len`), shifting later entries right.
    pub fn insert(&mut self, index: usize, item: T, weight: i32) -> Result<(), WeightError> {
        if index > self.len() {
            return Err(self.out_of_range(index));
        }
        let weight = self.policy.normalize(weight)?;
        self.items.insert(index, item);
        self.weights.insert(index, weight);
        self.rebuild();
        Ok(())
    }

    /// Remove and return the entry at `index`.
    pub fn remove_at(&mut self, index: usize) -> Result<(T, u32), WeightError> {
        if index >= self.len() {
            return Err(self.out_of_range(index));
        }
        let item = self.items.remove(index);
        let weight = self.weights.remove(index);
        self.rebuild();
        Ok((item, weight))
    }

    pub fn set_weight_at(&mut self, index: usize, weight: i32) -> Result<(), WeightError> {
        if index >= self.len() {
            return Err(self.out_of_range(index));
        }
        self.weights[index] = self.policy.normalize(weight)?;
        self.rebuild();
        Ok(())
    }

    /// Give every entry the same weight.
    pub fn set_weight_of_all(&mut self, weight: i32) -> Result<(), WeightError> {
        let weight = self.policy.normalize(weight)?;
        self.weights.fill(weight);
        self.rebuild();
        Ok(())
    }

    /// Add `delta` to every weight. Results are normalized through the policy;
    /// under [`WeightPolicy::RejectOnAdd`] nothing changes if any would be `<= 0`.
    pub fn add_weight_to_all(&mut self, delta: i32) -> Result<(), WeightError> {
        let shifted = self
            .weights
            .iter()
            .map(|&w| self.policy.normalize((w as i32).saturating_add(delta)))
            .collect::<Result<Vec<_>, _>>()?;
        self.weights = shifted;
        self.rebuild();
        Ok(())
    }

    pub fn subtract_weight_from_all(&mut self, delta: i32) -> Result<(), WeightError> {
        self.add_weight_to_all(delta.saturating_neg())
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.weights.clear();
        self.rebuild();
    }

    // ----- introspection -----

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_weight(&self) -> u64 {
        self.table.total_weight()
    }

    /// Smallest stored weight, `0` when empty.
    pub fn min_weight(&self) -> u32 {
        self.table.min_weight()
    }

    /// Largest stored weight, `0` when empty.
    pub fn max_weight(&self) -> u32 {
        self.table.max_weight()
    }

    pub fn policy(&self) -> WeightPolicy {
        self.policy
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn weight_at(&self, index: usize) -> Result<u32, WeightError> {
        self.weights
            .get(index)
            .copied()
            .ok_or_else(|| self.out_of_range(index))
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn weights(&self) -> &[u32] {
        &self.weights
    }

    /// `(item, weight)` pairs in list order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, u32)> + '_ {
        self.items.iter().zip(self.weights.iter().copied())
    }

    pub fn table(&self) -> &AliasTable {
        &self.table
    }

    pub fn random_state(&self) -> RandomState {
        self.rng.snapshot()
    }

    /// Rewind or fast-forward the owned random source to `snapshot`.
    pub fn restore_random_state(&mut self, snapshot: RandomState) {
        self.rng.restore(snapshot);
    }

    fn rebuild(&mut self) {
        self.table = AliasTable::new(&self.weights);
    }

    fn out_of_range(&self, index: usize) -> WeightError {
        WeightError::IndexOutOfRange {
            index,
            len: self.len(),
        }
    }
}

impl<T: PartialEq> WeightedList<T> {
    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.items.iter().position(|x| x == item)
    }

    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    /// Remove the first entry equal to `item`, returning its weight.
    pub fn remove(&mut self, item: &T) -> Result<u32, WeightError> {
        let index = self.index_of(item).ok_or(WeightError::NotFound)?;
        self.remove_at(index).map(|(_, weight)| weight)
    }

    /// Reweight the first entry equal to `item`.
    pub fn set_weight(&mut self, item: &T, weight: i32) -> Result<(), WeightError> {
        let index = self.index_of(item).ok_or(WeightError::NotFound)?;
        self.set_weight_at(index, weight)
    }

    pub fn weight_of(&self, item: &T) -> Result<u32, WeightError> {
        let index = self.index_of(item).ok_or(WeightError::NotFound)?;
        self.weight_at(index)
    }
}

impl<T> Default for WeightedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for WeightedList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<'a, T> IntoIterator for &'a WeightedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Collects with [`WeightPolicy::ClampToOne`] and the default random source.
impl<T> FromIterator<(T, i32)> for WeightedList<T> {
    fn from_iter<I: IntoIterator<Item = (T, i32)>>(iter: I) -> Self {
        let rng = Xorshift32::default();
        Self::from_pairs(iter, rng.seed(), rng.state())
    }
}

/// Diagnostic dump, e.g. `WeightedList<&str>: TotalWeight:4, Min:1, Max:3, Count:2, {a:1, b:3}`.
/// Not a stable format.
impl<T: fmt::Display> fmt::Display for WeightedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "WeightedList<{}>: TotalWeight:{}, Min:{}, Max:{}, Count:{}, {{",
            std::any::type_name::<T>(),
            self.total_weight(),
            self.min_weight(),
            self.max_weight(),
            self.len()
        )?;
        for (i, (item, weight)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{item}:{weight}")?;
        }
        f.write_str("}")
    }
}
