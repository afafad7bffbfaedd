//! # weightedlist
//!
//! A mutable weighted list with O(1) random selection.
//!
//! Items carry positive integer weights and are drawn with probability
//! `weight / total_weight` using
//! [Vose's alias method](https://www.keithschwarz.com/darts-dice-coins/).
//! The alias table is built with integer arithmetic only, so there is no
//! floating-point drift no matter how often the list changes.
//!
//! ## Quick start
//!
//! ```rust
//! use weightedlist::WeightedList;
//!
//! let mut loot = WeightedList::from_pairs(
//!     [("common", 60), ("uncommon", 30), ("rare", 9), ("legendary", 1)],
//!     1,
//!     0x5eed,
//! );
//!
//! let tier = loot.sample(); // Option<&&str>
//! assert!(tier.is_some());
//!
//! loot.set_weight(&"legendary", 5).unwrap();
//! assert_eq!(loot.total_weight(), 104);
//! ```
//!
//! ## Enums
//!
//! ```rust
//! use weightedlist::WeightedEnum;
//!
//! #[derive(Copy, Clone, Debug, PartialEq, WeightedEnum)]
//! enum Rarity {
//!     #[weight(50)] Common,
//!     #[weight(20)] Uncommon,
//!     #[weight(1)]  Legendary,
//! }
//!
//! let mut table = Rarity::weighted_list(7, 7);
//! assert_eq!(table.total_weight(), 71);
//! let _ = table.sample_owned();
//! ```
//!
//! ## Bad weights
//! Weights `<= 0` are handled by a [`WeightPolicy`] fixed at construction:
//! clamp them to `1` (the default) or reject the call with
//! [`WeightError::InvalidWeight`].
//!
//! ## Performance
//! * **Build**: O(n), re-run in full after every mutation.
//! * **Sample**: O(1) per draw (one random number on the uniform path, two otherwise).
//! * **Space**: items + weights + 2 vectors of length `n` (u64 + usize).
//!
//! ## Reproducibility
//! Each list owns a [`Xorshift32`] random source. Its [`RandomState`] can be
//! read with [`WeightedList::random_state`] and put back with
//! [`WeightedList::restore_random_state`] to replay the same draws.
//!
//! The list is not synchronized; share it across threads behind a lock.

extern crate self as weightedlist;

mod error;
mod list;
mod policy;
mod random;
mod walker;

pub use error::WeightError;
pub use list::{WeightedList, WeightedListBuilder};
pub use policy::WeightPolicy;
pub use random::{RandomState, Xorshift32};
pub use walker::AliasTable;

/// Derive macro imported from `weightedlist_macros`.
/// See the crate-level example for usage.
pub use weightedlist_macros::WeightedEnum;

/// Trait implemented by the `WeightedEnum` derive macro.
///
/// Each variant and its weight is exposed via [`WeightedEnum::ENTRIES`],
/// which enables building a ready-to-sample [`WeightedList`].
pub trait WeightedEnum: Sized + 'static {
    /// All `(variant, weight)` pairs for the enum, in declaration order.
    const ENTRIES: &'static [(Self, i32)];

    /// A list over every variant. Non-positive weights are clamped to `1`.
    fn weighted_list(seed: u32, state: u32) -> WeightedList<Self>
    where
        Self: Copy,
    {
        WeightedList::from_pairs(Self::ENTRIES.iter().copied(), seed, state)
    }
}
