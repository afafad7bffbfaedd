//! A tiny restorable generator so that sampling sequences can be saved and replayed.

use rand::rand_core::impls;
use rand::{RngCore, SeedableRng};

/// Substituted for a zero cursor, which xorshift can never leave.
const NONZERO_STATE: u32 = 0x9E37_79B9;

/// Snapshot of a [`Xorshift32`]: the seed it was created with and its current cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RandomState {
    pub seed: u32,
    pub state: u32,
}

/// 32-bit xorshift (13, 17, 5) generator with an inspectable cursor.
///
/// `next_u32` yields the current cursor and then advances it, so a list that
/// restores a [`RandomState`] replays exactly the draws that followed the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xorshift32 {
    seed: u32,
    state: u32,
}

impl Xorshift32 {
    /// Generator with an explicit seed and cursor. A zero cursor is replaced by a
    /// fixed non-zero constant.
    pub const fn new(seed: u32, state: u32) -> Self {
        let state = if state == 0 { NONZERO_STATE } else { state };
        Self { seed, state }
    }

    /// Generator whose cursor starts at `seed`.
    pub const fn from_u32(seed: u32) -> Self {
        Self::new(seed, seed)
    }

    pub const fn seed(&self) -> u32 {
        self.seed
    }

    pub const fn state(&self) -> u32 {
        self.state
    }

    pub const fn snapshot(&self) -> RandomState {
        RandomState {
            seed: self.seed,
            state: self.state,
        }
    }

    pub fn restore(&mut self, snapshot: RandomState) {
        *self = Self::new(snapshot.seed, snapshot.state);
    }
}

impl Default for Xorshift32 {
    fn default() -> Self {
        Self::from_u32(NONZERO_STATE)
    }
}

impl From<RandomState> for Xorshift32 {
    fn from(s: RandomState) -> Self {
        Self::new(s.seed, s.state)
    }
}

impl RngCore for Xorshift32 {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        let out = self.state;
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        out
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        impls::fill_bytes_via_next(self, dst)
    }
}

impl SeedableRng for Xorshift32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::from_u32(u32::from_le_bytes(seed))
    }
}
