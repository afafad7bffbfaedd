use crate::error::WeightError;

/// What to do when a caller hands over a weight `<= 0`.
///
/// Chosen once when the list is built; it cannot be flipped afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum WeightPolicy {
    /// Silently store `1` instead.
    #[default]
    ClampToOne,
    /// Fail the call with [`WeightError::InvalidWeight`] and leave the list untouched.
    RejectOnAdd,
}

impl WeightPolicy {
    /// Map a caller-supplied weight to a stored one.
    #[inline]
    pub fn normalize(self, weight: i32) -> Result<u32, WeightError> {
        match (self, weight) {
            (_, w) if w > 0 => Ok(w as u32),
            (WeightPolicy::ClampToOne, _) => Ok(1),
            (WeightPolicy::RejectOnAdd, w) => Err(WeightError::InvalidWeight { weight: w.into() }),
        }
    }
}
