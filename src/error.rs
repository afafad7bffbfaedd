/// Errors returned by the mutating and lookup operations of
/// [`WeightedList`](crate::WeightedList).
///
/// A failed call never leaves the list partially updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WeightError {
    #[error("weight must be positive, got {weight}")]
    InvalidWeight { weight: i64 },
    #[error("index {index} is out of range for a list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("item is not in the list")]
    NotFound,
}
