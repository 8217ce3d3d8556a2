use num_bigint::BigUint;
use thiserror::Error;

/// Errors raised by generator construction, state decoding and parameter search.
/// The generation hot path never fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Invalid lag table or modulus configuration.
    #[error("invalid generator configuration: {0}")]
    Construction(&'static str),

    /// Serialized state is shorter than its header or declared lag table.
    #[error("truncated generator state: needed {needed} bytes, got {available}")]
    Truncated { needed: usize, available: usize },

    /// Serialized state has a well-formed length but inconsistent contents.
    #[error("malformed generator state: {0}")]
    Malformed(&'static str),

    /// No multiplier was found within the attempt budget.
    /// This is expected for some configurations; retry with another random source.
    #[error("no multiplier found for modulus {modulus} and lag count {lag_count} in {attempts} attempts")]
    SearchExhausted { modulus: u64, lag_count: u64, attempts: u32 },

    /// A multiplier accepted by the search does not fit in 32 bits. This is a bug.
    #[error("internal consistency error: multiplier {0} does not fit in 32 bits")]
    InternalConsistency(BigUint),
}

impl Error {
    /// Returns true if retrying the failed operation can succeed.
    pub fn is_retriable(&self) -> bool {
        matches!(self, Error::SearchExhausted { .. })
    }
}

pub type Result<T> = core::result::Result<T, Error>;
