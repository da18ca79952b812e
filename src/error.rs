//! Error types for the Cauchy Reed-Solomon erasure coding core.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Recoverable errors surfaced at the public API boundary.
///
/// Each variant corresponds to one distinct validation failure. Internal
/// invariant violations (singular decoding matrix, bit-count mismatches,
/// field-table corruption) are never represented here: those are bugs and
/// are enforced with `assert!`/`debug_assert!`, not `Result::Err`.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("k < 1")]
    KTooSmall,

    #[error("k > MAX_K")]
    KTooLarge,

    #[error("m < 1")]
    MTooSmall,

    #[error("m > MAX_M")]
    MTooLarge,

    #[error("context.length < 3")]
    ContextTooShort,

    #[error("w != 2, 4, 8")]
    InvalidFieldWidth,

    #[error("k + m > (1 << w)")]
    KPlusMTooLargeForField,

    #[error("context.length is bad")]
    ContextLengthMismatch,

    #[error("bitmatrix not optimized")]
    BitmatrixNotOptimized,

    #[error("sources > k + m")]
    SourcesOutOfRange,

    #[error("sources == 0")]
    SourcesEmpty,

    #[error("sources < k")]
    SourcesInsufficient { available: u32, required: u32 },

    #[error("targets > k + m")]
    TargetsOutOfRange,

    #[error("targets == 0")]
    TargetsEmpty,

    #[error("targets > m")]
    TargetsTooMany,

    #[error("(sources & targets) != 0")]
    SourcesTargetsOverlap,

    #[error("bufferSize == 0")]
    BufferSizeZero,

    #[error("bufferOffset + bufferSize > buffer.length")]
    BufferOutOfBounds,

    #[error("bufferSize % k != 0")]
    BufferSizeNotDivisible,

    #[error("shardSize % w != 0")]
    ShardSizeNotFieldAligned,

    #[error("shardSize % 8 != 0")]
    ShardSizeNotWordAligned,

    #[error("paritySize == 0")]
    ParitySizeZero,

    #[error("paritySize % m != 0")]
    ParitySizeNotDivisible,

    #[error("paritySize / m != bufferSize / k")]
    ShardSizeMismatch,

    #[error("parityOffset + paritySize > parity.length")]
    ParityOutOfBounds,

    /// The blocking task running an async-dispatched `encode` call panicked
    /// or was cancelled before completing. Only reachable through
    /// `crate::async_codec::encode`.
    #[cfg(feature = "async")]
    #[error("encode task did not complete")]
    TaskJoinFailed,
}
