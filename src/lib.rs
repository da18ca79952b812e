//! Cauchy Reed-Solomon erasure coding core over small binary Galois fields
//! GF(2^w), w in {2, 4, 8}.
//!
//! Given k data shards and m parity shards (k <= 24, m <= 6, k + m <= 2^w),
//! this crate builds an encoding context embedding a pre-computed,
//! bit-expanded generator matrix, then, given any k of the k+m shards,
//! reconstructs whichever others are missing into caller-supplied memory.
//!
//! # Modules
//!
//! - [`params`] - the frozen `(k, m) -> (w, p, x, y, b)` parameter table
//! - [`gf`] - GF(2^w) field tables and arithmetic
//! - [`matrix`] - Cauchy generator matrix construction and normalization
//! - [`bitmatrix`] - binary matrix expansion, the row-0-optimized predicate, and the GF(2) inverter
//! - [`dot`] - the cache-aware shard XOR kernel
//! - [`context`] - the `create` operation and the serializable [`Context`]
//! - [`encode`] - the `encode` orchestrator and the standalone `xor` operation
//! - [`search`] - the offline parameter-search developer tool
//! - [`async_codec`] - an optional, feature-gated async dispatch wrapper
//! - [`error`] - error types

#[cfg(feature = "async")]
pub mod async_codec;
pub mod bitmatrix;
pub mod context;
pub mod dot;
pub mod encode;
pub mod error;
pub mod gf;
pub mod matrix;
pub mod params;
pub mod search;

pub use context::Context;
pub use error::{Error, Result};
