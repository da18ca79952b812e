//! The `create` operation: builds an immutable, serializable encoding context
//! for a given (k, m) by running the field-table, matrix-builder, and
//! bit-matrix-expander pipeline once.

use tracing::{debug, instrument};

use crate::bitmatrix::{expand, row0_optimized};
use crate::error::{Error, Result};
use crate::gf::build_tables;
use crate::matrix::build_matrix;
use crate::params::{lookup, MAX_K, MAX_M};

/// An immutable encoding context: `(w, k, m)` plus the `mw x kw` encoding bit
/// matrix `B`. Produced once by `Context::create` and reused across any number
/// of `encode`/`reconstruct` calls.
#[derive(Debug, Clone)]
pub struct Context {
    w: u32,
    k: usize,
    m: usize,
    bitmatrix: Vec<u8>,
}

impl Context {
    /// Build a context for `k` data shards and `m` parity shards.
    #[instrument(fields(k, m))]
    pub fn create(k: usize, m: usize) -> Result<Self> {
        if k < 1 {
            return Err(Error::KTooSmall);
        }
        if k > MAX_K {
            return Err(Error::KTooLarge);
        }
        if m < 1 {
            return Err(Error::MTooSmall);
        }
        if m > MAX_M {
            return Err(Error::MTooLarge);
        }

        let params = lookup(k, m);
        assert!(k + m <= (1usize << params.w));

        let tables = build_tables(params.w, params.p);
        let (matrix, matrix_bits) = build_matrix(&tables, k, m, params.x, params.y);
        assert_eq!(matrix_bits, params.b, "matrix bit count does not match table");

        let (bitmatrix, expanded_bits) = expand(&tables, &matrix, k, m);
        assert_eq!(expanded_bits, params.b, "bitmatrix bit count does not match table");
        assert!(
            row0_optimized(params.w, k, &bitmatrix),
            "encoding bitmatrix failed the row-0-optimized invariant"
        );

        debug!(w = params.w, k, m, bits = params.b, "built encoding context");

        Ok(Context {
            w: params.w,
            k,
            m,
            bitmatrix,
        })
    }

    pub fn w(&self) -> u32 {
        self.w
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn m(&self) -> usize {
        self.m
    }

    pub fn bitmatrix(&self) -> &[u8] {
        &self.bitmatrix
    }

    /// The row-block (w x kw bits, flattened) of the encoding bit matrix for
    /// parity index `parity_index` (0-based, `< m`).
    pub fn encoding_row(&self, parity_index: usize) -> &[u8] {
        let kww = self.k * (self.w as usize) * (self.w as usize);
        &self.bitmatrix[kww * parity_index..kww * (parity_index + 1)]
    }

    /// Serialize the context as `[w, k, m, bitmatrix bytes...]`, one byte per
    /// bit, matching the layout external callers persist and reload.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(3 + self.bitmatrix.len());
        out.push(self.w as u8);
        out.push(self.k as u8);
        out.push(self.m as u8);
        out.extend_from_slice(&self.bitmatrix);
        out
    }

    /// Reload a context from bytes produced by `to_bytes`, re-validating every
    /// invariant an external caller's bytes might violate (§7 user errors).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < 3 {
            return Err(Error::ContextTooShort);
        }
        let w = bytes[0] as u32;
        let k = bytes[1] as usize;
        let m = bytes[2] as usize;

        if w != 2 && w != 4 && w != 8 {
            return Err(Error::InvalidFieldWidth);
        }
        if k < 1 {
            return Err(Error::KTooSmall);
        }
        if k > MAX_K {
            return Err(Error::KTooLarge);
        }
        if m < 1 {
            return Err(Error::MTooSmall);
        }
        if m > MAX_M {
            return Err(Error::MTooLarge);
        }
        if k + m > (1usize << w) {
            return Err(Error::KPlusMTooLargeForField);
        }

        let expected_len = 3 + k * (w as usize) * m * (w as usize);
        if bytes.len() != expected_len {
            return Err(Error::ContextLengthMismatch);
        }

        let bitmatrix = bytes[3..].to_vec();
        if !row0_optimized(w, k, &bitmatrix) {
            return Err(Error::BitmatrixNotOptimized);
        }

        Ok(Context { w, k, m, bitmatrix })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_rejects_out_of_range_k_m() {
        assert_eq!(Context::create(0, 1).unwrap_err(), Error::KTooSmall);
        assert_eq!(Context::create(25, 1).unwrap_err(), Error::KTooLarge);
        assert_eq!(Context::create(1, 0).unwrap_err(), Error::MTooSmall);
        assert_eq!(Context::create(1, 7).unwrap_err(), Error::MTooLarge);
    }

    #[test]
    fn round_trips_through_bytes() {
        let ctx = Context::create(4, 2).unwrap();
        let bytes = ctx.to_bytes();
        assert_eq!(bytes.len(), 3 + 4 * ctx.w() as usize * 2 * ctx.w() as usize);
        let reloaded = Context::from_bytes(&bytes).unwrap();
        assert_eq!(reloaded.w(), ctx.w());
        assert_eq!(reloaded.k(), ctx.k());
        assert_eq!(reloaded.m(), ctx.m());
        assert_eq!(reloaded.bitmatrix(), ctx.bitmatrix());
    }

    #[test]
    fn from_bytes_rejects_truncated_context() {
        let ctx = Context::create(2, 1).unwrap();
        let mut bytes = ctx.to_bytes();
        bytes.truncate(bytes.len() - 1);
        assert_eq!(Context::from_bytes(&bytes).unwrap_err(), Error::ContextLengthMismatch);
    }

    #[test]
    fn from_bytes_rejects_too_short() {
        assert_eq!(Context::from_bytes(&[1, 2]).unwrap_err(), Error::ContextTooShort);
    }

    #[test]
    fn every_valid_k_m_creates_successfully() {
        for k in 1..=8usize {
            for m in 1..=6usize {
                Context::create(k, m).unwrap();
            }
        }
    }
}
