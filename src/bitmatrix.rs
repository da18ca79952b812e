//! Binary expansion of the generator matrix, the row-0-optimized predicate, and
//! the GF(2) Gauss-Jordan inverter used to assemble a decoding matrix from an
//! arbitrary selection of surviving shards.

use crate::gf::FieldTables;
use crate::params::{MAX_K, MAX_M, MAX_W};

/// Expand the m x k field-element matrix `M` into its mw x kw binary companion
/// matrix `B`, stored row-major as one byte (0 or 1) per bit. Returns `B`
/// together with its total 1-bit count.
pub fn expand(tables: &FieldTables, matrix: &[u8], k: usize, m: usize) -> (Vec<u8>, i32) {
    let w = tables.w as usize;
    assert!(k >= 1 && k <= MAX_K);
    assert!(m >= 1 && m <= MAX_M);
    assert!(k + m <= (1usize << tables.w));

    let mut bitmatrix = vec![0u8; m * w * k * w];
    let mut count = 0i32;
    for r in 0..m {
        for c in 0..k {
            let mut x = matrix[k * r + c] as i32;
            for a in 0..w {
                for b in 0..w {
                    let bit = if x & (1 << b) != 0 { 1u8 } else { 0u8 };
                    bitmatrix[(r * w * k * w) + (w * c) + a + (k * w * b)] = bit;
                    count += bit as i32;
                }
                x = tables.multiply(x, 2);
            }
        }
    }
    assert!(count > 0);
    (bitmatrix, count)
}

/// True if the top w rows of the encoding bit matrix `bitmatrix` form the
/// identity over the first k column-blocks (the invariant that enables the
/// single-erasure XOR fast path in `crate::encode`).
pub fn row0_optimized(w: u32, k: usize, bitmatrix: &[u8]) -> bool {
    assert!(w <= MAX_W && (w == 2 || w == 4 || w == 8));
    assert!(k >= 1 && k <= MAX_K);
    assert!(k < (1usize << w));
    let w = w as usize;
    for c in 0..k {
        for a in 0..w {
            let expected = if a == 0 { 1u8 } else { 0u8 };
            if bitmatrix[c * w + a] != expected {
                return false;
            }
        }
    }
    true
}

/// Build the kw x kw decoding bit matrix `A` from the chosen k survivor
/// indices (values in `[0, k+m)`): row-block `a` is the identity placed at
/// column-block `source_index[a]` when `source_index[a] < k`, otherwise it is
/// the corresponding row-block of the encoding bit matrix `B` for parity index
/// `source_index[a] - k`. Then invert `A` over GF(2) in place via Gauss-Jordan,
/// returning `A^-1`.
pub fn build_decoding_matrix(
    w: u32,
    k: usize,
    m: usize,
    source_index: &[usize],
    encoding_bitmatrix: &[u8],
) -> Vec<u8> {
    assert!(w <= MAX_W && (w == 2 || w == 4 || w == 8));
    assert!(k >= 1 && k <= MAX_K);
    assert!(m >= 1 && m <= MAX_M);
    assert!(k + m <= (1usize << w));
    assert_eq!(source_index.len(), k);

    let w = w as usize;
    let kww = k * w * w;
    let mut matrix = vec![0u8; kww * k];

    for a in 0..k {
        if source_index[a] < k {
            let base = kww * a;
            for b in 0..kww {
                matrix[base + b] = 0;
            }
            let mut index = base + source_index[a] * w;
            for _ in 0..w {
                matrix[index] = 1;
                index += k * w + 1;
            }
        } else {
            let src_block = kww * (source_index[a] - k);
            matrix[kww * a..kww * a + kww]
                .copy_from_slice(&encoding_bitmatrix[src_block..src_block + kww]);
        }
    }

    invert_gf2(&mut matrix, k * w)
}

/// Invert a `rows x rows` matrix over GF(2) in place via Gauss-Jordan
/// elimination, returning the inverse. Asserts (never `Result::Err`) that a
/// pivot is always found: the parameter table is chosen offline so that every
/// admissible survivor set yields an invertible matrix, so a failed pivot
/// search indicates a logic bug, not bad caller input.
fn invert_gf2(source: &mut [u8], rows: usize) -> Vec<u8> {
    let cols = rows;
    let mut target = vec![0u8; rows * cols];
    for r in 0..rows {
        for c in 0..cols {
            target[r * cols + c] = if r == c { 1 } else { 0 };
        }
    }

    for c in 0..cols {
        if source[c * cols + c] == 0 {
            let mut r = c + 1;
            while r < rows && source[r * cols + c] == 0 {
                r += 1;
            }
            assert!(r != rows, "survivor set yielded a singular decoding matrix");
            swap_rows(source, c, r, cols);
            swap_rows(&mut target, c, r, cols);
        }
        for r in (c + 1)..rows {
            if source[r * cols + c] != 0 {
                xor_row_into(source, c, r, cols);
                xor_row_into(&mut target, c, r, cols);
            }
        }
    }

    for r in (0..rows).rev() {
        for c in 0..r {
            if source[c * cols + r] != 0 {
                xor_row_into_reverse(source, r, c, cols);
                xor_row_into_reverse(&mut target, r, c, cols);
            }
        }
    }

    target
}

fn swap_rows(buffer: &mut [u8], x: usize, y: usize, cols: usize) {
    for k in 0..cols {
        buffer.swap(x * cols + k, y * cols + k);
    }
}

/// XOR row `pivot` into row `r` (r > pivot), the forward-elimination step.
fn xor_row_into(buffer: &mut [u8], pivot: usize, r: usize, cols: usize) {
    for k in 0..cols {
        buffer[r * cols + k] ^= buffer[pivot * cols + k];
    }
}

/// XOR row `pivot` into row `r` (r < pivot), the back-substitution step.
fn xor_row_into_reverse(buffer: &mut [u8], pivot: usize, r: usize, cols: usize) {
    for k in 0..cols {
        buffer[r * cols + k] ^= buffer[pivot * cols + k];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gf::build_tables;
    use crate::matrix::build_matrix;
    use crate::params::lookup;

    fn build_bitmatrix(k: usize, m: usize) -> (u32, Vec<u8>) {
        let p = lookup(k, m);
        let tables = build_tables(p.w, p.p);
        let (matrix, b) = build_matrix(&tables, k, m, p.x, p.y);
        let (bitmatrix, count) = expand(&tables, &matrix, k, m);
        assert_eq!(count, b);
        (p.w, bitmatrix)
    }

    #[test]
    fn every_context_is_row0_optimized() {
        for k in 1..=MAX_K {
            for m in 1..=MAX_M {
                let (w, bitmatrix) = build_bitmatrix(k, m);
                assert!(row0_optimized(w, k, &bitmatrix), "k={k}, m={m}");
            }
        }
    }

    fn gf2_matmul_is_identity(a: &[u8], a_inv: &[u8], n: usize) -> bool {
        for r in 0..n {
            for c in 0..n {
                let mut acc = 0u8;
                for t in 0..n {
                    acc ^= a[r * n + t] & a_inv[t * n + c];
                }
                let expected = if r == c { 1 } else { 0 };
                if acc != expected {
                    return false;
                }
            }
        }
        true
    }

    #[test]
    fn decoding_matrix_all_data_survivors_inverts_correctly() {
        let (w, bitmatrix) = build_bitmatrix(4, 2);
        let survivors: Vec<usize> = (0..4).collect();
        let decoding = build_decoding_matrix(w, 4, 2, &survivors, &bitmatrix);
        let kw = 4 * w as usize;

        // Surviving purely data shards: the assembled matrix is the identity,
        // so its inverse must also be the identity.
        let mut identity = vec![0u8; kw * kw];
        for i in 0..kw {
            identity[i * kw + i] = 1;
        }
        assert!(gf2_matmul_is_identity(&identity, &decoding, kw));
    }

    #[test]
    fn decoding_matrix_inverts_for_every_survivor_set_with_parity() {
        let (w, bitmatrix) = build_bitmatrix(3, 2);
        let k = 3;
        let m = 2;
        // Survivor sets: choose k of the k+m indices.
        let total = k + m;
        for mask in 0u32..(1 << total) {
            if mask.count_ones() as usize != k {
                continue;
            }
            let survivors: Vec<usize> = (0..total).filter(|i| mask & (1 << i) != 0).collect();
            let kw = k * w as usize;
            // Build the assembled (non-inverted) matrix A the same way
            // build_decoding_matrix does internally, to verify A * A^-1 = I.
            let a = assemble_for_test(w, k, m, &survivors, &bitmatrix);
            let a_inv = build_decoding_matrix(w, k, m, &survivors, &bitmatrix);
            assert!(
                gf2_matmul_is_identity(&a, &a_inv, kw),
                "survivors={survivors:?}"
            );
        }
    }

    fn assemble_for_test(
        w: u32,
        k: usize,
        _m: usize,
        source_index: &[usize],
        encoding_bitmatrix: &[u8],
    ) -> Vec<u8> {
        let w = w as usize;
        let kww = k * w * w;
        let mut matrix = vec![0u8; kww * k];
        for a in 0..k {
            if source_index[a] < k {
                let mut index = kww * a + source_index[a] * w;
                for _ in 0..w {
                    matrix[index] = 1;
                    index += k * w + 1;
                }
            } else {
                let src_block = kww * (source_index[a] - k);
                matrix[kww * a..kww * a + kww]
                    .copy_from_slice(&encoding_bitmatrix[src_block..src_block + kww]);
            }
        }
        matrix
    }
}
