//! Cauchy generator matrix construction and bit-weight-minimizing normalization.

use crate::gf::FieldTables;
use crate::params::{MAX_K, MAX_M};

/// Build the m x k generator matrix `M` (row-major, one byte per entry) and
/// return it together with the aggregate bit-weight of its eventual binary
/// expansion. The returned bit-weight must equal the tabulated `b` for (k, m);
/// callers assert this as a defensive self-check (see `crate::context`).
pub fn build_matrix(
    tables: &FieldTables,
    k: usize,
    m: usize,
    x: i32,
    y: i32,
) -> (Vec<u8>, i32) {
    let w = tables.w;
    assert!(k >= 1 && k <= MAX_K);
    assert!(m >= 1 && m <= MAX_M);
    assert!(k + m <= (1usize << w));

    let z = 1i32 << w;
    let mut matrix = vec![0u8; m * k];
    let mut count = tables.bit[1] * k as i32;

    if m == 1 {
        assert_eq!(x, -1);
        assert_eq!(y, -1);
        for c in 0..k {
            matrix[c] = 1;
        }
    } else if m == 2 {
        assert_eq!(x, -1);
        assert_eq!(y, -1);
        for c in 0..k {
            matrix[c] = 1;
        }
        for c in 0..k {
            let v = tables.min[c + 1];
            matrix[k + c] = v as u8;
            if c == 0 {
                assert_eq!(v, 1);
            }
            assert!(v > 0);
            count += tables.bit[v as usize];
        }
    } else {
        assert!(x + k as i32 <= z);
        assert!(y + m as i32 <= z);
        assert_ne!(x, y);
        if x < y {
            assert!(x + k as i32 <= y);
        } else {
            assert!(y + m as i32 <= x);
        }

        for r in 0..m {
            for c in 0..k {
                assert!(y + r as i32 < z);
                assert!(x + c as i32 < z);
                let divisor = (y + r as i32) ^ (x + c as i32);
                matrix[r * k + c] = tables.divide(1, divisor) as u8;
            }
        }

        // Normalize row 0 to all-ones by dividing every row by row 0's column.
        for r in 1..m {
            for c in 0..k {
                matrix[r * k + c] =
                    tables.divide(matrix[r * k + c] as i32, matrix[c] as i32) as u8;
            }
        }
        for c in 0..k {
            matrix[c] = tables.divide(matrix[c] as i32, matrix[c] as i32) as u8;
            assert_eq!(matrix[c], 1);
        }

        // For every other row, find the column that, used as a divisor, yields
        // the smallest total bit weight; apply it if it improves on the row as-is.
        for r in 1..m {
            let rk = r * k;
            let mut result: i32 = (0..k).map(|c| tables.bit[matrix[rk + c] as usize]).sum();
            let mut column: i32 = -1;
            for c in 0..k {
                let divisor = matrix[rk + c] as i32;
                let bits: i32 = (0..k)
                    .map(|d| tables.bit[tables.divide(matrix[rk + d] as i32, divisor) as usize])
                    .sum();
                if bits < result {
                    result = bits;
                    column = divisor;
                }
            }
            if column >= 0 {
                for c in 0..k {
                    matrix[rk + c] = tables.divide(matrix[rk + c] as i32, column) as u8;
                }
            }
            count += result;
        }
    }

    for c in 0..k {
        assert_eq!(matrix[c], 1);
    }
    assert!(count > 0);
    (matrix, count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gf::build_tables;
    use crate::params::lookup;

    #[test]
    fn row_zero_is_always_all_ones() {
        for k in 1..=8usize {
            for m in 1..=6usize {
                let p = lookup(k, m);
                let tables = build_tables(p.w, p.p);
                let (matrix, _) = build_matrix(&tables, k, m, p.x, p.y);
                for c in 0..k {
                    assert_eq!(matrix[c], 1);
                }
            }
        }
    }

    #[test]
    fn bit_weight_matches_tabulated_value() {
        for k in 1..=MAX_K {
            for m in 1..=MAX_M {
                let p = lookup(k, m);
                let tables = build_tables(p.w, p.p);
                let (_, count) = build_matrix(&tables, k, m, p.x, p.y);
                assert_eq!(count, p.b, "mismatch at k={k}, m={m}");
            }
        }
    }

    #[test]
    fn m1_is_all_ones_row() {
        let p = lookup(4, 1);
        let tables = build_tables(p.w, p.p);
        let (matrix, _) = build_matrix(&tables, 4, 1, p.x, p.y);
        assert_eq!(matrix, vec![1, 1, 1, 1]);
    }
}
