//! The fixed parameter table: (k, m) -> (w, p, x, y, b).
//!
//! This table is the output of an offline search over (w, primitive polynomial,
//! x, y) that minimizes the bit count `b` of the resulting encoding bit matrix,
//! subject to the constraint that every k-subset of surviving shard rows remains
//! invertible over GF(2) (the matrix stays MDS). It is embedded verbatim and is
//! never recomputed at runtime; `search` (see `crate::search`) regenerates it
//! offline as a developer tool only.
//!
//! Indexed as `PARAMETERS[k - 1][m - 1] = [k, m, w, p, x, y, b]`. For m <= 2,
//! x = y = -1 is a sentinel (the m=1/m=2 constructions in `crate::matrix` do not
//! use a Cauchy offset).

pub const MAX_K: usize = 24;
pub const MAX_M: usize = 6;
pub const MAX_W: u32 = 8;

#[rustfmt::skip]
pub const PARAMETERS: [[[i32; 7]; 6]; 24] = [
    [
        [  1, 1, 2,   7,  -1,  -1,    2 ],
        [  1, 2, 2,   7,  -1,  -1,    4 ],
        [  1, 3, 2,   7,   0,   1,    6 ],
        [  1, 4, 4,  19,   0,   1,   16 ],
        [  1, 5, 4,  19,   0,   1,   20 ],
        [  1, 6, 4,  19,   0,   1,   24 ],
    ],
    [
        [  2, 1, 2,   7,  -1,  -1,    4 ],
        [  2, 2, 2,   7,  -1,  -1,    9 ],
        [  2, 3, 4,  19,   0,   4,   28 ],
        [  2, 4, 4,  19,   0,   5,   40 ],
        [  2, 5, 4,  19,   2,   9,   51 ],
        [  2, 6, 4,  19,   4,  10,   62 ],
    ],
    [
        [  3, 1, 2,   7,  -1,  -1,    6 ],
        [  3, 2, 4,  19,  -1,  -1,   26 ],
        [  3, 3, 4,  19,   0,   9,   44 ],
        [  3, 4, 4,  19,   1,   8,   63 ],
        [  3, 5, 4,  19,   1,   9,   82 ],
        [  3, 6, 4,  19,   0,   9,  101 ],
    ],
    [
        [  4, 1, 4,  19,  -1,  -1,   16 ],
        [  4, 2, 4,  19,  -1,  -1,   36 ],
        [  4, 3, 4,  19,   0,   9,   63 ],
        [  4, 4, 4,  19,   3,  11,   89 ],
        [  4, 5, 4,  19,   3,  11,  116 ],
        [  4, 6, 4,  19,  11,   4,  145 ],
    ],
    [
        [  5, 1, 4,  19,  -1,  -1,   20 ],
        [  5, 2, 4,  19,  -1,  -1,   47 ],
        [  5, 3, 4,  19,   4,  13,   82 ],
        [  5, 4, 4,  19,   3,  12,  118 ],
        [  5, 5, 4,  19,   0,   9,  152 ],
        [  5, 6, 4,  19,   0,   9,  185 ],
    ],
    [
        [  6, 1, 4,  19,  -1,  -1,   24 ],
        [  6, 2, 4,  19,  -1,  -1,   58 ],
        [  6, 3, 4,  19,   2,  12,  102 ],
        [  6, 4, 4,  19,   2,  12,  144 ],
        [  6, 5, 4,  19,   0,   9,  186 ],
        [  6, 6, 4,  19,   0,   9,  231 ],
    ],
    [
        [  7, 1, 4,  19,  -1,  -1,   28 ],
        [  7, 2, 4,  19,  -1,  -1,   71 ],
        [  7, 3, 4,  19,   1,  13,  123 ],
        [  7, 4, 4,  19,   2,  12,  174 ],
        [  7, 5, 4,  19,   0,   9,  226 ],
        [  7, 6, 4,  19,   7,   0,  277 ],
    ],
    [
        [  8, 1, 4,  19,  -1,  -1,   32 ],
        [  8, 2, 4,  19,  -1,  -1,   84 ],
        [  8, 3, 4,  19,   2,  13,  142 ],
        [  8, 4, 4,  19,   2,  12,  205 ],
        [  8, 5, 4,  19,   0,   9,  265 ],
        [  8, 6, 4,  19,   0,   8,  328 ],
    ],
    [
        [  9, 1, 4,  19,  -1,  -1,   36 ],
        [  9, 2, 4,  19,  -1,  -1,   97 ],
        [  9, 3, 4,  19,   1,  13,  162 ],
        [  9, 4, 4,  19,   2,  12,  237 ],
        [  9, 5, 4,  19,   0,   9,  308 ],
        [  9, 6, 4,  19,   1,  10,  376 ],
    ],
    [
        [ 10, 1, 4,  19,  -1,  -1,   40 ],
        [ 10, 2, 4,  19,  -1,  -1,  111 ],
        [ 10, 3, 4,  19,   1,  13,  186 ],
        [ 10, 4, 4,  19,   0,  12,  268 ],
        [ 10, 5, 4,  19,   0,  11,  347 ],
        [ 10, 6, 4,  19,   0,  10,  426 ],
    ],
    [
        [ 11, 1, 4,  19,  -1,  -1,   44 ],
        [ 11, 2, 4,  19,  -1,  -1,  125 ],
        [ 11, 3, 4,  19,   0,  13,  211 ],
        [ 11, 4, 4,  19,   0,  12,  300 ],
        [ 11, 5, 4,  19,   0,  11,  390 ],
        [ 11, 6, 8, 135,  58, 188, 1401 ],
    ],
    [
        [ 12, 1, 4,  19,  -1,  -1,   48 ],
        [ 12, 2, 4,  19,  -1,  -1,  139 ],
        [ 12, 3, 4,  19,   3,   0,  234 ],
        [ 12, 4, 4,  19,   0,  12,  334 ],
        [ 12, 5, 8, 113,  24, 208, 1269 ],
        [ 12, 6, 8, 135,  57, 188, 1577 ],
    ],
    [
        [ 13, 1, 4,  19,  -1,  -1,   52 ],
        [ 13, 2, 4,  19,  -1,  -1,  155 ],
        [ 13, 3, 4,  19,   0,  13,  261 ],
        [ 13, 4, 8, 135,  59, 189, 1037 ],
        [ 13, 5, 8, 113,  27, 236, 1393 ],
        [ 13, 6, 8, 113,  27, 236, 1733 ],
    ],
    [
        [ 14, 1, 4,  19,  -1,  -1,   56 ],
        [ 14, 2, 4,  19,  -1,  -1,  171 ],
        [ 14, 3, 8, 169,   4, 252,  777 ],
        [ 14, 4, 8, 135,  58, 189, 1121 ],
        [ 14, 5, 8, 135,  58, 189, 1508 ],
        [ 14, 6, 8, 135,  58, 188, 1880 ],
    ],
    [
        [ 15, 1, 4,  19,  -1,  -1,   60 ],
        [ 15, 2, 8, 135,  -1,  -1,  353 ],
        [ 15, 3, 8, 113,  24, 209,  836 ],
        [ 15, 4, 8, 135,  58, 189, 1225 ],
        [ 15, 5, 8, 101,  28, 232, 1644 ],
        [ 15, 6, 8, 113, 120, 241, 2037 ],
    ],
    [
        [ 16, 1, 8,  29,  -1,  -1,  128 ],
        [ 16, 2, 8, 135,  -1,  -1,  380 ],
        [ 16, 3, 8, 113,  22, 213,  901 ],
        [ 16, 4, 8, 113,  22, 212, 1324 ],
        [ 16, 5, 8, 101,  28, 232, 1765 ],
        [ 16, 6, 8, 101,  28, 232, 2195 ],
    ],
    [
        [ 17, 1, 8,  29,  -1,  -1,  136 ],
        [ 17, 2, 8, 135,  -1,  -1,  407 ],
        [ 17, 3, 8, 113,  22, 213,  960 ],
        [ 17, 4, 8, 135,  58, 189, 1423 ],
        [ 17, 5, 8, 101,  27, 232, 1880 ],
        [ 17, 6, 8, 101,  27, 232, 2343 ],
    ],
    [
        [ 18, 1, 8,  29,  -1,  -1,  144 ],
        [ 18, 2, 8, 135,  -1,  -1,  434 ],
        [ 18, 3, 8, 113,  24, 213, 1027 ],
        [ 18, 4, 8, 113,  22, 212, 1513 ],
        [ 18, 5, 8, 195,   8,  32, 2019 ],
        [ 18, 6, 8, 113, 205, 126, 2500 ],
    ],
    [
        [ 19, 1, 8,  29,  -1,  -1,  152 ],
        [ 19, 2, 8, 135,  -1,  -1,  462 ],
        [ 19, 3, 8, 113,  22, 213, 1086 ],
        [ 19, 4, 8, 113,  23, 212, 1604 ],
        [ 19, 5, 8, 195,   7,  32, 2131 ],
        [ 19, 6, 8, 195,   3,  60, 2654 ],
    ],
    [
        [ 20, 1, 8,  29,  -1,  -1,  160 ],
        [ 20, 2, 8, 135,  -1,  -1,  490 ],
        [ 20, 3, 8, 113,  22, 213, 1147 ],
        [ 20, 4, 8, 113,  22, 212, 1695 ],
        [ 20, 5, 8, 195,   4, 238, 2270 ],
        [ 20, 6, 8, 113,  21, 233, 2816 ],
    ],
    [
        [ 21, 1, 8,  29,  -1,  -1,  168 ],
        [ 21, 2, 8, 135,  -1,  -1,  518 ],
        [ 21, 3, 8, 113,  21, 213, 1225 ],
        [ 21, 4, 8, 113,  21, 212, 1801 ],
        [ 21, 5, 8, 195,   3,  60, 2395 ],
        [ 21, 6, 8, 195,   3,  60, 2980 ],
    ],
    [
        [ 22, 1, 8,  29,  -1,  -1,  176 ],
        [ 22, 2, 8, 135,  -1,  -1,  546 ],
        [ 22, 3, 8, 113,  20, 213, 1292 ],
        [ 22, 4, 8, 113,  21, 212, 1906 ],
        [ 22, 5, 8, 195,  35,  28, 2512 ],
        [ 22, 6, 8, 195,   3,  60, 3135 ],
    ],
    [
        [ 23, 1, 8,  29,  -1,  -1,  184 ],
        [ 23, 2, 8, 135,  -1,  -1,  574 ],
        [ 23, 3, 8, 113,  19, 213, 1366 ],
        [ 23, 4, 8, 113,  19, 212, 2008 ],
        [ 23, 5, 8, 195,   3, 238, 2652 ],
        [ 23, 6, 8, 113, 205, 126, 3291 ],
    ],
    [
        [ 24, 1, 8,  29,  -1,  -1,  192 ],
        [ 24, 2, 8, 135,  -1,  -1,  603 ],
        [ 24, 3, 8, 113,  18, 213, 1437 ],
        [ 24, 4, 8, 195, 125,  91, 2110 ],
        [ 24, 5, 8, 195,   3, 238, 2787 ],
        [ 24, 6, 8, 195,  42, 225, 3466 ],
    ],
];

/// One row of the parameter table, resolved for a concrete (k, m).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parameters {
    pub k: usize,
    pub m: usize,
    pub w: u32,
    pub p: i32,
    /// Cauchy column offset; -1 sentinel when m <= 2.
    pub x: i32,
    /// Cauchy row offset; -1 sentinel when m <= 2.
    pub y: i32,
    /// Expected number of 1-bits in the resulting encoding bit matrix.
    pub b: i32,
}

/// Look up the tabulated constants for (k, m). Panics if k or m is out of range;
/// callers are expected to validate 1 <= k <= MAX_K and 1 <= m <= MAX_M first
/// (see `crate::error::Error::KTooSmall` and friends).
pub fn lookup(k: usize, m: usize) -> Parameters {
    assert!((1..=MAX_K).contains(&k), "k out of range: {k}");
    assert!((1..=MAX_M).contains(&m), "m out of range: {m}");
    let row = PARAMETERS[k - 1][m - 1];
    assert_eq!(row[0] as usize, k);
    assert_eq!(row[1] as usize, m);
    Parameters {
        k,
        m,
        w: row[2] as u32,
        p: row[3],
        x: row[4],
        y: row[5],
        b: row[6],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_matches_table_indices() {
        for k in 1..=MAX_K {
            for m in 1..=MAX_M {
                let params = lookup(k, m);
                assert_eq!(params.k, k);
                assert_eq!(params.m, m);
                assert!(matches!(params.w, 2 | 4 | 8));
                assert!(k + m <= (1usize << params.w));
            }
        }
    }

    #[test]
    fn m_le_2_uses_sentinel_offsets() {
        for k in 1..=MAX_K {
            for m in 1..=2 {
                let params = lookup(k, m);
                assert_eq!(params.x, -1);
                assert_eq!(params.y, -1);
            }
        }
    }

    #[test]
    fn m_ge_3_has_disjoint_offsets() {
        for k in 1..=MAX_K {
            for m in 3..=MAX_M {
                let params = lookup(k, m);
                assert_ne!(params.x, params.y);
            }
        }
    }
}
