//! The cache-aware "dot" kernel: computes one target shard as the XOR of
//! selected source shards under a bit-matrix row, plus the standalone aligned
//! XOR primitive it is built on.

use crate::params::{MAX_K, MAX_W};

/// Compute the chunk size (in bytes) the dot kernel processes at a time.
/// Starts at `shard_size / w` and halves while the combined per-block working
/// set of one destination chunk plus up to `k * w` source chunks would exceed
/// roughly 1 MiB, keeping the hot loop within L2 cache.
pub fn chunk_size(w: u32, k: usize, shard_size: u32) -> u32 {
    assert!(w <= MAX_W && (w == 2 || w == 4 || w == 8));
    assert!(k >= 1 && k <= MAX_K);
    assert!(k < (1usize << w));
    assert_eq!(shard_size % w, 0);

    let mut chunk = shard_size / w;
    while chunk > 64 && chunk % 2 == 0 && (1 + k as u32 * w) * chunk > 1_048_576 {
        chunk /= 2;
    }
    assert!(chunk > 0);
    assert_eq!(shard_size % (w * chunk), 0);
    chunk
}

fn unaligned64(ptr: *const u8) -> usize {
    (ptr as usize) & 7
}

/// Byte-wise XOR of `source` into `target` (both of length `len`), optimized
/// to XOR 8 bytes at a time via `u64` words once source and target share the
/// same alignment modulo 8. Falls back to byte-wise XOR throughout if their
/// misalignments differ.
pub fn dot_xor(source: &[u8], target: &mut [u8]) {
    let len = source.len();
    assert_eq!(len, target.len());
    assert!(len > 0);

    let src_ptr = source.as_ptr();
    let dst_ptr = target.as_ptr();
    if unaligned64(src_ptr) != unaligned64(dst_ptr) {
        for i in 0..len {
            target[i] ^= source[i];
        }
        return;
    }

    let mut i = 0usize;
    while i < len && unaligned64(unsafe { src_ptr.add(i) }) != 0 {
        target[i] ^= source[i];
        i += 1;
    }
    if i == len {
        return;
    }

    let remaining = len - i;
    let words = remaining / 8;
    let width = words * 8;
    if words > 0 {
        // SAFETY: `source[i..]` and `target[i..]` are both 8-byte aligned at
        // this point (checked above), and `width` bytes remain in each slice.
        unsafe {
            let mut src64 = source.as_ptr().add(i) as *const u64;
            let mut dst64 = target.as_mut_ptr().add(i) as *mut u64;
            for _ in 0..words {
                *dst64 ^= *src64;
                src64 = src64.add(1);
                dst64 = dst64.add(1);
            }
        }
        i += width;
    }

    while i < len {
        target[i] ^= source[i];
        i += 1;
    }
}

fn dot_cpy(source: &[u8], target: &mut [u8]) {
    assert_eq!(source.len(), target.len());
    assert!(!source.is_empty());
    target.copy_from_slice(source);
}

/// Compute one target shard from `row` (a w x (k*w) slice of a bit matrix, one
/// row-block) and the selected source shards `sources[0..k)`, writing the
/// result into `target`. `sources[b]` aligns with bit-matrix column-block `b`.
///
/// Processes the shard in `w * chunk_size` byte blocks to keep the working
/// set within L2 cache; see `chunk_size`.
pub fn dot(w: u32, k: usize, sources: &[&[u8]], row: &[u8], target: &mut [u8]) {
    assert!(w <= MAX_W && (w == 2 || w == 4 || w == 8));
    assert!(k >= 1 && k <= MAX_K);
    assert!(k < (1usize << w));
    assert_eq!(sources.len(), k);
    assert_eq!(row.len(), (w as usize) * k * (w as usize));
    let shard_size = target.len() as u32;
    assert_eq!(shard_size % w, 0);
    for s in sources {
        assert_eq!(s.len(), target.len());
    }

    let w = w as usize;
    let chunk = chunk_size(w as u32, k, shard_size) as usize;
    assert!(w * chunk <= shard_size as usize);
    assert_eq!(shard_size as usize % (w * chunk), 0);

    let mut shard_offset = 0usize;
    while shard_offset < shard_size as usize {
        for a in 0..w {
            let mut copied = false;
            let target_range = (shard_offset + a * chunk)..(shard_offset + (a + 1) * chunk);
            let mut column = a * k * w;
            for b in 0..k {
                let source = sources[b];
                for c in 0..w {
                    if row[column] != 0 {
                        let source_range =
                            (shard_offset + c * chunk)..(shard_offset + (c + 1) * chunk);
                        if !copied {
                            dot_cpy(&source[source_range], &mut target[target_range.clone()]);
                            copied = true;
                        } else {
                            dot_xor(&source[source_range], &mut target[target_range.clone()]);
                        }
                    }
                    column += 1;
                }
            }
        }
        shard_offset += w * chunk;
    }
    assert_eq!(shard_offset, shard_size as usize);
}
