//! The `encode` orchestrator and the standalone `xor` convenience operation.

use tracing::{debug, instrument, trace};

use crate::bitmatrix::build_decoding_matrix;
use crate::context::Context;
use crate::dot;
use crate::error::{Error, Result};

/// Raw-pointer shard accessor over a caller's `buffer` (k data shards) and
/// `parity` (m parity shards) arrays. Indices `< k` resolve into `buffer`,
/// indices `>= k` into `parity`.
///
/// Every call site that reaches for `get`/`get_mut` does so only for indices
/// drawn from the validated, disjoint `sources`/`targets` bitmasks, so no two
/// live borrows obtained through this table ever alias the same bytes.
struct Shards {
    buffer: *mut u8,
    buffer_offset: usize,
    parity: *mut u8,
    parity_offset: usize,
    shard_size: usize,
    k: usize,
}

impl Shards {
    fn ptr(&self, index: usize) -> *mut u8 {
        unsafe {
            if index < self.k {
                self.buffer.add(self.buffer_offset + index * self.shard_size)
            } else {
                self.parity.add(self.parity_offset + (index - self.k) * self.shard_size)
            }
        }
    }

    /// SAFETY: see struct-level invariant.
    unsafe fn get<'a>(&self, index: usize) -> &'a [u8] {
        std::slice::from_raw_parts(self.ptr(index), self.shard_size)
    }

    /// SAFETY: see struct-level invariant.
    unsafe fn get_mut<'a>(&self, index: usize) -> &'a mut [u8] {
        std::slice::from_raw_parts_mut(self.ptr(index), self.shard_size)
    }
}

/// Reconstruct or recompute shards in one stripe.
///
/// `buffer` holds the k data shards packed contiguously starting at
/// `buffer_offset`, total length `buffer_size = k * shard_size`. `parity`
/// holds the m parity shards the same way, at `parity_offset`, total length
/// `parity_size`. `sources` and `targets` are bitmasks over `[0, k+m)`: set
/// bits in `sources` mark shards currently holding valid data; set bits in
/// `targets` mark shards to (re)compute. `sources` and `targets` must be
/// disjoint and `sources` must cover at least k shards.
#[instrument(skip(buffer, parity), fields(k = context.k(), m = context.m()))]
#[allow(clippy::too_many_arguments)]
pub fn encode(
    context: &Context,
    sources: u32,
    targets: u32,
    buffer: &mut [u8],
    buffer_offset: usize,
    buffer_size: usize,
    parity: &mut [u8],
    parity_offset: usize,
    parity_size: usize,
) -> Result<()> {
    let k = context.k();
    let m = context.m();
    let w = context.w();
    let total = k + m;
    assert!(total < 31, "k + m must stay below 31 bits");

    if sources >> total != 0 {
        return Err(Error::SourcesOutOfRange);
    }
    if sources == 0 {
        return Err(Error::SourcesEmpty);
    }
    let available = sources.count_ones();
    if (available as usize) < k {
        return Err(Error::SourcesInsufficient {
            available,
            required: k as u32,
        });
    }
    if targets >> total != 0 {
        return Err(Error::TargetsOutOfRange);
    }
    if targets == 0 {
        return Err(Error::TargetsEmpty);
    }
    if targets.count_ones() as usize > m {
        return Err(Error::TargetsTooMany);
    }
    if sources & targets != 0 {
        return Err(Error::SourcesTargetsOverlap);
    }

    if buffer_size == 0 {
        return Err(Error::BufferSizeZero);
    }
    if buffer_offset + buffer_size > buffer.len() {
        return Err(Error::BufferOutOfBounds);
    }
    if buffer_size % k != 0 {
        return Err(Error::BufferSizeNotDivisible);
    }
    let shard_size = buffer_size / k;
    if shard_size % (w as usize) != 0 {
        return Err(Error::ShardSizeNotFieldAligned);
    }
    if shard_size % 8 != 0 {
        return Err(Error::ShardSizeNotWordAligned);
    }

    if parity_size == 0 {
        return Err(Error::ParitySizeZero);
    }
    if parity_size % m != 0 {
        return Err(Error::ParitySizeNotDivisible);
    }
    if parity_size / m != shard_size {
        return Err(Error::ShardSizeMismatch);
    }
    if parity_offset + parity_size > parity.len() {
        return Err(Error::ParityOutOfBounds);
    }

    debug!(shard_size, sources, targets, "encode: validated stripe");

    let shards = Shards {
        buffer: buffer.as_mut_ptr(),
        buffer_offset,
        parity: parity.as_mut_ptr(),
        parity_offset,
        shard_size,
        k,
    };

    reed_solomon_encode(context, sources, targets, &shards);
    Ok(())
}

fn reed_solomon_encode(context: &Context, sources: u32, targets: u32, shards: &Shards) {
    let k = context.k();
    let m = context.m();
    let w = context.w();

    // Fast path: k = 1 is pure replication. Every shard (data or parity)
    // under a one-data-shard context is byte-identical to the data shard, so
    // any one valid source can be copied straight into every target.
    if k == 1 {
        trace!("encode: k=1 replication fast path");
        let s = sources.trailing_zeros() as usize;
        let source: &[u8] = unsafe { shards.get(s) };
        for t in 0..(k + m) {
            if targets & (1 << t) != 0 {
                let target = unsafe { shards.get_mut(t) };
                target.copy_from_slice(source);
            }
        }
        return;
    }

    // Fast path: a single missing data shard, with every source and the one
    // target confined to [0, k+1), and exactly k of those k+1 bits set in
    // sources. The row-0-optimized invariant means the identity plus parity
    // row 0 recovers any one missing shard in that range by plain XOR.
    let window = (1u32 << (k + 1)) - 1;
    if targets.count_ones() == 1
        && (sources | targets) & !window == 0
        && (sources & window).count_ones() as usize == k
    {
        trace!("encode: single-erasure XOR fast path");
        let missing = (!sources & window).trailing_zeros() as usize;
        let target = unsafe { shards.get_mut(missing) };
        let mut first = true;
        for i in 0..=k {
            if i == missing {
                continue;
            }
            let source: &[u8] = unsafe { shards.get(i) };
            if first {
                target.copy_from_slice(source);
                first = false;
            } else {
                dot::dot_xor(source, target);
            }
        }
        return;
    }

    // General path: reconstruct any missing data shards via the decoding
    // matrix, then compute any requested parity shards from the now-complete
    // data set.
    let erasures: Vec<usize> = (0..k).filter(|&i| sources & (1 << i) == 0).collect();
    if !erasures.is_empty() {
        let survivors: Vec<usize> = (0..(k + m)).filter(|&i| sources & (1 << i) != 0).take(k).collect();
        let decoding = build_decoding_matrix(w, k, m, &survivors, context.bitmatrix());
        let kw = k * w as usize;

        for &i in &erasures {
            let row = &decoding[i * w as usize * kw..(i + 1) * w as usize * kw];
            let source_slices: Vec<&[u8]> = survivors.iter().map(|&s| unsafe { shards.get(s) }).collect();
            let target = unsafe { shards.get_mut(i) };
            dot::dot(w, k, &source_slices, row, target);
        }
    }

    for p in 0..m {
        if targets & (1 << (k + p)) != 0 {
            let row = context.encoding_row(p);
            let source_slices: Vec<&[u8]> = (0..k).map(|i| unsafe { shards.get(i) }).collect();
            let target = unsafe { shards.get_mut(k + p) };
            dot::dot(w, k, &source_slices, row, target);
        }
    }
}

/// XOR `size` bytes of `source` (starting at `source_offset`) into `target`
/// (starting at `target_offset`), in place. Exposes the aligned XOR kernel
/// directly, for callers that want plain XOR outside a full encode call.
pub fn xor(
    source: &[u8],
    source_offset: usize,
    target: &mut [u8],
    target_offset: usize,
    size: usize,
) -> Result<()> {
    if size == 0 {
        return Err(Error::BufferSizeZero);
    }
    if source_offset + size > source.len() {
        return Err(Error::BufferOutOfBounds);
    }
    if target_offset + size > target.len() {
        return Err(Error::ParityOutOfBounds);
    }
    dot::dot_xor(
        &source[source_offset..source_offset + size],
        &mut target[target_offset..target_offset + size],
    );
    Ok(())
}
