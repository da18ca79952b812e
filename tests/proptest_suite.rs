//! Property-based tests over the quantified properties named in the core's
//! testable-properties section: round-trip recovery for arbitrary survivor
//! sets, parity idempotence, chunk-size determinism, and XOR commutativity.

use cauchy_ec::context::Context;
use cauchy_ec::encode::{encode, xor};
use proptest::prelude::*;

const SHARD_SIZE: usize = 32;

/// (k, m) pairs small enough to exhaustively exercise survivor-set
/// enumeration within a proptest case budget.
fn km_strategy() -> impl Strategy<Value = (usize, usize)> {
    prop_oneof![
        Just((1usize, 1usize)),
        Just((2, 1)),
        Just((2, 2)),
        Just((3, 2)),
        Just((4, 2)),
        Just((4, 3)),
        Just((6, 3)),
    ]
}

fn shard_data(k: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), k * SHARD_SIZE)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Encoding all parity then erasing any valid k-subset of the k+m shards
    /// and reconstructing the rest always reproduces the original data bytes.
    #[test]
    fn round_trip_recovers_arbitrary_survivor_set(
        (k, m) in km_strategy(),
        data in shard_data(6),
        erase_seed in any::<u32>(),
    ) {
        let data = &data[0..k * SHARD_SIZE];
        let ctx = Context::create(k, m).unwrap();
        let total = k + m;

        let mut buffer = data.to_vec();
        let mut parity = vec![0u8; m * SHARD_SIZE];
        let all_data_mask: u32 = (1 << k) - 1;
        let all_mask: u32 = (1 << total) - 1;
        encode(
            &ctx, all_data_mask, all_mask ^ all_data_mask,
            &mut buffer, 0, k * SHARD_SIZE,
            &mut parity, 0, m * SHARD_SIZE,
        ).unwrap();

        let original_shards: Vec<Vec<u8>> = (0..k)
            .map(|i| buffer[i * SHARD_SIZE..(i + 1) * SHARD_SIZE].to_vec())
            .collect();

        // Pick a pseudo-random k-subset of [0, total) as survivors, biased by
        // erase_seed, deterministic given the seed (no real randomness used).
        let mut order: Vec<usize> = (0..total).collect();
        for i in (1..total).rev() {
            let j = (erase_seed as usize).wrapping_mul(2654435761).wrapping_add(i) % (i + 1);
            order.swap(i, j);
        }
        let survivors: u32 = order[0..k].iter().map(|&i| 1u32 << i).sum();
        let erased_mask = all_mask ^ survivors;

        for i in 0..k {
            if erased_mask & (1 << i) != 0 {
                buffer[i * SHARD_SIZE..(i + 1) * SHARD_SIZE].copy_from_slice(&vec![0u8; SHARD_SIZE]);
            }
        }
        for i in 0..m {
            if erased_mask & (1 << (k + i)) != 0 {
                parity[i * SHARD_SIZE..(i + 1) * SHARD_SIZE].copy_from_slice(&vec![0u8; SHARD_SIZE]);
            }
        }

        encode(
            &ctx, survivors, erased_mask,
            &mut buffer, 0, k * SHARD_SIZE,
            &mut parity, 0, m * SHARD_SIZE,
        ).unwrap();

        for i in 0..k {
            prop_assert_eq!(
                &buffer[i * SHARD_SIZE..(i + 1) * SHARD_SIZE],
                original_shards[i].as_slice(),
                "data shard {} mismatch after recovery (k={}, m={})", i, k, m
            );
        }
    }

    /// Encoding parity twice from the same data and shard size yields
    /// byte-identical parity both times.
    #[test]
    fn parity_is_idempotent_for_fixed_shard_size(
        (k, m) in km_strategy(),
        data in shard_data(6),
    ) {
        let data = &data[0..k * SHARD_SIZE];
        let ctx = Context::create(k, m).unwrap();
        let total = k + m;
        let all_data_mask: u32 = (1 << k) - 1;
        let all_mask: u32 = (1 << total) - 1;

        let mut buffer_a = data.to_vec();
        let mut parity_a = vec![0u8; m * SHARD_SIZE];
        encode(&ctx, all_data_mask, all_mask ^ all_data_mask, &mut buffer_a, 0, k * SHARD_SIZE, &mut parity_a, 0, m * SHARD_SIZE).unwrap();

        let mut buffer_b = data.to_vec();
        let mut parity_b = vec![0u8; m * SHARD_SIZE];
        encode(&ctx, all_data_mask, all_mask ^ all_data_mask, &mut buffer_b, 0, k * SHARD_SIZE, &mut parity_b, 0, m * SHARD_SIZE).unwrap();

        prop_assert_eq!(parity_a, parity_b);
    }

    /// `xor(a, b)` followed by `xor(a, b)` again restores b's original bytes.
    #[test]
    fn xor_is_self_inverse_on_arbitrary_buffers(
        a in prop::collection::vec(any::<u8>(), 1..256),
    ) {
        let len = a.len();
        let mut b: Vec<u8> = a.iter().map(|x| x.wrapping_mul(31)).collect();
        let original_b = b.clone();
        xor(&a, 0, &mut b, 0, len).unwrap();
        xor(&a, 0, &mut b, 0, len).unwrap();
        prop_assert_eq!(b, original_b);
    }
}
