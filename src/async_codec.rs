//! Thin async dispatch wrapper (ambient, optional): schedules one `encode`
//! call onto the blocking thread pool and awaits its completion. The core
//! itself stays synchronous and single-threaded per call; this module is the
//! host-side scheduling concern the synchronous core deliberately excludes.

use std::sync::Arc;

use tracing::instrument;

use crate::context::Context;
use crate::error::{Error, Result};

/// Run one `encode` call on the blocking thread pool, returning its result.
///
/// Takes ownership of the shard buffers for the duration of the call (rather
/// than borrowing them) because the work moves onto another thread; callers
/// get them back in the returned tuple.
#[instrument(skip(buffer, parity))]
#[allow(clippy::too_many_arguments)]
pub async fn encode(
    context: Arc<Context>,
    sources: u32,
    targets: u32,
    mut buffer: Vec<u8>,
    buffer_offset: usize,
    buffer_size: usize,
    mut parity: Vec<u8>,
    parity_offset: usize,
    parity_size: usize,
) -> Result<(Vec<u8>, Vec<u8>)> {
    tokio::task::spawn_blocking(move || {
        crate::encode::encode(
            &context,
            sources,
            targets,
            &mut buffer,
            buffer_offset,
            buffer_size,
            &mut parity,
            parity_offset,
            parity_size,
        )?;
        Ok((buffer, parity))
    })
    .await
    .map_err(|_| Error::TaskJoinFailed)?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn dispatches_k1_mirror_on_the_blocking_pool() {
        let ctx = Arc::new(Context::create(1, 1).unwrap());
        let d0: [u8; 8] = [0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77];
        let buffer = d0.to_vec();
        let parity = vec![0u8; 8];

        let (_, parity) = encode(ctx, 0b01, 0b10, buffer, 0, 8, parity, 0, 8)
            .await
            .unwrap();
        assert_eq!(parity, d0);
    }
}
