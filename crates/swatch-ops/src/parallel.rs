//! Per-pixel iteration helpers.
//!
//! With the `parallel` feature these fan out over Rayon's global pool;
//! without it they run on the calling thread. Both paths visit pixels with
//! the same index and produce identical output.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use swatch_core::CHANNELS;

/// Maps every packed RGB pixel to a value, preserving order.
pub(crate) fn map_pixels<T, F>(data: &[u8], f: F) -> Vec<T>
where
    T: Send,
    F: Fn([u8; 3]) -> T + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        data.par_chunks_exact(CHANNELS)
            .map(|p| f([p[0], p[1], p[2]]))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        data.chunks_exact(CHANNELS)
            .map(|p| f([p[0], p[1], p[2]]))
            .collect()
    }
}

/// Maps each pixel index in `0..len` to a value, preserving order.
pub(crate) fn map_indices<T, F>(len: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        (0..len).into_par_iter().map(f).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        (0..len).map(f).collect()
    }
}

/// Runs `f(index, pixel)` on every packed RGB pixel in place.
pub(crate) fn for_each_pixel_mut<F>(data: &mut [u8], f: F)
where
    F: Fn(usize, &mut [u8]) + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        data.par_chunks_exact_mut(CHANNELS)
            .enumerate()
            .for_each(|(i, p)| f(i, p));
    }
    #[cfg(not(feature = "parallel"))]
    {
        data.chunks_exact_mut(CHANNELS)
            .enumerate()
            .for_each(|(i, p)| f(i, p));
    }
}
