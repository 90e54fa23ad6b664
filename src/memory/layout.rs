/*!
 * Layout Generator
 * Builds the initial ordered partition list for a total memory size
 *
 * Every generated list covers `[0, total)` contiguously with free blocks.
 * The fragmented and mixed layouts draw from the supplied random source, so
 * callers that need reproducible layouts pass a seeded generator.
 */

use super::types::{LayoutKind, MemoryBlock};
use crate::core::limits::{
    FRAGMENT_MAX_FRACTION, FRAGMENT_MIN_FRACTION, FRAGMENT_UNIT, MAX_FRAGMENTS, MIN_FRAGMENTS,
    MIN_PARTITION_SIZE, MIXED_BANDS, MIXED_DEFAULT_RANGE, MIXED_MAX_PARTITIONS, MIXED_RANGES,
    MULTIPLE_BANDS, MULTIPLE_EVEN_SCALE, MULTIPLE_MAX_PARTITIONS, MULTIPLE_ODD_SCALE,
};
use crate::core::types::Size;
use rand::Rng;
use tracing::debug;

/// Generate the initial free-block list for `total` KB of memory
pub fn generate_layout<R: Rng + ?Sized>(
    total: Size,
    kind: LayoutKind,
    rng: &mut R,
) -> Vec<MemoryBlock> {
    let sizes = match kind {
        LayoutKind::Single => vec![total],
        LayoutKind::Multiple => multiple_sizes(total),
        LayoutKind::Fragmented => fragmented_sizes(total, rng),
        LayoutKind::Mixed => mixed_sizes(total, rng),
    };

    debug!(total, layout = %kind, ?sizes, "Generated partition sizes");
    blocks_from_sizes(&sizes)
}

/// Lay sizes out back to back from address 0, skipping empty partitions
fn blocks_from_sizes(sizes: &[Size]) -> Vec<MemoryBlock> {
    let mut blocks = Vec::with_capacity(sizes.len());
    let mut address = 0;
    for &size in sizes.iter().filter(|&&size| size > 0) {
        blocks.push(MemoryBlock::free(address, size));
        address += size;
    }
    blocks
}

/// Partition count for the first band whose upper bound covers `total`
fn band_count(total: Size, bands: &[(Size, usize)], max: usize) -> usize {
    bands
        .iter()
        .find(|(bound, _)| total <= *bound)
        .map_or(max, |&(_, count)| count)
}

/// `count` equal shares, the remainder handed out one unit at a time from the front
fn even_split(total: Size, count: usize) -> Vec<Size> {
    let base = total / count;
    let remainder = total % count;
    (0..count)
        .map(|i| base + usize::from(i < remainder))
        .collect()
}

#[inline]
fn scale_floor(size: Size, factor: f64) -> Size {
    (size as f64 * factor).floor() as Size
}

fn multiple_sizes(total: Size) -> Vec<Size> {
    let count = band_count(total, &MULTIPLE_BANDS, MULTIPLE_MAX_PARTITIONS);

    let mut sizes: Vec<Size> = even_split(total, count)
        .into_iter()
        .enumerate()
        .map(|(i, size)| {
            let factor = if i % 2 == 0 {
                MULTIPLE_EVEN_SCALE
            } else {
                MULTIPLE_ODD_SCALE
            };
            scale_floor(size, factor).max(MIN_PARTITION_SIZE)
        })
        .collect();

    // Residual from rounding and clamping lands on the last partition
    let sum: Size = sizes.iter().sum();
    if sum <= total {
        if let Some(last) = sizes.last_mut() {
            *last += total - sum;
        }
    } else {
        let excess = sum - total;
        match sizes.last_mut() {
            Some(last) if excess <= *last => *last -= excess,
            _ => return even_split(total, count),
        }
    }

    sizes
}

fn fragmented_sizes<R: Rng + ?Sized>(total: Size, rng: &mut R) -> Vec<Size> {
    let count = (total / FRAGMENT_UNIT).clamp(MIN_FRAGMENTS, MAX_FRAGMENTS);

    let mut remaining = total;
    let mut sizes = Vec::with_capacity(count);
    for _ in 0..count - 1 {
        let max = scale_floor(remaining, FRAGMENT_MAX_FRACTION);
        let min = scale_floor(remaining, FRAGMENT_MIN_FRACTION);
        let size = if max > min { rng.gen_range(min..max) } else { min };
        sizes.push(size);
        remaining -= size;
    }
    // Final fragment absorbs whatever is left
    sizes.push(remaining);

    sizes
}

fn mixed_sizes<R: Rng + ?Sized>(total: Size, rng: &mut R) -> Vec<Size> {
    let count = band_count(total, &MIXED_BANDS, MIXED_MAX_PARTITIONS);

    let mut sizes: Vec<Size> = (0..count - 1)
        .map(|i| {
            let (base, span) = MIXED_RANGES.get(i).copied().unwrap_or(MIXED_DEFAULT_RANGE);
            let fraction = base + rng.gen::<f64>() * span;
            scale_floor(total, fraction).max(MIN_PARTITION_SIZE)
        })
        .collect();

    let used: Size = sizes.iter().sum();
    if used >= total {
        // Overcommitted: proportional sizing is discarded wholesale
        debug!(total, used, "Mixed layout overcommitted, falling back to even split");
        return even_split(total, count);
    }
    sizes.push(total - used);

    sizes
}
