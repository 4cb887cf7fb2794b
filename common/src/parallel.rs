//! Row-band parallel iteration over row-major buffers.
//!
//! Every worker receives a contiguous band of complete rows and the index of
//! the first row in that band. Bands never overlap, so each output cell is
//! written by exactly one worker and no locking is needed.

use rayon::prelude::*;

/// Bands per rayon thread.
const BANDS_PER_THREAD: usize = 3;

/// Rows per band for an image of `height` rows. Never less than one.
#[inline]
pub fn rows_per_chunk(height: usize) -> usize {
    let num_bands = rayon::current_num_threads() * BANDS_PER_THREAD;
    (height / num_bands).max(1)
}

/// Calls `f(first_row, band)` for disjoint row bands of `data` in parallel.
///
/// # Panics
///
/// Panics if `width` is 0 or `data.len()` is not a multiple of `width`.
pub fn for_each_row_band<T, F>(data: &mut [T], width: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    assert!(width > 0, "width must be > 0");
    assert_eq!(data.len() % width, 0, "data must contain whole rows");
    if data.is_empty() {
        return;
    }

    let rows = rows_per_chunk(data.len() / width);
    data.par_chunks_mut(width * rows)
        .enumerate()
        .for_each(|(band_idx, band)| f(band_idx * rows, band));
}

/// Two equally shaped buffers split into the same row bands.
///
/// # Panics
///
/// Panics if `width` is 0, the buffers differ in length, or they do not
/// contain whole rows.
pub fn for_each_row_band2<A, B, F>(a: &mut [A], b: &mut [B], width: usize, f: F)
where
    A: Send,
    B: Send,
    F: Fn(usize, &mut [A], &mut [B]) + Sync + Send,
{
    assert!(width > 0, "width must be > 0");
    assert_eq!(a.len(), b.len(), "Zipped slices must have equal length");
    assert_eq!(a.len() % width, 0, "data must contain whole rows");
    if a.is_empty() {
        return;
    }

    let rows = rows_per_chunk(a.len() / width);
    let chunk = width * rows;
    a.par_chunks_mut(chunk)
        .zip(b.par_chunks_mut(chunk))
        .enumerate()
        .for_each(|(band_idx, (band_a, band_b))| f(band_idx * rows, band_a, band_b));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_row_band_offsets() {
        let width = 10;
        let height = 20;
        let mut data: Vec<usize> = vec![0; width * height];

        for_each_row_band(&mut data, width, |first_row, band| {
            let rows_in_band = band.len() / width;
            for local_y in 0..rows_in_band {
                let y = first_row + local_y;
                for x in 0..width {
                    band[local_y * width + x] = y * width + x;
                }
            }
        });

        for (i, &v) in data.iter().enumerate() {
            assert_eq!(v, i);
        }
    }

    #[test]
    fn test_row_bands_are_row_aligned() {
        let width = 7;
        let height = 13;
        let mut data: Vec<u32> = vec![0; width * height];

        for_each_row_band(&mut data, width, |first_row, band| {
            assert_eq!(band.len() % width, 0, "Band not row-aligned");
            for (local_y, row) in band.chunks_mut(width).enumerate() {
                row.fill((first_row + local_y) as u32);
            }
        });

        for y in 0..height {
            for x in 0..width {
                assert_eq!(data[y * width + x], y as u32);
            }
        }
    }

    #[test]
    fn test_every_row_visited_once() {
        let width = 3;
        let height = 101;
        let mut data: Vec<u8> = vec![0; width * height];
        let visited_rows = AtomicUsize::new(0);

        for_each_row_band(&mut data, width, |_, band| {
            visited_rows.fetch_add(band.len() / width, Ordering::SeqCst);
            for v in band.iter_mut() {
                *v += 1;
            }
        });

        assert_eq!(visited_rows.load(Ordering::SeqCst), height);
        assert!(data.iter().all(|&v| v == 1));
    }

    #[test]
    fn test_row_band2_same_partition() {
        let width = 8;
        let height = 10;
        let mut a: Vec<f32> = vec![0.0; width * height];
        let mut b: Vec<i32> = vec![0; width * height];

        for_each_row_band2(&mut a, &mut b, width, |first_row, band_a, band_b| {
            assert_eq!(band_a.len(), band_b.len());
            for (i, (va, vb)) in band_a.iter_mut().zip(band_b.iter_mut()).enumerate() {
                let idx = first_row * width + i;
                *va = idx as f32 * 0.5;
                *vb = idx as i32 * 2;
            }
        });

        for i in 0..width * height {
            assert_eq!(a[i], i as f32 * 0.5);
            assert_eq!(b[i], i as i32 * 2);
        }
    }

    #[test]
    fn test_empty_buffer_is_noop() {
        let mut data: Vec<f32> = Vec::new();
        for_each_row_band(&mut data, 4, |_, _| panic!("no bands expected"));
    }

    #[test]
    #[should_panic(expected = "equal length")]
    fn test_row_band2_unequal_lengths_panics() {
        let mut a: Vec<f32> = vec![0.0; 100];
        let mut b: Vec<f32> = vec![0.0; 50];
        for_each_row_band2(&mut a, &mut b, 10, |_, _, _| {});
    }

    #[test]
    fn test_rows_per_chunk_at_least_one() {
        assert_eq!(rows_per_chunk(0), 1);
        assert_eq!(rows_per_chunk(1), 1);
        assert!(rows_per_chunk(10_000) >= 1);
    }
}
