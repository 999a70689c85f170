/*!
Row-range partitioning and thread dispatch.

The image is cut into one contiguous band of rows per worker, sized up
front from `(height, num_workers)` alone. Each worker receives exclusive
ownership of its band's slice of the output buffer, so the workers run with
no locks and no shared mutable state, and the dispatch is equivalent to a
single serial pass over the whole image.

Threads are created fresh per computation and joined before the call
returns; there is no pooling, work stealing, or cancellation.
*/

use std::thread;
use std::time::Instant;

use log::debug;

use crate::{kernel, region::Region, screen};

/// Hard cap on workers per computation. A request beyond it is caller
/// misconfiguration and fails fast before any work starts.
pub const MAX_WORKERS: usize = 32;

/// One worker's assignment: the contiguous rows
/// `[start_row, start_row + num_rows)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowRange {
    pub start_row: u32,
    pub num_rows: u32,
}

impl RowRange {
    pub fn end_row(self) -> u32 {
        self.start_row + self.num_rows
    }
}

/// Split `[0, height)` into `num_workers` contiguous ranges, one per
/// worker, in row order.
///
/// Every worker gets `height / num_workers` rows except the last, which
/// runs through `height - 1` and so absorbs the remainder of the integer
/// division. The ranges never overlap and cover every row exactly once;
/// the concurrent-write safety of [`compute`] rests on that.
pub fn partition_rows(height: u32, num_workers: usize) -> Vec<RowRange> {
    debug_assert!(num_workers >= 1);

    let rows_per_worker = height / num_workers as u32;
    (0..num_workers)
        .map(|i| {
            let start_row = i as u32 * rows_per_worker;
            let num_rows = if i == num_workers - 1 {
                height - start_row
            } else {
                rows_per_worker
            };
            RowRange {
                start_row,
                num_rows,
            }
        })
        .collect()
}

/// Render `region` into `output` using `num_workers` threads.
///
/// Writes an escape count for every pixel and returns only once every
/// worker has finished; no partial result is observable from outside the
/// call. Worker 0 runs on the calling thread, workers 1.. on threads
/// spawned for this computation only.
///
/// # Panics
///
/// If `num_workers` is zero or exceeds [`MAX_WORKERS`], or if `output`
/// does not hold exactly `size.pixel_count()` elements. Both are checked
/// before `output` is touched.
pub fn compute(
    num_workers: usize,
    region: Region,
    size: screen::Size,
    max_iterations: u32,
    output: &mut [u32],
) {
    assert!(
        (1..=MAX_WORKERS).contains(&num_workers),
        "worker count must be in 1..={}, got {}",
        MAX_WORKERS,
        num_workers
    );
    assert_eq!(
        output.len(),
        size.pixel_count(),
        "output buffer does not match a {}x{} raster",
        size.width,
        size.height
    );

    let assignments = partition_rows(size.height, num_workers);

    // Hand each worker exclusive ownership of its rows before any thread
    // starts. The splits are disjoint and cover the buffer exactly once,
    // mirroring the row ranges.
    let width = size.width as usize;
    let mut bands = Vec::with_capacity(num_workers);
    let mut rest = output;
    for assignment in &assignments {
        let (band, tail) = rest.split_at_mut(assignment.num_rows as usize * width);
        bands.push(band);
        rest = tail;
    }

    thread::scope(|scope| {
        let mut workers = assignments.iter().copied().zip(bands).enumerate();
        let first = workers.next();

        for (worker_id, (rows, band)) in workers {
            scope.spawn(move || worker_rows(worker_id, region, size, rows, max_iterations, band));
        }

        // Assignment 0 runs on the calling thread; the scope joins every
        // spawned worker before `compute` returns.
        if let Some((worker_id, (rows, band))) = first {
            worker_rows(worker_id, region, size, rows, max_iterations, band);
        }
    });
}

/// Worker entry point: invoke the kernel exactly once over this worker's
/// band. The elapsed-time report is diagnostic only and goes through the
/// log facade so it never interleaves with sibling workers' output.
fn worker_rows(
    worker_id: usize,
    region: Region,
    size: screen::Size,
    rows: RowRange,
    max_iterations: u32,
    band: &mut [u32],
) {
    let started = Instant::now();

    kernel::mandelbrot_rows(region, size, rows.start_row, max_iterations, band);

    debug!(
        "worker {} finished rows {}..{} in {:.4} ms",
        worker_id,
        rows.start_row,
        rows.end_row(),
        started.elapsed().as_secs_f64() * 1000.0
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_full_coverage(height: u32, num_workers: usize) {
        let ranges = partition_rows(height, num_workers);
        assert_eq!(ranges.len(), num_workers);

        let mut next_row = 0;
        for range in &ranges {
            assert_eq!(range.start_row, next_row, "gap or overlap at {:?}", range);
            next_row = range.end_row();
        }
        assert_eq!(next_row, height, "rows {}..{} unassigned", next_row, height);
    }

    #[test]
    fn partition_covers_every_row_exactly_once() {
        for height in [1, 2, 7, 8, 10, 100, 1080] {
            for num_workers in 1..=MAX_WORKERS {
                assert_full_coverage(height, num_workers);
            }
        }
    }

    #[test]
    fn partition_splits_eight_rows_evenly_across_four_workers() {
        let ranges = partition_rows(8, 4);
        let expected: Vec<RowRange> = [(0, 2), (2, 2), (4, 2), (6, 2)]
            .into_iter()
            .map(|(start_row, num_rows)| RowRange {
                start_row,
                num_rows,
            })
            .collect();
        assert_eq!(ranges, expected);
    }

    #[test]
    fn last_worker_absorbs_remainder() {
        let ranges = partition_rows(10, 3);
        let expected: Vec<RowRange> = [(0, 3), (3, 3), (6, 4)]
            .into_iter()
            .map(|(start_row, num_rows)| RowRange {
                start_row,
                num_rows,
            })
            .collect();
        assert_eq!(ranges, expected);
    }

    #[test]
    fn one_worker_per_row() {
        let ranges = partition_rows(8, 8);
        for (i, range) in ranges.iter().enumerate() {
            assert_eq!(range.start_row, i as u32);
            assert_eq!(range.num_rows, 1);
        }
    }

    #[test]
    fn more_workers_than_rows_still_covers() {
        assert_full_coverage(12, 32);
    }

    fn serial_reference(size: screen::Size, max_iterations: u32) -> Vec<u32> {
        let mut output = vec![0u32; size.pixel_count()];
        kernel::mandelbrot_rows(Region::DEFAULT_VIEW, size, 0, max_iterations, &mut output);
        output
    }

    #[test]
    fn dispatch_matches_serial_reference_for_any_worker_count() {
        let size = screen::Size::new(64, 48);
        let reference = serial_reference(size, 64);

        for num_workers in [1, 2, 3, 5, 8, 31, 32] {
            let mut output = vec![0u32; size.pixel_count()];
            compute(num_workers, Region::DEFAULT_VIEW, size, 64, &mut output);
            assert_eq!(output, reference, "mismatch with {} workers", num_workers);
        }
    }

    #[test]
    fn four_workers_on_eight_by_eight_match_one_worker() {
        let size = screen::Size::new(8, 8);
        let region = Region::new(-2.0, -1.0, 1.0, 1.0);

        let mut serial = vec![0u32; size.pixel_count()];
        compute(1, region, size, 4, &mut serial);

        let mut parallel = vec![0u32; size.pixel_count()];
        compute(4, region, size, 4, &mut parallel);

        assert_eq!(parallel, serial);
    }

    #[test]
    fn non_divisible_height_leaves_no_row_unwritten() {
        let size = screen::Size::new(6, 10);
        let max_iterations = 5;

        // Sentinel above the iteration cap; any survivor would mean a row
        // was never assigned.
        let mut output = vec![u32::MAX; size.pixel_count()];
        compute(3, Region::DEFAULT_VIEW, size, max_iterations, &mut output);

        assert!(output.iter().all(|&count| count <= max_iterations));
    }

    #[test]
    fn repeated_runs_are_identical() {
        let size = screen::Size::new(32, 17);

        let mut first = vec![0u32; size.pixel_count()];
        compute(7, Region::DEFAULT_VIEW, size, 32, &mut first);

        let mut second = vec![0u32; size.pixel_count()];
        compute(7, Region::DEFAULT_VIEW, size, 32, &mut second);

        assert_eq!(first, second);
    }

    #[test]
    #[should_panic(expected = "worker count")]
    fn rejects_worker_count_above_cap() {
        let size = screen::Size::new(8, 8);
        let mut output = vec![0u32; size.pixel_count()];
        compute(MAX_WORKERS + 1, Region::DEFAULT_VIEW, size, 4, &mut output);
    }

    #[test]
    #[should_panic(expected = "worker count")]
    fn rejects_zero_workers() {
        let size = screen::Size::new(8, 8);
        let mut output = vec![0u32; size.pixel_count()];
        compute(0, Region::DEFAULT_VIEW, size, 4, &mut output);
    }

    #[test]
    #[should_panic(expected = "output buffer")]
    fn rejects_mis_sized_output() {
        let size = screen::Size::new(8, 8);
        let mut output = vec![0u32; size.pixel_count() - 1];
        compute(2, Region::DEFAULT_VIEW, size, 4, &mut output);
    }
}
