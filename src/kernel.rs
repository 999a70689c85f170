//! Serial escape-iteration kernel.
//!
//! Pure and stateless: callers may invoke [`mandelbrot_rows`] concurrently
//! on disjoint row slices of the same image.

use crate::{pixel::Complex, region::Region, screen};

/// Number of iterations before `z <- z^2 + c` (starting from `z = c`)
/// escapes the radius-2 disc, capped at `max_iterations` for points that
/// never escape.
pub fn escape_iterations(c: Complex, max_iterations: u32) -> u32 {
    let mut z = c;
    for i in 0..max_iterations {
        if z.magnitude_squared() > 4.0 {
            return i;
        }
        z = z.step(c);
    }
    max_iterations
}

/// Compute escape counts for a contiguous band of rows.
///
/// `output` holds exactly the rows `[start_row, start_row + n)` of the
/// image, row-major, where `n = output.len() / size.width`. Pixel
/// coordinates are derived from `start_row`, so a band render is
/// bit-identical to the same rows of a whole-image render.
pub fn mandelbrot_rows(
    region: Region,
    size: screen::Size,
    start_row: u32,
    max_iterations: u32,
    output: &mut [u32],
) {
    let width = size.width as usize;
    debug_assert!(width > 0);
    debug_assert_eq!(output.len() % width, 0);

    let dx = (region.x1 - region.x0) / size.width as f32;
    let dy = (region.y1 - region.y0) / size.height as f32;

    for (band_row, row) in output.chunks_exact_mut(width).enumerate() {
        let j = start_row + band_row as u32;
        let imaginary = region.y0 + j as f32 * dy;
        for (i, out) in row.iter_mut().enumerate() {
            let c = Complex {
                real: region.x0 + i as f32 * dx,
                imaginary,
            };
            *out = escape_iterations(c, max_iterations);
        }
    }
}
