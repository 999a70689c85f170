//! Correctness and timing harness.
//!
//! Renders a serial reference image, then sweeps worker counts and checks
//! every parallel run element-wise against the reference. Finishes by
//! writing the reference image to `mandelbrot.ppm`.

use std::io;
use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;

use mandelbrot_threads::{
    colour::{HistogramColouring, Rgb},
    compute, kernel, ppm,
    region::Region,
    screen,
};

const MAX_ITERATIONS: u32 = 256;

fn main() -> io::Result<()> {
    env_logger::init();

    let size = screen::Size::new(2048, 2048);
    let region = Region::DEFAULT_VIEW;

    let mut reference = vec![0u32; size.pixel_count()];
    let started = Instant::now();
    kernel::mandelbrot_rows(region, size, 0, MAX_ITERATIONS, &mut reference);
    let serial_time = started.elapsed();
    println!(
        "serial reference:  {:9.3} ms",
        serial_time.as_secs_f64() * 1000.0
    );

    let sweep_limit = num_cpus::get().min(compute::MAX_WORKERS);
    let mut output = vec![0u32; size.pixel_count()];
    for num_workers in 2..=sweep_limit {
        output.fill(0);

        let started = Instant::now();
        compute::compute(num_workers, region, size, MAX_ITERATIONS, &mut output);
        let elapsed = started.elapsed();

        let mismatch = reference
            .par_iter()
            .zip(output.par_iter())
            .position_any(|(expected, actual)| expected != actual);

        match mismatch {
            None => println!(
                "{:2} workers:        {:9.3} ms  ({:5.2}x speedup)  correctness passed",
                num_workers,
                elapsed.as_secs_f64() * 1000.0,
                serial_time.as_secs_f64() / elapsed.as_secs_f64()
            ),
            Some(index) => println!(
                "{:2} workers:        correctness FAILED, mismatch at index {}",
                num_workers, index
            ),
        }
    }

    let mut colours = vec![Rgb::default(); size.pixel_count()];
    HistogramColouring::new().colour_image(&reference, MAX_ITERATIONS, &mut colours);
    ppm::write_ppm(Path::new("mandelbrot.ppm"), size, &colours)?;
    println!("wrote mandelbrot.ppm");

    Ok(())
}
