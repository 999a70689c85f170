/*!
Multi-threaded Mandelbrot set renderer.

The raster is divided into contiguous row ranges, one per worker. Workers
run concurrently with no shared mutable state: each one owns a disjoint
slice of the output buffer for the lifetime of a computation, so the result
is byte-identical to a single serial pass regardless of worker count.

[`compute::compute`] is the entry point; [`kernel`] holds the serial
escape-iteration kernel it parallelises.
*/

pub mod colour;
pub mod compute;
pub mod kernel;
pub mod pixel;
pub mod ppm;
pub mod region;
pub mod screen;
