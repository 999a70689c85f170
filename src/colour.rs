//! Colouring algorithms.

use bytemuck::{Pod, Zeroable};
use fnv::{FnvHashMap, FnvHashSet};
use log::trace;
use rayon::prelude::{IndexedParallelIterator, IntoParallelRefMutIterator, ParallelIterator};

/// [`bytemuck`]-compatible colour output for a single pixel.
#[repr(C)]
#[derive(Pod, Zeroable, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Histogram-based colouring algorithm ([Wikipedia](https://en.wikipedia.org/wiki/Plotting_algorithms_for_the_Mandelbrot_set#Histogram_coloring)).
///
/// Colours a finished buffer of escape counts. Pixels that never escaped
/// (count equal to the iteration cap) stay black; escaped pixels are shaded
/// by their count's position in the cumulative histogram, which spreads the
/// palette evenly no matter how counts cluster.
pub struct HistogramColouring {
    total_samples: usize,
    bucket_labels: Vec<u32>,
    histogram: FnvHashMap<u32, u32>,
    histogram_ranges: FnvHashMap<u32, f32>,
}

impl HistogramColouring {
    pub fn new() -> Self {
        Self {
            total_samples: 0,
            bucket_labels: Vec::new(),
            histogram: FnvHashMap::default(),
            histogram_ranges: FnvHashMap::default(),
        }
    }

    pub fn reset(&mut self) {
        self.total_samples = 0;
        self.bucket_labels.clear();
        self.histogram.clear();
        self.histogram_ranges.clear();
    }

    /// Normalised cumulative position of an escape count, if it escaped.
    pub fn range_of(&self, iteration_count: u32) -> Option<f32> {
        self.histogram_ranges.get(&iteration_count).copied()
    }

    /// Colour `iterations` into `colours`.
    pub fn colour_image(
        &mut self,
        iterations: &[u32],
        max_iterations: u32,
        colours: &mut [Rgb],
    ) {
        trace!("begin colour_image");

        debug_assert_eq!(colours.len(), iterations.len());

        self.reset();

        for &iteration_count in iterations {
            if iteration_count >= max_iterations {
                continue;
            }

            let value = self.histogram.entry(iteration_count).or_insert_with(|| {
                self.bucket_labels.push(iteration_count);
                0
            });
            *value += 1;
            self.total_samples += 1;
        }

        debug_assert_eq!(
            self.total_samples,
            self.histogram.values().map(|value| *value as usize).sum()
        );

        debug_assert!(
            self.bucket_labels.len()
                == self
                    .bucket_labels
                    .iter()
                    .copied()
                    .collect::<FnvHashSet<u32>>()
                    .len(),
            "bucket_labels contains duplicates: {:?}",
            self.bucket_labels
        );
        self.bucket_labels.sort();

        let mut acc = 0;
        let total_samples = self.total_samples as f32;
        for bucket_label in &self.bucket_labels {
            self.histogram_ranges
                .insert(*bucket_label, acc as f32 / total_samples);
            acc += self.histogram.get(bucket_label).copied().unwrap_or(0);
        }

        colours
            .par_iter_mut()
            .enumerate()
            .for_each(|(index, colour)| {
                let iteration_count = iterations[index];
                *colour = if iteration_count >= max_iterations {
                    Rgb::default()
                } else {
                    let value = self
                        .histogram_ranges
                        .get(&iteration_count)
                        .copied()
                        .unwrap_or_else(|| {
                            panic!("{} was not in histogram_ranges", iteration_count)
                        });
                    gradient(value)
                };
            });

        trace!("end colour_image");
    }
}

impl Default for HistogramColouring {
    fn default() -> Self {
        Self::new()
    }
}

/// Dark-blue-to-white ramp over `value` in `[0, 1]`.
fn gradient(value: f32) -> Rgb {
    let value = value.clamp(0.0, 1.0);
    Rgb {
        r: (value * 255.0) as u8,
        g: (value * 255.0) as u8,
        b: (64.0 + value * 191.0) as u8,
    }
}
