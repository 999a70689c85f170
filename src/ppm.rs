//! Binary PPM (P6) image output.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::{colour::Rgb, screen};

/// Write `pixels` (row-major, `size.pixel_count()` long) to `writer` as a
/// P6 PPM image.
pub fn write_to<W: Write>(writer: &mut W, size: screen::Size, pixels: &[Rgb]) -> io::Result<()> {
    debug_assert_eq!(pixels.len(), size.pixel_count());

    write!(writer, "P6\n{} {}\n255\n", size.width, size.height)?;
    writer.write_all(bytemuck::cast_slice(pixels))
}

/// Write `pixels` to the file at `path` as a P6 PPM image.
pub fn write_ppm(path: &Path, size: screen::Size, pixels: &[Rgb]) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_to(&mut writer, size, pixels)?;
    writer.flush()
}
