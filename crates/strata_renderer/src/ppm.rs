//! Plain-text PPM (`P3`) output.

use crate::{RenderError, RenderResult, Rgb};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write pixels as an ASCII `P3` image, one `R G B` line per pixel.
///
/// `pixels` must be in row-major order starting at the top-left corner.
pub fn write_ppm<W: Write>(
    writer: &mut W,
    width: u32,
    height: u32,
    pixels: &[Rgb],
) -> RenderResult<()> {
    let expected = width as usize * height as usize;
    if pixels.len() != expected {
        return Err(RenderError::PixelCount {
            expected,
            actual: pixels.len(),
        });
    }

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", width, height)?;
    writeln!(writer, "255")?;

    for Rgb([r, g, b]) in pixels {
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    Ok(())
}

/// Create (or truncate) `path` and write the image to it.
pub fn save_ppm(
    path: impl AsRef<Path>,
    width: u32,
    height: u32,
    pixels: &[Rgb],
) -> RenderResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_ppm(&mut writer, width, height, pixels)?;
    writer.flush()?;

    log::debug!("Wrote {}x{} image to {}", width, height, path.as_ref().display());
    Ok(())
}
