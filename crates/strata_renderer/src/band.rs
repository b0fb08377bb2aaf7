//! Row-band rendering for Strata.
//!
//! Splits the image into horizontal bands of rows that render
//! independently and in parallel using rayon, then concatenates them
//! top to bottom.

use crate::renderer::{quantize, render_pixel, Rgb};
use crate::{Camera, Hittable, RenderResult, RenderSettings, Scene};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::time::Instant;

/// A contiguous run of image rows `[bottom, top)`.
///
/// Rows are numbered from the bottom of the image, so the band's first
/// output row is `top - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowBand {
    /// Submission order; band 0 is the top of the image
    pub index: usize,
    /// Lowest row, inclusive
    pub bottom: u32,
    /// Highest row, exclusive
    pub top: u32,
}

impl RowBand {
    /// Create a new band.
    pub fn new(index: usize, bottom: u32, top: u32) -> Self {
        Self { index, bottom, top }
    }

    /// Number of rows in the band.
    pub fn rows(&self) -> u32 {
        self.top - self.bottom
    }

    /// Get the total number of pixels in this band.
    pub fn pixel_count(&self, width: u32) -> usize {
        self.rows() as usize * width as usize
    }
}

/// Partition `height` rows into bands for `thread_count` workers.
///
/// Each band holds `height / thread_count` rows (at least one). When the
/// division leaves a remainder an extra band is added, and the final band
/// always runs down to row 0, so no rows are dropped. Bands are returned
/// top to bottom.
pub fn partition_rows(height: u32, thread_count: usize) -> Vec<RowBand> {
    let rows = height as usize;
    let threads = thread_count.max(1);
    let jump = (rows / threads).max(1);
    let mut band_count = threads;
    if rows % threads != 0 {
        band_count = band_count.saturating_add(1);
    }

    // Never more bands than rows; the rest would be empty
    let mut bands = Vec::with_capacity(band_count.min(rows));
    let mut top = rows;
    for index in 0..band_count {
        if top == 0 {
            break;
        }
        let bottom = if index + 1 == band_count {
            0
        } else {
            top.saturating_sub(jump)
        };
        bands.push(RowBand::new(index, bottom as u32, top as u32));
        top = bottom;
    }

    bands
}

/// Odd constant from the golden ratio, spreads band indices across all
/// 64 bits.
const BAND_SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Seed for a band's generator.
///
/// Depends only on the base seed and the band index, never on which
/// thread picks the band up.
pub fn band_seed(seed: u64, band_index: usize) -> u64 {
    seed ^ (band_index as u64).wrapping_mul(BAND_SEED_MIX)
}

/// Render a single band to quantized pixels.
///
/// Returns pixels row by row from `top - 1` down to `bottom`, each row left
/// to right.
pub fn render_band(
    band: &RowBand,
    camera: &Camera,
    world: &dyn Hittable,
    settings: &RenderSettings,
) -> Vec<Rgb> {
    let mut rng = StdRng::seed_from_u64(band_seed(settings.seed, band.index));
    let mut pixels = Vec::with_capacity(band.pixel_count(settings.width));

    for j in (band.bottom..band.top).rev() {
        for i in 0..settings.width {
            let color = render_pixel(camera, world, i, j, settings, &mut rng);
            pixels.push(quantize(color));
        }
    }

    log::debug!(
        "Band {} (rows {}..{}) done: {} pixels",
        band.index,
        band.bottom,
        band.top,
        pixels.len()
    );
    pixels
}

/// Render the whole scene.
///
/// Bands run on a dedicated pool of `settings.thread_count` workers.
/// Output is the full image, top row first, in band submission order
/// regardless of which band finished first. A panic inside any band
/// propagates to the caller and no image is produced.
pub fn render(scene: &Scene, settings: &RenderSettings) -> RenderResult<Vec<Rgb>> {
    settings.validate()?;
    let camera = Camera::from_settings(&scene.camera)?;
    let bands = partition_rows(settings.height, settings.thread_count);

    log::info!(
        "Rendering {}x{} @ {} spp: {} objects, {} bands on {} threads",
        settings.width,
        settings.height,
        settings.samples_per_pixel,
        scene.world.len(),
        bands.len(),
        settings.thread_count
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(settings.thread_count)
        .thread_name(|i| format!("strata-band-{i}"))
        .build()?;

    let start = Instant::now();
    let band_pixels: Vec<Vec<Rgb>> = pool.install(|| {
        bands
            .par_iter()
            .map(|band| render_band(band, &camera, &scene.world, settings))
            .collect()
    });
    log::debug!("All bands finished in {:?}", start.elapsed());

    let mut pixels = Vec::with_capacity(settings.pixel_count());
    for band in band_pixels {
        pixels.extend(band);
    }

    Ok(pixels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CameraSettings, Color, Material, Sphere, Vec3, World};

    fn assert_covers_exactly(bands: &[RowBand], height: u32) {
        let mut seen = vec![0u32; height as usize];
        for band in bands {
            assert!(band.bottom < band.top, "empty band {band:?}");
            for row in band.bottom..band.top {
                seen[row as usize] += 1;
            }
        }
        assert!(seen.iter().all(|&count| count == 1), "height {height}: {seen:?}");

        // Top to bottom, contiguous
        let mut expected_top = height;
        for (i, band) in bands.iter().enumerate() {
            assert_eq!(band.index, i);
            assert_eq!(band.top, expected_top);
            expected_top = band.bottom;
        }
        assert_eq!(expected_top, 0);
    }

    #[test]
    fn test_partition_exact_fit() {
        let bands = partition_rows(96, 12);
        assert_eq!(bands.len(), 12);
        assert!(bands.iter().all(|b| b.rows() == 8));
        assert_covers_exactly(&bands, 96);
    }

    #[test]
    fn test_partition_with_remainder() {
        let bands = partition_rows(101, 12);
        assert_eq!(bands.len(), 13);
        assert!(bands[..12].iter().all(|b| b.rows() == 8));
        assert_eq!(bands[12], RowBand::new(12, 0, 5));
        assert_covers_exactly(&bands, 101);
    }

    #[test]
    fn test_partition_reference_image() {
        // 200 / 12 leaves a remainder of 8
        let bands = partition_rows(200, 12);
        assert_eq!(bands.len(), 13);
        assert_eq!(bands[0], RowBand::new(0, 184, 200));
        assert_eq!(bands[12].rows(), 8);
        assert_covers_exactly(&bands, 200);
    }

    #[test]
    fn test_partition_large_remainder_is_not_dropped() {
        // 23 / 12 = 1 row per band with 11 left over
        let bands = partition_rows(23, 12);
        assert_eq!(bands.len(), 13);
        assert_eq!(bands[12], RowBand::new(12, 0, 11));
        assert_covers_exactly(&bands, 23);
    }

    #[test]
    fn test_partition_fewer_rows_than_threads() {
        let bands = partition_rows(5, 12);
        assert_eq!(bands.len(), 5);
        assert_covers_exactly(&bands, 5);
    }

    #[test]
    fn test_partition_all_combinations() {
        for height in 1..=130 {
            for threads in 1..=20 {
                assert_covers_exactly(&partition_rows(height, threads), height);
            }
        }
    }

    #[test]
    fn test_partition_zero_height() {
        assert!(partition_rows(0, 4).is_empty());
    }

    #[test]
    fn test_band_seed_is_per_band() {
        assert_ne!(band_seed(7, 0), band_seed(7, 1));
        assert_eq!(band_seed(7, 3), band_seed(7, 3));
        assert_eq!(band_seed(7, 0), 7);
    }

    #[test]
    fn test_band_seed_neighbouring_seeds_do_not_share_streams() {
        for seed in [0u64, 1, 41, 0x5EED, u64::MAX - 1] {
            for index in 1..64 {
                assert_ne!(band_seed(seed, index), band_seed(seed + 1, index - 1));
            }
        }
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_partition_huge_thread_count() {
        // Thread counts beyond u32 range must not wrap to zero or to a small count
        for threads in [1usize << 32, (1usize << 32) + 4, usize::MAX] {
            let bands = partition_rows(200, threads);
            assert_eq!(bands.len(), 200);
            assert!(bands.iter().all(|b| b.rows() == 1));
            assert_covers_exactly(&bands, 200);
        }
    }

    fn sky_only_scene() -> Scene {
        Scene::new(
            World::new(),
            CameraSettings::new(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y, 90.0, 2.0),
        )
    }

    #[test]
    fn test_render_band_row_order() {
        // With nothing to hit, color depends only on row: higher rows are bluer
        let scene = sky_only_scene();
        let settings = RenderSettings::new().with_resolution(4, 6).with_samples(4);
        let camera = Camera::from_settings(&scene.camera).unwrap();
        let band = RowBand::new(0, 1, 5);

        let pixels = render_band(&band, &camera, &scene.world, &settings);
        assert_eq!(pixels.len(), 16);

        let first_row_red = pixels[0].r();
        let last_row_red = pixels[12].r();
        assert!(first_row_red < last_row_red);
    }

    #[test]
    fn test_render_is_top_to_bottom_and_complete() {
        let scene = sky_only_scene();
        let settings = RenderSettings::new()
            .with_resolution(8, 24)
            .with_samples(2)
            .with_threads(5);

        let pixels = render(&scene, &settings).unwrap();
        assert_eq!(pixels.len(), 8 * 24);

        // Red grows from the top of the sky towards the horizon; sample
        // every sixth row so jitter cannot reorder neighbours
        let row_red: Vec<u8> = pixels
            .chunks(8)
            .step_by(6)
            .map(|row| row[4].r())
            .collect();
        assert_eq!(row_red.len(), 4);
        assert!(row_red.windows(2).all(|w| w[0] < w[1]), "{row_red:?}");
    }

    #[test]
    fn test_render_is_reproducible() {
        let world = World::new().with(Sphere::new(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            Material::lambertian(Color::new(0.4, 0.4, 0.8)),
        ));
        let scene = Scene::new(
            world,
            CameraSettings::new(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y, 90.0, 1.0),
        );
        let settings = RenderSettings::new()
            .with_resolution(12, 12)
            .with_samples(3)
            .with_threads(4)
            .with_seed(99);

        let first = render(&scene, &settings).unwrap();
        let second = render(&scene, &settings).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_rejects_bad_settings() {
        let scene = sky_only_scene();
        let settings = RenderSettings::new().with_resolution(8, 8).with_threads(0);
        assert!(render(&scene, &settings).is_err());
    }

    #[test]
    fn test_render_rejects_degenerate_camera() {
        let scene = Scene::new(
            World::new(),
            CameraSettings::new(Vec3::ONE, Vec3::ONE, Vec3::Y, 90.0, 1.0),
        );
        let settings = RenderSettings::new().with_resolution(4, 4).with_samples(1);
        assert!(matches!(
            render(&scene, &settings),
            Err(crate::RenderError::DegenerateCamera(_))
        ));
    }
}
