use anyhow::{Context, Result};
use std::path::Path;
use std::time::Instant;
use strata_renderer::{render, save_ppm, RenderSettings, Scene};

/// Where the finished image is written, relative to the working directory.
const OUTPUT_PATH: &str = "bin/picture.ppm";

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    log::info!("Starting Strata");

    let settings = RenderSettings::new()
        .with_resolution(400, 200)
        .with_samples(100)
        .with_threads(12);
    let scene = Scene::reference(settings.aspect_ratio());

    let output = Path::new(OUTPUT_PATH);
    if let Some(dir) = output.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    }

    let start = Instant::now();
    let pixels = render(&scene, &settings).context("Render failed")?;
    let elapsed = start.elapsed();

    save_ppm(output, settings.width, settings.height, &pixels)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    log::info!("Elapsed time: {:.3} s", elapsed.as_secs_f64());
    log::info!("Saved to {}", output.display());

    Ok(())
}
