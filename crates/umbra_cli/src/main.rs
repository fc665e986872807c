use std::path::PathBuf;
use std::time::Instant;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use umbra_core::load_scene_file;
use umbra_renderer::{render, LightModel, RenderSettings, Scene};

/// Render a scene file to a PNG with direct lighting and hard shadows.
#[derive(Parser, Debug)]
#[command(name = "umbra", version, about, long_about = None)]
struct Args {
    /// Scene file to render
    scene: PathBuf,

    /// Output PNG path
    #[arg(short, long, default_value = "out.png")]
    output: PathBuf,

    /// Image width in pixels
    #[arg(
        short = 'W',
        long,
        default_value_t = 640,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    width: u32,

    /// Image height in pixels
    #[arg(
        short = 'H',
        long,
        default_value_t = 480,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    height: u32,

    /// Horizontal field of view in degrees
    #[arg(long, default_value_t = 60.0, allow_negative_numbers = true)]
    fov: f64,

    /// Light falloff: none, linear or quadratic
    #[arg(long, default_value_t = LightModel::Linear)]
    light_model: LightModel,

    /// Distance at which the light fades out
    #[arg(long, default_value_t = 100.0)]
    max_distance: f64,

    /// Distance beyond which surfaces and the light are ignored
    #[arg(long = "cutoff", default_value_t = 1000.0)]
    cutoff_distance: f64,

    /// Brightness kept in shadow, from 0 (black) to 1 (no shadows)
    #[arg(long = "shadow", default_value_t = 0.3, allow_negative_numbers = true)]
    shadow_factor: f64,

    /// Worker threads, defaults to the available parallelism
    #[arg(short, long)]
    threads: Option<usize>,
}

impl Args {
    fn settings(&self) -> Result<RenderSettings> {
        ensure!(
            (0.0..=1.0).contains(&self.shadow_factor),
            "shadow factor must be in [0, 1], got {}",
            self.shadow_factor
        );
        ensure!(
            self.fov > 0.0 && self.fov < 180.0,
            "field of view must be between 0 and 180 degrees, got {}",
            self.fov
        );

        let threads = match self.threads {
            Some(threads) => threads,
            None => std::thread::available_parallelism().map_or(1, |n| n.get()),
        };
        ensure!(threads >= 1, "thread count must be at least 1");

        Ok(RenderSettings {
            width: self.width,
            height: self.height,
            fov: self.fov,
            threads,
            light_model: self.light_model,
            max_distance: self.max_distance,
            cutoff_distance: self.cutoff_distance,
            shadow_factor: self.shadow_factor,
            ..RenderSettings::default()
        })
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let settings = args.settings()?;

    let start = Instant::now();
    let records = load_scene_file(&args.scene)
        .with_context(|| format!("Failed to read scene {}", args.scene.display()))?;
    log::info!("Read {} entries from {}", records.len(), args.scene.display());

    let scene = Scene::from_records(&records, settings).context("Failed to build scene")?;
    log::info!(
        "Scene ready in {:.2?}: {} primitives, {} textures",
        start.elapsed(),
        scene.primitive_count(),
        scene.texture_count()
    );

    let image = render(&scene).context("Render failed")?;
    image
        .save_png(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    log::info!("Done in {:.2?}", start.elapsed());
    Ok(())
}
