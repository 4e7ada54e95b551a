mod scene;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use prism_renderer::{CancelToken, FrameStatus, RenderConfig, Scheduler};
use scene::{default_camera, ScenePreset};

/// Render a built-in scene with the Prism CPU ray tracer and save it as PNG.
#[derive(Parser, Debug)]
#[command(name = "prism", version, about)]
struct Cli {
    /// Scene preset to render
    #[arg(short, long, value_enum, default_value_t = ScenePreset::Showcase)]
    scene: ScenePreset,

    /// Image width in pixels
    #[arg(short = 'W', long, default_value_t = 640)]
    width: u32,

    /// Image height in pixels
    #[arg(short = 'H', long, default_value_t = 480)]
    height: u32,

    /// Samples per pixel
    #[arg(long, default_value_t = 4)]
    spp: u32,

    /// Maximum recursion depth for reflection and refraction rays
    #[arg(long, default_value_t = 5)]
    max_depth: u32,

    /// Worker threads (defaults to one per hardware thread)
    #[arg(short = 'j', long)]
    workers: Option<usize>,

    /// Seed for sample jitter; omit for a random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Times a failed tile is resubmitted before giving up on its rows
    #[arg(long, default_value_t = 1)]
    tile_retries: u32,

    /// Output PNG path
    #[arg(short, long, default_value = "render.png")]
    output: PathBuf,
}

impl Cli {
    fn render_config(&self) -> RenderConfig {
        RenderConfig {
            width: self.width,
            height: self.height,
            max_depth: self.max_depth,
            samples_per_pixel: self.spp,
            workers: self.workers,
            seed: self.seed,
            tile_retries: self.tile_retries,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    let config = cli.render_config();

    log::info!("Starting Prism ({:?} scene)", cli.scene);

    let scene = cli.scene.build();
    let camera = default_camera(config.width, config.height);
    let scheduler = Scheduler::from_config(&config).context("invalid render settings")?;

    let frame = scheduler.render(&scene, &camera, &config, &CancelToken::new())?;

    if let FrameStatus::Degraded { failed_rows } = &frame.status {
        log::warn!("Saving incomplete image; missing rows {:?}", failed_rows);
    }
    log::info!(
        "Traced {} primary rays in {:.2?}",
        frame.stats.primary_rays,
        frame.stats.elapsed
    );

    let (width, height) = (frame.framebuffer.width, frame.framebuffer.height);
    let image = image::RgbaImage::from_raw(width, height, frame.framebuffer.into_rgba())
        .context("framebuffer size does not match image dimensions")?;
    image
        .save(&cli.output)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;

    log::info!("Wrote {}", cli.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["prism"]);
        let config = cli.render_config();

        assert_eq!(cli.scene, ScenePreset::Showcase);
        assert_eq!(config, RenderConfig::default());
        assert_eq!(cli.output, PathBuf::from("render.png"));
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "prism", "--scene", "basic", "-W", "32", "-H", "16", "--spp", "2", "--max-depth", "3",
            "-j", "2", "--seed", "9",
        ]);
        let config = cli.render_config();

        assert_eq!(cli.scene, ScenePreset::Basic);
        assert_eq!((config.width, config.height), (32, 16));
        assert_eq!(config.samples_per_pixel, 2);
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.workers, Some(2));
        assert_eq!(config.seed, Some(9));
    }
}
