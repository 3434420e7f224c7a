use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use log::info;

mod cli;
mod presets;

use cli::Args;
use sundog_render::{render, Framebuffer, RenderConfig, Scene};

fn init_logger(level: log::LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

/// Repeat the render with doubling iteration counts until at least one
/// second has elapsed, then report the mean frame time. Returns the last
/// frame so a benchmark run still produces an image.
fn bench(scene: &Scene, config: &RenderConfig) -> Framebuffer {
    let min_elapsed = Duration::from_secs(1);
    let mut iters = 1usize;
    loop {
        let start = Instant::now();
        let mut frame = render(scene, config).0;
        for _ in 1..iters {
            frame = render(scene, config).0;
        }
        let elapsed = start.elapsed();
        if elapsed >= min_elapsed {
            info!(
                "benchmark: {} iterations, {:.1} ms mean frame time",
                iters,
                elapsed.as_secs_f64() * 1e3 / iters as f64
            );
            return frame;
        }
        iters *= 2;
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logger(args.debug_level.into());

    if args.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.threads)
            .build_global()
            .context("failed to configure the rayon thread pool")?;
    }

    let config = RenderConfig {
        width: args.width,
        height: args.height,
        samples_per_pixel: args.samples_per_pixel,
        max_bounces: args.bounces,
        master_seed: args.seed,
    };

    let mut scene = args.scene.build(config.aspect_ratio());
    scene
        .finish()
        .with_context(|| format!("failed to build scene preset {:?}", args.scene))?;

    let frame = if args.bench {
        bench(&scene, &config)
    } else {
        render(&scene, &config).0
    };

    frame
        .save_png(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!("wrote {}", args.output.display());

    Ok(())
}
