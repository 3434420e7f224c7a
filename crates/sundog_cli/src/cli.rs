//! Command line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use crate::presets::ScenePreset;

/// Log levels selectable from the command line.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Parser)]
#[command(name = "sundog", version, about = "Offline Monte Carlo path tracer")]
pub struct Args {
    /// Scene preset to render
    #[arg(long, value_enum, default_value_t = ScenePreset::Cover)]
    pub scene: ScenePreset,

    /// Image width in pixels
    #[arg(long, default_value_t = 1280, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 800, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Samples per pixel
    #[arg(short, long, default_value_t = 32, value_parser = clap::value_parser!(u32).range(1..))]
    pub samples_per_pixel: u32,

    /// Maximum scatter events per path
    #[arg(long, default_value_t = 50)]
    pub bounces: u32,

    /// Master seed for the per-row RNG streams
    #[arg(long, default_value_t = 0xdeadbeef)]
    pub seed: u64,

    /// Worker threads (0 = one per core)
    #[arg(long, default_value_t = 0)]
    pub threads: usize,

    /// Output file path
    #[arg(short, long, default_value = "frame.png")]
    pub output: PathBuf,

    /// Repeat the render with doubling iteration counts until a second has
    /// elapsed and report the mean frame time
    #[arg(long)]
    pub bench: bool,

    /// Set the logging level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub debug_level: LogLevel,
}
