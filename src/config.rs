//! Command-line options and their validation.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::entities::{ENEMY_WIDTH, PLAYER_BOTTOM_OFFSET, PLAYER_WIDTH};

pub const DEFAULT_WIDTH: f32 = 600.0;
pub const DEFAULT_HEIGHT: f32 = 400.0;
pub const DEFAULT_FPS: u32 = 60;

#[derive(Debug, Parser)]
#[command(name = "click_shooter", about = "Shoot the falling blocks before they land")]
pub struct Cli {
    /// Playfield width in playfield units.
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: f32,

    /// Playfield height in playfield units.
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: f32,

    /// Frames per second.
    #[arg(long, default_value_t = DEFAULT_FPS)]
    pub fps: u32,

    /// Seed for enemy placement; random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write tracing output to this file (filter with RUST_LOG).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("playfield {name} must be a finite positive number, got {value}")]
    InvalidDimension { name: &'static str, value: f32 },
    #[error("playfield width {0} is narrower than the player ship")]
    TooNarrow(f32),
    #[error("playfield height {0} leaves no room for the player")]
    TooShort(f32),
    #[error("fps must be at least 1")]
    ZeroFps,
}

/// Validated runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub width: f32,
    pub height: f32,
    pub frame: Duration,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        check_dimension("width", cli.width)?;
        check_dimension("height", cli.height)?;
        if cli.width < PLAYER_WIDTH.max(ENEMY_WIDTH) {
            return Err(ConfigError::TooNarrow(cli.width));
        }
        if cli.height < PLAYER_BOTTOM_OFFSET {
            return Err(ConfigError::TooShort(cli.height));
        }
        if cli.fps == 0 {
            return Err(ConfigError::ZeroFps);
        }

        Ok(Config {
            width: cli.width,
            height: cli.height,
            frame: Duration::from_secs(1) / cli.fps,
            seed: cli.seed,
            log_file: cli.log_file,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            frame: Duration::from_secs(1) / DEFAULT_FPS,
            seed: None,
            log_file: None,
        }
    }
}

fn check_dimension(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidDimension { name, value })
    }
}
