use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use whitted::camera::ALIAS_RAY_CHOICES;
use whitted::tracer::RECURSION_LIMIT;

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
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

fn parse_alias_rays(raw: &str) -> Result<u32, String> {
    let value: u32 = raw.parse().map_err(|e| format!("{e}"))?;
    if ALIAS_RAY_CHOICES.contains(&value) {
        Ok(value)
    } else {
        Err(format!("must be one of {:?}", ALIAS_RAY_CHOICES))
    }
}

/// Command line arguments structure using clap derive macros
#[derive(Debug, Parser)]
#[command(name = "whitted")]
#[command(about = "Recursive ray tracer with Phong shading, shadows, reflection and refraction")]
pub struct Args {
    /// JSON scene description
    #[arg(default_value = "scenes/c.json")]
    pub scene: PathBuf,

    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,

    /// Image width in pixels
    #[arg(long, default_value = "512", help = "Image width in pixels")]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "512", help = "Image height in pixels")]
    pub height: u32,

    /// Output file path (.png for 8-bit with gamma correction, .exr for HDR linear)
    #[arg(short, long, default_value = "output.png")]
    pub output: PathBuf,

    /// Maximum number of nested reflection, transmission and refraction rays
    #[arg(long, default_value_t = RECURSION_LIMIT)]
    pub max_depth: u32,

    /// Eye position as x,y,z
    #[arg(long, value_delimiter = ',', num_args = 3, allow_negative_numbers = true, default_values_t = [0.0, 0.0, 0.0])]
    pub eye: Vec<f32>,

    /// Camera rotation in degrees about X, Y and Z
    #[arg(long, value_delimiter = ',', num_args = 3, allow_negative_numbers = true, default_values_t = [0.0, 0.0, 0.0])]
    pub rotation: Vec<f32>,

    /// Field of view in degrees, overriding the scene's camera
    #[arg(long)]
    pub fov: Option<f32>,

    /// Background color as r,g,b, overriding the scene's camera
    #[arg(long, value_delimiter = ',', num_args = 3)]
    pub background: Option<Vec<f32>>,

    /// Trace only pixel x,y (counted from the top-left) and log what it hits
    #[arg(long, value_delimiter = ',', num_args = 2)]
    pub pick: Option<Vec<u32>>,

    /// Rays per pixel (1 or 4); only a single ray is traced at present
    #[arg(long, default_value = "1", value_parser = parse_alias_rays)]
    pub alias_rays: u32,

    /// Request area-light soft shadows; not implemented, shadows stay hard
    #[arg(long)]
    pub area_shadows: bool,
}
