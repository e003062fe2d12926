use clap::Parser;
use showcase_core::{ConfigError, Preset, ShowcaseConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Desktop viewer for a 3D product showcase", version)]
pub struct Args {
    /// Built-in preset: recon, glass-case, spotlight, environment or studio
    #[arg(long, default_value = "recon")]
    pub preset: String,

    /// JSON showcase config; takes precedence over --preset
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory that asset URLs are resolved against
    #[arg(long, default_value = "public")]
    pub assets: PathBuf,

    /// Run this many frames without a window, log them and exit
    #[arg(long)]
    pub simulate_frames: Option<u64>,

    /// Debug-level logging
    #[arg(long)]
    pub verbose: bool,
}

impl Args {
    pub fn showcase_config(&self) -> Result<ShowcaseConfig, ConfigError> {
        match &self.config {
            Some(path) => ShowcaseConfig::load(path),
            None => Ok(Preset::from_name(&self.preset)?.config()),
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        if self.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }
}
