//! Command-line launch options

use clap::Parser;

use crate::gfx::Theme;
use crate::simulation::NetworkSettings;

/// Options accepted by the `particle-network` binary
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(name = "particle-network")]
#[command(about = "Animated particle network background", long_about = None)]
pub struct LaunchOptions {
    /// Seed for particle placement (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Draw a single still frame instead of animating
    #[arg(long, default_value_t = false)]
    pub reduced_motion: bool,

    /// Start with the light background
    #[arg(long, default_value_t = false)]
    pub light: bool,
}

impl LaunchOptions {
    pub fn theme(&self) -> Theme {
        if self.light {
            Theme::Light
        } else {
            Theme::Dark
        }
    }

    pub fn settings(&self) -> NetworkSettings {
        let settings = NetworkSettings::default().with_reduced_motion(self.reduced_motion);
        match self.seed {
            Some(seed) => settings.with_seed(seed),
            None => settings,
        }
    }
}
