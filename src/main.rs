use clap::Parser;
use std::io;
use std::path::PathBuf;

mod anim;
mod app;
mod config;
mod render;
mod signal;
mod splash;
mod terminal;
mod timing;

use app::App;
use config::{Config, Overrides, Settings};
use terminal::TerminalGuard;

/// Render an animated landing card in the terminal: a timed splash, then
/// a hero scene lit by a swinging pendulum light.
#[derive(Parser)]
#[command(name = "filament", version, about)]
struct Cli {
    /// Title shown in the hero scene and used for the splash banner.
    #[arg(short, long)]
    title: Option<String>,

    /// Splash image; without one the title is rendered as a banner.
    #[arg(long, value_name = "PATH")]
    splash_image: Option<PathBuf>,

    /// Background photo for the hero scene.
    #[arg(long, value_name = "PATH")]
    background: Option<PathBuf>,

    /// Configuration file.
    #[arg(short, long, value_name = "PATH", env = "FILAMENT_CONFIG")]
    config: Option<PathBuf>,

    /// Seconds the splash dwells before the hero scene.
    #[arg(long, value_name = "SECONDS")]
    dwell: Option<f64>,

    /// Frame rate cap.
    #[arg(long, value_name = "FPS")]
    fps: Option<u16>,

    /// Skip the splash and start at the hero scene.
    #[arg(long)]
    no_splash: bool,

    /// Start with the pendulum frozen.
    #[arg(long)]
    no_swing: bool,
}

impl Cli {
    fn into_overrides(self) -> Overrides {
        Overrides {
            title: self.title,
            splash_image: self.splash_image,
            background: self.background,
            dwell_seconds: self.dwell,
            skip_splash: self.no_splash,
            no_swing: self.no_swing,
            frame_rate: self.fps,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let settings = Settings::resolve(config, cli.into_overrides());
    let mut app = App::new(settings)?;

    let _guard = TerminalGuard::acquire()?;
    app.run(io::stdout())?;
    Ok(())
}
