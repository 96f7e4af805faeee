use crate::anim::{FramePose, PendulumAnimator};
use crate::config::Settings;
use crate::render::raster::{Raster, Rgba};
use crate::render::scene::{HeroScene, SceneError};
use crate::render::{label, Viewport};
use crate::signal::Signal;
use crate::splash::{SplashError, SplashScreen};
use crate::terminal::{self, Presenter, TextOverlay};
use crate::timing::{DwellTimer, FrameClock};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::io::{self, Write};
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

/// Vertical placement of the hero label, as a fraction of the rows.
const LABEL_ROW_FRACTION: f64 = 0.28;

const LABEL_COLOR: Rgba = Rgba::opaque(255, 251, 230);

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Splash(#[from] SplashError),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
}

/// Top-level sequencing: the splash dwells, then the hero scene runs
/// until quit. One-way, terminal at `Hero`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    Splash,
    Hero,
}

/// Owns and wires the animator, signal, renderers, and phase timer. It
/// supervises lifecycle only; the per-frame math lives in the modules it
/// delegates to.
pub(crate) struct App {
    settings: Settings,
    phase: Phase,
    dwell: DwellTimer,
    light: Signal<f64>,
    animator: PendulumAnimator,
    splash: Option<SplashScreen>,
    hero: HeroScene,
    cols: u16,
    rows: u16,
}

impl App {
    pub(crate) fn new(settings: Settings) -> Result<Self, AppError> {
        let light = Signal::new(0.5);
        let animator = PendulumAnimator::new(light.clone(), settings.swing);
        let splash = if settings.skip_splash {
            None
        } else {
            Some(SplashScreen::load(&settings.title, settings.splash_image.as_deref())?)
        };
        let hero = HeroScene::load(settings.background.as_deref())?;
        let phase = if splash.is_some() { Phase::Splash } else { Phase::Hero };
        let dwell = DwellTimer::new(settings.dwell);
        Ok(Self { settings, phase, dwell, light, animator, splash, hero, cols: 0, rows: 0 })
    }

    pub(crate) fn run<W: Write>(&mut self, out: W) -> Result<(), AppError> {
        let (cols, rows) = crossterm::terminal::size()?;
        self.cols = cols;
        self.rows = rows;
        let mut presenter = Presenter::new(out);
        let clock = FrameClock::start();
        let frame_budget = Duration::from_secs_f64(1.0 / self.settings.frame_rate as f64);

        loop {
            // Drain pending events before painting so a resize burst
            // coalesces and its final size wins.
            while event::poll(Duration::ZERO)? {
                match event::read()? {
                    Event::Resize(cols, rows) => {
                        self.cols = cols;
                        self.rows = rows;
                    }
                    Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => {
                            self.teardown();
                            return Ok(());
                        }
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            self.teardown();
                            return Ok(());
                        }
                        KeyCode::Char(' ') | KeyCode::Char('s') => self.animator.toggle_swing(),
                        _ => {}
                    },
                    _ => {}
                }
            }

            self.advance_phase(clock.elapsed());
            self.render_frame(&mut presenter, clock.elapsed_secs())?;

            // Sleep out the frame budget, waking early on input.
            event::poll(frame_budget)?;
        }
    }

    /// Fire the one-way splash-to-hero transition when the dwell elapses.
    fn advance_phase(&mut self, elapsed: Duration) {
        if self.phase == Phase::Splash && self.dwell.poll(elapsed) {
            self.phase = Phase::Hero;
        }
    }

    /// Cancel pending work so nothing fires after the app is gone.
    fn teardown(&mut self) {
        self.dwell.cancel();
    }

    fn render_frame<W: Write>(
        &mut self,
        presenter: &mut Presenter<W>,
        elapsed: f64,
    ) -> io::Result<()> {
        let (width, height) = terminal::raster_size(self.cols, self.rows);
        if width == 0 || height == 0 {
            return Ok(());
        }
        let viewport = terminal::viewport_for(self.cols, self.rows);
        let mut raster = Raster::new(width, height);

        let overlays = match self.phase {
            Phase::Splash => match &self.splash {
                Some(splash) => {
                    splash.paint(&mut raster, elapsed);
                    splash.overlays(self.cols, self.rows, elapsed)
                }
                None => Vec::new(),
            },
            Phase::Hero => {
                // The animator publishes before the renderers consume, so
                // the overlay and label always see the same-frame value.
                let pose = self.animator.advance(elapsed);
                let light_position = self.light.get();
                let frame = FramePose { swing: pose.swing, light_position };
                self.hero.paint(&mut raster, viewport, frame);
                vec![self.label_overlay(light_position, viewport)]
            }
        };
        presenter.present(&raster, &overlays)
    }

    fn label_overlay(&self, light_position: f64, viewport: Viewport) -> TextOverlay {
        let offset_px = label::offset(light_position, viewport.width as f64);
        let offset_cells = (offset_px / terminal::CELL_WIDTH_PX as f64).round() as i32;
        let width = self.settings.title.width() as i32;
        TextOverlay {
            col: (self.cols as i32 - width) / 2 + offset_cells,
            row: (self.rows as f64 * LABEL_ROW_FRACTION) as i32,
            text: self.settings.title.clone(),
            color: LABEL_COLOR,
            bold: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Overrides, Settings};

    fn app() -> App {
        let settings = Settings::resolve(Config::default(), Overrides::default());
        App::new(settings).expect("no assets to load")
    }

    fn secs(value: f64) -> Duration {
        Duration::from_secs_f64(value)
    }

    #[test]
    fn transition_fires_once_at_the_dwell() {
        let mut app = app();
        app.advance_phase(secs(2.4));
        assert_eq!(app.phase, Phase::Splash);
        app.advance_phase(secs(2.5));
        assert_eq!(app.phase, Phase::Hero);
        app.advance_phase(secs(10.0));
        assert_eq!(app.phase, Phase::Hero);
    }

    #[test]
    fn teardown_before_the_dwell_cancels_the_transition() {
        let mut app = app();
        app.advance_phase(secs(1.0));
        app.teardown();
        app.advance_phase(secs(2.5));
        app.advance_phase(secs(60.0));
        assert_eq!(app.phase, Phase::Splash);
    }

    #[test]
    fn skipping_the_splash_starts_at_hero() {
        let overrides = Overrides { skip_splash: true, ..Default::default() };
        let settings = Settings::resolve(Config::default(), overrides);
        let app = App::new(settings).expect("no assets to load");
        assert_eq!(app.phase, Phase::Hero);
    }

    #[test]
    fn label_slides_with_the_light() {
        let app = app();
        let viewport = terminal::viewport_for(100, 40);
        let centered = app.label_overlay(0.5, viewport);
        let left = app.label_overlay(0.0, viewport);
        let right = app.label_overlay(1.0, viewport);
        assert!(left.col < centered.col);
        assert!(centered.col < right.col);
    }
}
