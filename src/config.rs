use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default dwell before the splash gives way to the hero scene.
pub(crate) const DEFAULT_DWELL_SECS: f64 = 2.5;

/// Default frame rate cap.
pub(crate) const DEFAULT_FPS: u16 = 30;

const DEFAULT_TITLE: &str = "filament";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// On-disk configuration, merged under CLI overrides.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    pub(crate) title: Option<String>,
    pub(crate) splash: SplashConfig,
    pub(crate) hero: HeroConfig,
    pub(crate) frame_rate: Option<u16>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SplashConfig {
    /// Splash image path; the title is rendered as a banner without one.
    pub(crate) image: Option<PathBuf>,
    /// Seconds the splash dwells before the hero scene.
    pub(crate) dwell_seconds: Option<f64>,
    /// Skip the splash entirely.
    pub(crate) skip: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct HeroConfig {
    /// Background photo path; a flat dark backdrop is used without one.
    pub(crate) background: Option<PathBuf>,
    /// Whether the pendulum starts out swinging.
    pub(crate) swing: Option<bool>,
}

impl Config {
    pub(crate) fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&contents)?)
    }
}

/// Fully resolved settings: config file values with CLI overrides and
/// defaults applied.
#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) title: String,
    pub(crate) splash_image: Option<PathBuf>,
    pub(crate) background: Option<PathBuf>,
    pub(crate) dwell: Duration,
    pub(crate) skip_splash: bool,
    pub(crate) swing: bool,
    pub(crate) frame_rate: u16,
}

/// CLI-provided overrides, highest precedence.
#[derive(Debug, Clone, Default)]
pub(crate) struct Overrides {
    pub(crate) title: Option<String>,
    pub(crate) splash_image: Option<PathBuf>,
    pub(crate) background: Option<PathBuf>,
    pub(crate) dwell_seconds: Option<f64>,
    pub(crate) skip_splash: bool,
    pub(crate) no_swing: bool,
    pub(crate) frame_rate: Option<u16>,
}

impl Settings {
    pub(crate) fn resolve(config: Config, overrides: Overrides) -> Self {
        let dwell_seconds = overrides
            .dwell_seconds
            .or(config.splash.dwell_seconds)
            .unwrap_or(DEFAULT_DWELL_SECS)
            .max(0.0);
        Self {
            title: overrides
                .title
                .or(config.title)
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            splash_image: overrides.splash_image.or(config.splash.image),
            background: overrides.background.or(config.hero.background),
            dwell: Duration::from_secs_f64(dwell_seconds),
            skip_splash: overrides.skip_splash || config.splash.skip.unwrap_or(false),
            swing: !overrides.no_swing && config.hero.swing.unwrap_or(true),
            frame_rate: overrides
                .frame_rate
                .or(config.frame_rate)
                .unwrap_or(DEFAULT_FPS)
                .max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_with_empty_inputs() {
        let settings = Settings::resolve(Config::default(), Overrides::default());
        assert_eq!(settings.title, DEFAULT_TITLE);
        assert_eq!(settings.dwell, Duration::from_secs_f64(2.5));
        assert_eq!(settings.frame_rate, DEFAULT_FPS);
        assert!(settings.swing);
        assert!(!settings.skip_splash);
    }

    #[test]
    fn overrides_take_precedence_over_config() {
        let config: Config = serde_yaml::from_str(
            r#"
title: from config
splash:
  dwell_seconds: 5.0
hero:
  swing: true
"#,
        )
        .expect("valid yaml");
        let overrides = Overrides {
            title: Some("from cli".into()),
            dwell_seconds: Some(1.5),
            no_swing: true,
            ..Default::default()
        };
        let settings = Settings::resolve(config, overrides);
        assert_eq!(settings.title, "from cli");
        assert_eq!(settings.dwell, Duration::from_secs_f64(1.5));
        assert!(!settings.swing);
    }

    #[test]
    fn unknown_config_fields_are_rejected() {
        let result: Result<Config, _> = serde_yaml::from_str("bogus: 1");
        assert!(result.is_err());
    }
}
