//! Layered settings for the `daylayout` CLI.
//!
//! Defaults, then `<config dir>/daylayout/config.toml`, then an explicit
//! `--config` file, then `DAYLAYOUT_*` environment variables. Command-line
//! flags are applied on top by the caller.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use chrono_tz::Tz;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use overlap_layout::{LayoutOptions, MonospaceMetrics, Rect};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Container origin and size in pixels.
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    /// Gap around the container edge and between columns.
    pub padding: f64,
    /// IANA zone for day windows and divider alignment.
    pub timezone: String,
    /// Monospace metrics used by `--wrap`.
    pub text_size: f64,
    pub char_width: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width: 360.0,
            height: 1440.0,
            padding: 8.0,
            timezone: "UTC".to_string(),
            text_size: 14.0,
            char_width: 8.0,
        }
    }
}

impl Settings {
    /// Loads settings, optionally merging a specific file over the defaults.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = config_dir() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("DAYLAYOUT_"));

        figment.extract()
    }

    pub fn zone(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| anyhow!("Invalid timezone '{}': {}", self.timezone, e))
    }

    pub fn container(&self) -> Rect {
        Rect::new(
            self.left,
            self.top,
            self.left + self.width,
            self.top + self.height,
        )
    }

    pub fn layout_options(&self) -> Result<LayoutOptions> {
        Ok(LayoutOptions {
            padding: self.padding,
            divider_zone: self.zone()?,
        })
    }

    pub fn metrics(&self) -> MonospaceMetrics {
        MonospaceMetrics::new(self.text_size, self.char_width)
    }
}

/// Platform config directory for daylayout, e.g. `~/.config/daylayout`.
fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("daylayout"))
}
