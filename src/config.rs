//! Construction parameters for the display and its demo driver.
//!
//! Read from a JSON file when one is present; every field except `width` and
//! `height` has a default.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::{demo::DemoKind, geometry::Geometry, geometry::Origin, renderer::RepaintStrategy};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "LAMP_DISPLAY_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "lamp-display.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Lamp columns.
    pub width: usize,
    /// Lamp rows.
    pub height: usize,
    /// Side of one atlas tile before scaling.
    #[serde(default = "default_tile_size")]
    pub tile_size: u32,
    #[serde(default = "default_origin")]
    pub origin: Origin,
    /// Each lamp is drawn as a square block of this many tiles per side.
    #[serde(default = "default_lamps_per_pixel")]
    pub lamps_per_pixel: u32,
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Directory holding `redstone_lamp.png` and `redstone_lamp_on.png`.
    #[serde(default = "default_texture_pack")]
    pub texture_pack: PathBuf,
    #[serde(default)]
    pub repaint: RepaintStrategy,
    #[serde(default)]
    pub demo: DemoKind,
    /// Pause after each frame, in milliseconds.
    #[serde(default)]
    pub frame_delay_ms: u64,
    #[serde(default = "default_screenshot_dir")]
    pub screenshot_dir: PathBuf,
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_tile_size() -> u32 {
    16
}

fn default_origin() -> Origin {
    Origin::BottomLeft
}

fn default_lamps_per_pixel() -> u32 {
    2
}

fn default_scale() -> f64 {
    1.0
}

fn default_texture_pack() -> PathBuf {
    PathBuf::from("VanillaPack")
}

fn default_screenshot_dir() -> PathBuf {
    PathBuf::from("screenshots")
}

fn default_title() -> String {
    "Lamp Display".to_string()
}

impl Config {
    /// A `width` x `height` display with every other option at its default.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tile_size: default_tile_size(),
            origin: default_origin(),
            lamps_per_pixel: default_lamps_per_pixel(),
            scale: default_scale(),
            texture_pack: default_texture_pack(),
            repaint: RepaintStrategy::default(),
            demo: DemoKind::default(),
            frame_delay_ms: 0,
            screenshot_dir: default_screenshot_dir(),
            title: default_title(),
        }
    }

    /// Used when no config file exists.
    pub fn demo() -> Self {
        Self {
            scale: 1.5,
            texture_pack: PathBuf::from("MattPack"),
            ..Self::new(20, 20)
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(text).context("invalid display config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in config {}", path.display()))
    }

    /// Loads `$LAMP_DISPLAY_CONFIG`, else `lamp-display.json` if present,
    /// else falls back to [`Config::demo`].
    pub fn from_env() -> Result<Self> {
        Self::locate(std::env::var(CONFIG_ENV).ok(), Path::new("."))
    }

    /// Lookup order of [`Config::from_env`]. Relative paths resolve against `dir`.
    pub fn locate(env: Option<String>, dir: &Path) -> Result<Self> {
        if let Some(path) = env {
            return Self::load(&dir.join(path));
        }
        let path = dir.join(DEFAULT_CONFIG_FILE);
        if path.exists() {
            return Self::load(&path);
        }
        log::info!("no {} found, using the built-in demo config", DEFAULT_CONFIG_FILE);
        Ok(Self::demo())
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.width > 0 && self.height > 0,
            "display must be at least 1x1 lamps, got {}x{}",
            self.width,
            self.height
        );
        ensure!(self.lamps_per_pixel >= 1, "lamps_per_pixel must be at least 1");
        ensure!(
            self.scale.is_finite() && self.scale > 0.0,
            "scale must be a positive number, got {}",
            self.scale
        );
        ensure!(
            self.tile_size as f64 * self.scale >= 1.0,
            "tile_size * scale must be at least one pixel, got {}",
            self.tile_size as f64 * self.scale
        );
        Ok(())
    }

    pub fn geometry(&self) -> Geometry {
        Geometry::new(
            self.width,
            self.height,
            self.origin,
            self.lamps_per_pixel,
            self.tile_size,
            self.scale,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let config = Config::from_json(r#"{ "width": 8, "height": 4 }"#).unwrap();
        assert_eq!(config, Config::new(8, 4));
        assert_eq!(config.tile_size, 16);
        assert_eq!(config.origin, Origin::BottomLeft);
        assert_eq!(config.lamps_per_pixel, 2);
        assert_eq!(config.texture_pack, PathBuf::from("VanillaPack"));
        assert_eq!(config.repaint, RepaintStrategy::Incremental);
    }

    #[test]
    fn reads_every_option() {
        let config = Config::from_json(
            r#"{
                "width": 3, "height": 2, "tile_size": 8, "origin": "tl",
                "lamps_per_pixel": 1, "scale": 0.5, "texture_pack": "MattPack",
                "repaint": "full", "demo": "bounce", "frame_delay_ms": 16
            }"#,
        )
        .unwrap();
        assert_eq!(config.origin, Origin::TopLeft);
        assert_eq!(config.repaint, RepaintStrategy::Full);
        assert_eq!(config.demo, DemoKind::Bounce);
        assert_eq!(config.geometry().surface_size(), (12, 8));
    }

    #[test]
    fn bad_origin_is_rejected() {
        let err = Config::from_json(r#"{ "width": 3, "height": 3, "origin": "TR" }"#).unwrap_err();
        assert!(format!("{:#}", err).contains("'TL' or 'BL'"));
    }

    #[test]
    fn missing_size_is_rejected() {
        assert!(Config::from_json(r#"{ "width": 3 }"#).is_err());
    }

    #[test]
    fn validation_limits() {
        assert!(Config::new(0, 3).validate().is_err());
        assert!(Config { lamps_per_pixel: 0, ..Config::new(3, 3) }.validate().is_err());
        assert!(Config { scale: f64::NAN, ..Config::new(3, 3) }.validate().is_err());
        assert!(Config { scale: 0.01, ..Config::new(3, 3) }.validate().is_err());
        assert!(Config { scale: 0.125, ..Config::new(3, 3) }.validate().is_ok());
        assert!(Config::demo().validate().is_ok());
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("lamp-display-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn locate_prefers_env_file() {
        let dir = scratch_dir("env");
        fs::write(dir.join("custom.json"), r#"{ "width": 7, "height": 2 }"#).unwrap();
        fs::write(dir.join(DEFAULT_CONFIG_FILE), r#"{ "width": 3, "height": 3 }"#).unwrap();

        let config = Config::locate(Some("custom.json".to_string()), &dir).unwrap();
        assert_eq!((config.width, config.height), (7, 2));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn locate_reads_default_file() {
        let dir = scratch_dir("default");
        fs::write(dir.join(DEFAULT_CONFIG_FILE), r#"{ "width": 3, "height": 5 }"#).unwrap();

        let config = Config::locate(None, &dir).unwrap();
        assert_eq!(config, Config::new(3, 5));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn locate_falls_back_to_demo() {
        let dir = scratch_dir("demo");
        let config = Config::locate(None, &dir).unwrap();
        assert_eq!(config, Config::demo());
        assert_eq!((config.width, config.height), (20, 20));
        assert_eq!(config.scale, 1.5);
        assert_eq!(config.texture_pack, PathBuf::from("MattPack"));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn locate_fails_on_missing_env_file() {
        let dir = scratch_dir("missing");
        fs::write(dir.join(DEFAULT_CONFIG_FILE), r#"{ "width": 3, "height": 3 }"#).unwrap();

        let err = Config::locate(Some("gone.json".to_string()), &dir).unwrap_err();
        assert!(format!("{:#}", err).contains("gone.json"));
        fs::remove_dir_all(&dir).unwrap();
    }
}
