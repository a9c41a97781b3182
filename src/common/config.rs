use std::path::{Path, PathBuf};

use anyhow::bail;
use serde::{Deserialize, Serialize};

use crate::sys::geometry::Rect;

pub fn config_dir() -> Option<PathBuf> { dirs::home_dir().map(|h| h.join(".config").join("loop")) }
pub fn config_file() -> Option<PathBuf> { config_dir().map(|d| d.join("config.toml")) }
pub fn keybinds_file() -> Option<PathBuf> { config_dir().map(|d| d.join("keybinds.json")) }

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    settings: Settings,
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct Config {
    pub settings: Settings,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub padding: PaddingSettings,
    #[serde(default)]
    pub resize: ResizeSettings,
    #[serde(default)]
    pub radial_menu: RadialMenuSettings,
    #[serde(default)]
    pub snapping: SnappingSettings,
    /// Dragging a placed window restores the size it had before it was first
    /// placed, and forgets its history.
    #[serde(default = "yes")]
    pub restore_frame_on_drag: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            padding: PaddingSettings::default(),
            resize: ResizeSettings::default(),
            radial_menu: RadialMenuSettings::default(),
            snapping: SnappingSettings::default(),
            restore_frame_on_drag: true,
        }
    }
}

/// Space kept between windows and around the edges of each screen.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct PaddingSettings {
    /// Gap between two adjacent windows. Each window takes half of it.
    #[serde(default)]
    pub window: f64,
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub bottom: f64,
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub right: f64,
    /// Height reserved for a third-party menu bar, added to `top`.
    #[serde(default)]
    pub external_bar: f64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct ResizeSettings {
    /// Step used by the grow, shrink and move directions.
    #[serde(default = "default_size_increment")]
    pub size_increment: f64,
    /// Results this close to the previous target snap back to it.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    #[serde(default = "default_preview_padding")]
    pub preview_padding: f64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct RadialMenuSettings {
    #[serde(default = "default_radial_radius")]
    pub radius: f64,
    #[serde(default = "default_radial_thickness")]
    pub thickness: f64,
    /// Pointer travel below which nothing is selected.
    #[serde(default = "default_dead_zone")]
    pub dead_zone: f64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct SnappingSettings {
    #[serde(default = "yes")]
    pub enabled: bool,
    /// Distance from a screen edge at which a drag starts snapping.
    #[serde(default = "default_snap_margin")]
    pub margin: f64,
    #[serde(default = "default_snap_top_margin")]
    pub top_margin: f64,
}

impl Default for ResizeSettings {
    fn default() -> Self {
        Self {
            size_increment: default_size_increment(),
            tolerance: default_tolerance(),
            preview_padding: default_preview_padding(),
        }
    }
}

impl Default for RadialMenuSettings {
    fn default() -> Self {
        Self {
            radius: default_radial_radius(),
            thickness: default_radial_thickness(),
            dead_zone: default_dead_zone(),
        }
    }
}

impl Default for SnappingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            margin: default_snap_margin(),
            top_margin: default_snap_top_margin(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        issues.extend(self.padding.validate());
        issues.extend(self.resize.validate());
        issues.extend(self.radial_menu.validate());
        issues.extend(self.snapping.validate());

        issues
    }
}

impl PaddingSettings {
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        for (name, value) in [
            ("window", self.window),
            ("top", self.top),
            ("bottom", self.bottom),
            ("left", self.left),
            ("right", self.right),
            ("external_bar", self.external_bar),
        ] {
            if value < 0.0 {
                issues.push(format!("padding.{name} must be non-negative, got {value}"));
            }
        }

        issues
    }

    pub fn effective_top(&self) -> f64 { self.top + self.external_bar }

    pub fn total_horizontal(&self) -> f64 { self.left + self.right }

    pub fn total_vertical(&self) -> f64 { self.effective_top() + self.bottom }

    /// Screen bounds with the screen padding removed.
    pub fn apply(&self, bounds: Rect) -> Rect {
        bounds.inset_sides(self.effective_top(), self.bottom, self.left, self.right)
    }
}

impl ResizeSettings {
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.size_increment <= 0.0 {
            issues.push(format!(
                "resize.size_increment must be positive, got {}",
                self.size_increment
            ));
        }

        if self.tolerance < 0.0 {
            issues.push(format!(
                "resize.tolerance must be non-negative, got {}",
                self.tolerance
            ));
        }

        if self.preview_padding < 0.0 {
            issues.push(format!(
                "resize.preview_padding must be non-negative, got {}",
                self.preview_padding
            ));
        }

        issues
    }
}

impl RadialMenuSettings {
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        let thickness_ok = self.thickness > 0.0 && self.thickness < self.radius;
        if !thickness_ok {
            issues.push(format!(
                "radial_menu.thickness must be between 0 and radius ({}), got {}",
                self.radius, self.thickness
            ));
        }

        if self.dead_zone < 0.0 {
            issues.push(format!(
                "radial_menu.dead_zone must be non-negative, got {}",
                self.dead_zone
            ));
        } else if thickness_ok && self.dead_zone > self.ring_threshold() {
            issues.push(format!(
                "radial_menu.dead_zone ({}) should not exceed radius - thickness ({})",
                self.dead_zone,
                self.ring_threshold()
            ));
        }

        issues
    }

    /// Pointer distance beyond which a directional sector is selected.
    pub fn ring_threshold(&self) -> f64 { self.radius - self.thickness }
}

impl SnappingSettings {
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.margin < 0.0 {
            issues.push(format!("snapping.margin must be non-negative, got {}", self.margin));
        }

        if self.top_margin < 0.0 {
            issues.push(format!(
                "snapping.top_margin must be non-negative, got {}",
                self.top_margin
            ));
        }

        issues
    }
}

fn yes() -> bool { true }

fn default_size_increment() -> f64 { 20.0 }

fn default_tolerance() -> f64 { 2.0 }

fn default_preview_padding() -> f64 { 10.0 }

fn default_radial_radius() -> f64 { 50.0 }

fn default_radial_thickness() -> f64 { 22.0 }

fn default_dead_zone() -> f64 { 10.0 }

fn default_snap_margin() -> f64 { 2.0 }

fn default_snap_top_margin() -> f64 { 12.0 }

impl Config {
    pub fn read(path: &Path) -> anyhow::Result<Config> {
        let buf = std::fs::read_to_string(path)?;
        Self::parse(&buf)
    }

    /// Reads `path` when it exists, otherwise returns the defaults.
    pub fn read_or_default(path: Option<&Path>) -> anyhow::Result<Config> {
        match path {
            Some(path) if path.exists() => Self::read(path),
            _ => Ok(Config::default()),
        }
    }

    /// Save the current config to a file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let config_file = ConfigFile { settings: self.settings.clone() };

        let toml_string = toml::to_string_pretty(&config_file)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, toml_string.as_bytes())?;

        Ok(())
    }

    /// Validates the entire configuration and returns a list of issues found.
    pub fn validate(&self) -> Vec<String> { self.settings.validate() }

    pub fn parse(buf: &str) -> anyhow::Result<Config> {
        match toml::from_str::<ConfigFile>(buf) {
            Ok(c) => Ok(Config { settings: c.settings }),
            Err(e) => bail!("{e}"),
        }
    }
}
