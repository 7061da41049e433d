use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::data::filter::ALL_SITES;

/// Env var naming the TOML config file.
pub const CONFIG_ENV: &str = "LAUNCH_DASH_CONFIG";
/// Env var naming the dataset file.
pub const DATA_ENV: &str = "LAUNCH_DASH_DATA";
const DEFAULT_CONFIG_FILE: &str = "launch_dash.toml";
const DEFAULT_DATA_FILE: &str = "spacex_launch_dash.csv";

/// Startup configuration for the dashboard window.
#[derive(Clone, Debug, PartialEq)]
pub struct DashConfig {
    /// Launch table to load (`.csv`, `.json` or `.parquet`).
    pub data_path: PathBuf,
    /// Initial window size in points.
    pub window_size: [f32; 2],
    /// Initial `site-dropdown` value, `"ALL"` or a site name.
    pub initial_site: String,
    pub slider: SliderConfig,
}

/// Payload range slider geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct SliderConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    /// Distance between labelled tick marks.
    pub mark_every: f64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 10_000.0,
            step: 1_000.0,
            mark_every: 2_500.0,
        }
    }
}

/// Upper bound on labelled slider marks.
pub const MAX_MARKS: usize = 50;

impl SliderConfig {
    /// Labelled marks from `min` up to (excluding) `max`, at most [`MAX_MARKS`].
    pub fn marks(&self) -> Vec<f64> {
        if self.mark_every.is_nan() || self.mark_every <= 0.0 {
            return Vec::new();
        }
        (0..MAX_MARKS)
            .map(|i| self.min + i as f64 * self.mark_every)
            .take_while(|m| *m < self.max)
            .collect()
    }

    /// Spacing that keeps the mark count within [`MAX_MARKS`].
    fn mark_spacing_fits(&self) -> bool {
        self.mark_every > 0.0 && (self.max - self.min) / self.mark_every <= MAX_MARKS as f64
    }
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            window_size: [1100.0, 900.0],
            initial_site: ALL_SITES.to_string(),
            slider: SliderConfig::default(),
        }
    }
}

impl DashConfig {
    /// Resolve the configuration. Later layers win:
    /// defaults → TOML file → `LAUNCH_DASH_DATA` → first CLI argument.
    pub fn load(args: impl IntoIterator<Item = String>) -> Self {
        let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.into());
        let mut config = Self::from_file(Path::new(&path));

        if let Some(data) = std::env::var(DATA_ENV).ok().filter(|s| !s.is_empty()) {
            log::info!("Using dataset from {DATA_ENV}: {data}");
            config.data_path = PathBuf::from(data);
        }
        if let Some(arg) = args.into_iter().next() {
            log::info!("Using dataset from command line: {arg}");
            config.data_path = PathBuf::from(arg);
        }
        config
    }

    /// Defaults overlaid with `path`, if it exists and parses.
    fn from_file(path: &Path) -> Self {
        let default = Self::default();
        if !path.exists() {
            log::debug!("No config file at {}; using defaults", path.display());
            return default;
        }
        match fs::read_to_string(path) {
            Ok(s) => match Self::from_toml_str(&s) {
                Ok(c) => {
                    log::info!("Loaded config from {}", path.display());
                    c
                }
                Err(e) => {
                    log::warn!("Failed to parse {}: {e}; using defaults", path.display());
                    default
                }
            },
            Err(e) => {
                log::warn!("Failed to read {}: {e}; using defaults", path.display());
                default
            }
        }
    }

    /// Parse a TOML document and overlay it onto the defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        let t: DashToml = toml::from_str(s)?;
        Ok(t.overlay(Self::default()))
    }
}

// =========================
// TOML overlay definitions
// =========================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DashToml {
    data_path: Option<PathBuf>,
    window_size: Option<[f32; 2]>,
    initial_site: Option<String>,
    slider: Option<SliderToml>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SliderToml {
    min: Option<f64>,
    max: Option<f64>,
    step: Option<f64>,
    mark_every: Option<f64>,
}

impl DashToml {
    fn overlay(self, mut base: DashConfig) -> DashConfig {
        if let Some(p) = self.data_path {
            base.data_path = p;
        }
        if let Some(w) = self.window_size {
            base.window_size = w;
        }
        if let Some(site) = self.initial_site {
            base.initial_site = site;
        }
        if let Some(s) = self.slider {
            s.apply(&mut base.slider);
        }
        base
    }
}

impl SliderToml {
    fn apply(self, s: &mut SliderConfig) {
        if let Some(v) = self.min {
            s.min = v;
        }
        if let Some(v) = self.max {
            s.max = v;
        }
        if let Some(v) = self.step {
            s.step = v;
        }
        if let Some(v) = self.mark_every {
            s.mark_every = v;
        }
        if !s.mark_spacing_fits() {
            let fallback = (s.max - s.min) / 4.0;
            log::warn!(
                "slider.mark_every = {} is out of range; using {fallback}",
                s.mark_every
            );
            s.mark_every = fallback;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_keeps_defaults() {
        assert_eq!(DashConfig::from_toml_str("").unwrap(), DashConfig::default());
    }

    #[test]
    fn toml_overlays_only_given_fields() {
        let c = DashConfig::from_toml_str(
            r#"
            data_path = "data/launches.parquet"
            initial_site = "KSC LC-39A"

            [slider]
            step = 500.0
            "#,
        )
        .unwrap();
        assert_eq!(c.data_path, PathBuf::from("data/launches.parquet"));
        assert_eq!(c.initial_site, "KSC LC-39A");
        assert_eq!(c.slider.step, 500.0);
        assert_eq!(c.slider.max, 10_000.0);
        assert_eq!(c.window_size, DashConfig::default().window_size);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(DashConfig::from_toml_str("colour = 'red'").is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let c = DashConfig::from_file(Path::new("definitely/not/here.toml"));
        assert_eq!(c, DashConfig::default());
    }

    #[test]
    fn default_marks_match_slider_labels() {
        assert_eq!(
            SliderConfig::default().marks(),
            vec![0.0, 2_500.0, 5_000.0, 7_500.0]
        );
    }

    #[test]
    fn tiny_mark_spacing_falls_back_to_quarters() {
        let c = DashConfig::from_toml_str("[slider]\nmark_every = 1e-9").unwrap();
        assert_eq!(c.slider.mark_every, 2_500.0);
        assert_eq!(c.slider.marks().len(), 4);
    }

    #[test]
    fn marks_are_capped() {
        let slider = SliderConfig {
            mark_every: 1.0,
            ..SliderConfig::default()
        };
        assert_eq!(slider.marks().len(), MAX_MARKS);
        let zero = SliderConfig {
            mark_every: 0.0,
            ..SliderConfig::default()
        };
        assert!(zero.marks().is_empty());
    }
}
