use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Rgba8;
use crate::error::RenderError;
use crate::shape::BorderStyle;

pub const DEFAULT_ROWS: usize = 4;
pub const DEFAULT_COLS: usize = 4;
pub const DEFAULT_SMOOTH_FACTOR: f32 = 0.5;
pub const DEFAULT_STROKE_WIDTH: f32 = 1.0;
pub const SMOOTH_FACTOR_MAX: f32 = 100.0;
pub const STROKE_WIDTH_MIN: f32 = 0.1;
pub const STROKE_WIDTH_MAX: f32 = 32.0;

/// Everything the renderer needs besides the canvas and the topology.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderSettings {
    #[serde(default = "default_rows")]
    pub rows: usize,
    #[serde(default = "default_cols")]
    pub cols: usize,
    #[serde(default = "default_styles")]
    pub styles: Vec<BorderStyle>,
    #[serde(default = "default_smooth_factor")]
    pub smooth_factor: f32,
    #[serde(default = "default_color")]
    pub color: Rgba8,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f32,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_background")]
    pub background: Rgba8,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            styles: default_styles(),
            smooth_factor: DEFAULT_SMOOTH_FACTOR,
            color: Rgba8::WHITE,
            stroke_width: DEFAULT_STROKE_WIDTH,
            seed: None,
            background: Rgba8::BLACK,
        }
    }
}

impl RenderSettings {
    pub fn from_json_str(raw: &str) -> Result<Self, RenderError> {
        let settings: RenderSettings = serde_json::from_str(raw)?;
        Ok(settings.clamped())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, RenderError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn to_json_string(&self) -> Result<String, RenderError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Pulls numeric fields into their supported ranges and drops duplicate styles.
    pub fn clamped(mut self) -> Self {
        self.smooth_factor = if self.smooth_factor.is_finite() {
            self.smooth_factor.clamp(0.0, SMOOTH_FACTOR_MAX)
        } else {
            DEFAULT_SMOOTH_FACTOR
        };
        self.stroke_width = if self.stroke_width.is_finite() {
            self.stroke_width.clamp(STROKE_WIDTH_MIN, STROKE_WIDTH_MAX)
        } else {
            DEFAULT_STROKE_WIDTH
        };
        let mut unique = Vec::with_capacity(self.styles.len());
        for style in self.styles {
            if !unique.contains(&style) {
                unique.push(style);
            }
        }
        self.styles = unique;
        self
    }
}

fn default_rows() -> usize {
    DEFAULT_ROWS
}

fn default_cols() -> usize {
    DEFAULT_COLS
}

fn default_styles() -> Vec<BorderStyle> {
    vec![
        BorderStyle::Triangle,
        BorderStyle::TriangleRounded,
        BorderStyle::Square,
        BorderStyle::SquareRounded,
    ]
}

fn default_smooth_factor() -> f32 {
    DEFAULT_SMOOTH_FACTOR
}

fn default_color() -> Rgba8 {
    Rgba8::WHITE
}

fn default_stroke_width() -> f32 {
    DEFAULT_STROKE_WIDTH
}

fn default_background() -> Rgba8 {
    Rgba8::BLACK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let settings = RenderSettings::from_json_str("{}").expect("settings");
        assert_eq!(settings, RenderSettings::default());
    }

    #[test]
    fn partial_settings_override_fields() {
        let raw = r##"{"rows": 3, "styles": ["square", "square"], "color": "#ff0000", "seed": 12}"##;
        let settings = RenderSettings::from_json_str(raw).expect("settings");
        assert_eq!(settings.rows, 3);
        assert_eq!(settings.cols, DEFAULT_COLS);
        assert_eq!(settings.styles, vec![BorderStyle::Square]);
        assert_eq!(settings.color, Rgba8([255, 0, 0, 255]));
        assert_eq!(settings.seed, Some(12));
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let raw = r#"{"smooth_factor": -4.0, "stroke_width": 1000.0}"#;
        let settings = RenderSettings::from_json_str(raw).expect("settings");
        assert_eq!(settings.smooth_factor, 0.0);
        assert_eq!(settings.stroke_width, STROKE_WIDTH_MAX);
    }

    #[test]
    fn bad_color_is_an_error() {
        let result = RenderSettings::from_json_str(r#"{"color": "red"}"#);
        assert!(matches!(result, Err(RenderError::Settings(_))));
    }

    #[test]
    fn settings_survive_json() {
        let mut settings = RenderSettings::default();
        settings.styles = vec![BorderStyle::Flat];
        settings.seed = Some(7);
        let raw = settings.to_json_string().expect("json");
        assert!(raw.contains("\"flat\""));
        assert_eq!(RenderSettings::from_json_str(&raw).expect("parse"), settings);
    }
}
