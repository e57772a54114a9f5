//! Settings for image plot elements.
//!
//! Settings arrive already validated from the outer settings layer in an
//! application; here they are plain values that can also be loaded from
//! JSON for the command-line renderer.

use crate::colormap::ColorScaling;
use plot_common::{PlotError, PlotResult};
use serde::{Deserialize, Serialize};

/// A scale bound that is either computed from the data or fixed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "BoundRepr", into = "BoundRepr")]
pub enum Bound {
    #[default]
    Auto,
    Value(f64),
}

impl Bound {
    /// The fixed value, if any.
    pub fn value(self) -> Option<f64> {
        match self {
            Bound::Auto => None,
            Bound::Value(v) => Some(v),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum BoundRepr {
    Value(f64),
    Text(String),
}

impl TryFrom<BoundRepr> for Bound {
    type Error = String;

    fn try_from(repr: BoundRepr) -> Result<Self, Self::Error> {
        match repr {
            BoundRepr::Value(v) => Ok(Bound::Value(v)),
            BoundRepr::Text(s) if s.eq_ignore_ascii_case("auto") => Ok(Bound::Auto),
            BoundRepr::Text(s) => s
                .parse()
                .map(Bound::Value)
                .map_err(|_| format!("expected a number or 'Auto', got '{}'", s)),
        }
    }
}

impl From<Bound> for BoundRepr {
    fn from(bound: Bound) -> Self {
        match bound {
            Bound::Auto => BoundRepr::Text("Auto".to_string()),
            Bound::Value(v) => BoundRepr::Value(v),
        }
    }
}

/// Settings of an image plot element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageSettings {
    /// Name of the 2-D dataset to plot.
    pub data: String,
    /// Minimum value of the color scale.
    pub min: Bound,
    /// Maximum value of the color scale.
    pub max: Bound,
    /// Transfer function from value to colormap position.
    pub color_scaling: ColorScaling,
    /// Optional 2-D dataset of per-pixel opacity (0 to 1).
    pub transparency_data: String,
    /// Name of the colormap.
    pub color_map: String,
    /// Reverse the colormap.
    pub color_invert: bool,
    /// Transparency percentage applied to every pixel.
    pub transparency: u8,
    /// Smooth the image to display resolution.
    pub smooth: bool,
    /// Skip drawing.
    pub hide: bool,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            data: String::new(),
            min: Bound::Auto,
            max: Bound::Auto,
            color_scaling: ColorScaling::Linear,
            transparency_data: String::new(),
            color_map: "grey".to_string(),
            color_invert: false,
            transparency: 0,
            smooth: false,
            hide: false,
        }
    }
}

impl ImageSettings {
    /// Settings plotting the named dataset with defaults for everything else.
    pub fn for_dataset(name: impl Into<String>) -> Self {
        Self {
            data: name.into(),
            ..Self::default()
        }
    }

    /// Load settings from a JSON string.
    pub fn from_json(json_str: &str) -> PlotResult<Self> {
        let settings: Self = serde_json::from_str(json_str)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> PlotResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Check value constraints.
    pub fn validate(&self) -> PlotResult<()> {
        if self.transparency > 100 {
            return Err(PlotError::invalid_settings(
                "transparency",
                format!("must be 0-100, got {}", self.transparency),
            ));
        }

        if let (Some(min), Some(max)) = (self.min.value(), self.max.value()) {
            if min > max {
                return Err(PlotError::invalid_settings(
                    "min",
                    format!("minimum {} is above maximum {}", min, max),
                ));
            }
        }

        if self.color_map.is_empty() {
            return Err(PlotError::invalid_settings("colorMap", "must not be empty"));
        }

        Ok(())
    }

    /// Short description: dataset, scaling and colormap.
    pub fn user_description(&self) -> String {
        let mut out = Vec::new();
        if !self.data.is_empty() {
            out.push(self.data.as_str());
        }
        out.push(self.color_scaling.name());
        out.push(self.color_map.as_str());
        out.join(", ")
    }
}
