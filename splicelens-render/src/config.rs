use std::fs::read_to_string;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::RenderError;

/// Largest accepted `zoom_width`; a detail window spans `2 * zoom_width + 1` bases.
pub const MAX_ZOOM_WIDTH: u32 = 100_000;

/// Relative heights of the figure rows.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RowRatios {
    pub gene_model: f64,
    pub summary_bars: f64,
    pub ruler: f64,
    pub connector: f64,
    pub box_strip: f64,
    pub logo_strip: f64,
}

impl Default for RowRatios {
    fn default() -> Self {
        RowRatios {
            gene_model: 1.0,
            summary_bars: 1.2,
            ruler: 0.3,
            connector: 0.8,
            box_strip: 2.0,
            logo_strip: 1.0,
        }
    }
}

impl RowRatios {
    fn all(&self) -> [f64; 6] {
        [
            self.gene_model,
            self.summary_bars,
            self.ruler,
            self.connector,
            self.box_strip,
            self.logo_strip,
        ]
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    /// Bases shown either side of a site in its detail panel
    pub zoom_width: u32,
    /// Width of one detail panel in pixels
    pub slot_width: f64,
    pub slot_gap: f64,
    pub show_outliers: bool,
    pub show_logos: bool,
    pub title: Option<String>,
    pub row_ratios: RowRatios,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            width: 1400.0,
            height: 900.0,
            margin: 30.0,
            zoom_width: 10,
            slot_width: 160.0,
            slot_gap: 8.0,
            show_outliers: true,
            show_logos: true,
            title: None,
            row_ratios: RowRatios::default(),
        }
    }
}

impl TryFrom<&Path> for RenderConfig {
    type Error = RenderError;

    ///
    /// Load a render config from a .toml file. Missing keys keep their defaults.
    ///
    fn try_from(path: &Path) -> Result<RenderConfig, RenderError> {
        let toml_str = read_to_string(path)?;
        let config: RenderConfig = toml::from_str(&toml_str)?;
        config.validate()?;

        Ok(config)
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), RenderError> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("slot_width", self.slot_width),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(RenderError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        if self.zoom_width > MAX_ZOOM_WIDTH {
            return Err(RenderError::InvalidConfig(format!(
                "zoom_width must be at most {MAX_ZOOM_WIDTH}, got {}",
                self.zoom_width
            )));
        }

        if self.margin < 0.0 || self.slot_gap < 0.0 {
            return Err(RenderError::InvalidConfig(
                "margin and slot_gap must not be negative".to_string(),
            ));
        }

        if 2.0 * self.margin >= self.width.min(self.height) {
            return Err(RenderError::InvalidConfig(format!(
                "margin {} leaves no drawing area",
                self.margin
            )));
        }

        if self.row_ratios.all().iter().any(|r| !(*r >= 0.0))
            || self.row_ratios.all().iter().sum::<f64>() <= 0.0
        {
            return Err(RenderError::InvalidConfig(
                "row ratios must be non-negative and not all zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[rstest]
    fn test_partial_toml_keeps_defaults() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "zoom_width = 5").unwrap();
        writeln!(f, "show_outliers = false").unwrap();
        writeln!(f, "[row_ratios]").unwrap();
        writeln!(f, "logo_strip = 0.5").unwrap();
        f.flush().unwrap();

        let config = RenderConfig::try_from(f.path()).unwrap();

        assert_eq!(config.zoom_width, 5);
        assert!(!config.show_outliers);
        assert_eq!(config.row_ratios.logo_strip, 0.5);
        assert_eq!(config.row_ratios.box_strip, RowRatios::default().box_strip);
        assert_eq!(config.width, RenderConfig::default().width);
    }

    #[rstest]
    fn test_default_is_valid() {
        assert!(RenderConfig::default().validate().is_ok());
    }

    #[rstest]
    #[case("width = 0.0")]
    #[case("slot_width = -5.0")]
    #[case("margin = 1000.0")]
    #[case("slot_gap = -1.0")]
    #[case("zoom_width = 4294967295")]
    fn test_invalid_geometry_is_rejected(#[case] line: &str) {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "{}", line).unwrap();
        f.flush().unwrap();

        assert!(matches!(
            RenderConfig::try_from(f.path()),
            Err(RenderError::InvalidConfig(_))
        ));
    }

    #[rstest]
    fn test_zoom_width_limit_is_inclusive() {
        let config = RenderConfig {
            zoom_width: MAX_ZOOM_WIDTH,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[rstest]
    fn test_malformed_toml_is_reported() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "zoom_width = \"wide\"").unwrap();
        f.flush().unwrap();

        assert!(matches!(
            RenderConfig::try_from(f.path()),
            Err(RenderError::Toml(_))
        ));
    }
}
