use std::collections::BTreeSet;
use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{HerdError, Result};

/// Analysis parameters shared by every pipeline stage.
/// Defaults reproduce the Arabia herdable study: town center as the
/// reference, four cow variants plus sheep as satellites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Entity kind marking the reference point.
    pub reference_kind: String,
    /// Entity kinds collected as satellite points.
    pub satellite_kinds: BTreeSet<String>,
    /// Keep the last reference entity instead of failing when a source has several.
    pub allow_multiple_references: bool,
    /// First threshold of the survival sweep (inclusive).
    pub survival_min: u32,
    /// Last threshold of the survival sweep (inclusive).
    pub survival_max: u32,
    /// Chessboard distance at which a satellite counts as far.
    pub far_threshold: f64,
    /// Header labels of the columnar offsets file.
    pub column_labels: [String; 2],
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            reference_kind: "town_center".into(),
            satellite_kinds: ["cow_a", "cow_b", "cow_c", "cow_d", "sheep"]
                .into_iter()
                .map(String::from)
                .collect(),
            allow_multiple_references: false,
            survival_min: 12,
            survival_max: 42,
            far_threshold: 23.0,
            column_labels: ["a".into(), "b".into()],
        }
    }
}

impl AnalysisConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| HerdError::io(path, e))?;
        let config: AnalysisConfig =
            serde_json::from_str(&text).map_err(|e| HerdError::json(path, e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.reference_kind.trim().is_empty() {
            return Err(HerdError::InvalidConfig("reference_kind is empty".into()));
        }
        if self.satellite_kinds.contains(&self.reference_kind) {
            return Err(HerdError::InvalidConfig(format!(
                "'{}' is both the reference kind and a satellite kind",
                self.reference_kind
            )));
        }
        if self.survival_min > self.survival_max {
            return Err(HerdError::InvalidConfig(format!(
                "survival_min {} exceeds survival_max {}",
                self.survival_min, self.survival_max
            )));
        }
        if !self.far_threshold.is_finite() || self.far_threshold < 0.0 {
            return Err(HerdError::InvalidConfig(format!(
                "far_threshold must be a non-negative number, got {}",
                self.far_threshold
            )));
        }
        Ok(())
    }

    pub fn survival_range(&self) -> RangeInclusive<u32> {
        self.survival_min..=self.survival_max
    }

    pub fn is_satellite(&self, kind: &str) -> bool {
        self.satellite_kinds.contains(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = AnalysisConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.survival_range(), 12..=42);
        assert!(cfg.is_satellite("sheep"));
        assert!(!cfg.is_satellite("town_center"));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: AnalysisConfig =
            serde_json::from_str(r#"{"survival_min": 5, "satellite_kinds": ["deer"]}"#).unwrap();
        assert_eq!(cfg.survival_min, 5);
        assert_eq!(cfg.survival_max, 42);
        assert!(cfg.is_satellite("deer"));
        assert!(!cfg.is_satellite("sheep"));
        assert_eq!(cfg.reference_kind, "town_center");
    }

    #[test]
    fn rejects_inverted_survival_range() {
        let cfg = AnalysisConfig {
            survival_min: 50,
            ..AnalysisConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(HerdError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_reference_kind_among_satellites() {
        let mut cfg = AnalysisConfig::default();
        cfg.satellite_kinds.insert("town_center".into());
        assert!(cfg.validate().is_err());
    }
}
