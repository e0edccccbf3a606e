//! Covering parameters.

use s2::region::RegionCoverer;
use serde::{Deserialize, Serialize};

use crate::error::CoverError;

/// Deepest S2 cell level.
pub const MAX_CELL_LEVEL: u8 = 30;

/// Parameters of the region coverer used to compute index keys.
///
/// Points are indexed by a single cell at `min_level`. Polygon coverings use cells between
/// `min_level` and `max_level` and try to stay within `max_cells` cells. The coverer may return
/// more cells than `max_cells` if `min_level` is high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoveringConfig {
    /// Coarsest cell level used.
    pub min_level: u8,
    /// Finest cell level used.
    pub max_level: u8,
    /// Only levels `min_level + k * level_mod` are used. Allowed values are 1, 2 and 3.
    pub level_mod: u8,
    /// Desired upper bound of cells in a covering.
    pub max_cells: usize,
}

impl Default for CoveringConfig {
    fn default() -> Self {
        Self {
            min_level: 4,
            max_level: 16,
            level_mod: 1,
            max_cells: 8,
        }
    }
}

impl CoveringConfig {
    /// Sets the level range.
    pub fn with_levels(mut self, min_level: u8, max_level: u8) -> Self {
        self.min_level = min_level;
        self.max_level = max_level;
        self
    }

    /// Sets the desired maximum number of cells.
    pub fn with_max_cells(mut self, max_cells: usize) -> Self {
        self.max_cells = max_cells;
        self
    }

    /// Sets the level step.
    pub fn with_level_mod(mut self, level_mod: u8) -> Self {
        self.level_mod = level_mod;
        self
    }

    /// Checks that the parameters can be handed to the coverer.
    pub fn validate(&self) -> Result<(), CoverError> {
        if self.max_level > MAX_CELL_LEVEL {
            return Err(CoverError::InvalidConfig(format!(
                "max_level {} exceeds {MAX_CELL_LEVEL}",
                self.max_level
            )));
        }

        if self.min_level > self.max_level {
            return Err(CoverError::InvalidConfig(format!(
                "min_level {} is greater than max_level {}",
                self.min_level, self.max_level
            )));
        }

        if !(1..=3).contains(&self.level_mod) {
            return Err(CoverError::InvalidConfig(format!(
                "level_mod must be 1, 2 or 3, got {}",
                self.level_mod
            )));
        }

        if self.max_cells == 0 {
            return Err(CoverError::InvalidConfig(
                "max_cells must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// Creates a region coverer with these parameters.
    pub fn region_coverer(&self) -> Result<RegionCoverer, CoverError> {
        self.validate()?;
        Ok(RegionCoverer {
            min_level: self.min_level,
            max_level: self.max_level,
            level_mod: self.level_mod,
            max_cells: self.max_cells,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn default_is_valid() {
        let coverer = CoveringConfig::default().region_coverer().unwrap();
        assert_eq!(coverer.min_level, 4);
        assert_eq!(coverer.max_level, 16);
        assert_eq!(coverer.level_mod, 1);
        assert_eq!(coverer.max_cells, 8);
    }

    #[test]
    fn invalid_parameters() {
        let config = CoveringConfig::default();
        assert_matches!(
            config.with_levels(10, 5).validate(),
            Err(CoverError::InvalidConfig(_))
        );
        assert_matches!(
            config.with_levels(0, 31).validate(),
            Err(CoverError::InvalidConfig(_))
        );
        assert_matches!(
            config.with_level_mod(0).validate(),
            Err(CoverError::InvalidConfig(_))
        );
        assert_matches!(
            config.with_max_cells(0).region_coverer(),
            Err(CoverError::InvalidConfig(_))
        );
        assert!(config.with_levels(18, 18).with_level_mod(3).validate().is_ok());
    }

    #[test]
    fn deserialize_partial() {
        let config: CoveringConfig =
            serde_json::from_str(r#"{"min_level": 18, "max_level": 18}"#).unwrap();
        assert_eq!(
            config,
            CoveringConfig {
                min_level: 18,
                max_level: 18,
                level_mod: 1,
                max_cells: 8,
            }
        );
    }
}
