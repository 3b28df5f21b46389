//! Dual-unit glucose values (mmol/L and mg/dL)

use serde::{Deserialize, Serialize};

/// Conversion factor from mmol/L to mg/dL
pub const MMOL_TO_MGDL: f64 = 18.018;

/// A glucose quantity expressed in both units
///
/// Only ever constructed from the mmol/L value, so the two fields cannot
/// disagree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Glucose {
    pub mmol_l: f64,
    pub mg_dl: f64,
}

impl Glucose {
    pub fn from_mmol(mmol_l: f64) -> Self {
        Self {
            mmol_l,
            mg_dl: mmol_l * MMOL_TO_MGDL,
        }
    }

    /// Lift an optional mmol/L value; absence is preserved
    pub fn from_optional(mmol_l: Option<f64>) -> Option<Self> {
        mmol_l.map(Self::from_mmol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_is_linear() {
        let g = Glucose::from_mmol(5.0);
        assert!((g.mg_dl - 90.09).abs() < 1e-9);
        assert_eq!(g.mmol_l, 5.0);
    }

    #[test]
    fn test_absent_stays_absent() {
        assert_eq!(Glucose::from_optional(None), None);
    }

    #[test]
    fn test_negative_delta_converts() {
        let g = Glucose::from_mmol(-1.0);
        assert_eq!(g.mg_dl, -MMOL_TO_MGDL);
    }
}
