//! Pre-fitted standard scaler.

use serde::{Deserialize, Serialize};

use crate::error::{PredictError, PredictResult};

/// Standardizes features with parameters fitted at training time.
///
/// The engine never fits a scaler; `mean` and `scale` come from the bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> PredictResult<Self> {
        if mean.len() != scale.len() {
            return Err(PredictError::invalid_bundle(format!(
                "scaler mean has {} entries but scale has {}",
                mean.len(),
                scale.len()
            )));
        }
        Ok(Self { mean, scale })
    }

    /// Identity scaler of the given width.
    pub fn identity(width: usize) -> Self {
        Self {
            mean: vec![0.0; width],
            scale: vec![1.0; width],
        }
    }

    pub fn width(&self) -> usize {
        self.mean.len()
    }

    /// `(x - mean) / scale`; a zero scale is treated as 1 (constant column).
    pub fn transform(&self, values: &[f64]) -> PredictResult<Vec<f64>> {
        if values.len() != self.width() {
            return Err(PredictError::invalid_bundle(format!(
                "scaler expects {} features, got {}",
                self.width(),
                values.len()
            )));
        }

        Ok(values
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(x, (mean, scale))| {
                let scale = if *scale == 0.0 { 1.0 } else { *scale };
                (x - mean) / scale
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_standardizes() {
        let scaler = StandardScaler::new(vec![10.0, 0.0], vec![2.0, 0.5]).unwrap();
        assert_eq!(scaler.transform(&[14.0, 1.0]).unwrap(), vec![2.0, 2.0]);
    }

    #[test]
    fn test_zero_scale_treated_as_one() {
        let scaler = StandardScaler::new(vec![3.0], vec![0.0]).unwrap();
        assert_eq!(scaler.transform(&[5.0]).unwrap(), vec![2.0]);
    }

    #[test]
    fn test_width_mismatch_is_error() {
        let scaler = StandardScaler::identity(3);
        assert!(matches!(
            scaler.transform(&[1.0, 2.0]),
            Err(PredictError::InvalidBundle(_))
        ));
        assert!(StandardScaler::new(vec![0.0], vec![]).is_err());
    }
}
