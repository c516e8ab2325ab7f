//! Standard scaler for the dense feature block

use ndarray::{Array2, ArrayView1, Axis};
use sentinela_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Per-column mean/variance scaler, fitted on the training split only
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    pub fn fit(data: &Array2<f64>) -> Result<Self> {
        if data.nrows() == 0 {
            return Err(Error::training_data("cannot fit scaler on zero rows"));
        }

        let mut mean = Vec::with_capacity(data.ncols());
        let mut scale = Vec::with_capacity(data.ncols());
        for column in data.axis_iter(Axis(1)) {
            let m = column.mean().unwrap_or(0.0);
            let var = column.iter().map(|v| (v - m).powi(2)).sum::<f64>() / column.len() as f64;
            let std = var.sqrt();
            mean.push(m);
            // Constant columns pass through centered
            scale.push(if std > 1e-12 { std } else { 1.0 });
        }

        Ok(Self { mean, scale })
    }

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    /// Scale one row
    pub fn transform_row(&self, row: ArrayView1<f64>) -> Result<Vec<f64>> {
        if row.len() != self.mean.len() {
            return Err(Error::feature_mismatch(format!(
                "scaler expects {} dense columns, got {}",
                self.mean.len(),
                row.len()
            )));
        }
        Ok(row
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(v, (m, s))| (v - m) / s)
            .collect())
    }

    pub fn transform(&self, data: &Array2<f64>) -> Result<Array2<f64>> {
        let mut out = Array2::zeros(data.raw_dim());
        for (i, row) in data.axis_iter(Axis(0)).enumerate() {
            let scaled = self.transform_row(row)?;
            for (j, v) in scaled.into_iter().enumerate() {
                out[[i, j]] = v;
            }
        }
        Ok(out)
    }
}
