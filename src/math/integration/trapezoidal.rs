use nalgebra::DVector;
use serde::Serialize;
use tracing::debug;

use crate::math::function::realfunction::RealFunction;
use crate::math::integration::integrationerror::IntegrationError;
use crate::math::integration::interval::Interval;

// ─────────────────────────────────────────────────────────────────────────────
// Composite trapezoidal rule
// ─────────────────────────────────────────────────────────────────────────────
//
//   h = (b - a) / n,   x_i = a + i·h,   y_i = f(x_i)
//
//   ∫_a^b f(x) dx ≈ h · ( y_0/2 + y_1 + ... + y_{n-1} + y_n/2 )
//
// 每個 panel [x_i, x_{i+1}] 以梯形近似，相鄰梯形共用內部節點，
// 加總後內部節點權重為 1、端點權重為 1/2。
// 對一次以下多項式為精確解；平滑函數的誤差為 O(h²)。

/// 單一梯形 panel。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrapezoidPanel {
    x_left: f64,
    x_right: f64,
    y_left: f64,
    y_right: f64
}

impl TrapezoidPanel {
    pub fn new(x_left: f64, x_right: f64, y_left: f64, y_right: f64) -> TrapezoidPanel {
        TrapezoidPanel { x_left, x_right, y_left, y_right }
    }

    pub fn x_left(&self) -> f64 {
        self.x_left
    }

    pub fn x_right(&self) -> f64 {
        self.x_right
    }

    pub fn y_left(&self) -> f64 {
        self.y_left
    }

    pub fn y_right(&self) -> f64 {
        self.y_right
    }

    pub fn area(&self) -> f64 {
        0.5 * (self.x_right - self.x_left) * (self.y_left + self.y_right)
    }
}

/// 梯形法的結果：估計值加上取樣網格與函數值（供繪圖使用）。
#[derive(Debug, Clone)]
pub struct TrapezoidalEstimate {
    value: f64,
    interval: Interval,
    subdivisions: usize,
    step: f64,
    grid: DVector<f64>,
    values: DVector<f64>
}

impl TrapezoidalEstimate {
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn subdivisions(&self) -> usize {
        self.subdivisions
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// n + 1 個取樣點，`grid[0] == a`、`grid[n] == b`。
    pub fn grid(&self) -> &DVector<f64> {
        &self.grid
    }

    /// 與 `grid` 同長度、同順序的 f(x_i)。
    pub fn values(&self) -> &DVector<f64> {
        &self.values
    }

    pub fn panels(&self) -> Vec<TrapezoidPanel> {
        (0..self.subdivisions)
            .map(|i| TrapezoidPanel::new(
                self.grid[i],
                self.grid[i + 1],
                self.values[i],
                self.values[i + 1]
            ))
            .collect()
    }
}

/// 以 n 個等寬 panel 計算 ∫_a^b f(x) dx。
///
/// 區間與 n 先驗證（區間優先），任何一點求值失敗即整體失敗並回報該點。
pub fn estimate<F>(f: &F, a: f64, b: f64, n: usize) -> Result<TrapezoidalEstimate, IntegrationError> where
    F: RealFunction + ?Sized {
    let interval = Interval::new(a, b)?;
    estimate_on(f, &interval, n)
}

pub fn estimate_on<F>(f: &F, interval: &Interval, n: usize) -> Result<TrapezoidalEstimate, IntegrationError> where
    F: RealFunction + ?Sized {
    if n < 1 {
        return Err(IntegrationError::InvalidSubdivision(n));
    }

    let a = interval.lower();
    let b = interval.upper();
    let h = (b - a) / n as f64;

    let grid = DVector::from_fn(n + 1, |i, _| if i == n { b } else { a + i as f64 * h });

    let mut samples = Vec::with_capacity(n + 1);
    for &x in grid.iter() {
        let y = f.value(x).map_err(|source| IntegrationError::FunctionEvaluation { x, source })?;
        samples.push(y);
    }
    let values = DVector::from_vec(samples);

    let interior: f64 = values.rows(1, n - 1).sum();
    let value = h * (0.5 * values[0] + interior + 0.5 * values[n]);

    debug!(a, b, n, h, value, "trapezoidal estimate");

    Ok(TrapezoidalEstimate {
        value,
        interval: *interval,
        subdivisions: n,
        step: h,
        grid,
        values
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::function::realfunction::{
        EvaluationFailure,
        FallibleFunction
    };

    #[test]
    fn grid_of_four_panels_on_unit_interval() {
        let result = estimate(&|x: f64| x, 0.0, 1.0, 4).unwrap();
        assert_eq!(result.grid().as_slice(), &[0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(result.values().len(), 5);
        assert_eq!(result.step(), 0.25);
    }

    #[test]
    fn single_panel_is_one_trapezoid() {
        let result = estimate(&|x: f64| x * x, 0.0, 2.0, 1).unwrap();
        // 2 * (0 + 4) / 2
        assert_relative_eq!(result.value(), 4.0);
        assert_eq!(result.panels().len(), 1);
    }

    #[test]
    fn known_value_for_parabola() {
        // h = 1：0.5*0 + 1 + 4 + 0.5*9 = 9.5
        let result = estimate(&|x: f64| x * x, 0.0, 3.0, 3).unwrap();
        assert_relative_eq!(result.value(), 9.5, epsilon = 1e-12);
    }

    #[test]
    fn panel_areas_sum_to_estimate() {
        let result = estimate(&|x: f64| x.sin(), 0.0, std::f64::consts::PI, 16).unwrap();
        let total: f64 = result.panels().iter().map(|panel| panel.area()).sum();
        assert_relative_eq!(total, result.value(), epsilon = 1e-12);
    }

    #[test]
    fn invalid_inputs() {
        assert_eq!(
            estimate(&|x: f64| x, 0.0, 1.0, 0).unwrap_err(),
            IntegrationError::InvalidSubdivision(0)
        );
        assert_eq!(
            estimate(&|x: f64| x, 5.0, 2.0, 4).unwrap_err(),
            IntegrationError::InvalidRange { lower: 5.0, upper: 2.0 }
        );
        // 區間錯誤優先於 n 錯誤
        assert!(matches!(
            estimate(&|x: f64| x, 5.0, 2.0, 0),
            Err(IntegrationError::InvalidRange { .. })
        ));
    }

    #[test]
    fn evaluation_failure_reports_first_failing_point() {
        let log = FallibleFunction::new(|x: f64| {
            if x > 0.0 {
                Ok(x.ln())
            } else {
                Err(EvaluationFailure::new("log of non-positive value"))
            }
        });
        let error = estimate(&log, -1.0, 1.0, 4).unwrap_err();
        assert_eq!(error.failing_point(), Some(-1.0));
    }

    #[test]
    fn nan_samples_propagate() {
        let result = estimate(&|x: f64| if x == 0.5 { f64::NAN } else { x }, 0.0, 1.0, 2).unwrap();
        assert!(result.value().is_nan());
    }
}
