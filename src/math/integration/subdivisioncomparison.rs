use serde::Serialize;
use tracing::debug;

use crate::math::function::realfunction::RealFunction;
use crate::math::integration::integrationerror::IntegrationError;
use crate::math::integration::interval::Interval;
use crate::math::integration::trapezoidal::estimate_on;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SubdivisionResult {
    subdivisions: usize,
    estimate: f64
}

impl SubdivisionResult {
    pub fn new(subdivisions: usize, estimate: f64) -> SubdivisionResult {
        SubdivisionResult { subdivisions, estimate }
    }

    pub fn subdivisions(&self) -> usize {
        self.subdivisions
    }

    pub fn estimate(&self) -> f64 {
        self.estimate
    }

    pub fn absolute_error(&self, exact: f64) -> f64 {
        (self.estimate - exact).abs()
    }
}

/// 依 `counts` 的順序逐一計算梯形估計，保留重複值。
///
/// 第一個失敗的 n 即中止並原樣回傳錯誤。
pub fn compare_subdivisions<F>(f: &F,
                               a: f64,
                               b: f64,
                               counts: &[usize]) -> Result<Vec<SubdivisionResult>, IntegrationError> where
    F: RealFunction + ?Sized {
    let interval = Interval::new(a, b)?;
    let mut results = Vec::with_capacity(counts.len());
    for &n in counts {
        let estimate = estimate_on(f, &interval, n)?;
        results.push(SubdivisionResult::new(n, estimate.value()));
    }
    debug!(count = results.len(), "subdivision comparison finished");
    Ok(results)
}

/// 互動模式下預設的比較序列：`[n/2, n, 2n, 4n]`，n < 4 時改用 `[2, 4, 8, 16]`。
pub fn default_comparison_counts(n: usize) -> Vec<usize> {
    if n < 4 {
        vec![2, 4, 8, 16]
    } else {
        vec![n / 2, n, n.saturating_mul(2), n.saturating_mul(4)]
    }
}
