use thiserror::Error;

use crate::math::integration::subdivisioncomparison::SubdivisionResult;
use crate::math::montecarlo::piestimator::{
    ConvergenceRow,
    PiEstimate
};
use crate::render::trapezoidplot::TrapezoidPlot;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize plot: {0}")]
    Json(#[from] serde_json::Error)
}

/// 計算結果的輸出端。純 sink，回傳值不影響計算。
pub trait Renderer {
    fn render_trapezoid(&mut self, plot: &TrapezoidPlot) -> Result<(), RenderError>;

    /// `exact` 已知時一併輸出絕對誤差。
    fn render_comparison(&mut self,
                         results: &[SubdivisionResult],
                         exact: Option<f64>) -> Result<(), RenderError>;

    fn render_pi(&mut self, estimate: &PiEstimate) -> Result<(), RenderError>;

    fn render_convergence(&mut self, rows: &[ConvergenceRow]) -> Result<(), RenderError>;
}
