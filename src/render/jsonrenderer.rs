use std::f64::consts::PI;
use std::io::Write;

use serde::Serialize;
use serde_json::json;

use crate::math::integration::subdivisioncomparison::SubdivisionResult;
use crate::math::montecarlo::piestimator::{
    ConvergenceRow,
    PiEstimate
};
use crate::render::renderer::{
    RenderError,
    Renderer
};
use crate::render::trapezoidplot::TrapezoidPlot;

/// 每次呼叫輸出一份 JSON 文件（`kind` + `data`），供外部繪圖工具使用。
pub struct JsonRenderer<W> {
    writer: W
}

impl<W> JsonRenderer<W> where
    W: Write {
    pub fn new(writer: W) -> JsonRenderer<W> {
        JsonRenderer { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn emit<T>(&mut self, kind: &str, data: &T) -> Result<(), RenderError> where
        T: Serialize + ?Sized {
        let document = json!({ "kind": kind, "data": data });
        serde_json::to_writer_pretty(&mut self.writer, &document)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W> Renderer for JsonRenderer<W> where
    W: Write {
    fn render_trapezoid(&mut self, plot: &TrapezoidPlot) -> Result<(), RenderError> {
        self.emit("trapezoid", plot)
    }

    fn render_comparison(&mut self,
                         results: &[SubdivisionResult],
                         exact: Option<f64>) -> Result<(), RenderError> {
        let rows: Vec<serde_json::Value> = results
            .iter()
            .map(|result| json!({
                "subdivisions": result.subdivisions(),
                "estimate": result.estimate(),
                "absolute_error": exact.map(|exact| result.absolute_error(exact))
            }))
            .collect();
        self.emit("comparison", &rows)
    }

    fn render_pi(&mut self, estimate: &PiEstimate) -> Result<(), RenderError> {
        self.emit("pi", &json!({
            "estimate": estimate.estimate(),
            "actual": PI,
            "absolute_error": estimate.absolute_error(),
            "inside": estimate.inside(),
            "samples": estimate.samples()
        }))
    }

    fn render_convergence(&mut self, rows: &[ConvergenceRow]) -> Result<(), RenderError> {
        self.emit("convergence", rows)
    }
}
