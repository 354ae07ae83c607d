use std::f64::consts::PI;
use std::io::Write;

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

const SCATTER_COLUMNS: usize = 41;
const SCATTER_ROWS: usize = 21;

/// 純文字輸出：panel 表格、比較表與 π 的字元散佈圖。
pub struct TextRenderer<W> {
    writer: W,
    precision: usize
}

impl<W> TextRenderer<W> where
    W: Write {
    pub fn new(writer: W, precision: usize) -> TextRenderer<W> {
        TextRenderer { writer, precision }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// 每格標記：只有圓內點為 `o`，只有圓外點為 `.`，兩者皆有為 `*`。
    fn scatter(&mut self, estimate: &PiEstimate) -> Result<(), RenderError> {
        let mut cells = [[(false, false); SCATTER_COLUMNS]; SCATTER_ROWS];
        for sample in estimate.samples() {
            let point = sample.point();
            let column = (((point.x() + 1.0) / 2.0) * (SCATTER_COLUMNS - 1) as f64).round() as usize;
            let row = (((1.0 - point.y()) / 2.0) * (SCATTER_ROWS - 1) as f64).round() as usize;
            let cell = &mut cells[row.min(SCATTER_ROWS - 1)][column.min(SCATTER_COLUMNS - 1)];
            if sample.inside() {
                cell.0 = true;
            } else {
                cell.1 = true;
            }
        }
        for row in cells.iter() {
            let line: String = row
                .iter()
                .map(|cell| match cell {
                    (true, true) => '*',
                    (true, false) => 'o',
                    (false, true) => '.',
                    (false, false) => ' '
                })
                .collect();
            writeln!(self.writer, "|{}|", line)?;
        }
        Ok(())
    }
}

impl<W> Renderer for TextRenderer<W> where
    W: Write {
    fn render_trapezoid(&mut self, plot: &TrapezoidPlot) -> Result<(), RenderError> {
        let p = self.precision;
        writeln!(self.writer, "Trapezoidal Rule with n={} subintervals, f(x) = {}", plot.subdivisions(), plot.label())?;
        writeln!(self.writer, "{:>6}  {:>14}  {:>14}  {:>14}  {:>14}  {:>14}", "panel", "x_left", "x_right", "y_left", "y_right", "area")?;
        for (i, panel) in plot.panels().iter().enumerate() {
            writeln!(
                self.writer,
                "{:>6}  {:>14.p$}  {:>14.p$}  {:>14.p$}  {:>14.p$}  {:>14.p$}",
                i + 1,
                panel.x_left(),
                panel.x_right(),
                panel.y_left(),
                panel.y_right(),
                panel.area()
            )?;
        }
        writeln!(self.writer, "Integral ≈ {:.p$} over [{}, {}]", plot.estimate(), plot.lower(), plot.upper())?;
        Ok(())
    }

    fn render_comparison(&mut self,
                         results: &[SubdivisionResult],
                         exact: Option<f64>) -> Result<(), RenderError> {
        let p = self.precision;
        writeln!(self.writer, "Error vs number of subintervals:")?;
        for result in results {
            match exact {
                Some(exact) => writeln!(
                    self.writer,
                    "n = {}: approximation = {:.p$}, error = {:.p$e}",
                    result.subdivisions(),
                    result.estimate(),
                    result.absolute_error(exact)
                )?,
                None => writeln!(
                    self.writer,
                    "n = {}: approximation = {:.p$}",
                    result.subdivisions(),
                    result.estimate()
                )?
            }
        }
        Ok(())
    }

    fn render_pi(&mut self, estimate: &PiEstimate) -> Result<(), RenderError> {
        let p = self.precision;
        writeln!(
            self.writer,
            "Monte Carlo Estimation of π using {} random points, estimated π = {:.p$} (π = {:.p$})",
            estimate.total(),
            estimate.estimate(),
            PI
        )?;
        self.scatter(estimate)?;
        writeln!(self.writer, "Points inside circle: {} of {}", estimate.inside(), estimate.total())?;
        Ok(())
    }

    fn render_convergence(&mut self, rows: &[ConvergenceRow]) -> Result<(), RenderError> {
        let p = self.precision;
        for row in rows {
            writeln!(
                self.writer,
                "N = {}, π estimate = {:.p$}, Error = {:.p$}, Time: {:.4} sec",
                row.samples(),
                row.estimate(),
                row.absolute_error(),
                row.elapsed_seconds()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::math::integration::subdivisioncomparison::compare_subdivisions;
    use crate::math::integration::trapezoidal::estimate;
    use crate::math::montecarlo::piestimator::estimate_pi;

    fn rendered(render: impl FnOnce(&mut TextRenderer<Vec<u8>>) -> Result<(), RenderError>) -> String {
        let mut renderer = TextRenderer::new(Vec::new(), 6);
        render(&mut renderer).unwrap();
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn trapezoid_table_has_one_row_per_panel() {
        let f = |x: f64| x;
        let result = estimate(&f, 0.0, 1.0, 4).unwrap();
        let plot = TrapezoidPlot::new(&f, &result, "x", 10);
        let output = rendered(|renderer| renderer.render_trapezoid(&plot));
        assert_eq!(output.lines().count(), 2 + 4 + 1);
        assert!(output.contains("Integral ≈ 0.500000"));
    }

    #[test]
    fn comparison_lines_follow_input_order() {
        let results = compare_subdivisions(&|x: f64| x * x, 0.0, 1.0, &[4, 2]).unwrap();
        let output = rendered(|renderer| renderer.render_comparison(&results, None));
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[1], "n = 4: approximation = 0.343750");
        assert_eq!(lines[2], "n = 2: approximation = 0.375000");

        let with_error = rendered(|renderer| renderer.render_comparison(&results, Some(1.0 / 3.0)));
        assert!(with_error.lines().nth(1).unwrap().contains("error = "));
    }

    #[test]
    fn pi_summary_and_scatter() {
        let estimate = estimate_pi(500, &mut StdRng::seed_from_u64(9)).unwrap();
        let output = rendered(|renderer| renderer.render_pi(&estimate));
        assert_eq!(output.lines().filter(|line| line.starts_with('|')).count(), SCATTER_ROWS);
        assert!(output.starts_with("Monte Carlo Estimation of π using 500 random points"));
        assert!(output.contains("Points inside circle: "));
    }
}
