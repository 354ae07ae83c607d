use chrono::{
    DateTime,
    Utc
};
use serde::Serialize;
use tracing::warn;

use crate::math::function::realfunction::RealFunction;
use crate::math::integration::trapezoidal::{
    TrapezoidPanel,
    TrapezoidalEstimate
};
use crate::math::point2d::Point2D;

/// 繪製梯形法所需的全部資料：平滑曲線、各 panel 與估計值。
#[derive(Debug, Clone, Serialize)]
pub struct TrapezoidPlot {
    label: String,
    lower: f64,
    upper: f64,
    subdivisions: usize,
    estimate: f64,
    curve: Vec<Point2D>,
    panels: Vec<TrapezoidPanel>,
    generated_at: DateTime<Utc>
}

impl TrapezoidPlot {
    /// `resolution` 為曲線取樣點數；曲線上無法求值的點直接略過（曲線斷開）。
    pub fn new<F>(f: &F,
                  estimate: &TrapezoidalEstimate,
                  label: &str,
                  resolution: usize) -> TrapezoidPlot where
        F: RealFunction + ?Sized {
        let interval = estimate.interval();
        let mut skipped = 0_usize;
        let curve: Vec<Point2D> = interval
            .linspace(resolution.max(2))
            .into_iter()
            .filter_map(|x| match f.value(x) {
                Ok(y) => Some(Point2D::new(x, y)),
                Err(_) => {
                    skipped += 1;
                    None
                }
            })
            .collect();
        if skipped > 0 {
            warn!(skipped, label, "curve samples skipped where the function is undefined");
        }

        TrapezoidPlot {
            label: label.to_owned(),
            lower: interval.lower(),
            upper: interval.upper(),
            subdivisions: estimate.subdivisions(),
            estimate: estimate.value(),
            curve,
            panels: estimate.panels(),
            generated_at: Utc::now()
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn subdivisions(&self) -> usize {
        self.subdivisions
    }

    pub fn estimate(&self) -> f64 {
        self.estimate
    }

    pub fn curve(&self) -> &[Point2D] {
        &self.curve
    }

    pub fn panels(&self) -> &[TrapezoidPanel] {
        &self.panels
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::parser::parse_expression;
    use crate::math::integration::trapezoidal::estimate;

    #[test]
    fn curve_and_panels_cover_interval() {
        let f = |x: f64| x * x;
        let result = estimate(&f, 0.0, 2.0, 4).unwrap();
        let plot = TrapezoidPlot::new(&f, &result, "x^2", 101);
        assert_eq!(plot.curve().len(), 101);
        assert_eq!(plot.panels().len(), 4);
        assert_eq!(plot.curve().first().unwrap().x(), 0.0);
        assert_eq!(plot.curve().last().unwrap().x(), 2.0);
        assert_eq!(plot.estimate(), result.value());
    }

    #[test]
    fn undefined_curve_points_are_skipped() {
        // 網格 0.5, 1.5 皆有定義，但曲線取樣會碰到 x = 1
        let f = parse_expression("1 / (x - 1)").unwrap();
        let result = estimate(&f, 0.5, 1.5, 1).unwrap();
        let plot = TrapezoidPlot::new(&f, &result, f.source(), 5);
        assert_eq!(plot.curve().len(), 4);
        assert!(plot.curve().iter().all(|point| point.x() != 1.0));
    }
}
