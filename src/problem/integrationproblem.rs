use crate::expression::expression::Expression;
use crate::math::integration::integrationerror::IntegrationError;
use crate::math::integration::interval::Interval;
use crate::math::integration::subdivisioncomparison::{
    SubdivisionResult,
    compare_subdivisions,
    default_comparison_counts
};
use crate::math::integration::trapezoidal::{
    TrapezoidalEstimate,
    estimate_on
};

/// 具名的積分題目：算式、區間、panel 數，以及選填的比較序列與解析解。
#[derive(Debug, Clone)]
pub struct IntegrationProblem {
    name: String,
    expression: Expression,
    interval: Interval,
    subdivisions: usize,
    comparison: Option<Vec<usize>>,
    exact: Option<f64>
}

impl IntegrationProblem {
    pub fn new(name: String,
               expression: Expression,
               interval: Interval,
               subdivisions: usize,
               comparison: Option<Vec<usize>>,
               exact: Option<f64>) -> Result<IntegrationProblem, IntegrationError> {
        if subdivisions < 1 {
            return Err(IntegrationError::InvalidSubdivision(subdivisions));
        }
        if let Some(&invalid) = comparison.iter().flatten().find(|&&n| n < 1) {
            return Err(IntegrationError::InvalidSubdivision(invalid));
        }
        Ok(IntegrationProblem { name, expression, interval, subdivisions, comparison, exact })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn subdivisions(&self) -> usize {
        self.subdivisions
    }

    pub fn exact(&self) -> Option<f64> {
        self.exact
    }

    /// 未指定時使用 `default_comparison_counts`。
    pub fn comparison_counts(&self) -> Vec<usize> {
        self.comparison
            .clone()
            .unwrap_or_else(|| default_comparison_counts(self.subdivisions))
    }

    pub fn solve(&self) -> Result<TrapezoidalEstimate, IntegrationError> {
        estimate_on(&self.expression, &self.interval, self.subdivisions)
    }

    pub fn compare(&self) -> Result<Vec<SubdivisionResult>, IntegrationError> {
        compare_subdivisions(
            &self.expression,
            self.interval.lower(),
            self.interval.upper(),
            &self.comparison_counts()
        )
    }
}
