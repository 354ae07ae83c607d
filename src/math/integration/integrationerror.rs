use thiserror::Error;

use crate::math::function::realfunction::EvaluationFailure;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntegrationError {
    #[error("invalid integration range: lower bound {lower} must be less than upper bound {upper}")]
    InvalidRange {
        lower: f64,
        upper: f64
    },

    #[error("invalid subdivision count {0}: at least one subinterval is required")]
    InvalidSubdivision(usize),

    #[error("function could not be evaluated at x = {x}: {source}")]
    FunctionEvaluation {
        x: f64,
        #[source]
        source: EvaluationFailure
    }
}

impl IntegrationError {
    /// 求值失敗的 x；其他錯誤回傳 `None`。
    pub fn failing_point(&self) -> Option<f64> {
        match self {
            IntegrationError::FunctionEvaluation { x, .. } => Some(*x),
            _ => None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluation_error_mentions_point_and_reason() {
        let error = IntegrationError::FunctionEvaluation {
            x: -0.5,
            source: EvaluationFailure::new("log of non-positive value")
        };
        let message = error.to_string();
        assert!(message.contains("-0.5"));
        assert!(message.contains("log of non-positive value"));
        assert_eq!(error.failing_point(), Some(-0.5));
    }

    #[test]
    fn range_error_has_no_failing_point() {
        let error = IntegrationError::InvalidRange { lower: 5.0, upper: 2.0 };
        assert_eq!(error.failing_point(), None);
        assert!(error.to_string().contains("5"));
    }
}
