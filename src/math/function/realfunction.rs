use thiserror::Error;

/// `f(x)` 無法求值時的原因（例如 `ln(-1)`）。
///
/// 不攜帶 x 本身；x 由呼叫端（積分器）在包裝成 `IntegrationError` 時補上。
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{reason}")]
pub struct EvaluationFailure {
    reason: String
}

impl EvaluationFailure {
    pub fn new(reason: impl Into<String>) -> EvaluationFailure {
        EvaluationFailure { reason: reason.into() }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// 單變數實函數。
///
/// 與 `Curve` 類的 trait 不同，求值可能失敗：使用者輸入的算式在某些點上
/// 沒有定義（對數、開根號、除以零）。
///
/// 任何 `Fn(f64) -> f64` 都自動實作此 trait，且永遠不會失敗。
pub trait RealFunction {
    fn value(&self, x: f64) -> Result<f64, EvaluationFailure>;
}

impl<F> RealFunction for F where
    F: Fn(f64) -> f64 {
    fn value(&self, x: f64) -> Result<f64, EvaluationFailure> {
        Ok(self(x))
    }
}

/// 將可能失敗的 closure 包成 `RealFunction`。
///
/// ```
/// use numint::math::function::realfunction::{EvaluationFailure, FallibleFunction, RealFunction};
///
/// let f = FallibleFunction::new(|x: f64| {
///     if x > 0.0 { Ok(x.ln()) } else { Err(EvaluationFailure::new("log of non-positive value")) }
/// });
/// assert!(f.value(-1.0).is_err());
/// ```
pub struct FallibleFunction<F> {
    function: F
}

impl<F> FallibleFunction<F> where
    F: Fn(f64) -> Result<f64, EvaluationFailure> {
    pub fn new(function: F) -> FallibleFunction<F> {
        FallibleFunction { function }
    }
}

impl<F> RealFunction for FallibleFunction<F> where
    F: Fn(f64) -> Result<f64, EvaluationFailure> {
    fn value(&self, x: f64) -> Result<f64, EvaluationFailure> {
        (self.function)(x)
    }
}
