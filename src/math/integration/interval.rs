use serde::{
    Deserialize,
    Serialize
};

use crate::math::integration::integrationerror::IntegrationError;

/// 積分區間 [lower, upper]，保證 lower < upper。
///
/// 任一端點為 NaN 時比較為 false，因此同樣視為無效區間。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    lower: f64,
    upper: f64
}

impl Interval {
    pub fn new(lower: f64, upper: f64) -> Result<Interval, IntegrationError> {
        if lower < upper {
            Ok(Interval { lower, upper })
        } else {
            Err(IntegrationError::InvalidRange { lower, upper })
        }
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn length(&self) -> f64 {
        self.upper - self.lower
    }

    /// `count` 個等距點，含兩端點；`count < 2` 時只回傳下界。
    pub fn linspace(&self, count: usize) -> Vec<f64> {
        if count < 2 {
            return vec![self.lower];
        }
        let last = count - 1;
        let step = self.length() / last as f64;
        (0..count)
            .map(|i| if i == last { self.upper } else { self.lower + i as f64 * step })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_reversed_and_empty_ranges() {
        assert!(matches!(
            Interval::new(5.0, 2.0),
            Err(IntegrationError::InvalidRange { lower, upper }) if lower == 5.0 && upper == 2.0
        ));
        assert!(Interval::new(1.0, 1.0).is_err());
        assert!(Interval::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn linspace_hits_both_ends() {
        let interval = Interval::new(-1.0, 1.0).unwrap();
        let points = interval.linspace(5);
        assert_eq!(points, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
    }
}
