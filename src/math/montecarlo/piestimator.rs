use std::f64::consts::PI;
use std::time::Instant;

use rand::Rng;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::math::point2d::Point2D;

// ─────────────────────────────────────────────────────────────────────────────
// Monte Carlo π
// ─────────────────────────────────────────────────────────────────────────────
//
// 在 [-1, 1]² 均勻撒 n 點，落在單位圓內（x² + y² <= 1）的比例趨近 π/4：
//
//   π ≈ 4 · inside / n
//
// 誤差期望值為 O(1/√n)，與維度無關。

/// 十的最大次方；10^9 點已需數十秒。
pub const MAX_POWER: u32 = 9;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MonteCarloError {
    #[error("at least one sample point is required")]
    NoSamples,

    #[error("invalid maximum power {0}: expected a value between 1 and 9")]
    InvalidMaxPower(u32)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PiSample {
    point: Point2D,
    inside: bool
}

impl PiSample {
    pub fn point(&self) -> Point2D {
        self.point
    }

    pub fn inside(&self) -> bool {
        self.inside
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PiEstimate {
    estimate: f64,
    inside: usize,
    samples: Vec<PiSample>
}

impl PiEstimate {
    pub fn estimate(&self) -> f64 {
        self.estimate
    }

    pub fn inside(&self) -> usize {
        self.inside
    }

    pub fn total(&self) -> usize {
        self.samples.len()
    }

    pub fn samples(&self) -> &[PiSample] {
        &self.samples
    }

    pub fn absolute_error(&self) -> f64 {
        (self.estimate - PI).abs()
    }
}

fn draw<R>(rng: &mut R) -> Point2D where
    R: Rng + ?Sized {
    Point2D::new(rng.gen_range(-1.0, 1.0), rng.gen_range(-1.0, 1.0))
}

/// 以 n 個隨機點估計 π，並保留所有取樣點供繪圖。
pub fn estimate_pi<R>(n: usize, rng: &mut R) -> Result<PiEstimate, MonteCarloError> where
    R: Rng + ?Sized {
    if n == 0 {
        return Err(MonteCarloError::NoSamples);
    }

    let samples: Vec<PiSample> = (0..n)
        .map(|_| {
            let point = draw(rng);
            PiSample { point, inside: point.norm_squared() <= 1.0 }
        })
        .collect();
    let inside = samples.iter().filter(|sample| sample.inside).count();
    let estimate = 4.0 * inside as f64 / n as f64;

    debug!(n, inside, estimate, "monte carlo pi estimate");

    Ok(PiEstimate { estimate, inside, samples })
}

/// 只計數、不保留取樣點；大 n 時避免配置記憶體。
fn count_inside<R>(n: usize, rng: &mut R) -> usize where
    R: Rng + ?Sized {
    (0..n)
        .filter(|_| draw(rng).norm_squared() <= 1.0)
        .count()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConvergenceRow {
    samples: usize,
    estimate: f64,
    absolute_error: f64,
    elapsed_seconds: f64
}

impl ConvergenceRow {
    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn estimate(&self) -> f64 {
        self.estimate
    }

    pub fn absolute_error(&self) -> f64 {
        self.absolute_error
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_seconds
    }
}

/// 依序以 n = 10¹, 10², ..., 10^max_power 估計 π，記錄誤差與耗時。
pub fn analyze_convergence<R>(max_power: u32, rng: &mut R) -> Result<Vec<ConvergenceRow>, MonteCarloError> where
    R: Rng + ?Sized {
    if max_power == 0 || max_power > MAX_POWER {
        return Err(MonteCarloError::InvalidMaxPower(max_power));
    }

    let rows = (1..=max_power)
        .map(|power| {
            let n = 10_usize.pow(power);
            let start = Instant::now();
            let inside = count_inside(n, rng);
            let elapsed_seconds = start.elapsed().as_secs_f64();
            let estimate = 4.0 * inside as f64 / n as f64;
            debug!(n, estimate, elapsed_seconds, "convergence step");
            ConvergenceRow {
                samples: n,
                estimate,
                absolute_error: (estimate - PI).abs(),
                elapsed_seconds
            }
        })
        .collect();
    Ok(rows)
}
