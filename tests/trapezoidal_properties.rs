use approx::{
    assert_relative_eq,
    relative_eq
};
use proptest::prelude::*;

use numint::expression::parser::parse_expression;
use numint::math::integration::integrationerror::IntegrationError;
use numint::math::integration::subdivisioncomparison::compare_subdivisions;
use numint::math::integration::trapezoidal::estimate;

proptest! {
    #[test]
    fn constant_function_is_exact(c in -50.0..50.0_f64,
                                  a in -100.0..100.0_f64,
                                  width in 0.01..100.0_f64,
                                  n in 1..500_usize) {
        let b = a + width;
        let result = estimate(&|_x: f64| c, a, b, n).unwrap();
        prop_assert!(relative_eq!(result.value(), c * (b - a), epsilon = 1e-8, max_relative = 1e-9));
    }

    #[test]
    fn linear_function_is_exact(a in -100.0..100.0_f64,
                                width in 0.01..100.0_f64,
                                n in 1..500_usize) {
        let b = a + width;
        let result = estimate(&|x: f64| x, a, b, n).unwrap();
        prop_assert!(relative_eq!(result.value(), (b * b - a * a) / 2.0, epsilon = 1e-7, max_relative = 1e-9));
    }

    #[test]
    fn grid_spans_the_interval(a in -10.0..10.0_f64, width in 0.1..10.0_f64, n in 1..200_usize) {
        let b = a + width;
        let result = estimate(&|x: f64| x.sin(), a, b, n).unwrap();
        prop_assert_eq!(result.grid().len(), n + 1);
        prop_assert_eq!(result.grid()[0], a);
        prop_assert_eq!(result.grid()[n], b);
    }
}

#[test]
fn parabola_error_decreases_with_n() {
    let errors: Vec<f64> = [10, 100, 1000, 10000]
        .iter()
        .map(|&n| (estimate(&|x: f64| x * x, 0.0, 1.0, n).unwrap().value() - 1.0 / 3.0).abs())
        .collect();
    assert!(errors.windows(2).all(|pair| pair[1] < pair[0]));
}

#[test]
fn comparison_matches_individual_estimates() {
    let f = parse_expression("exp(-x^2)").unwrap();
    let results = compare_subdivisions(&f, 0.0, 2.0, &[2, 4, 8]).unwrap();
    assert_eq!(results.len(), 3);
    for (result, n) in results.iter().zip([2, 4, 8]) {
        assert_eq!(result.subdivisions(), n);
        assert_eq!(result.estimate(), estimate(&f, 0.0, 2.0, n).unwrap().value());
    }
}

#[test]
fn parsed_expressions_integrate_like_closures() {
    let parsed = parse_expression("sin(x) + 2x").unwrap();
    let closure = |x: f64| x.sin() + 2.0 * x;
    let lhs = estimate(&parsed, 0.0, std::f64::consts::PI, 64).unwrap();
    let rhs = estimate(&closure, 0.0, std::f64::consts::PI, 64).unwrap();
    assert_relative_eq!(lhs.value(), rhs.value(), epsilon = 1e-12);
}

#[test]
fn invalid_inputs_are_rejected() {
    let f = |x: f64| x;
    assert!(matches!(estimate(&f, 0.0, 1.0, 0), Err(IntegrationError::InvalidSubdivision(0))));
    assert!(matches!(estimate(&f, 5.0, 2.0, 4), Err(IntegrationError::InvalidRange { .. })));
    assert!(matches!(estimate(&f, 5.0, 2.0, 0), Err(IntegrationError::InvalidRange { .. })));
}

#[test]
fn undefined_point_is_reported() {
    let f = parse_expression("1 / x").unwrap();
    let error = estimate(&f, -1.0, 1.0, 2).unwrap_err();
    assert_eq!(error.failing_point(), Some(0.0));
}
