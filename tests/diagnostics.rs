//! Properties of the per-observation diagnostics.
use anyhow::Result;
use approx::assert_abs_diff_eq;
use ndarray::{array, Array1};
use ndarray_lm_diagnostics::{
    diagnostics::leverage, error::DiagnosticsError, DiagnosticOptions, Diagnostics,
    FittedModelBuilder,
};

mod common;
use common::{balanced_model, line_model, spread_model, unit_leverage_model};

#[test]
fn straight_line_scenario() -> Result<()> {
    let model = line_model()?;
    let diag = model.diagnostics()?;
    assert_eq!(diag.n_obs(), 5);
    assert_eq!(diag.n_params(), 2);
    assert_abs_diff_eq!(diag.sigma2(), 0.065 / 3., epsilon = 1e-12);
    assert_abs_diff_eq!(diag.leverage().sum(), 2.0, epsilon = 1e-12);
    assert!(diag.leverage().iter().all(|&h| (0. ..=1.).contains(&h)));
    assert!(diag
        .cooks_distance()
        .iter()
        .all(|&d| d.is_finite() && d >= 0.));
    assert_abs_diff_eq!(diag.influence_threshold(), 0.8);
    // only the first observation passes 4/n
    assert_eq!(diag.influential(), &[0]);
    Ok(())
}

#[test]
fn leverage_sums_to_parameter_count() -> Result<()> {
    let model = spread_model()?;
    let diag = model.diagnostics()?;
    assert_abs_diff_eq!(diag.leverage().sum(), 2.0, epsilon = 1e-10);
    for &h in diag.leverage().iter() {
        assert!(h >= -1e-12 && h <= 1. + 1e-12, "leverage {} out of range", h);
    }
    // the engine agrees with the stand-alone leverage function
    assert_abs_diff_eq!(diag.leverage(), &leverage(model.x().view())?, epsilon = 1e-14);
    Ok(())
}

#[test]
fn influential_set_is_strict_threshold() -> Result<()> {
    let model = spread_model()?;
    let diag = model.diagnostics()?;
    let threshold = 4. / diag.n_obs() as f64;
    let expected: Vec<usize> = diag
        .cooks_distance()
        .iter()
        .enumerate()
        .filter(|(_, &d)| d > threshold)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(diag.influential(), expected.as_slice());
    assert!(diag.cooks_distance().iter().all(|&d| d >= 0.));
    // the displaced point far out in x
    assert!(diag.is_influential(29));
    Ok(())
}

#[test]
fn standardized_residual_formula() -> Result<()> {
    let model = spread_model()?;
    let diag = model.diagnostics()?;
    let n = model.n_obs() as f64;
    let sigma2 = model.residuals().mapv(|e| e * e).sum() / (n - 2.);
    assert_abs_diff_eq!(diag.sigma2(), sigma2, epsilon = 1e-12);
    let expected: Array1<f64> = model
        .residuals()
        .iter()
        .zip(diag.leverage().iter())
        .map(|(&e, &h)| e / (sigma2 * (1. - h)).sqrt())
        .collect();
    assert_abs_diff_eq!(diag.standardized_residuals(), &expected, epsilon = 1e-10);
    Ok(())
}

#[test]
fn unit_leverage_excluded() -> Result<()> {
    let model = unit_leverage_model()?;
    let diag = model.diagnostics()?;
    assert_eq!(diag.unit_leverage(), &[6]);
    assert!(diag.standardized_residuals()[6].is_nan());
    assert!(!diag.influential().contains(&6));
    assert!(!diag.is_constant_leverage());
    Ok(())
}

#[test]
fn balanced_design_has_constant_leverage() -> Result<()> {
    let diag = balanced_model()?.diagnostics()?;
    assert_abs_diff_eq!(diag.leverage(), &Array1::from_elem(6, 1. / 3.), epsilon = 1e-12);
    assert!(diag.is_constant_leverage());
    Ok(())
}

#[test]
fn single_precision() -> Result<()> {
    let x = array![[1f32, 1.], [1., 2.], [1., 3.], [1., 4.], [1., 5.]];
    let resid = array![0.1f32, -0.2, 0.05, 0.1, -0.05];
    let fitted = array![2f32, 3., 4., 5., 6.];
    let diag = Diagnostics::compute(x.view(), resid.view(), fitted.view(), 2)?;
    assert_abs_diff_eq!(diag.leverage(), &array![0.6, 0.3, 0.2, 0.3, 0.6], epsilon = 1e-5);
    assert_eq!(diag.influential(), &[0]);
    Ok(())
}

#[test]
fn colinear_columns_fail() -> Result<()> {
    let y = array![1., 2., 2.5, 4.];
    let x = array![[1., 2.], [2., 4.], [3., 6.], [4., 8.]];
    let model = FittedModelBuilder::data(y.view(), x.view())
        .add_intercept()
        .fitted(y.clone())
        .build()?;
    match model.diagnostics() {
        Err(DiagnosticsError::SingularDesign) => Ok(()),
        other => panic!(
            "expected a singular design, got {:?}",
            other.map(|d| d.leverage().to_owned())
        ),
    }
}

#[test]
fn minimal_degrees_of_freedom() -> Result<()> {
    let x = array![[1., 0.], [1., 1.], [1., 3.]];
    let e = array![0.2, -0.3, 0.1];
    let y = x.dot(&array![1., 1.]) + &e;
    let model = FittedModelBuilder::data(y.view(), x.view())
        .coefficients(array![1., 1.])
        .build()?;
    assert_eq!(model.ndf(), 1);
    let diag: Diagnostics<f64> = model.diagnostics()?;
    assert!(diag.sigma2().is_finite());
    assert!(diag.cooks_distance().iter().all(|d| d.is_finite()));
    Ok(())
}

#[test]
fn options_are_applied() -> Result<()> {
    let model = spread_model()?;
    // an absurdly strict co-linearity tolerance rejects any design
    let strict = DiagnosticOptions::default().colinearity_tolerance(2.);
    assert!(matches!(
        model.diagnostics_with(&strict),
        Err(DiagnosticsError::SingularDesign)
    ));
    // so does a unit-leverage tolerance above 1 / mean leverage
    let loose = DiagnosticOptions::default().unit_leverage_tol(1e3);
    let diag = model.diagnostics_with(&loose)?;
    assert_eq!(diag.unit_leverage().len(), model.n_obs());
    assert!(diag.influential().is_empty());
    Ok(())
}

#[test]
fn mismatched_inputs() {
    let x = array![[1., 1.], [1., 2.], [1., 3.]];
    let e = array![0.1, -0.1];
    let res = Diagnostics::compute(x.view(), e.view(), e.view(), 2);
    assert!(matches!(res, Err(DiagnosticsError::BadInput(_))));
}
