//! Utility functions for testing
use anyhow::{anyhow, Result};
use ndarray::{array, Array1, Array2};
use ndarray_linalg::SolveH;
use ndarray_lm_diagnostics::{FittedModel, FittedModelBuilder};
use std::{
    error::Error,
    fs::File,
    io::{BufRead, BufReader},
    str::FromStr,
};

/// Read y, x pairs from a CSV. It's assumed that there is only one covariate.
#[cfg(test)]
#[allow(dead_code)]
pub fn y_x_from_csv<X>(file: &str) -> Result<(Array1<X>, Array2<X>)>
where
    X: FromStr,
    <X as FromStr>::Err: 'static + Error + Send + Sync,
{
    let file = File::open(file)?;
    let reader = BufReader::new(file);
    let mut y_vec: Vec<X> = Vec::new();
    let mut x_vec: Vec<X> = Vec::new();
    for line_result in reader.lines() {
        let line = line_result?;
        let split_line: Vec<&str> = line.split(',').collect();
        if split_line.len() != 2 {
            return Err(anyhow!("Expected two entries in CSV"));
        }
        y_vec.push(split_line[0].parse()?);
        x_vec.push(split_line[1].parse()?);
    }
    let y = Array1::<X>::from(y_vec);
    let x = Array2::<X>::from_shape_vec((y.len(), 1), x_vec)?;
    Ok((y, x))
}

/// Solve the normal equations for the full design matrix and collect the fit.
#[cfg(test)]
#[allow(dead_code)]
pub fn ols_fit(y: &Array1<f64>, x: &Array2<f64>) -> Result<FittedModel<f64>> {
    let xtx: Array2<f64> = x.t().dot(x);
    let xty: Array1<f64> = x.t().dot(y);
    let beta = xtx.solveh_into(xty)?;
    Ok(FittedModelBuilder::data(y.view(), x.view())
        .coefficients(beta)
        .build()?)
}

/// The spread data set with an intercept column, fit by least squares. The
/// last observation sits far out in x and well below the line.
#[cfg(test)]
#[allow(dead_code)]
pub fn spread_model() -> Result<FittedModel<f64>> {
    let (y, x) = y_x_from_csv::<f64>("tests/data/spread.csv")?;
    let x: Array2<f64> =
        Array2::from_shape_fn((x.nrows(), 2), |(i, j)| if j == 0 { 1. } else { x[[i, 0]] });
    ols_fit(&y, &x)
}

/// A straight-line fit over x = 1..5 with residuals that are orthogonal to
/// the design.
#[cfg(test)]
#[allow(dead_code)]
pub fn line_model() -> Result<FittedModel<f64>> {
    let x = array![[1., 1.], [1., 2.], [1., 3.], [1., 4.], [1., 5.]];
    let beta = array![1., 1.];
    let resid = array![0.1, -0.2, 0.05, 0.1, -0.05];
    let y = x.dot(&beta) + &resid;
    Ok(FittedModelBuilder::data(y.view(), x.view())
        .coefficients(beta)
        .build()?)
}

/// A balanced two-group design in which every observation has leverage 1/3.
#[cfg(test)]
#[allow(dead_code)]
pub fn balanced_model() -> Result<FittedModel<f64>> {
    let x = array![
        [1., 1.],
        [1., -1.],
        [1., 1.],
        [1., -1.],
        [1., 1.],
        [1., -1.]
    ];
    let y = array![1.2, 0.1, 0.8, -0.2, 1.0, 0.1];
    ols_fit(&y, &x)
}

/// A design in which the last observation alone determines the second
/// parameter, giving it unit leverage.
#[cfg(test)]
#[allow(dead_code)]
pub fn unit_leverage_model() -> Result<FittedModel<f64>> {
    let x = array![
        [1., 0., 0.5],
        [1., 0., 1.5],
        [1., 0., 2.5],
        [1., 0., 3.0],
        [1., 0., 4.5],
        [1., 0., 5.0],
        [1., 1., 2.0]
    ];
    let y = array![0.9, 2.1, 2.8, 3.6, 5.2, 5.4, 7.0];
    ols_fit(&y, &x)
}
