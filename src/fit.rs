//! Least squares fitting of `y = w * x + b` by gradient descent.
//!
//! A fresh graph is built every epoch from the current parameter leaves, so
//! no node outlives the epoch except `w` and `b` themselves.

use crate::{
    config::TrainConfig,
    error::{GradError, Result},
    ops::{make_leaf, square},
    optim::Sgd,
    value::Value,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EpochReport {
    pub epoch: usize,
    /// Loss of the parameters the epoch started with.
    pub loss: f64,
    /// Parameters after the epoch's update.
    pub w: f64,
    pub b: f64,
}

#[derive(Clone, Debug)]
pub struct LineFit {
    pub w: f64,
    pub b: f64,
    pub history: Vec<EpochReport>,
}

/// Mean squared error of `w * x + b` against `ys`.
pub fn mse_loss(w: &Value, b: &Value, xs: &[f64], ys: &[f64]) -> Value {
    let mut sum: Option<Value> = None;
    for (&x, &y) in xs.iter().zip(ys) {
        let pred = &(w * &make_leaf(x)) + b;
        let err = &pred - &make_leaf(y);
        let sq = square(&err);
        sum = Some(match sum {
            Some(acc) => acc + sq,
            None => sq,
        });
    }
    let sum = sum.unwrap_or_else(|| make_leaf(0.));
    (1. / xs.len().max(1) as f64) * &sum
}

/// Fits `w` and `b` starting from zero. Returns one report per epoch.
///
/// With a stable learning rate the loss falls every epoch and `(w, b)` gets
/// closer to the optimum in Euclidean distance every epoch. Individual
/// coordinates may overshoot, so `w` or `b` alone need not move monotonically.
pub fn fit_line(xs: &[f64], ys: &[f64], config: &TrainConfig) -> Result<LineFit> {
    if xs.len() != ys.len() {
        return Err(GradError::LengthMismatch {
            xs: xs.len(),
            ys: ys.len(),
        });
    }
    if xs.is_empty() {
        return Err(GradError::EmptyDataset);
    }
    config.validate()?;

    let w = make_leaf(0.);
    let b = make_leaf(0.);
    let params = [w.clone(), b.clone()];
    let sgd = Sgd::new(config.learning_rate);

    let mut history = Vec::with_capacity(config.epochs);
    for epoch in 0..config.epochs {
        let loss = mse_loss(&w, &b, xs, ys);
        loss.backward();
        sgd.step(&params)?;

        let report = EpochReport {
            epoch,
            loss: loss.data(),
            w: w.data(),
            b: b.data(),
        };
        log::debug!(
            "epoch {} | loss = {} | w = {} | b = {}",
            report.epoch,
            report.loss,
            report.w,
            report.b
        );
        history.push(report);
    }

    log::info!(
        "fitted w = {}, b = {} in {} epochs",
        w.data(),
        b.data(),
        config.epochs
    );

    Ok(LineFit {
        w: w.data(),
        b: b.data(),
        history,
    })
}
