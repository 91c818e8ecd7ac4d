//! Node constructors. Each one computes the forward value eagerly and records
//! its operands as parents of the new node.

use std::ops::{Add, Mul, Sub};

use crate::value::{Op, Value};

pub fn make_leaf(x: f64) -> Value {
    Value::new(x)
}

pub fn add(a: &Value, b: &Value) -> Value {
    Value::from_op(a.data() + b.data(), Op::Add(a.clone(), b.clone()))
}

pub fn sub(a: &Value, b: &Value) -> Value {
    Value::from_op(a.data() - b.data(), Op::Sub(a.clone(), b.clone()))
}

pub fn mul(a: &Value, b: &Value) -> Value {
    Value::from_op(a.data() * b.data(), Op::Mul(a.clone(), b.clone()))
}

pub fn vtanh(a: &Value) -> Value {
    Value::from_op(a.data().tanh(), Op::Tanh(a.clone()))
}

/// `mul(a, a)`. Both parent slots hold `a` and each contributes its own
/// partial, so `a` receives `2 * a * grad`.
pub fn square(a: &Value) -> Value {
    mul(a, a)
}

// The scalar forms wrap `x` in a new leaf. That leaf gets a gradient during
// backward, but the caller has no handle to read it.

pub fn add_scalar(a: &Value, x: f64) -> Value {
    add(a, &make_leaf(x))
}

pub fn scalar_add(x: f64, b: &Value) -> Value {
    add(&make_leaf(x), b)
}

pub fn mul_scalar(a: &Value, x: f64) -> Value {
    mul(a, &make_leaf(x))
}

pub fn scalar_mul(x: f64, b: &Value) -> Value {
    mul(&make_leaf(x), b)
}

impl Add for &Value {
    type Output = Value;
    fn add(self, rhs: Self) -> Self::Output {
        add(self, rhs)
    }
}

impl Sub for &Value {
    type Output = Value;
    fn sub(self, rhs: Self) -> Self::Output {
        sub(self, rhs)
    }
}

impl Mul for &Value {
    type Output = Value;
    fn mul(self, rhs: Self) -> Self::Output {
        mul(self, rhs)
    }
}

impl Add for Value {
    type Output = Value;
    fn add(self, rhs: Self) -> Self::Output {
        add(&self, &rhs)
    }
}

impl Sub for Value {
    type Output = Value;
    fn sub(self, rhs: Self) -> Self::Output {
        sub(&self, &rhs)
    }
}

impl Mul for Value {
    type Output = Value;
    fn mul(self, rhs: Self) -> Self::Output {
        mul(&self, &rhs)
    }
}

impl Add<f64> for &Value {
    type Output = Value;
    fn add(self, rhs: f64) -> Self::Output {
        add_scalar(self, rhs)
    }
}

impl Add<&Value> for f64 {
    type Output = Value;
    fn add(self, rhs: &Value) -> Self::Output {
        scalar_add(self, rhs)
    }
}

impl Mul<f64> for &Value {
    type Output = Value;
    fn mul(self, rhs: f64) -> Self::Output {
        mul_scalar(self, rhs)
    }
}

impl Mul<&Value> for f64 {
    type Output = Value;
    fn mul(self, rhs: &Value) -> Self::Output {
        scalar_mul(self, rhs)
    }
}
