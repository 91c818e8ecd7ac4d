use crate::{
    error::{GradError, Result},
    value::Value,
};

/// Plain gradient descent: `data -= learning_rate * grad` on each parameter.
#[derive(Clone, Copy, Debug)]
pub struct Sgd {
    learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Self {
        Self { learning_rate }
    }

    /// Updates every parameter from its current gradient. Parameters must be
    /// leaves; if any is not, nothing is updated and `NotALeaf` is returned.
    pub fn step(&self, params: &[Value]) -> Result<()> {
        if !params.iter().all(Value::is_leaf) {
            return Err(GradError::NotALeaf);
        }
        for param in params {
            let grad = param.grad();
            if !grad.is_finite() {
                log::warn!("Non-finite gradient {grad} on parameter {param}");
            }
            param.set_data(param.data() - self.learning_rate * grad)?;
        }
        Ok(())
    }

    pub fn zero_grad(&self, params: &[Value]) {
        for param in params {
            param.zero_grad();
        }
    }
}
