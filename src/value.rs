use std::{cell::Cell, fmt, rc::Rc};

use crate::error::{GradError, Result};

/// The operation that produced a node, together with its parents.
/// Parents are strong references, so a node keeps its whole ancestry alive.
pub(crate) enum Op {
    Leaf,
    Add(Value, Value),
    Sub(Value, Value),
    Mul(Value, Value),
    Tanh(Value),
}

impl Op {
    /// Moves the operands into `pending`, leaving a leaf behind.
    fn take_parents(&mut self, pending: &mut Vec<Value>) {
        match std::mem::replace(self, Op::Leaf) {
            Op::Leaf => (),
            Op::Add(lhs, rhs) | Op::Sub(lhs, rhs) | Op::Mul(lhs, rhs) => {
                pending.push(lhs);
                pending.push(rhs);
            }
            Op::Tanh(term) => pending.push(term),
        }
    }
}

/// Operation tag of a node without its operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpKind {
    Leaf,
    Add,
    Sub,
    Mul,
    Tanh,
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OpKind::Leaf => "leaf",
            OpKind::Add => "add",
            OpKind::Sub => "sub",
            OpKind::Mul => "mul",
            OpKind::Tanh => "tanh",
        };
        f.write_str(name)
    }
}

struct Node {
    data: Cell<f64>,
    grad: Cell<f64>,
    op: Op,
}

// Ancestors that become unreachable are freed in a loop instead of through
// nested drops, so a deep chain does not exhaust the call stack.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.op.take_parents(&mut pending);
        while let Some(value) = pending.pop() {
            if let Ok(mut node) = Rc::try_unwrap(value.0) {
                node.op.take_parents(&mut pending);
            }
        }
    }
}

/// Handle to a scalar node in the computation graph.
///
/// Cloning the handle is cheap and shares the node. A node's value is computed
/// once when it is built; only its gradient changes afterwards (plus the value
/// of a leaf, through [`Value::set_data`]).
#[derive(Clone)]
pub struct Value(Rc<Node>);

impl Value {
    /// Creates a leaf with zero gradient.
    pub fn new(data: f64) -> Value {
        Self::from_op(data, Op::Leaf)
    }

    pub(crate) fn from_op(data: f64, op: Op) -> Value {
        Self(Rc::new(Node {
            data: Cell::new(data),
            grad: Cell::new(0.),
            op,
        }))
    }

    pub fn tanh(&self) -> Value {
        crate::ops::vtanh(self)
    }

    pub fn square(&self) -> Value {
        crate::ops::square(self)
    }

    /// The entry point to backpropagation. See [`crate::backward`].
    pub fn backward(&self) {
        crate::graph::backward(self);
    }

    pub fn data(&self) -> f64 {
        self.0.data.get()
    }

    pub fn grad(&self) -> f64 {
        self.0.grad.get()
    }

    pub fn set_grad(&self, grad: f64) {
        self.0.grad.set(grad);
    }

    pub fn zero_grad(&self) {
        self.0.grad.set(0.);
    }

    /// Overwrites the value of a leaf. Nodes already derived from it keep
    /// their old value, so rebuild the expression afterwards.
    pub fn set_data(&self, data: f64) -> Result<()> {
        if let Op::Leaf = self.0.op {
            self.0.data.set(data);
            Ok(())
        } else {
            Err(GradError::NotALeaf)
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.0.op, Op::Leaf)
    }

    pub fn op_kind(&self) -> OpKind {
        match self.0.op {
            Op::Leaf => OpKind::Leaf,
            Op::Add(..) => OpKind::Add,
            Op::Sub(..) => OpKind::Sub,
            Op::Mul(..) => OpKind::Mul,
            Op::Tanh(_) => OpKind::Tanh,
        }
    }

    /// Operands in the order they were given. An operand used twice appears twice.
    pub fn parents(&self) -> Vec<Value> {
        (0..).map_while(|i| self.parent(i)).cloned().collect()
    }

    /// The `index`-th operand, if there is one.
    pub(crate) fn parent(&self, index: usize) -> Option<&Value> {
        match (&self.0.op, index) {
            (Op::Add(lhs, _) | Op::Sub(lhs, _) | Op::Mul(lhs, _), 0) => Some(lhs),
            (Op::Add(_, rhs) | Op::Sub(_, rhs) | Op::Mul(_, rhs), 1) => Some(rhs),
            (Op::Tanh(term), 0) => Some(term),
            _ => None,
        }
    }

    /// Whether both handles point at the same node.
    pub fn ptr_eq(&self, other: &Value) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn id(&self) -> *const () {
        Rc::as_ptr(&self.0) as *const ()
    }

    fn accumulate(&self, grad: f64) {
        self.0.grad.set(self.0.grad.get() + grad);
    }

    /// Adds this node's contribution to each parent's gradient, using this
    /// node's current (fully accumulated) gradient.
    pub(crate) fn propagate(&self) {
        use Op::*;
        let grad = self.grad();
        match &self.0.op {
            Leaf => (),
            Add(lhs, rhs) => {
                lhs.accumulate(grad);
                rhs.accumulate(grad);
            }
            Sub(lhs, rhs) => {
                lhs.accumulate(grad);
                rhs.accumulate(-grad);
            }
            Mul(lhs, rhs) => {
                lhs.accumulate(rhs.data() * grad);
                rhs.accumulate(lhs.data() * grad);
            }
            Tanh(term) => {
                let t = term.data().tanh();
                term.accumulate((1. - t * t) * grad);
            }
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value")
            .field("data", &self.data())
            .field("grad", &self.grad())
            .field("op", &self.op_kind())
            .finish()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}(data: {}, grad: {})",
            self.op_kind(),
            self.data(),
            self.grad()
        )
    }
}
