//! Reverse-mode automatic differentiation over scalar values.
//!
//! Expressions are built from [`Value`] handles; every operation allocates a
//! node that remembers its operands. [`backward`] then fills in the gradient
//! of the output with respect to every node it depends on.
//!
//! ```
//! use scalargrad::{backward, make_leaf, vtanh};
//!
//! let x = make_leaf(2.);
//! let y = make_leaf(3.);
//! let z = &(&x * &y) + &vtanh(&x);
//! backward(&z);
//! assert_eq!(y.grad(), 2.);
//! ```

pub mod config;
pub mod error;
pub mod fit;
mod graph;
mod ops;
pub mod optim;
mod value;

pub use config::TrainConfig;
pub use error::{GradError, Result};
pub use fit::{fit_line, EpochReport, LineFit};
pub use graph::{backward, topo_sort};
pub use ops::{
    add, add_scalar, make_leaf, mul, mul_scalar, scalar_add, scalar_mul, square, sub, vtanh,
};
pub use optim::Sgd;
pub use value::{OpKind, Value};
