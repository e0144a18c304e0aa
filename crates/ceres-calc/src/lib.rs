//! Reference interpreter for the Ceres executor.
//!
//! Implements the `ceres-core` collaborator traits over a deliberately
//! small R-flavored expression language (`x <- 2 * n`, `c(1,2,3)` vectors,
//! string literals). It stands in for a real interpreter runtime so the
//! pooling and execution protocol can be exercised end-to-end; the
//! integration tests under `tests/` drive the full stack through it.

mod engine;
mod error;
mod eval;
mod value;

pub use engine::{CalcEngine, CalcFactory};
pub use error::CalcError;
pub use value::CalcValue;
