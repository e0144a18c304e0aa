//! Execution engine for Ceres tasks.
//!
//! One [`Executor`] serves a whole process: it is cheap to clone, safe to
//! share across threads, and drives each execution through the same
//! sequence — resolve an engine (pooled or caller-supplied), bind the
//! task's inputs, evaluate the code, capture the produced value or the
//! failure, then clear or release the engine.
//!
//! ```text
//! ExecutionTask
//!     │
//!     └── Executor::execute
//!             │
//!             ├── EnginePool::acquire (or caller-supplied engine)
//!             ├── bind primitives, bind natives (decoding as needed)
//!             ├── Engine::eval
//!             ├── capture output / failure + elapsed time
//!             └── Engine::clear_workspace or EnginePool::release
//! ```

mod executor;

pub use executor::Executor;
