//! Elastic pool of reusable interpreter engines.
//!
//! Engine bootstrap is expensive, so idle engines are kept for reuse.
//! Pooling is best effort: under burst load the pool over-provisions
//! instead of making callers wait, and the configured bound only caps how
//! many idle engines are retained, never how many exist.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use crate::engine::EngineFactory;
use crate::error::{Error, Result};

/// Default cap on retained idle engines.
pub const DEFAULT_MAX_IDLE: usize = 12;

/// Environment variable overriding the retained-idle cap, read once at pool
/// construction.
pub const POOL_LIMIT_ENV: &str = "CERES_ENGINE_POOL_LIMIT";

/// Pool configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    /// Maximum number of idle engines retained by [`EnginePool::release`].
    pub max_idle: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_idle: DEFAULT_MAX_IDLE,
        }
    }
}

impl PoolConfig {
    /// Build a config from the process environment.
    ///
    /// Reads [`POOL_LIMIT_ENV`]; an absent or unparsable value falls back
    /// to [`DEFAULT_MAX_IDLE`].
    pub fn from_env() -> Self {
        Self {
            max_idle: parse_limit(std::env::var(POOL_LIMIT_ENV).ok().as_deref()),
        }
    }
}

fn parse_limit(raw: Option<&str>) -> usize {
    raw.and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(DEFAULT_MAX_IDLE)
}

/// Pool of reusable interpreter engines.
///
/// Seeded with exactly one engine at construction, growing lazily on
/// demand. `acquire` never blocks waiting for capacity: on a miss it
/// creates a new engine synchronously. `release` retains the engine only
/// while the idle set is below the configured cap, otherwise the engine is
/// dropped.
#[derive(Debug)]
pub struct EnginePool<F: EngineFactory> {
    factory: F,
    idle: Mutex<VecDeque<F::Engine>>,
    max_idle: usize,
}

impl<F: EngineFactory> EnginePool<F> {
    /// Create a pool configured from the process environment and seed it
    /// with one engine.
    pub fn new(factory: F) -> Result<Self> {
        Self::with_config(factory, PoolConfig::from_env())
    }

    /// Create a pool with an explicit config and seed it with one engine.
    pub fn with_config(factory: F, config: PoolConfig) -> Result<Self> {
        let pool = Self {
            factory,
            idle: Mutex::new(VecDeque::new()),
            max_idle: config.max_idle,
        };
        let seed = pool.create()?;
        pool.lock_idle().push_back(seed);
        Ok(pool)
    }

    /// Take an engine for exclusive use.
    ///
    /// Pops an idle engine if one exists; otherwise creates a new one.
    /// Fails only if engine creation itself fails.
    pub fn acquire(&self) -> Result<F::Engine> {
        if let Some(engine) = self.lock_idle().pop_front() {
            return Ok(engine);
        }
        self.create()
    }

    /// Return an engine to the idle set.
    ///
    /// If the idle set is already at the configured cap the engine is
    /// dropped instead.
    pub fn release(&self, engine: F::Engine) {
        let mut idle = self.lock_idle();
        if idle.len() < self.max_idle {
            idle.push_back(engine);
        } else {
            tracing::debug!(max_idle = self.max_idle, "idle set full, dropping engine");
        }
    }

    /// Number of engines currently idle in the pool.
    pub fn idle_count(&self) -> usize {
        self.lock_idle().len()
    }

    /// The configured retained-idle cap.
    pub fn max_idle(&self) -> usize {
        self.max_idle
    }

    fn create(&self) -> Result<F::Engine> {
        let started = Instant::now();
        let engine = self
            .factory
            .create_engine()
            .map_err(|e| Error::Creation(Box::new(e)))?;
        tracing::debug!(
            bootstrap_ms = started.elapsed().as_millis() as u64,
            "engine created"
        );
        Ok(engine)
    }

    fn lock_idle(&self) -> MutexGuard<'_, VecDeque<F::Engine>> {
        // The guard only covers queue operations, so a poisoned lock cannot
        // leave the queue in a torn state.
        self.idle.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
