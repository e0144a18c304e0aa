//! Error types for ceres-core.

use thiserror::Error;

/// Result type for ceres-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed underlying fault, preserved for programmatic inspection.
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur in ceres-core.
///
/// `Definition` and `Creation` are raised as faults at the call site.
/// `Binding`, `Evaluation` and `Packaging` never surface as faults during
/// execution; the executor folds them into a failed
/// [`ExecutionResult`](crate::ExecutionResult) instead.
#[derive(Debug, Error)]
pub enum Error {
    /// Task definition incomplete or invalid at build time.
    #[error("task definition error: {0}")]
    Definition(String),

    /// The engine factory failed to produce a new engine instance.
    #[error("engine creation failed")]
    Creation(#[source] BoxedCause),

    /// An input could not be installed into the engine workspace.
    #[error("failed to bind input `{name}`")]
    Binding {
        name: String,
        #[source]
        source: BoxedCause,
    },

    /// The engine rejected or failed the submitted code.
    #[error("evaluation failed")]
    Evaluation(#[source] BoxedCause),

    /// A payload could not be encoded or decoded by the value codec.
    #[error("payload packaging failed")]
    Packaging(#[source] BoxedCause),

    /// A failure relayed from another process, carried as rendered text.
    #[error("relayed failure: {0}")]
    Relayed(String),
}

impl Error {
    /// Render this error together with its source chain as a single line.
    ///
    /// Used when a failure has to cross a process boundary where the
    /// original fault object cannot travel.
    pub fn render_chain(&self) -> String {
        let mut rendered = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            rendered.push_str(": ");
            rendered.push_str(&cause.to_string());
            source = cause.source();
        }
        rendered
    }
}
