//! Console game errors.

/// Errors that can end the interactive loop.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// An I/O error on stdin or stdout.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
