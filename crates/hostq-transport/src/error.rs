use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Negative errno returned by the driver, propagated uninterpreted.
    #[error("driver error {0}")]
    Driver(i32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
