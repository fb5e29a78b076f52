use std::path::PathBuf;
use std::process::ExitStatus;

/// Errors that can occur while managing the gnuplot process.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The executable could not be found on the search path or at the configured location.
    #[error("could not find executable '{program}' (is gnuplot installed?)")]
    ExecutableNotFound { program: String },

    /// The child process could not be started.
    #[error("failed to spawn {path}: {source}")]
    Spawn {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Waiting for the child process to exit failed.
    #[error("failed to wait for child process: {0}")]
    Wait(std::io::Error),

    /// The child process exited unsuccessfully.
    #[error("child process exited with {status}")]
    Exited { status: ExitStatus },

    /// An I/O error occurred on the child's input stream.
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TransportError>;
