/// Errors that can occur in plotter operations.
#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    /// Process discovery, spawn or exit error.
    #[error("transport error: {0}")]
    Transport(#[from] gplot_transport::TransportError),

    /// Writing a command or sample block failed.
    #[error("write error: {0}")]
    Write(#[from] gplot_wire::WireError),

    /// The binary datafile format could not be configured after spawn.
    #[error("failed to initialize binary mode: {0}")]
    Init(#[source] gplot_wire::WireError),

    /// The requested style is not in the allow-list; the style was reset to `points`.
    #[error("invalid style '{name}'")]
    InvalidStyle { name: String },

    /// `set_labels` takes between one and three labels.
    #[error("invalid number of dims '{0}'")]
    InvalidDimension(usize),

    /// Coordinate arrays passed together must have the same length.
    #[error("mismatched lengths: expected {expected} values, found {found}")]
    MismatchedLengths { expected: usize, found: usize },

    /// A checked command could not be sent. The plotter should be discarded.
    #[error("unrecoverable failure sending '{command}': {source}")]
    Unrecoverable {
        command: String,
        #[source]
        source: gplot_wire::WireError,
    },
}

impl PlotError {
    /// Whether this error came from the executable being absent.
    pub fn is_executable_not_found(&self) -> bool {
        matches!(
            self,
            PlotError::Transport(gplot_transport::TransportError::ExecutableNotFound { .. })
        )
    }
}

pub type Result<T> = std::result::Result<T, PlotError>;
