/// Errors that can occur while encoding or writing to the pipe.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// Writing to the pipe failed (closed or broken).
    #[error("pipe write error: {0}")]
    Io(#[from] std::io::Error),

    /// The pipe accepted zero bytes.
    #[error("pipe closed")]
    Closed,

    /// A command would span more than one line.
    #[error("command contains a line break: {0:?}")]
    InvalidCommand(String),

    /// A binary block was not a whole number of values.
    #[error("binary block of {len} bytes is not a multiple of 8")]
    TruncatedValues { len: usize },

    /// Interleaved columns had different lengths.
    #[error("column {column} has {found} values, expected {expected}")]
    ColumnLength {
        column: usize,
        expected: usize,
        found: usize,
    },
}

pub type Result<T> = std::result::Result<T, WireError>;
