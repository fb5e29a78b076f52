use std::fmt;
use std::io;

use gplot_plotter::PlotError;
use gplot_transport::TransportError;
use gplot_wire::WireError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const TRANSPORT_ERROR: i32 = 3;
pub const HEALTH_CHECK_FAILED: i32 = 30;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;
/// Same code a shell uses for a missing command.
pub const NOT_FOUND: i32 = 127;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::NotFound => NOT_FOUND,
        io::ErrorKind::BrokenPipe => TRANSPORT_ERROR,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn transport_error(context: &str, err: TransportError) -> CliError {
    match err {
        TransportError::ExecutableNotFound { .. } => {
            CliError::new(NOT_FOUND, format!("{context}: {err}"))
        }
        TransportError::Spawn { source, .. }
        | TransportError::Wait(source)
        | TransportError::Io(source) => io_error(context, source),
        TransportError::Exited { .. } => CliError::new(FAILURE, format!("{context}: {err}")),
    }
}

pub fn wire_error(context: &str, err: WireError) -> CliError {
    match err {
        WireError::Io(source) => io_error(context, source),
        WireError::Closed => CliError::new(TRANSPORT_ERROR, format!("{context}: {err}")),
        WireError::InvalidCommand(_) => CliError::new(USAGE, format!("{context}: {err}")),
        WireError::TruncatedValues { .. } | WireError::ColumnLength { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
    }
}

pub fn plot_error(context: &str, err: PlotError) -> CliError {
    match err {
        PlotError::Transport(err) => transport_error(context, err),
        PlotError::Write(err) | PlotError::Init(err) => wire_error(context, err),
        PlotError::Unrecoverable { command, source } => {
            wire_error(&format!("{context} ({command})"), source)
        }
        PlotError::InvalidStyle { .. } | PlotError::InvalidDimension(_) => {
            CliError::new(USAGE, format!("{context}: {err}"))
        }
        PlotError::MismatchedLengths { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
    }
}
