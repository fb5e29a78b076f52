//! Wire encoding for the gnuplot stdin pipe.
//!
//! Two kinds of data share the pipe:
//! - Command lines, ASCII text terminated by a single `\n`
//! - Sample arrays, raw 8-byte big-endian IEEE-754 doubles with no separators
//!
//! The binary layout matches [`BINARY_FORMAT_INIT`], which must be sent once
//! before any binary plot.

pub mod codec;
pub mod error;
pub mod writer;

pub use codec::{
    decode_values, encode_command, encode_interleaved, encode_values, BINARY_FORMAT_INIT,
    VALUE_SIZE,
};
pub use error::{Result, WireError};
pub use writer::PipeWriter;
