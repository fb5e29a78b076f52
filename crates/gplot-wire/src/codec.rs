use bytes::{Buf, BufMut, BytesMut};

use crate::error::{Result, WireError};

/// Encoded size of one sample.
pub const VALUE_SIZE: usize = 8;

/// Declares the binary layout written by [`encode_values`].
pub const BINARY_FORMAT_INIT: &str = "set datafile binary format=\"%float64\" endian=big";

/// Encode a single command line.
///
/// Wire format:
/// ```text
/// ┌──────────────────────┬──────┐
/// │ command (ASCII text) │ \n   │
/// └──────────────────────┴──────┘
/// ```
pub fn encode_command(command: &str, dst: &mut BytesMut) -> Result<()> {
    if command.contains(['\n', '\r']) {
        return Err(WireError::InvalidCommand(command.to_string()));
    }
    dst.reserve(command.len() + 1);
    dst.put_slice(command.as_bytes());
    dst.put_u8(b'\n');
    Ok(())
}

/// Encode samples as consecutive big-endian doubles.
pub fn encode_values(values: &[f64], dst: &mut BytesMut) {
    dst.reserve(values.len() * VALUE_SIZE);
    for &value in values {
        dst.put_f64(value);
    }
}

/// Encode equal-length columns row by row: `c0[0], c1[0], .., c0[1], c1[1], ..`.
pub fn encode_interleaved(columns: &[&[f64]], dst: &mut BytesMut) -> Result<()> {
    let Some(first) = columns.first() else {
        return Ok(());
    };
    let rows = first.len();
    for (column, values) in columns.iter().enumerate() {
        if values.len() != rows {
            return Err(WireError::ColumnLength {
                column,
                expected: rows,
                found: values.len(),
            });
        }
    }

    dst.reserve(rows * columns.len() * VALUE_SIZE);
    for row in 0..rows {
        for values in columns {
            dst.put_f64(values[row]);
        }
    }
    Ok(())
}

/// Decode a block of big-endian doubles.
pub fn decode_values(mut src: &[u8]) -> Result<Vec<f64>> {
    if src.len() % VALUE_SIZE != 0 {
        return Err(WireError::TruncatedValues { len: src.len() });
    }
    let mut values = Vec::with_capacity(src.len() / VALUE_SIZE);
    while src.has_remaining() {
        values.push(src.get_f64());
    }
    Ok(values)
}
