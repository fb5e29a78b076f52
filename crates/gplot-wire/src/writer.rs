use std::io::{ErrorKind, Write};

use bytes::BytesMut;
use gplot_transport::{Connection, GnuplotConfig};
use tracing::{debug, trace};

use crate::codec::{encode_command, encode_interleaved, encode_values};
use crate::error::{Result, WireError};

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;

/// Writes command lines and binary sample blocks to any `Write` stream.
pub struct PipeWriter<T> {
    inner: T,
    buf: BytesMut,
}

impl<T: Write> PipeWriter<T> {
    /// Create a new pipe writer.
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
        }
    }

    /// Send one command line (blocking). The newline is appended here.
    pub fn send_command(&mut self, command: &str) -> Result<()> {
        self.buf.clear();
        encode_command(command, &mut self.buf)?;
        debug!(command, "sending command");
        self.write_buffer()
    }

    /// Send samples as raw big-endian doubles.
    pub fn send_values(&mut self, values: &[f64]) -> Result<()> {
        self.buf.clear();
        encode_values(values, &mut self.buf);
        trace!(count = values.len(), bytes = self.buf.len(), "sending values");
        self.write_buffer()
    }

    /// Send equal-length columns as interleaved rows of doubles.
    pub fn send_interleaved(&mut self, columns: &[&[f64]]) -> Result<()> {
        self.buf.clear();
        encode_interleaved(columns, &mut self.buf)?;
        trace!(
            columns = columns.len(),
            bytes = self.buf.len(),
            "sending interleaved values"
        );
        self.write_buffer()
    }

    fn write_buffer(&mut self) -> Result<()> {
        let mut offset = 0usize;
        while offset < self.buf.len() {
            match self.inner.write(&self.buf[offset..]) {
                Ok(0) => return Err(WireError::Closed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(WireError::Io(err)),
            }
        }

        self.flush()
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(WireError::Io(err)),
            }
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl PipeWriter<Connection> {
    /// Spawn the configured process and write to its stdin.
    pub fn open(config: &GnuplotConfig) -> gplot_transport::Result<Self> {
        Connection::open(config).map(Self::new)
    }

    /// Close the child's stdin and wait for it to exit.
    pub fn close(&mut self) -> gplot_transport::Result<()> {
        self.inner.close()
    }
}
