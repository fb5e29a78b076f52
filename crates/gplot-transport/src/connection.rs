use std::io::Write;
use std::process::{Child, ChildStdin, Command, ExitStatus, Stdio};

use tracing::{debug, info, warn};

use crate::config::{is_executable, GnuplotConfig};
use crate::error::{Result, TransportError};

/// A running gnuplot child process and the write end of its stdin.
///
/// Implements [`Write`], so it can be handed to any writer layered on top.
/// Writes after [`close`](Connection::close) fail with `BrokenPipe`.
pub struct Connection {
    child: Child,
    stdin: Option<ChildStdin>,
    closed: bool,
}

impl Connection {
    /// Spawn the configured executable with a piped stdin.
    pub fn open(config: &GnuplotConfig) -> Result<Self> {
        if !is_executable(&config.executable) {
            return Err(TransportError::ExecutableNotFound {
                program: config.executable.display().to_string(),
            });
        }

        let args = config.launch_args();
        let mut child = Command::new(&config.executable)
            .args(&args)
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|e| TransportError::Spawn {
                path: config.executable.clone(),
                source: e,
            })?;

        let Some(stdin) = child.stdin.take() else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(TransportError::Spawn {
                path: config.executable.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::BrokenPipe,
                    "child stdin was not captured",
                ),
            });
        };

        info!(
            executable = ?config.executable,
            ?args,
            pid = child.id(),
            "spawned plotting process"
        );

        Ok(Self {
            child,
            stdin: Some(stdin),
            closed: false,
        })
    }

    /// Process id of the child.
    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// Whether [`close`](Connection::close) has already run.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Close stdin and block until the child exits.
    ///
    /// A nonzero exit is reported as [`TransportError::Exited`]. Once the child
    /// has been reaped, further calls are no-ops. If waiting fails, the next
    /// call (or `Drop`) waits again.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            debug!(pid = self.child.id(), "connection already closed");
            return Ok(());
        }

        if let Some(mut stdin) = self.stdin.take() {
            // The child may already be gone; closing still has to proceed to the wait.
            if let Err(err) = stdin.flush() {
                debug!(%err, "flush before close failed");
            }
        }

        let waited = self.child.wait();
        self.finish_wait(waited)
    }

    /// The connection counts as closed only once the child has been reaped.
    fn finish_wait(&mut self, waited: std::io::Result<ExitStatus>) -> Result<()> {
        let status = waited.map_err(TransportError::Wait)?;
        self.closed = true;
        info!(pid = self.child.id(), %status, "plotting process exited");
        if status.success() {
            Ok(())
        } else {
            Err(TransportError::Exited { status })
        }
    }

    fn stdin_mut(&mut self) -> std::io::Result<&mut ChildStdin> {
        self.stdin.as_mut().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::BrokenPipe, "connection is closed")
        })
    }
}

impl Write for Connection {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.stdin_mut()?.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.stdin_mut()?.flush()
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        drop(self.stdin.take());
        match self.child.wait() {
            Ok(status) if status.success() => {
                debug!(pid = self.child.id(), "reaped unclosed plotting process");
            }
            Ok(status) => {
                warn!(pid = self.child.id(), %status, "unclosed plotting process exited with failure");
            }
            Err(err) => {
                warn!(pid = self.child.id(), %err, "failed to reap unclosed plotting process");
            }
        }
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("pid", &self.child.id())
            .field("closed", &self.closed)
            .finish()
    }
}
