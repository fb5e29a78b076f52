use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, TransportError};

/// Program name searched for on `PATH`.
pub const DEFAULT_PROGRAM: &str = "gnuplot";

/// Flag asking gnuplot to keep plot windows open after it exits.
pub const PERSIST_FLAG: &str = "-persist";

/// Launch configuration for a gnuplot connection.
///
/// The executable is resolved once, when the config is built, and then
/// passed explicitly into [`Connection::open`](crate::Connection::open).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GnuplotConfig {
    /// Resolved path of the executable to spawn.
    pub executable: PathBuf,
    /// Pass `-persist` so plot windows outlive the process.
    pub persist: bool,
    /// Extra arguments appended after the persist flag.
    pub args: Vec<OsString>,
}

impl GnuplotConfig {
    /// Resolve `gnuplot` on the current `PATH`.
    pub fn discover() -> Result<Self> {
        let search_path = std::env::var_os("PATH").unwrap_or_default();
        Self::discover_in(DEFAULT_PROGRAM, &search_path)
    }

    /// Resolve `program` on an explicit `PATH`-style search list.
    ///
    /// A `program` containing a path separator is checked as-is instead of
    /// being searched for.
    pub fn discover_in(program: &str, search_path: &OsStr) -> Result<Self> {
        let executable = find_executable(program, search_path).ok_or_else(|| {
            TransportError::ExecutableNotFound {
                program: program.to_string(),
            }
        })?;
        debug!(?executable, "resolved executable");
        Ok(Self::with_executable(executable))
    }

    /// Use an already-known executable path without searching.
    pub fn with_executable(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            persist: false,
            args: Vec::new(),
        }
    }

    /// Set whether `-persist` is passed on launch.
    pub fn persist(mut self, persist: bool) -> Self {
        self.persist = persist;
        self
    }

    /// Append one extra launch argument.
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Full argument list passed to the child process.
    pub fn launch_args(&self) -> Vec<OsString> {
        let mut args = Vec::with_capacity(self.args.len() + 1);
        if self.persist {
            args.push(OsString::from(PERSIST_FLAG));
        }
        args.extend(self.args.iter().cloned());
        args
    }
}

fn find_executable(program: &str, search_path: &OsStr) -> Option<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return is_executable(candidate).then(|| candidate.to_path_buf());
    }

    std::env::split_paths(search_path)
        .filter(|dir| !dir.as_os_str().is_empty())
        .flat_map(|dir| {
            let plain = dir.join(program);
            let suffixed = dir.join(format!("{program}{}", std::env::consts::EXE_SUFFIX));
            [plain, suffixed]
        })
        .find(|path| is_executable(path))
}

/// Whether `path` names a file this process could execute.
pub(crate) fn is_executable(path: &Path) -> bool {
    let Ok(metadata) = std::fs::metadata(path) else {
        return false;
    };
    if !metadata.is_file() {
        return false;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        metadata.permissions().mode() & 0o111 != 0
    }

    #[cfg(not(unix))]
    {
        true
    }
}
