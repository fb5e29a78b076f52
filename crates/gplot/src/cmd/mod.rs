use clap::{Args, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

use gplot_transport::{GnuplotConfig, TransportError, DEFAULT_PROGRAM};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod doctor;
pub mod plot;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Plot whitespace-separated numbers from a file or stdin.
    Plot(PlotArgs),
    /// Check that gnuplot can be found and started.
    Doctor(DoctorArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, launch: &Launch, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Plot(args) => plot::run(args, launch, format),
        Command::Doctor(args) => doctor::run(args, launch, format),
        Command::Version(args) => version::run(args),
    }
}

/// How to find and start gnuplot, from the global flags.
#[derive(Debug, Default)]
pub struct Launch {
    pub gnuplot: Option<PathBuf>,
    pub args: Vec<OsString>,
}

impl Launch {
    /// Name or path that will be resolved.
    pub fn program(&self) -> String {
        self.gnuplot
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_PROGRAM.to_string())
    }

    /// Resolve the executable and build the launch config.
    pub fn config(&self, persist: bool) -> Result<GnuplotConfig, TransportError> {
        let search_path = std::env::var_os("PATH").unwrap_or_default();
        let mut config = GnuplotConfig::discover_in(&self.program(), &search_path)?.persist(persist);
        config.args.extend(self.args.iter().cloned());
        Ok(config)
    }
}

#[derive(Args, Debug)]
pub struct PlotArgs {
    /// File of numbers to plot. Reads stdin when omitted.
    pub file: Option<PathBuf>,
    /// Series title (empty for none).
    #[arg(long, short = 't', default_value = "")]
    pub title: String,
    /// Plot style.
    #[arg(long, short = 's', default_value = "lines")]
    pub style: String,
    /// Axis labels in x,y,z order (comma-separated, at most three).
    #[arg(long, value_delimiter = ',')]
    pub labels: Vec<String>,
    /// Keep the plot window open after gnuplot exits.
    #[arg(long)]
    pub persist: bool,
    /// gnuplot terminal, e.g. `dumb`, `pngcairo`.
    #[arg(long)]
    pub terminal: Option<String>,
    /// Output file for file-based terminals.
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,
    /// Extra command sent before plotting (repeatable).
    #[arg(long = "command", short = 'e', value_name = "CMD")]
    pub commands: Vec<String>,
}

#[derive(Args, Debug, Default)]
pub struct DoctorArgs {}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
