mod cmd;
mod exit;
mod logging;
mod output;

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

use crate::cmd::{Command, Launch};
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "gplot", version, about = "Plot numbers with gnuplot over a pipe")]
struct Cli {
    /// gnuplot executable (name searched on PATH, or a path).
    #[arg(long, value_name = "PATH", env = "GPLOT_GNUPLOT", global = true)]
    gnuplot: Option<PathBuf>,

    /// Extra argument passed to gnuplot on launch (repeatable).
    #[arg(
        long = "gnuplot-arg",
        value_name = "ARG",
        allow_hyphen_values = true,
        global = true
    )]
    gnuplot_args: Vec<OsString>,

    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(
        long,
        value_name = "LEVEL",
        default_value = "warn",
        env = "GPLOT_LOG_LEVEL",
        global = true
    )]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let launch = Launch {
        gnuplot: cli.gnuplot,
        args: cli.gnuplot_args,
    };
    let result = cmd::run(cli.command, &launch, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}
