use std::io::{Read, Write};

use gplot_plotter::{escape_label, Plotter};
use gplot_wire::VALUE_SIZE;
use tracing::{debug, info};

use crate::cmd::{Launch, PlotArgs};
use crate::exit::{
    io_error, plot_error, transport_error, CliError, CliResult, DATA_INVALID, SUCCESS,
};
use crate::output::{print_summary, OutputFormat, PlotSummary};

pub fn run(args: PlotArgs, launch: &Launch, format: OutputFormat) -> CliResult<i32> {
    let input = read_input(&args)?;
    let values = parse_values(&input)?;
    debug!(count = values.len(), "parsed input values");

    let config = launch
        .config(args.persist)
        .map_err(|err| transport_error("gnuplot unavailable", err))?;
    let mut plotter = Plotter::open(&config).map_err(|err| plot_error("open failed", err))?;

    let sent = send_plot(&mut plotter, &args, &values);
    // The pipe is closed even when plotting failed so the child is reaped.
    let closed = plotter.close();
    let commands = sent?;
    closed.map_err(|err| plot_error("gnuplot exited abnormally", err))?;

    info!(points = values.len(), "plot complete");
    let summary = PlotSummary {
        executable: config.executable,
        pid: plotter.id(),
        points: values.len(),
        bytes: values.len() * VALUE_SIZE,
        style: plotter.style(),
        title: args.title,
        commands,
    };
    print_summary(&summary, format);
    Ok(SUCCESS)
}

/// Send setup commands and the series; returns the number of command lines written.
fn send_plot<T: Write>(
    plotter: &mut Plotter<T>,
    args: &PlotArgs,
    values: &[f64],
) -> CliResult<usize> {
    let mut commands = 0usize;

    plotter
        .set_style(&args.style)
        .map_err(|err| plot_error("invalid --style", err))?;

    if !args.labels.is_empty() {
        plotter
            .set_labels(args.labels.as_slice())
            .map_err(|err| plot_error("invalid --labels", err))?;
        commands += args.labels.len();
    }
    if let Some(terminal) = &args.terminal {
        plotter
            .checked_command(&format!("set terminal {terminal}"))
            .map_err(|err| plot_error("terminal setup failed", err))?;
        commands += 1;
    }
    if let Some(output) = &args.output {
        let path = output.to_string_lossy();
        plotter
            .checked_command(&format!("set output '{}'", escape_label(&path)))
            .map_err(|err| plot_error("output setup failed", err))?;
        commands += 1;
    }
    for command in &args.commands {
        plotter
            .command(command)
            .map_err(|err| plot_error("command failed", err))?;
        commands += 1;
    }

    plotter
        .plot_series(values, &args.title)
        .map_err(|err| plot_error("plot failed", err))?;
    Ok(commands + 1)
}

fn read_input(args: &PlotArgs) -> CliResult<String> {
    match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err)),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .map_err(|err| io_error("failed reading stdin", err))?;
            Ok(input)
        }
    }
}

/// Parse whitespace-separated numbers. `#` starts a comment to end of line.
fn parse_values(input: &str) -> CliResult<Vec<f64>> {
    let mut values = Vec::new();
    for (index, line) in input.lines().enumerate() {
        let data = line.split('#').next().unwrap_or_default();
        for token in data.split_whitespace() {
            let value = token.parse::<f64>().map_err(|_| {
                CliError::new(
                    DATA_INVALID,
                    format!("line {}: not a number: {token:?}", index + 1),
                )
            })?;
            values.push(value);
        }
    }

    if values.is_empty() {
        return Err(CliError::new(DATA_INVALID, "no values to plot"));
    }
    Ok(values)
}
