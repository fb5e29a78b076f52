use std::io::IsTerminal;
use std::path::PathBuf;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use gplot_plotter::PlotStyle;
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// What a `plot` invocation sent to gnuplot.
#[derive(Debug, Serialize)]
pub struct PlotSummary {
    pub executable: PathBuf,
    pub pid: u32,
    pub points: usize,
    pub bytes: usize,
    pub style: PlotStyle,
    pub title: String,
    pub commands: usize,
}

/// Print the summary. Called after gnuplot has exited so its own stdout output
/// (e.g. `set terminal dumb`) comes first.
pub fn print_summary(summary: &PlotSummary, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(summary).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["EXECUTABLE", "PID", "POINTS", "BYTES", "STYLE", "TITLE"])
                .add_row(vec![
                    summary.executable.display().to_string(),
                    summary.pid.to_string(),
                    summary.points.to_string(),
                    summary.bytes.to_string(),
                    summary.style.to_string(),
                    summary.title.clone(),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "executable={} pid={} points={} bytes={} style={} title={:?}",
                summary.executable.display(),
                summary.pid,
                summary.points,
                summary.bytes,
                summary.style,
                summary.title
            );
        }
    }
}
