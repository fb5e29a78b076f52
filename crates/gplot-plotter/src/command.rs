//! Command-line formatting for plot and label commands.
//!
//! Every data source is `"-"`, i.e. gnuplot's stdin, read in binary mode.
//! A single column uses `array=N`; multi-column data uses `record=N` with an
//! explicit per-row format and a `using` clause.

use std::fmt;

use crate::style::{Axis, PlotStyle};

/// One data source inside a `plot`/`splot` command.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeriesSpec<'a> {
    /// Number of rows streamed for this source.
    pub len: usize,
    /// Values per row.
    pub columns: usize,
    pub title: &'a str,
    pub style: PlotStyle,
}

impl<'a> SeriesSpec<'a> {
    /// A single-column array source.
    pub fn array(len: usize, title: &'a str, style: PlotStyle) -> Self {
        Self {
            len,
            columns: 1,
            title,
            style,
        }
    }

    /// A multi-column record source.
    pub fn record(len: usize, columns: usize, title: &'a str, style: PlotStyle) -> Self {
        Self {
            len,
            columns,
            title,
            style,
        }
    }

    /// Bytes gnuplot will read for this source.
    pub fn wire_size(&self) -> usize {
        self.len * self.columns * gplot_wire::VALUE_SIZE
    }
}

impl fmt::Display for SeriesSpec<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.columns <= 1 {
            write!(f, "\"-\" binary array={}", self.len)?;
        } else {
            let using = (1..=self.columns)
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(":");
            write!(
                f,
                "\"-\" binary record={} format=\"{}\" using {}",
                self.len,
                "%float64".repeat(self.columns),
                using
            )?;
        }

        if self.title.is_empty() {
            f.write_str(" notitle")?;
        } else {
            write!(f, " title \"{}\"", escape_title(self.title))?;
        }
        write!(f, " with {}", self.style.keyword())
    }
}

/// Build `plot <s1>, <s2>, ..` (or `splot` when `surface` is set).
pub fn plot_command(surface: bool, series: &[SeriesSpec<'_>]) -> String {
    let verb = if surface { "splot" } else { "plot" };
    let sources = series
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("{verb} {sources}")
}

/// Build `set xlabel '<text>'` for the given axis.
pub fn label_command(axis: Axis, text: &str) -> String {
    format!("set {} '{}'", axis.label_option(), escape_label(text))
}

/// Escape text for a double-quoted gnuplot string.
pub fn escape_title(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            other => out.push(other),
        }
    }
    out
}

/// Escape text for a single-quoted gnuplot string. Quotes are doubled; line
/// breaks become spaces since single-quoted strings have no escapes.
pub fn escape_label(text: &str) -> String {
    text.replace('\'', "''").replace(['\n', '\r'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_array_source() {
        let cmd = plot_command(false, &[SeriesSpec::array(5, "jake", PlotStyle::Lines)]);
        assert_eq!(cmd, "plot \"-\" binary array=5 title \"jake\" with lines");
    }

    #[test]
    fn two_array_sources() {
        let cmd = plot_command(
            false,
            &[
                SeriesSpec::array(6, "jake1", PlotStyle::Points),
                SeriesSpec::array(4, "jake2", PlotStyle::Points),
            ],
        );
        assert_eq!(
            cmd,
            "plot \"-\" binary array=6 title \"jake1\" with points, \
             \"-\" binary array=4 title \"jake2\" with points"
        );
    }

    #[test]
    fn record_source_for_surface() {
        let cmd = plot_command(true, &[SeriesSpec::record(11, 3, "3d", PlotStyle::Pm3d)]);
        assert_eq!(
            cmd,
            "splot \"-\" binary record=11 format=\"%float64%float64%float64\" \
             using 1:2:3 title \"3d\" with pm3d"
        );
    }

    #[test]
    fn empty_title_is_notitle() {
        let spec = SeriesSpec::array(1, "", PlotStyle::Dots);
        assert_eq!(spec.to_string(), "\"-\" binary array=1 notitle with dots");
    }

    #[test]
    fn title_quotes_escaped() {
        let spec = SeriesSpec::array(1, r#"say "hi" \o/"#, PlotStyle::Lines);
        assert_eq!(
            spec.to_string(),
            r#""-" binary array=1 title "say \"hi\" \\o/" with lines"#
        );
    }

    #[test]
    fn label_quotes_doubled() {
        assert_eq!(
            label_command(Axis::Y, "it's"),
            "set ylabel 'it''s'"
        );
        assert_eq!(label_command(Axis::Z, "a\nb"), "set zlabel 'a b'");
    }

    #[test]
    fn wire_size_counts_columns() {
        assert_eq!(SeriesSpec::array(3, "", PlotStyle::Lines).wire_size(), 24);
        assert_eq!(SeriesSpec::record(3, 2, "", PlotStyle::Lines).wire_size(), 48);
    }
}
