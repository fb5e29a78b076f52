use std::io::Write;

use gplot_transport::{Connection, GnuplotConfig};
use gplot_wire::{PipeWriter, BINARY_FORMAT_INIT};
use tracing::{debug, warn};

use crate::command::{label_command, plot_command, SeriesSpec};
use crate::error::{PlotError, Result};
use crate::style::{Axis, PlotStyle};

/// A gnuplot session: the pipe plus the current drawing style.
///
/// Every call writes synchronously to the pipe. A failed write leaves the
/// session in an unknown state; open a new plotter rather than continuing.
pub struct Plotter<T = Connection> {
    writer: PipeWriter<T>,
    style: PlotStyle,
    plot_count: usize,
}

impl Plotter<Connection> {
    /// Find `gnuplot` on `PATH`, spawn it and configure binary input.
    pub fn new(persist: bool) -> Result<Self> {
        let config = GnuplotConfig::discover()?.persist(persist);
        Self::open(&config)
    }

    /// Spawn the configured executable and configure binary input.
    ///
    /// If the init command cannot be written the child is closed and
    /// [`PlotError::Init`] is returned.
    pub fn open(config: &GnuplotConfig) -> Result<Self> {
        Self::open_with(config, Self::initialize)
    }

    fn open_with<F>(config: &GnuplotConfig, init: F) -> Result<Self>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let writer = PipeWriter::open(config)?;
        let mut plotter = Self::with_writer(writer);
        if let Err(err) = init(&mut plotter) {
            if let Err(close_err) = plotter.writer.close() {
                debug!(%close_err, "close after failed init also failed");
            }
            return Err(err);
        }
        Ok(plotter)
    }

    /// Close the pipe and wait for gnuplot to exit. Safe to call twice.
    pub fn close(&mut self) -> Result<()> {
        self.writer.close()?;
        Ok(())
    }

    /// Process id of the gnuplot child.
    pub fn id(&self) -> u32 {
        self.writer.get_ref().id()
    }
}

impl<T: Write> Plotter<T> {
    /// Wrap an arbitrary sink. Nothing is written until [`initialize`](Self::initialize)
    /// or a plot call.
    pub fn from_writer(inner: T) -> Self {
        Self::with_writer(PipeWriter::new(inner))
    }

    fn with_writer(writer: PipeWriter<T>) -> Self {
        Self {
            writer,
            style: PlotStyle::default(),
            plot_count: 0,
        }
    }

    /// Declare the binary layout used by every plot call.
    pub fn initialize(&mut self) -> Result<()> {
        self.writer
            .send_command(BINARY_FORMAT_INIT)
            .map_err(PlotError::Init)
    }

    /// Current drawing style.
    pub fn style(&self) -> PlotStyle {
        self.style
    }

    /// Set the drawing style by name.
    ///
    /// Names outside [`ALLOWED_STYLES`](crate::ALLOWED_STYLES) reset the style
    /// to `points` and return [`PlotError::InvalidStyle`].
    pub fn set_style(&mut self, name: &str) -> Result<()> {
        match name.parse::<PlotStyle>() {
            Ok(style) => {
                self.style = style;
                Ok(())
            }
            Err(reason) => {
                warn!(%reason, "defaulting to 'points'");
                self.style = PlotStyle::Points;
                Err(PlotError::InvalidStyle {
                    name: name.to_string(),
                })
            }
        }
    }

    /// Set the drawing style from an already validated value.
    pub fn set_plot_style(&mut self, style: PlotStyle) {
        self.style = style;
    }

    /// Number of plot commands sent so far.
    pub fn plot_count(&self) -> usize {
        self.plot_count
    }

    /// Start counting plot commands from zero again.
    pub fn reset_plot_count(&mut self) {
        self.plot_count = 0;
    }

    /// Plot one series: a single command line followed by the raw values.
    pub fn plot_series(&mut self, values: &[f64], title: &str) -> Result<()> {
        let spec = SeriesSpec::array(values.len(), title, self.style);
        debug!(count = values.len(), title, style = %self.style, "plotting series");
        self.send_plot(false, &[spec])?;
        self.writer.send_values(values)?;
        Ok(())
    }

    /// Plot two series in one command; `a` is streamed before `b`.
    pub fn plot_dual(&mut self, a: &[f64], b: &[f64], title_a: &str, title_b: &str) -> Result<()> {
        let specs = [
            SeriesSpec::array(a.len(), title_a, self.style),
            SeriesSpec::array(b.len(), title_b, self.style),
        ];
        debug!(
            first = a.len(),
            second = b.len(),
            style = %self.style,
            "plotting dual series"
        );
        self.send_plot(false, &specs)?;
        self.writer.send_values(a)?;
        self.writer.send_values(b)?;
        Ok(())
    }

    /// Plot y against x.
    pub fn plot_xy(&mut self, xs: &[f64], ys: &[f64], title: &str) -> Result<()> {
        check_lengths(xs.len(), &[ys.len()])?;
        let spec = SeriesSpec::record(xs.len(), 2, title, self.style);
        self.send_plot(false, &[spec])?;
        self.writer.send_interleaved(&[xs, ys])?;
        Ok(())
    }

    /// Plot a 3D point cloud with `splot`.
    pub fn plot_xyz(&mut self, xs: &[f64], ys: &[f64], zs: &[f64], title: &str) -> Result<()> {
        check_lengths(xs.len(), &[ys.len(), zs.len()])?;
        let spec = SeriesSpec::record(xs.len(), 3, title, self.style);
        self.send_plot(true, &[spec])?;
        self.writer.send_interleaved(&[xs, ys, zs])?;
        Ok(())
    }

    fn send_plot(&mut self, surface: bool, specs: &[SeriesSpec<'_>]) -> Result<()> {
        let line = plot_command(surface, specs);
        self.writer.send_command(&line)?;
        self.plot_count += 1;
        Ok(())
    }

    /// Label a single axis.
    pub fn set_label(&mut self, axis: Axis, text: &str) -> Result<()> {
        self.writer.send_command(&label_command(axis, text))?;
        Ok(())
    }

    /// Label x, y and z in order. Between one and three labels are accepted;
    /// anything else fails before a command is written.
    pub fn set_labels<S: AsRef<str>>(&mut self, labels: &[S]) -> Result<()> {
        if labels.is_empty() || labels.len() > Axis::ALL.len() {
            return Err(PlotError::InvalidDimension(labels.len()));
        }
        for (axis, label) in Axis::ALL.into_iter().zip(labels) {
            self.set_label(axis, label.as_ref())?;
        }
        Ok(())
    }

    /// Send a raw command line.
    pub fn command(&mut self, command: &str) -> Result<()> {
        self.writer.send_command(command)?;
        Ok(())
    }

    /// Send a raw command whose failure the caller treats as fatal.
    ///
    /// Failures come back as [`PlotError::Unrecoverable`] so the caller can
    /// decide whether to abort.
    pub fn checked_command(&mut self, command: &str) -> Result<()> {
        self.writer
            .send_command(command)
            .map_err(|source| PlotError::Unrecoverable {
                command: command.to_string(),
                source,
            })
    }

    /// Borrow the underlying sink.
    pub fn get_ref(&self) -> &T {
        self.writer.get_ref()
    }

    /// Consume the plotter and return the underlying sink.
    pub fn into_inner(self) -> T {
        self.writer.into_inner()
    }
}

fn check_lengths(expected: usize, others: &[usize]) -> Result<()> {
    match others.iter().find(|&&len| len != expected) {
        Some(&found) => Err(PlotError::MismatchedLengths { expected, found }),
        None => Ok(()),
    }
}

impl<T> std::fmt::Debug for Plotter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Plotter")
            .field("style", &self.style)
            .field("plot_count", &self.plot_count)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::io::ErrorKind;

    use gplot_wire::{decode_values, WireError};

    use super::*;

    fn plotter() -> Plotter<Vec<u8>> {
        Plotter::from_writer(Vec::new())
    }

    fn split_line(wire: &[u8]) -> (&str, &[u8]) {
        let end = wire
            .iter()
            .position(|&b| b == b'\n')
            .expect("wire should contain a command line");
        (
            std::str::from_utf8(&wire[..end]).expect("command should be utf-8"),
            &wire[end + 1..],
        )
    }

    #[test]
    fn initialize_sends_binary_format() {
        let mut p = plotter();
        p.initialize().unwrap();
        assert_eq!(
            p.get_ref().as_slice(),
            b"set datafile binary format=\"%float64\" endian=big\n"
        );
    }

    #[test]
    fn plot_series_sends_command_then_values() {
        let values = [0.0, 1.0, -3.25, 1e300, f64::MIN_POSITIVE];
        let mut p = plotter();
        p.plot_series(&values, "jake").unwrap();

        let wire = p.into_inner();
        let (line, rest) = split_line(&wire);
        assert_eq!(line, "plot \"-\" binary array=5 title \"jake\" with lines");
        assert_eq!(rest.len(), values.len() * 8);
        let expected: Vec<u8> = values.iter().flat_map(|v| v.to_be_bytes()).collect();
        assert_eq!(rest, expected.as_slice());
        assert_eq!(decode_values(rest).unwrap(), values.to_vec());
    }

    #[test]
    fn plot_series_uses_current_style() {
        let mut p = plotter();
        p.set_style("impulses").unwrap();
        p.plot_series(&[1.0], "x").unwrap();
        let wire = p.into_inner();
        let (line, _) = split_line(&wire);
        assert!(line.ends_with("with impulses"));
    }

    #[test]
    fn plot_dual_streams_both_blocks() {
        let a = [1.0, 2.0, 4.0, 8.0, 16.0, 32.0];
        let b = [2.0, 3.0, 4.0];
        let mut p = plotter();
        p.plot_dual(&a, &b, "jake1", "jake2").unwrap();
        assert_eq!(p.plot_count(), 1);

        let wire = p.into_inner();
        let (line, rest) = split_line(&wire);
        assert_eq!(
            line,
            "plot \"-\" binary array=6 title \"jake1\" with lines, \
             \"-\" binary array=3 title \"jake2\" with lines"
        );
        let decoded = decode_values(rest).unwrap();
        assert_eq!(&decoded[..6], &a);
        assert_eq!(&decoded[6..], &b);
    }

    #[test]
    fn plot_xy_interleaves_columns() {
        let mut p = plotter();
        p.plot_xy(&[1.0, 2.0], &[10.0, 20.0], "").unwrap();

        let wire = p.into_inner();
        let (line, rest) = split_line(&wire);
        assert_eq!(
            line,
            "plot \"-\" binary record=2 format=\"%float64%float64\" using 1:2 notitle with lines"
        );
        assert_eq!(decode_values(rest).unwrap(), vec![1.0, 10.0, 2.0, 20.0]);
    }

    #[test]
    fn plot_xyz_uses_splot() {
        let mut p = plotter();
        p.set_plot_style(PlotStyle::Points);
        p.plot_xyz(&[0.0, 1.0], &[0.0, 1.0], &[0.0, 1.0], "test 3d plot")
            .unwrap();

        let wire = p.into_inner();
        let (line, rest) = split_line(&wire);
        assert!(line.starts_with("splot \"-\" binary record=2 "));
        assert!(line.contains("using 1:2:3"));
        assert_eq!(rest.len(), 6 * 8);
    }

    #[test]
    fn mismatched_lengths_write_nothing() {
        let mut p = plotter();
        let err = p.plot_xy(&[1.0, 2.0], &[1.0], "").unwrap_err();
        assert!(matches!(
            err,
            PlotError::MismatchedLengths {
                expected: 2,
                found: 1
            }
        ));
        let err = p
            .plot_xyz(&[1.0], &[1.0], &[1.0, 2.0, 3.0], "")
            .unwrap_err();
        assert!(matches!(
            err,
            PlotError::MismatchedLengths {
                expected: 1,
                found: 3
            }
        ));
        assert_eq!(p.plot_count(), 0);
        assert!(p.get_ref().is_empty());
    }

    #[test]
    fn allowed_style_updates_without_error() {
        let mut p = plotter();
        for name in crate::ALLOWED_STYLES {
            p.set_style(name).unwrap();
            assert_eq!(p.style().name(), name);
        }
    }

    #[test]
    fn invalid_style_resets_to_points() {
        let mut p = plotter();
        p.set_style("boxes").unwrap();
        let err = p.set_style("histograms").unwrap_err();
        assert!(matches!(err, PlotError::InvalidStyle { ref name } if name == "histograms"));
        assert_eq!(p.style(), PlotStyle::Points);
        assert!(p.get_ref().is_empty());
    }

    #[test]
    fn names_outside_allow_list_reset_to_points() {
        let mut p = plotter();
        for name in ["linespoints", "histograms", "Lines", ""] {
            p.set_style("boxes").unwrap();
            let err = p.set_style(name).unwrap_err();
            assert!(matches!(err, PlotError::InvalidStyle { name: ref n } if n == name));
            assert_eq!(p.style(), PlotStyle::Points);
        }
    }

    #[test]
    fn linepoints_plots_with_linespoints_keyword() {
        let mut p = plotter();
        p.set_style("linepoints").unwrap();
        p.plot_series(&[1.0], "").unwrap();
        let (line, _) = split_line(p.get_ref());
        assert_eq!(line, "plot \"-\" binary array=1 notitle with linespoints");
    }

    #[test]
    fn reset_plot_count_starts_over() {
        let mut p = plotter();
        p.plot_series(&[1.0], "a").unwrap();
        p.plot_dual(&[1.0], &[2.0], "a", "b").unwrap();
        assert_eq!(p.plot_count(), 2);
        p.reset_plot_count();
        assert_eq!(p.plot_count(), 0);
        p.plot_xy(&[1.0], &[2.0], "").unwrap();
        assert_eq!(p.plot_count(), 1);
    }

    #[test]
    fn set_labels_in_axis_order() {
        let mut p = plotter();
        p.set_labels(&["x", "y", "z"]).unwrap();
        assert_eq!(
            String::from_utf8(p.into_inner()).unwrap(),
            "set xlabel 'x'\nset ylabel 'y'\nset zlabel 'z'\n"
        );
    }

    #[test]
    fn set_labels_partial() {
        let mut p = plotter();
        p.set_labels(&[String::from("time")]).unwrap();
        assert_eq!(p.get_ref().as_slice(), b"set xlabel 'time'\n");
    }

    #[test]
    fn set_labels_rejects_bad_counts_without_writing() {
        let mut p = plotter();
        let none: [&str; 0] = [];
        assert!(matches!(
            p.set_labels(&none),
            Err(PlotError::InvalidDimension(0))
        ));
        assert!(matches!(
            p.set_labels(&["a", "b", "c", "d"]),
            Err(PlotError::InvalidDimension(4))
        ));
        assert!(p.get_ref().is_empty());
    }

    #[test]
    fn set_label_single_axis() {
        let mut p = plotter();
        p.set_label(Axis::Z, "depth").unwrap();
        assert_eq!(p.get_ref().as_slice(), b"set zlabel 'depth'\n");
    }

    #[test]
    fn raw_command_passes_through() {
        let mut p = plotter();
        p.command("set grid x").unwrap();
        p.checked_command("replot").unwrap();
        assert_eq!(p.get_ref().as_slice(), b"set grid x\nreplot\n");
    }

    #[test]
    fn checked_command_failure_is_unrecoverable() {
        let mut p = Plotter::from_writer(BrokenWriter);
        let err = p.checked_command("set output 'x.pdf'").unwrap_err();
        match err {
            PlotError::Unrecoverable { command, source } => {
                assert_eq!(command, "set output 'x.pdf'");
                assert!(matches!(source, WireError::Io(ref io) if io.kind() == ErrorKind::BrokenPipe));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn plain_command_failure_is_write_error() {
        let mut p = Plotter::from_writer(BrokenWriter);
        assert!(matches!(p.command("set grid"), Err(PlotError::Write(_))));
        assert!(matches!(
            p.plot_series(&[1.0], "t"),
            Err(PlotError::Write(_))
        ));
        assert_eq!(p.plot_count(), 0);
    }

    #[test]
    fn initialize_failure_is_init_error() {
        let mut p = Plotter::from_writer(BrokenWriter);
        assert!(matches!(p.initialize(), Err(PlotError::Init(_))));
    }

    #[test]
    fn missing_executable_is_reported() {
        let config = GnuplotConfig::with_executable("/nonexistent/dir/gnuplot");
        let err = Plotter::open(&config).unwrap_err();
        assert!(err.is_executable_not_found());
    }

    #[cfg(unix)]
    #[test]
    fn failed_init_closes_the_child() {
        let dir = std::env::temp_dir().join(format!(
            "gplot-init-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .expect("time should be after epoch")
                .as_nanos()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let marker = dir.join("exited");
        let script = format!("cat >/dev/null; echo done > '{}'", marker.display());
        let config = GnuplotConfig::with_executable("/bin/sh")
            .arg("-c")
            .arg(script);

        let mut pid = 0;
        let err = Plotter::open_with(&config, |p| {
            pid = p.id();
            Err(PlotError::Init(WireError::Closed))
        })
        .unwrap_err();

        assert!(matches!(err, PlotError::Init(WireError::Closed)));
        assert!(pid > 0);
        // The child saw EOF and finished before open returned.
        assert_eq!(std::fs::read_to_string(&marker).unwrap(), "done\n");

        let _ = std::fs::remove_dir_all(&dir);
    }

    struct BrokenWriter;

    impl Write for BrokenWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }
}
