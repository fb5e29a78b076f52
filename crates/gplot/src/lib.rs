//! Drive gnuplot over a pipe with binary sample arrays.
//!
//! gplot spawns `gnuplot`, writes plot commands to its standard input and
//! streams sample data as raw big-endian doubles instead of text.
//!
//! # Crate Structure
//!
//! - [`transport`]: Executable discovery and the child process connection
//! - [`wire`]: Command-line and binary value encoding
//! - [`plotter`]: The stateful [`Plotter`] with styles, labels and plots
//!
//! ```no_run
//! use gplot::Plotter;
//!
//! let mut plotter = Plotter::new(true)?;
//! plotter.set_style("points")?;
//! plotter.set_labels(&["t", "v"])?;
//! plotter.plot_series(&[1.0, 2.0, 4.0, 8.0], "powers")?;
//! plotter.close()?;
//! # Ok::<(), gplot::PlotError>(())
//! ```

/// Re-export transport types.
pub mod transport {
    pub use gplot_transport::*;
}

/// Re-export wire types.
pub mod wire {
    pub use gplot_wire::*;
}

/// Re-export plotter types.
pub mod plotter {
    pub use gplot_plotter::*;
}

pub use gplot_plotter::{Axis, PlotError, PlotStyle, Plotter};
pub use gplot_transport::GnuplotConfig;
