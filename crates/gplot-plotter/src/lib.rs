//! Stateful gnuplot plotter.
//!
//! This is the "just works" layer. Open a plotter, pick a style, label the
//! axes and stream sample arrays to gnuplot in binary form.

pub mod command;
pub mod error;
pub mod plotter;
pub mod style;

pub use command::{escape_label, escape_title, label_command, plot_command, SeriesSpec};
pub use error::{PlotError, Result};
pub use plotter::Plotter;
pub use style::{Axis, PlotStyle, ALLOWED_STYLES};
