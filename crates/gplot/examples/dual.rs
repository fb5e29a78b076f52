//! Two series in one plot, labelled and rendered to the terminal.
//!
//! Run with:
//!   cargo run --example dual

use gplot::{Axis, Plotter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut plotter = Plotter::new(true)?;

    plotter.checked_command("set terminal dumb")?;
    plotter.command("set grid x")?;
    plotter.set_style("linepoints")?;
    plotter.set_labels(&["sample", "value"])?;
    plotter.set_label(Axis::X, "sample index")?;
    plotter.plot_dual(
        &[1.0, 2.0, 4.0, 8.0, 16.0, 32.0],
        &[2.0, 3.0, 4.0, 5.0, 4.0, 5.0],
        "powers",
        "wobble",
    )?;

    plotter.close()?;
    Ok(())
}
