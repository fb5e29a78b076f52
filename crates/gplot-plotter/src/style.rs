use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Names accepted by [`Plotter::set_style`](crate::Plotter::set_style).
pub const ALLOWED_STYLES: [&str; 10] = [
    "lines",
    "points",
    "linepoints",
    "impulses",
    "dots",
    "steps",
    "errorbars",
    "boxes",
    "boxerrorbars",
    "pm3d",
];

/// Drawing style used in the `with` clause of plot commands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotStyle {
    #[default]
    Lines,
    Points,
    LinePoints,
    Impulses,
    Dots,
    Steps,
    ErrorBars,
    Boxes,
    BoxErrorBars,
    Pm3d,
}

impl PlotStyle {
    /// Name as it appears in the allow-list.
    pub fn name(self) -> &'static str {
        match self {
            PlotStyle::Lines => "lines",
            PlotStyle::Points => "points",
            PlotStyle::LinePoints => "linepoints",
            PlotStyle::Impulses => "impulses",
            PlotStyle::Dots => "dots",
            PlotStyle::Steps => "steps",
            PlotStyle::ErrorBars => "errorbars",
            PlotStyle::Boxes => "boxes",
            PlotStyle::BoxErrorBars => "boxerrorbars",
            PlotStyle::Pm3d => "pm3d",
        }
    }

    /// Keyword written after `with`. gnuplot only understands `linespoints`.
    pub fn keyword(self) -> &'static str {
        match self {
            PlotStyle::LinePoints => "linespoints",
            other => other.name(),
        }
    }
}

impl fmt::Display for PlotStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlotStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lines" => Ok(PlotStyle::Lines),
            "points" => Ok(PlotStyle::Points),
            "linepoints" => Ok(PlotStyle::LinePoints),
            "impulses" => Ok(PlotStyle::Impulses),
            "dots" => Ok(PlotStyle::Dots),
            "steps" => Ok(PlotStyle::Steps),
            "errorbars" => Ok(PlotStyle::ErrorBars),
            "boxes" => Ok(PlotStyle::Boxes),
            "boxerrorbars" => Ok(PlotStyle::BoxErrorBars),
            "pm3d" => Ok(PlotStyle::Pm3d),
            other => Err(format!(
                "style '{other}' not in allowed list {ALLOWED_STYLES:?}"
            )),
        }
    }
}

/// Plot axis that can carry a label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Axes in the order `set_labels` assigns them.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// The `set` option name for this axis' label.
    pub fn label_option(self) -> &'static str {
        match self {
            Axis::X => "xlabel",
            Axis::Y => "ylabel",
            Axis::Z => "zlabel",
        }
    }
}
