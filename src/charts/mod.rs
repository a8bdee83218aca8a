//! Charts module - word cloud layout and chart rendering

mod layout;
mod plotter;
mod renderer;
mod spec;

pub use plotter::ChartPlotter;
pub use renderer::StaticChartRenderer;
pub use spec::BarChartSpec;
