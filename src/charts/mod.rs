//! Concrete chart variants.

mod bar;
mod line;
mod pie;
mod waterfall;

pub use bar::BarChart;
pub use line::LineChart;
pub use pie::PieChart;
pub use waterfall::WaterfallChart;

use crate::core::option::ChartKind;
use crate::pipeline::ChartStrategy;

/// The strategy implementing a chart kind.
#[must_use]
pub fn strategy_for(kind: ChartKind) -> Box<dyn ChartStrategy> {
    match kind {
        ChartKind::Bar => Box::new(BarChart),
        ChartKind::Line => Box::new(LineChart),
        ChartKind::Pie => Box::new(PieChart),
        ChartKind::Waterfall => Box::new(WaterfallChart),
    }
}
