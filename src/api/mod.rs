mod engine;
mod events;
mod resize;

pub use engine::ChartEngine;
pub use events::{
    ChartEvent, ChartSelectInfo, ClickParams, DrawParams, ResultData, SelectKind,
};
pub use resize::ResizeDebouncer;
