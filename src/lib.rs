//! vizspec: pivot-driven chart specification synthesis.
//!
//! Turns a pivot shelf configuration, a query result dataset and a visual
//! option into a fully resolved render specification, then drives a pluggable
//! render adapter with it. Selection, zoom windows and resize debouncing are
//! handled engine-side so adapters stay thin.

pub mod api;
pub mod charts;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod pipeline;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartEvent, ResultData};
pub use error::{SpecError, SpecResult};
