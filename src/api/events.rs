//! Events and parameter payloads exchanged with the surrounding dashboard.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::dataset::ResultDataset;
use crate::core::option::{DrawTrigger, VisualOption};
use crate::core::pivot::{PivotConfig, PivotField};
use crate::interaction::{ChartSelectMode, ZoomRange};

/// Whether a selection came from a single click or a brush drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectKind {
    Single,
    Multi,
}

/// Dashboard-supplied context carried through a draw and echoed back on
/// events.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DrawParams {
    /// Set when the draw was caused by a filter from another widget. A
    /// selection on this chart resets it.
    #[serde(default)]
    pub external_filters: bool,
    /// Selection filters this chart itself emitted earlier; non-empty means
    /// selection styling survives the redraw.
    #[serde(default)]
    pub selection_filters: Vec<Vec<PivotField>>,
    #[serde(default)]
    pub select_type: Option<SelectKind>,
    /// Opaque passthrough for the dashboard.
    #[serde(default)]
    pub extra: Value,
}

/// Selection payload sent with [`ChartEvent::SelectInfo`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSelectInfo {
    pub mode: ChartSelectMode,
    /// Fields whose `filter_data` holds the selected values.
    pub data: Vec<PivotField>,
    pub params: DrawParams,
}

/// Everything a draw request delivers to the engine.
#[derive(Debug, Clone, Default)]
pub struct ResultData {
    pub data: ResultDataset,
    pub pivot: PivotConfig,
    /// Replacement option, when the dashboard edited it.
    pub option: Option<VisualOption>,
    pub params: Option<DrawParams>,
    pub trigger: Option<DrawTrigger>,
}

/// A click on the rendered surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickParams {
    pub series_index: usize,
    pub data_index: usize,
    /// Point name: the compound category label.
    pub name: String,
    /// Series name: row components joined with the measure.
    pub series_name: String,
}

/// Events the engine queues for the dashboard to drain.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartEvent {
    /// The shelf configuration or dataset cannot produce a chart.
    NoData,
    /// A draw completed and reached the render surface.
    DrawFinished,
    SelectInfo(ChartSelectInfo),
    Datazoom(Vec<ZoomRange>),
}
