use crate::core::dataset::ResultDataset;
use crate::core::option::{ChartKind, VisualOption};
use crate::core::pivot::{PivotConfig, PivotTableInfo};
use crate::core::spec::{DataZoomSpec, SeriesSpec, VisualSpec};
use crate::error::{SpecError, SpecResult};

/// Read-only inputs shared by every pipeline stage.
#[derive(Debug, Clone, Copy)]
pub struct StageContext<'a> {
    pub option: &'a VisualOption,
    pub dataset: &'a ResultDataset,
    pub pivot: &'a PivotConfig,
    /// Alias-preferring field projection.
    pub field_info: &'a PivotTableInfo,
    /// Raw-name field projection.
    pub field_origin_info: &'a PivotTableInfo,
    /// Data-driven pivot projection (category labels / de-measured series).
    pub pivot_info: &'a PivotTableInfo,
    pub has_time_field: bool,
}

/// How one invocation seeds state from the previous draw.
#[derive(Debug, Clone, Copy, Default)]
pub struct RedrawSeed<'a> {
    /// Keep the user's current pan/zoom across this redraw.
    pub keep_range: bool,
    /// Zoom windows currently held by the live rendering engine.
    pub live_zoom: Option<&'a [DataZoomSpec]>,
    /// Series from the previous draw, used to restore selection styling when
    /// the chart is responding to an external filter echo.
    pub previous_series: Option<&'a [SeriesSpec]>,
}

/// Capability set a concrete chart variant supplies to the pipeline.
///
/// `build_skeleton`, `build_series_data` and `is_valid` are contractually
/// required; their defaults raise [`SpecError::MissingOverride`], which is
/// fatal and never absorbed. The per-stage `additional_*` hooks default to
/// identity.
pub trait ChartStrategy {
    fn kind(&self) -> ChartKind;

    /// Initial option skeleton for this chart variant.
    fn build_skeleton(&self, _ctx: &StageContext<'_>) -> SpecResult<VisualSpec> {
        Err(SpecError::MissingOverride {
            step: "build_skeleton",
        })
    }

    /// Converts dataset columns into series.
    fn build_series_data(
        &self,
        _spec: VisualSpec,
        _ctx: &StageContext<'_>,
    ) -> SpecResult<VisualSpec> {
        Err(SpecError::MissingOverride {
            step: "build_series_data",
        })
    }

    /// Whether the shelf configuration can produce this chart at all.
    fn is_valid(&self, _pivot: &PivotConfig) -> SpecResult<bool> {
        Err(SpecError::MissingOverride { step: "is_valid" })
    }

    fn additional_basic(&self, spec: VisualSpec, _ctx: &StageContext<'_>) -> SpecResult<VisualSpec> {
        Ok(spec)
    }

    fn additional_data_info(
        &self,
        spec: VisualSpec,
        _ctx: &StageContext<'_>,
    ) -> SpecResult<VisualSpec> {
        Ok(spec)
    }

    fn additional_x_axis(
        &self,
        spec: VisualSpec,
        _ctx: &StageContext<'_>,
    ) -> SpecResult<VisualSpec> {
        Ok(spec)
    }

    fn additional_y_axis(
        &self,
        spec: VisualSpec,
        _ctx: &StageContext<'_>,
    ) -> SpecResult<VisualSpec> {
        Ok(spec)
    }

    fn additional_series(
        &self,
        spec: VisualSpec,
        _ctx: &StageContext<'_>,
    ) -> SpecResult<VisualSpec> {
        Ok(spec)
    }

    fn additional_tooltip(
        &self,
        spec: VisualSpec,
        _ctx: &StageContext<'_>,
    ) -> SpecResult<VisualSpec> {
        Ok(spec)
    }

    fn additional_data_zoom(
        &self,
        spec: VisualSpec,
        _ctx: &StageContext<'_>,
    ) -> SpecResult<VisualSpec> {
        Ok(spec)
    }

    fn additional_legend(
        &self,
        spec: VisualSpec,
        _ctx: &StageContext<'_>,
    ) -> SpecResult<VisualSpec> {
        Ok(spec)
    }

    fn additional_grid(&self, spec: VisualSpec, _ctx: &StageContext<'_>) -> SpecResult<VisualSpec> {
        Ok(spec)
    }

    fn additional_etc(&self, spec: VisualSpec, _ctx: &StageContext<'_>) -> SpecResult<VisualSpec> {
        Ok(spec)
    }
}
